//! HTTP client for the geotogether API.

use std::time::Duration;

use tracing::debug;

use super::error::ApiError;
use super::token::{AccessToken, Credentials};
use super::types::{
    DetailSystemsResponse, LiveDataSnapshot, LoginRequest, LoginResponse, SystemId,
};

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.geotogether.com";

/// Upper bound for a single request so a hung call cannot stall the poll loop
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the geotogether API
#[derive(Debug, Clone)]
pub struct GeoClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeoClient {
    /// Creates a client for the production API
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (trailing slash ignored)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("geolive/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Log in and return the issued access token
    pub async fn login(&self, credentials: &Credentials) -> Result<AccessToken, ApiError> {
        debug!("Logging in as {}", credentials.username);

        let resp: LoginResponse = self
            .http
            .post(format!("{}/usersservice/v2/login", self.base_url))
            .json(&LoginRequest {
                identity: &credentials.username,
                password: &credentials.password,
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(AccessToken::new(resp.access_token))
    }

    /// List the identifiers of every system on the account, in API order
    pub async fn list_systems(&self, token: &AccessToken) -> Result<Vec<SystemId>, ApiError> {
        let resp: DetailSystemsResponse = self
            .http
            .get(format!("{}/api/userapi/v2/user/detail-systems", self.base_url))
            .query(&[("systemDetails", "true")])
            .bearer_auth(token.as_str())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp
            .system_details
            .into_iter()
            .map(|detail| detail.system_id)
            .collect())
    }

    /// Fetch the current live-usage snapshot for a system
    pub async fn live_data(
        &self,
        token: &AccessToken,
        system: &SystemId,
    ) -> Result<LiveDataSnapshot, ApiError> {
        let snapshot = self
            .http
            .get(format!(
                "{}/api/userapi/system/live-data/{}",
                self.base_url, system
            ))
            .bearer_auth(token.as_str())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> Credentials {
        Credentials::new("me@example.com", "hunter2")
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = GeoClient::with_base_url("http://localhost:1234/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
    }

    #[tokio::test]
    async fn test_login_posts_identity_and_password() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/usersservice/v2/login"))
            .and(body_json(serde_json::json!({
                "identity": "me@example.com",
                "password": "hunter2"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accessToken": "issued-token",
                "displayName": "Me"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeoClient::with_base_url(server.uri()).unwrap();
        let token = client.login(&credentials()).await.unwrap();
        assert_eq!(token.as_str(), "issued-token");
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/usersservice/v2/login"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeoClient::with_base_url(server.uri()).unwrap();
        let err = client.login(&credentials()).await.unwrap_err();
        assert!(matches!(err, ApiError::Http(ref e) if e.status().map(|s| s.as_u16()) == Some(401)));
    }

    #[tokio::test]
    async fn test_list_systems_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/userapi/v2/user/detail-systems"))
            .and(query_param("systemDetails", "true"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "systemDetails": [{"systemId": "A"}, {"systemId": "B"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeoClient::with_base_url(server.uri()).unwrap();
        let systems = client
            .list_systems(&AccessToken::new("tok"))
            .await
            .unwrap();
        assert_eq!(systems, vec![SystemId::new("A"), SystemId::new("B")]);
    }

    #[tokio::test]
    async fn test_live_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/userapi/system/live-data/sys-1"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "utc": 1700000000,
                "power": [{"type": "IMPORT", "watts": 450}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeoClient::with_base_url(server.uri()).unwrap();
        let snapshot = client
            .live_data(&AccessToken::new("tok"), &SystemId::new("sys-1"))
            .await
            .unwrap();
        assert_eq!(snapshot.utc, 1_700_000_000);
        assert_eq!(snapshot.watts(LiveDataSnapshot::IMPORT), Some(450.0));
    }

    #[tokio::test]
    async fn test_live_data_unauthorized_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/userapi/system/live-data/sys-1"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeoClient::with_base_url(server.uri()).unwrap();
        let result = client
            .live_data(&AccessToken::new("tok"), &SystemId::new("sys-1"))
            .await;
        assert!(matches!(result, Err(ApiError::Http(_))));
    }
}
