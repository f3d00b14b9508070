use tracing::debug;

use super::client::GeoClient;
use super::error::ApiError;
use super::token::AccessToken;
use super::types::SystemId;

/// Pick the system to poll.
///
/// An explicit id is returned as-is without any network call; otherwise the
/// first system on the account is used.
pub async fn resolve_system(
    client: &GeoClient,
    token: &AccessToken,
    explicit: Option<&SystemId>,
) -> Result<SystemId, ApiError> {
    if let Some(id) = explicit {
        return Ok(id.clone());
    }

    let system = client
        .list_systems(token)
        .await?
        .into_iter()
        .next()
        .ok_or(ApiError::NoSystems)?;

    debug!("Discovered system {}", system);
    Ok(system)
}
