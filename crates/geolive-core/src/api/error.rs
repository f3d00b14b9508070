use thiserror::Error;

/// Error type for geotogether API calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure, non-2xx status or undecodable response body
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The account does not own any monitored system
    #[error("account has no systems")]
    NoSystems,
}

/// Why an access token's expiry could not be read
#[derive(Debug, Error)]
pub enum TokenError {
    /// Fewer than two dot-separated segments
    #[error("token is not a JWT")]
    NotJwt,

    #[error("invalid payload encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("no exp claim")]
    MissingExpiry,

    #[error("exp out of range: {0}")]
    ExpiryOutOfRange(f64),
}
