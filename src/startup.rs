use std::time::Duration;

use crate::error::AppError;

/// Seconds before an individual upstream HTTP request is abandoned.
const REQUEST_TIMEOUT_SECONDS: u64 = 20;

/// Builds the shared reqwest client used for all Figma API calls.
///
/// Redirects are disabled so a compromised upstream response cannot bounce the
/// bearer token to an arbitrary host, and a per-request timeout keeps a stuck
/// upstream call from pinning a request handler indefinitely.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client ready for use
/// - `Err(AppError)` - Client construction failed (invalid TLS backend state)
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
        .user_agent("Frameweaver/1.0")
        .build()
        .map_err(|err| AppError::InternalError(format!("Failed to build HTTP client: {err}")))
}
