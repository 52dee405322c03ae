//! HTTP request handlers.
//!
//! Controllers validate the request identity, enforce the upstream deadline,
//! delegate to the service layer, and convert results into DTOs. No business
//! logic lives here.

pub mod auth;
pub mod debug;
pub mod designs;
pub mod integrations;

use std::future::Future;
use std::time::Duration;

use crate::{
    config::Config,
    error::{figma::FigmaError, AppError},
};

/// Bounds an upstream-facing service call by the configured deadline.
///
/// A handler that blows the deadline answers `503 unreachable` rather than
/// holding the connection open while the upstream hangs. The deadline covers
/// the whole service call, fan-out included.
pub(crate) async fn with_deadline<T, E, F>(
    config: &Config,
    operation: &str,
    future: F,
) -> Result<T, AppError>
where
    E: Into<AppError>,
    F: Future<Output = Result<T, E>>,
{
    let deadline = Duration::from_secs(config.upstream_deadline_seconds);

    match tokio::time::timeout(deadline, future).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            tracing::warn!(
                "{} exceeded the {}s upstream deadline",
                operation,
                config.upstream_deadline_seconds
            );

            Err(FigmaError::Unreachable(format!(
                "{operation} did not complete within the upstream deadline"
            ))
            .into())
        }
    }
}
