//! Credential health probing.
//!
//! Validation is routinely polled for UI status display, so it never returns
//! an error: every outcome, including transport failure, is folded into a
//! structured `ValidationResult` with a remediation action. Results are
//! produced fresh on every call and never cached.

use crate::{
    error::figma::FigmaError,
    model::{
        credential::Credential,
        validation::{IssueCode, Remediation, ValidationResult},
    },
    service::figma::{wire::WireIdentity, FigmaService},
};

impl FigmaService {
    /// Fetches the identity behind a credential from `GET /v1/me`.
    ///
    /// Non-success statuses are classified into the error taxonomy; transport
    /// failures map to `Unreachable`.
    pub(crate) async fn fetch_identity(
        &self,
        credential: &Credential,
    ) -> Result<WireIdentity, FigmaError> {
        let response = self
            .http
            .get(self.api_url("/v1/me"))
            .bearer_auth(&credential.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FigmaError::from_status(
                status,
                &body,
                "identity endpoint rejected the credential",
            ));
        }

        response
            .json::<WireIdentity>()
            .await
            .map_err(|err| FigmaError::Upstream {
                status: status.as_u16(),
                body: format!("invalid identity payload: {err}"),
            })
    }

    /// Probes a credential against the identity endpoint and classifies its
    /// health. Never fails.
    ///
    /// An already-expired credential short-circuits to `auth-invalid` without
    /// a network call.
    pub async fn validate(&self, credential: &Credential) -> ValidationResult {
        if credential.is_expired() {
            let expiry = credential
                .expires_at
                .map(|at| at.to_rfc3339())
                .unwrap_or_default();

            return ValidationResult::invalid(
                IssueCode::AuthInvalid,
                format!("Figma token expired at {expiry}. Reconnect your Figma account."),
                Remediation::Reconnect,
            );
        }

        match self.fetch_identity(credential).await {
            Ok(identity) => {
                let who = identity
                    .email
                    .clone()
                    .or_else(|| identity.handle.clone())
                    .unwrap_or_else(|| "unknown user".to_string());

                ValidationResult::valid(format!("Figma connected as {who}"))
            }
            Err(FigmaError::AuthInvalid(_)) => ValidationResult::invalid(
                IssueCode::AuthInvalid,
                "Figma token invalid or expired. Reconnect your Figma account.".to_string(),
                Remediation::Reconnect,
            ),
            Err(FigmaError::PermissionDenied(_)) => ValidationResult::invalid(
                IssueCode::PermissionDenied,
                "Figma token lacks the required permissions. Reconnect your Figma account."
                    .to_string(),
                Remediation::Reconnect,
            ),
            // Anything else (transport failure, upstream 5xx) is transient:
            // the caller retries, the user has nothing to fix.
            Err(err) => {
                tracing::warn!("Figma validation probe failed: {}", err);

                ValidationResult::invalid(
                    IssueCode::Unreachable,
                    "Could not reach the Figma API to verify the connection.".to_string(),
                    Remediation::None,
                )
            }
        }
    }

    /// Validates a possibly-missing credential.
    ///
    /// A missing credential reports `not-connected` with a `connect`
    /// remediation, as opposed to a present-but-rejected credential which
    /// asks for a reconnect.
    pub async fn validate_connection(&self, credential: Option<&Credential>) -> ValidationResult {
        match credential {
            Some(credential) => self.validate(credential).await,
            None => ValidationResult::invalid(
                IssueCode::NotConnected,
                "Figma is not connected.".to_string(),
                Remediation::Connect,
            ),
        }
    }
}
