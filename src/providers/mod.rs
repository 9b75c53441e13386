//! HTTP clients for the third-party services the contact form depends on.
//!
//! Every client makes exactly one attempt per call; there is no retry.

mod captcha_verifier;
mod email_delivery;
mod email_verifier;
mod phone_validator;

pub use captcha_verifier::CaptchaVerifierClient;
pub use email_delivery::{EmailDeliveryClient, TemplateParams};
pub use email_verifier::EmailVerifierClient;
pub use phone_validator::PhoneValidatorClient;

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("The provider API key is not configured")]
    NotConfigured,
    #[error("Failed to reach the provider")]
    Transport(#[source] reqwest::Error),
    #[error("The provider answered with status {status}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Failed to decode the provider response")]
    Decode(#[source] reqwest::Error),
    #[error("The provider response did not contain any verification data")]
    MissingData,
}

impl ProviderError {
    /// True when the provider could not be reached or refused the call,
    /// as opposed to answering with something we could not read.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ProviderError::Transport(_) | ProviderError::Status { .. })
    }
}

/// Turn a non-2xx answer into `ProviderError::Status`, keeping the body text.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Status { status, body })
}

fn build_http_client(timeout: std::time::Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}
