use super::{build_http_client, ensure_success, ProviderError};
use crate::domain::CaptchaToken;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Client for a reCAPTCHA-style `siteverify` endpoint.
pub struct CaptchaVerifierClient {
    http_client: Client,
    base_url: String,
    secret_key: Option<Secret<String>>,
}

#[derive(serde::Deserialize)]
struct SiteVerifyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

impl CaptchaVerifierClient {
    pub fn new(
        base_url: String,
        secret_key: Option<Secret<String>>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: build_http_client(timeout)?,
            base_url,
            secret_key,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }

    /// Returns the provider's `success` flag as is.
    #[tracing::instrument(name = "Calling the captcha verifier", skip(self, token))]
    pub async fn verify(&self, token: &CaptchaToken) -> Result<bool, ProviderError> {
        let secret_key = self.secret_key.as_ref().ok_or(ProviderError::NotConfigured)?;
        let url = format!("{}/recaptcha/api/siteverify", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .form(&[("secret", secret_key.expose_secret().as_str()), ("response", token.as_ref())])
            .send()
            .await
            .map_err(ProviderError::Transport)?;
        let response = ensure_success(response).await?;
        let body: SiteVerifyResponse = response.json().await.map_err(ProviderError::Decode)?;
        if !body.error_codes.is_empty() {
            tracing::info!(error_codes = ?body.error_codes, "Captcha provider returned error codes");
        }
        Ok(body.success)
    }
}
