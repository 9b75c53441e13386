use super::{build_http_client, ensure_success, ProviderError};
use crate::domain::{ContactEmail, EmailVerification};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Client for a Hunter-style email verifier.
pub struct EmailVerifierClient {
    http_client: Client,
    base_url: String,
    api_key: Option<Secret<String>>,
}

#[derive(serde::Deserialize)]
struct VerifierResponse {
    data: Option<EmailVerification>,
}

impl EmailVerifierClient {
    pub fn new(
        base_url: String,
        api_key: Option<Secret<String>>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: build_http_client(timeout)?,
            base_url,
            api_key,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[tracing::instrument(name = "Calling the email verifier", skip(self, email))]
    pub async fn verify(&self, email: &ContactEmail) -> Result<EmailVerification, ProviderError> {
        let api_key = self.api_key.as_ref().ok_or(ProviderError::NotConfigured)?;
        let url = format!("{}/v2/email-verifier", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("email", email.as_ref()), ("api_key", api_key.expose_secret().as_str())])
            .send()
            .await
            .map_err(ProviderError::Transport)?;
        let response = ensure_success(response).await?;
        let body: VerifierResponse = response.json().await.map_err(ProviderError::Decode)?;
        body.data.ok_or(ProviderError::MissingData)
    }
}
