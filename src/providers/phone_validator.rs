use super::{build_http_client, ensure_success, ProviderError};
use crate::domain::{PhoneNumber, PhoneVerification};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Client for an Abstract-style phone validation API.
pub struct PhoneValidatorClient {
    http_client: Client,
    base_url: String,
    api_key: Option<Secret<String>>,
}

impl PhoneValidatorClient {
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

    #[tracing::instrument(name = "Calling the phone validator", skip(self, phone))]
    pub async fn validate(&self, phone: &PhoneNumber) -> Result<PhoneVerification, ProviderError> {
        let api_key = self.api_key.as_ref().ok_or(ProviderError::NotConfigured)?;
        let url = format!("{}/v1/", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key.expose_secret().as_str()), ("phone", phone.as_ref())])
            .send()
            .await
            .map_err(ProviderError::Transport)?;
        let response = ensure_success(response).await?;
        response.json().await.map_err(ProviderError::Decode)
    }
}
