use super::{build_http_client, ensure_success, ProviderError};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Client for an EmailJS-style template delivery API.
///
/// The contact message is rendered by a template held by the provider; we
/// only ship the template variables.
pub struct EmailDeliveryClient {
    http_client: Client,
    base_url: String,
    service_id: String,
    template_id: String,
    public_key: Secret<String>,
}

/// Variables the delivery template expects.
#[derive(serde::Serialize, Debug)]
pub struct TemplateParams<'a> {
    pub user_name: &'a str,
    pub user_email: &'a str,
    pub company: &'a str,
    pub phone: &'a str,
    pub message: &'a str,
    pub reply_to: &'a str,
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams<'a>,
}

impl EmailDeliveryClient {
    pub fn new(
        base_url: String,
        service_id: String,
        template_id: String,
        public_key: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: build_http_client(timeout)?,
            base_url,
            service_id,
            template_id,
            public_key,
        })
    }

    #[tracing::instrument(name = "Delivering a contact message", skip(self, params))]
    pub async fn send(&self, params: &TemplateParams<'_>) -> Result<(), ProviderError> {
        let url = format!("{}/api/v1.0/email/send", self.base_url);
        let request_body = SendEmailRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: self.public_key.expose_secret(),
            template_params: params,
        };
        let response = self
            .http_client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(ProviderError::Transport)?;
        ensure_success(response).await?;
        Ok(())
    }
}
