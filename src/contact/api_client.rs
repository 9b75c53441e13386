use reqwest::Client;

/// Result of one backend gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Accepted,
    Rejected(String),
}

#[derive(serde::Deserialize)]
struct MessageBody {
    message: Option<String>,
}

#[derive(serde::Deserialize)]
struct SuccessBody {
    #[serde(default)]
    success: bool,
}

/// Calls the validation API endpoints on behalf of the form.
pub struct ValidationApiClient {
    http_client: Client,
    base_url: String,
}

impl ValidationApiClient {
    pub fn new(base_url: String, timeout: std::time::Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Whether the backend vouched for the token. Error responses carry
    /// `{success:false}` too, so the body is read regardless of status.
    #[tracing::instrument(name = "Verifying captcha with the API", skip(self, token))]
    pub async fn verify_captcha(&self, token: &str) -> Result<bool, reqwest::Error> {
        let body: SuccessBody = self
            .http_client
            .post(&format!("{}/api/verify-captcha", self.base_url))
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await?
            .json()
            .await?;
        Ok(body.success)
    }

    #[tracing::instrument(name = "Validating email with the API", skip(self, email))]
    pub async fn validate_email(&self, email: &str) -> Result<GateOutcome, reqwest::Error> {
        self.gate(
            "/api/validate-email",
            serde_json::json!({ "email": email }),
            "Email validation failed. Please try again.",
        )
        .await
    }

    #[tracing::instrument(name = "Validating phone with the API", skip(self, phone))]
    pub async fn validate_phone(&self, phone: &str) -> Result<GateOutcome, reqwest::Error> {
        self.gate(
            "/api/validate-phone",
            serde_json::json!({ "phone": phone }),
            "Phone validation failed. Please try again.",
        )
        .await
    }

    async fn gate(
        &self,
        endpoint: &str,
        body: serde_json::Value,
        fallback_message: &str,
    ) -> Result<GateOutcome, reqwest::Error> {
        let response = self
            .http_client
            .post(&format!("{}{}", self.base_url, endpoint))
            .json(&body)
            .send()
            .await?;
        if response.status().is_success() {
            return Ok(GateOutcome::Accepted);
        }
        let message = response
            .json::<MessageBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| fallback_message.to_string());
        Ok(GateOutcome::Rejected(message))
    }
}
