use crate::domain::{PhoneNumber, PhoneVerdict};
use crate::providers::{PhoneValidatorClient, ProviderError};
use crate::routes::error_chain_fmt;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use std::fmt::Formatter;

#[derive(serde::Deserialize)]
pub struct PhoneRequest {
    phone: Option<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct PhoneAccepted {
    valid: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    international_format: Option<String>,
}

#[derive(thiserror::Error)]
pub enum PhoneValidationError {
    #[error("Phone number must have at least 8 digits")]
    TooShort,
    #[error("Phone verification service not configured.")]
    NotConfigured,
    #[error("This phone number is not valid. Please enter a valid number.")]
    Invalid,
    #[error("{0}")]
    ProviderRejected(String),
    #[error("Could not verify phone number. Please try again.")]
    ProviderUnavailable(#[source] ProviderError),
    #[error("Phone validation failed. Please try again.")]
    UnexpectedError(#[source] ProviderError),
}

impl std::fmt::Debug for PhoneValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<ProviderError> for PhoneValidationError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::NotConfigured => PhoneValidationError::NotConfigured,
            e if e.is_unavailable() => PhoneValidationError::ProviderUnavailable(e),
            e => PhoneValidationError::UnexpectedError(e),
        }
    }
}

impl ResponseError for PhoneValidationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "valid": false,
            "message": self.to_string(),
        }))
    }
}

#[tracing::instrument(
    name = "Validating a phone number",
    skip(body, validator),
    fields(phone = tracing::field::Empty)
)]
pub async fn validate_phone(
    body: web::Json<PhoneRequest>,
    validator: web::Data<PhoneValidatorClient>,
) -> Result<HttpResponse, PhoneValidationError> {
    let phone = PhoneNumber::parse(body.0.phone.unwrap_or_default()).map_err(|e| {
        tracing::info!(reason = %e, "Phone number rejected before verification");
        PhoneValidationError::TooShort
    })?;
    tracing::Span::current().record("phone", &tracing::field::display(&phone));

    let verification = validator.validate(&phone).await.map_err(|e| {
        tracing::error!(error.cause_chain = ?e, "Phone validation call failed");
        PhoneValidationError::from(e)
    })?;

    match verification.verdict() {
        PhoneVerdict::Valid(valid) => {
            tracing::info!(
                country = ?valid.country_name,
                phone_type = ?valid.phone_type,
                carrier = ?valid.carrier,
                "Phone number is valid"
            );
            let message = format!(
                "Valid {} number",
                valid.country_name.as_deref().unwrap_or("phone")
            );
            Ok(HttpResponse::Ok().json(PhoneAccepted {
                valid: true,
                message,
                country: valid.country,
                country_name: valid.country_name,
                phone_type: valid.phone_type,
                carrier: valid.carrier,
                international_format: valid.international_format,
            }))
        }
        PhoneVerdict::Invalid => Err(PhoneValidationError::Invalid),
        PhoneVerdict::ProviderError(details) => {
            tracing::warn!(details = ?details, "Phone validator reported an error");
            Err(PhoneValidationError::ProviderRejected(
                details.unwrap_or_else(|| "Phone verification failed.".to_string()),
            ))
        }
    }
}
