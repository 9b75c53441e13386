use crate::domain::{ContactEmail, Deliverability, EmailVerdict};
use crate::providers::{EmailVerifierClient, ProviderError};
use crate::routes::error_chain_fmt;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use std::fmt::Formatter;

#[derive(serde::Deserialize)]
pub struct EmailRequest {
    email: Option<String>,
}

#[derive(serde::Serialize)]
struct EmailAccepted {
    valid: bool,
    message: &'static str,
    score: Option<serde_json::Value>,
    result: Option<Deliverability>,
}

#[derive(serde::Serialize)]
struct EmailRejected {
    #[serde(skip_serializing_if = "Option::is_none")]
    valid: Option<bool>,
    message: String,
}

#[derive(thiserror::Error)]
pub enum EmailValidationError {
    #[error("Invalid email format")]
    InvalidFormat,
    #[error("Email verification service not configured.")]
    NotConfigured,
    #[error("This email address is undeliverable. Please use a valid email.")]
    Undeliverable,
    #[error("This email address is invalid. Please check and try again.")]
    Invalid,
    #[error("Disposable email addresses are not allowed.")]
    Disposable,
    #[error("Invalid email verification response.")]
    MissingData,
    #[error("Could not verify email address. Please try again.")]
    ProviderUnavailable(#[source] ProviderError),
    #[error("Email validation failed. Please try again.")]
    UnexpectedError(#[source] ProviderError),
}

impl std::fmt::Debug for EmailValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<ProviderError> for EmailValidationError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::NotConfigured => EmailValidationError::NotConfigured,
            ProviderError::MissingData => EmailValidationError::MissingData,
            e if e.is_unavailable() => EmailValidationError::ProviderUnavailable(e),
            e => EmailValidationError::UnexpectedError(e),
        }
    }
}

impl EmailValidationError {
    /// The provider looked at the address and turned it down.
    fn is_rejection(&self) -> bool {
        matches!(
            self,
            EmailValidationError::Undeliverable
                | EmailValidationError::Invalid
                | EmailValidationError::Disposable
        )
    }
}

impl ResponseError for EmailValidationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(EmailRejected {
            valid: self.is_rejection().then(|| false),
            message: self.to_string(),
        })
    }
}

#[tracing::instrument(
    name = "Validating an email address",
    skip(body, verifier),
    fields(email = tracing::field::Empty)
)]
pub async fn validate_email(
    body: web::Json<EmailRequest>,
    verifier: web::Data<EmailVerifierClient>,
) -> Result<HttpResponse, EmailValidationError> {
    let email = ContactEmail::parse(body.0.email.unwrap_or_default())
        .map_err(|_| EmailValidationError::InvalidFormat)?;
    tracing::Span::current().record("email", &tracing::field::display(&email));

    let verification = verifier.verify(&email).await.map_err(|e| {
        tracing::error!(error.cause_chain = ?e, "Email verification call failed");
        EmailValidationError::from(e)
    })?;
    tracing::info!(
        status = ?verification.status,
        result = ?verification.result,
        score = ?verification.score,
        disposable = ?verification.disposable,
        "Email verification received"
    );

    let message = match verification.verdict() {
        EmailVerdict::Accepted => "Email verified successfully",
        EmailVerdict::AcceptedUncertain => {
            tracing::warn!("Uncertain email verification, accepting the address");
            "Email verified"
        }
        EmailVerdict::Undeliverable => return Err(EmailValidationError::Undeliverable),
        EmailVerdict::Invalid => return Err(EmailValidationError::Invalid),
        EmailVerdict::Disposable => return Err(EmailValidationError::Disposable),
    };

    Ok(HttpResponse::Ok().json(EmailAccepted {
        valid: true,
        message,
        score: verification.score,
        result: verification.result,
    }))
}
