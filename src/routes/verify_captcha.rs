use crate::domain::CaptchaToken;
use crate::providers::{CaptchaVerifierClient, ProviderError};
use crate::routes::error_chain_fmt;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use std::fmt::Formatter;

#[derive(serde::Deserialize)]
pub struct CaptchaRequest {
    token: Option<String>,
}

#[derive(serde::Serialize)]
struct CaptchaResponse {
    success: bool,
}

#[derive(thiserror::Error)]
pub enum CaptchaError {
    #[error("No captcha token was provided")]
    MissingToken,
    #[error("Captcha verification failed")]
    Provider(#[from] ProviderError),
}

impl std::fmt::Debug for CaptchaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for CaptchaError {
    fn status_code(&self) -> StatusCode {
        match self {
            CaptchaError::MissingToken => StatusCode::BAD_REQUEST,
            CaptchaError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(CaptchaResponse { success: false })
    }
}

#[tracing::instrument(name = "Verifying a captcha token", skip(body, verifier))]
pub async fn verify_captcha(
    body: web::Json<CaptchaRequest>,
    verifier: web::Data<CaptchaVerifierClient>,
) -> Result<HttpResponse, CaptchaError> {
    let token = CaptchaToken::parse(body.0.token.unwrap_or_default())
        .map_err(|_| CaptchaError::MissingToken)?;

    let success = verifier.verify(&token).await.map_err(|e| {
        tracing::error!(error.cause_chain = ?e, "Captcha verification call failed");
        CaptchaError::from(e)
    })?;
    tracing::info!(success, "Captcha verification received");

    Ok(HttpResponse::Ok().json(CaptchaResponse { success }))
}
