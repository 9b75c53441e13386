use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse};

pub mod health_check;
pub mod validate_email;
pub mod validate_phone;
pub mod verify_captcha;

pub use health_check::health_check;
pub use validate_email::validate_email;
pub use validate_phone::validate_phone;
pub use verify_captcha::verify_captcha;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// Answer unreadable JSON bodies with `{message}` and a 400.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error = %err, "Rejected an unreadable request body");
    let response = HttpResponse::BadRequest().json(serde_json::json!({
        "message": "Invalid request body"
    }));
    InternalError::from_response(err, response).into()
}

/// Phone answers always carry `valid: false` on a 400.
pub fn phone_json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error = %err, "Rejected an unreadable phone request body");
    let response = HttpResponse::BadRequest().json(serde_json::json!({
        "valid": false,
        "message": "Invalid request body"
    }));
    InternalError::from_response(err, response).into()
}

/// The CAPTCHA endpoint only ever speaks `{success}`.
pub fn captcha_json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error = %err, "Rejected an unreadable captcha request body");
    let response = HttpResponse::BadRequest().json(serde_json::json!({ "success": false }));
    InternalError::from_response(err, response).into()
}
