use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::providers::{CaptchaVerifierClient, EmailVerifierClient, PhoneValidatorClient};
use crate::routes;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let email_verifier = EmailVerifierClient::new(
            configuration.email_verifier.base_url.clone(),
            configuration.email_verifier.api_key(),
            configuration.email_verifier.timeout(),
        )?;
        let phone_validator = PhoneValidatorClient::new(
            configuration.phone_validator.base_url.clone(),
            configuration.phone_validator.api_key(),
            configuration.phone_validator.timeout(),
        )?;
        let captcha_verifier = CaptchaVerifierClient::new(
            configuration.captcha_verifier.base_url.clone(),
            configuration.captcha_verifier.api_key(),
            configuration.captcha_verifier.timeout(),
        )?;

        tracing::info!(
            email_verifier = email_verifier.is_configured(),
            phone_validator = phone_validator.is_configured(),
            captcha_verifier = captcha_verifier.is_configured(),
            "Provider keys loaded"
        );

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            email_verifier,
            phone_validator,
            captcha_verifier,
            configuration.application.allowed_origins,
        )?;
        tracing::info!(%address, port, "Validation API server listening");

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600);
    if allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }
    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

pub fn run(
    listener: TcpListener,
    email_verifier: EmailVerifierClient,
    phone_validator: PhoneValidatorClient,
    captcha_verifier: CaptchaVerifierClient,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    let email_verifier = Data::new(email_verifier);
    let phone_validator = Data::new(phone_validator);
    let captcha_verifier = Data::new(captcha_verifier);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_origins))
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(routes::json_error_handler))
            .route("/health", web::get().to(routes::health_check))
            .route("/api/validate-email", web::post().to(routes::validate_email))
            .service(
                web::resource("/api/validate-phone")
                    .app_data(
                        web::JsonConfig::default().error_handler(routes::phone_json_error_handler),
                    )
                    .route(web::post().to(routes::validate_phone)),
            )
            .service(
                web::resource("/api/verify-captcha")
                    .app_data(
                        web::JsonConfig::default()
                            .error_handler(routes::captcha_json_error_handler),
                    )
                    .route(web::post().to(routes::verify_captcha)),
            )
            .app_data(email_verifier.clone())
            .app_data(phone_validator.clone())
            .app_data(captcha_verifier.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
