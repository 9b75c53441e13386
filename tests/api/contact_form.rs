use crate::helpers::{spawn_app, TestApp};
use claims::{assert_err, assert_ok};
use taranova_contact::contact::{
    ContactSession, FormField, SubmissionState, SubmitError, ValidationStep,
};
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn fill_in(session: &mut ContactSession) {
    session.select_country_code("+1");
    session.edit(FormField::Name, "John");
    session.edit(FormField::Email, "john@x.com");
    session.edit(FormField::Mobile, "5551234567");
    session.edit(FormField::Message, "hi");
    session.set_captcha_token(Some("a-valid-token".into()));
}

async fn mount_captcha_accepts(app: &TestApp) {
    Mock::given(method("POST"))
        .and(path("/recaptcha/api/siteverify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })))
        .expect(1)
        .mount(&app.captcha_verifier)
        .await;
}

async fn mount_email_accepts(app: &TestApp) {
    Mock::given(method("GET"))
        .and(path("/v2/email-verifier"))
        .and(query_param("email", "john@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "status": "valid", "result": "deliverable", "score": 95, "disposable": false }
        })))
        .expect(1)
        .mount(&app.email_verifier)
        .await;
}

async fn mount_phone_answer(app: &TestApp, answer: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/"))
        .and(query_param("phone", "+15551234567"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer))
        .expect(1)
        .mount(&app.phone_validator)
        .await;
}

#[tokio::test]
async fn a_fully_validated_form_is_delivered_and_cleared() {
    let app = spawn_app().await;
    mount_captcha_accepts(&app).await;
    mount_email_accepts(&app).await;
    mount_phone_answer(&app, serde_json::json!({ "valid": true, "country": { "code": "US" } })).await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&app.email_delivery)
        .await;

    let mut session = app.contact_session();
    fill_in(&mut session);

    assert_ok!(session.submit().await);

    assert!(matches!(session.state(), SubmissionState::Success { .. }));
    let form = session.form();
    assert!(form.name.is_empty());
    assert!(form.email.is_empty());
    assert!(form.mobile.is_empty());
    assert!(form.message.is_empty());
    assert!(session.field_errors().is_empty());
}

#[tokio::test]
async fn the_delivered_message_carries_the_form_fields() {
    let app = spawn_app().await;
    mount_captcha_accepts(&app).await;
    mount_email_accepts(&app).await;
    mount_phone_answer(&app, serde_json::json!({ "valid": true })).await;
    Mock::given(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_delivery)
        .await;

    let mut session = app.contact_session();
    fill_in(&mut session);
    session.edit(FormField::Company, "Acme");
    session.submit().await.unwrap();

    let requests = app.email_delivery.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let params = &body["template_params"];
    assert_eq!(body["service_id"], app.configuration.email_delivery.service_id.as_str());
    assert_eq!(params["user_name"], "John");
    assert_eq!(params["user_email"], "john@x.com");
    assert_eq!(params["reply_to"], "john@x.com");
    assert_eq!(params["company"], "Acme");
    assert_eq!(params["phone"], "+15551234567");
    assert_eq!(params["message"], "hi");
}

#[tokio::test]
async fn a_rejected_phone_number_stops_before_delivery_and_keeps_the_form() {
    let app = spawn_app().await;
    mount_captcha_accepts(&app).await;
    mount_email_accepts(&app).await;
    mount_phone_answer(&app, serde_json::json!({ "valid": false })).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_delivery)
        .await;

    let mut session = app.contact_session();
    fill_in(&mut session);

    let error = assert_err!(session.submit().await);

    assert!(matches!(
        error,
        SubmitError::Rejected { step: ValidationStep::Phone, .. }
    ));
    let expected = "This phone number is not valid. Please enter a valid number.";
    assert_eq!(session.state(), SubmissionState::Error(expected.to_string()));
    assert_eq!(session.field_errors().get(FormField::Mobile), Some(expected));
    let form = session.form();
    assert_eq!(form.name, "John");
    assert_eq!(form.email, "john@x.com");
    assert_eq!(form.message, "hi");
}

#[tokio::test]
async fn a_failed_captcha_stops_every_later_step() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": false })))
        .expect(1)
        .mount(&app.captcha_verifier)
        .await;
    for server in [&app.email_verifier, &app.phone_validator, &app.email_delivery] {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(server)
            .await;
    }

    let mut session = app.contact_session();
    fill_in(&mut session);

    assert_err!(session.submit().await);
    assert_eq!(
        session.state().error_message(),
        Some("Captcha verification failed")
    );
}

#[tokio::test]
async fn a_rejected_email_surfaces_the_backend_message() {
    let app = spawn_app().await;
    mount_captcha_accepts(&app).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "status": "invalid", "result": "undeliverable", "disposable": false }
        })))
        .expect(1)
        .mount(&app.email_verifier)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.phone_validator)
        .await;

    let mut session = app.contact_session();
    fill_in(&mut session);

    assert_err!(session.submit().await);
    let expected = "This email address is invalid. Please check and try again.";
    assert_eq!(session.state().error_message(), Some(expected));
    assert_eq!(session.field_errors().get(FormField::Email), Some(expected));
}

#[tokio::test]
async fn a_delivery_failure_keeps_the_form_and_reports_the_provider_text() {
    let app = spawn_app().await;
    mount_captcha_accepts(&app).await;
    mount_email_accepts(&app).await;
    mount_phone_answer(&app, serde_json::json!({ "valid": true })).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(412).set_body_string("The template ID is invalid"))
        .expect(1)
        .mount(&app.email_delivery)
        .await;

    let mut session = app.contact_session();
    fill_in(&mut session);

    let error = assert_err!(session.submit().await);

    assert!(matches!(error, SubmitError::Delivery(_)));
    assert_eq!(
        session.state().error_message(),
        Some("The template ID is invalid")
    );
    assert_eq!(session.form().name, "John");
    assert_eq!(session.form().mobile, "5551234567");
}

#[tokio::test]
async fn editing_after_an_error_returns_the_form_to_idle() {
    let app = spawn_app().await;
    mount_captcha_accepts(&app).await;
    mount_email_accepts(&app).await;
    mount_phone_answer(&app, serde_json::json!({ "valid": false })).await;

    let mut session = app.contact_session();
    fill_in(&mut session);
    assert_err!(session.submit().await);

    session.edit(FormField::Mobile, "4152007986");

    assert_eq!(session.state(), SubmissionState::Idle);
    assert_eq!(session.field_errors().get(FormField::Mobile), None);
}
