use crate::helpers::{spawn_app, spawn_app_with, TestApp};
use wiremock::matchers::{any, body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn expect_no_provider_call(app: &TestApp) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.captcha_verifier)
        .await;
}

#[tokio::test]
async fn verify_captcha_returns_a_400_without_calling_the_provider_when_the_token_is_missing() {
    let app = spawn_app().await;
    expect_no_provider_call(&app).await;
    let test_cases = vec![
        (serde_json::json!({}), "missing token"),
        (serde_json::json!({ "token": "" }), "empty token"),
    ];

    for (body, description) in test_cases {
        let response = app.post_verify_captcha(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload was {}.",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, serde_json::json!({ "success": false }));
    }
}

#[tokio::test]
async fn verify_captcha_answers_malformed_bodies_in_its_own_shape() {
    let app = spawn_app().await;
    expect_no_provider_call(&app).await;

    let response = app
        .api_client
        .post(&format!("{}/api/verify-captcha", &app.address))
        .header("Content-Type", "application/json")
        .body("[1, 2")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "success": false }));
}

#[tokio::test]
async fn verify_captcha_forwards_the_token_with_the_secret() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/recaptcha/api/siteverify"))
        .and(body_string_contains("secret=captcha-secret"))
        .and(body_string_contains("response=a-valid-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "hostname": "localhost"
        })))
        .expect(1)
        .mount(&app.captcha_verifier)
        .await;

    let response = app
        .post_verify_captcha(&serde_json::json!({ "token": "a-valid-token" }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "success": true }));
}

#[tokio::test]
async fn verify_captcha_passes_a_provider_rejection_through() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error-codes": ["invalid-input-response"]
        })))
        .expect(1)
        .mount(&app.captcha_verifier)
        .await;

    let response = app
        .post_verify_captcha(&serde_json::json!({ "token": "forged" }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn verify_captcha_returns_a_500_if_the_provider_fails() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&app.captcha_verifier)
        .await;

    let response = app
        .post_verify_captcha(&serde_json::json!({ "token": "a-valid-token" }))
        .await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "success": false }));
}

#[tokio::test]
async fn verify_captcha_fails_closed_if_the_secret_is_missing() {
    let app = spawn_app_with(|c| c.captcha_verifier.api_key = None).await;
    expect_no_provider_call(&app).await;

    let response = app
        .post_verify_captcha(&serde_json::json!({ "token": "a-valid-token" }))
        .await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}
