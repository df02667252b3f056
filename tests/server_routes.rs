use std::collections::HashMap;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

use tunga::pipeline::TruecaseModel;
use tunga::server::{build_router, AppState};

fn app(debug: bool, url: &str) -> Router {
    let model = TruecaseModel::train(
        vec![Ok("Yesterday the Smiths said hello .".to_string())].into_iter(),
        1,
    )
    .unwrap();
    let mut models = HashMap::new();
    models.insert("en".to_string(), model);
    build_router(AppState::new(debug, url, 20, models))
}

async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(v) => Body::from(serde_json::to_vec(&v).unwrap()),
        None => Body::empty(),
    };
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn healthz() {
    let (status, body) = call(app(false, "http://localhost:1"), "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn preprocess_uses_lang_model() {
    let req = json!({ "contents": ["The Smiths said|hi"], "lang": "en" });
    let (status, body) = call(app(false, "http://localhost:1"), "POST", "/preprocess", Some(req)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "contents": ["the Smiths said &#124; hi"] }));

    // no model for is: no truecasing
    let req = json!({ "contents": ["Hann kom."], "lang": "is" });
    let (_, body) = call(app(false, "http://localhost:1"), "POST", "/preprocess", Some(req)).await;
    assert_eq!(body, json!({ "contents": ["Hann kom ."] }));
}

#[tokio::test]
async fn postprocess() {
    let req = json!({ "contents": ["the Smiths said &#124; hi ."], "lang": "en" });
    let (status, body) = call(app(false, "http://localhost:1"), "POST", "/postprocess", Some(req)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "contents": ["The Smiths said | hi."] }));
}

#[tokio::test]
async fn bad_lang_is_a_bad_request() {
    let req = json!({ "contents": ["x"], "lang": "English" });
    let (status, body) = call(app(false, "http://localhost:1"), "POST", "/preprocess", Some(req.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Bad Request" }));

    let (status, body) = call(app(true, "http://localhost:1"), "POST", "/preprocess", Some(req)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "unknown language: English" }));
}

#[tokio::test(flavor = "multi_thread")]
async fn translate_is_proxied() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "translations": [{ "translatedText": "Hello" }, { "translatedText": "world" }]
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let req = json!({
        "contents": ["Halló", "heimur"],
        "sourceLanguageCode": "is",
        "targetLanguageCode": "en",
        "model": "moses"
    });
    let (status, body) = call(app(false, &upstream.uri()), "POST", "/translate", Some(req)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "translations": [{ "translatedText": "Hello" }, { "translatedText": "world" }] })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn translate_upstream_failure() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let req = json!({
        "contents": ["Halló"],
        "sourceLanguageCode": "is",
        "targetLanguageCode": "en",
        "model": "moses"
    });
    let (status, _) = call(app(false, &upstream.uri()), "POST", "/translate", Some(req)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
