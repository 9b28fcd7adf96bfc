use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, MockConfig, MockState, JUGGLE_PATH, LOGIN_PATH, VERIFY_PATH};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(uri: &str, token: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, token);
    }
    builder.body(body.to_string()).unwrap()
}

fn juggle_body() -> String {
    json!({
        "sequenceInformation": {"text": ">s1\nATG", "sequenceType": ["DNA"], "autoAnnotate": true},
        "modificationInformation": {
            "strategyName": "Balanced",
            "text": "table",
            "strategyGeneticCode": "STANDARD"
        },
        "outputInformation": {"outputFormat": "FASTA"}
    })
    .to_string()
}

// --- login ---

#[tokio::test]
async fn login_issues_token() {
    let resp = app()
        .oneshot(json_request(LOGIN_PATH, None, r#"{"username":"demo","password":"demo"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn login_wrong_password_has_no_token() {
    let resp = app()
        .oneshot(json_request(LOGIN_PATH, None, r#"{"username":"demo","password":"nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn login_empty_username_returns_400() {
    let resp = app()
        .oneshot(json_request(LOGIN_PATH, None, r#"{"username":"","password":"x"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(&body_bytes(resp).await[..], b"username is required");
}

#[tokio::test]
async fn login_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request(LOGIN_PATH, None, r#"{"user":"demo"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- juggle / verify without a token ---

#[tokio::test]
async fn juggle_without_token_returns_401() {
    let resp = app()
        .oneshot(json_request(JUGGLE_PATH, None, &juggle_body()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn verify_with_unknown_token_returns_401() {
    let resp = app()
        .oneshot(json_request(
            VERIFY_PATH,
            Some("forged"),
            r#"{"constraintsInformation":{"vendor":"JGI"}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app()
        .oneshot(json_request("/polisher/polish", None, "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full session ---

#[tokio::test]
async fn login_then_juggle_and_verify() {
    use tower::Service;

    let state = MockState::new(
        MockConfig::default()
            .with_account("alice", "secret")
            .with_verify_reply(json!({"input": {"s1": ["GC content too high"]}})),
    );
    let mut app = app_with(state.clone()).into_service();

    // login
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(LOGIN_PATH, None, r#"{"username":"alice","password":"secret"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let token = body_json(resp).await["token"].as_str().unwrap().to_string();

    // juggle echoes the sequence text by default
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(JUGGLE_PATH, Some(&token), &juggle_body()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"text": ">s1\nATG"}));

    // verify without constraints is rejected
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(VERIFY_PATH, Some(&token), r#"{"sequenceInformation":{}}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // verify returns the configured report
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            VERIFY_PATH,
            Some(&token),
            r#"{"constraintsInformation":{"vendor":"IDT"}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"input": {"s1": ["GC content too high"]}}));

    // every call was recorded, with the header as sent
    let recorded = state.recorded().await;
    let paths: Vec<_> = recorded.iter().map(|r| r.path).collect();
    assert_eq!(paths, vec![LOGIN_PATH, JUGGLE_PATH, VERIFY_PATH, VERIFY_PATH]);
    assert_eq!(recorded[0].authorization, None);
    assert_eq!(recorded[1].authorization.as_deref(), Some(token.as_str()));
    assert_eq!(recorded[3].body, json!({"constraintsInformation": {"vendor": "IDT"}}));
}

#[tokio::test]
async fn configured_juggle_reply_is_returned() {
    let state = MockState::new(
        MockConfig::default()
            .with_account("alice", "secret")
            .with_juggle_reply(json!({"file": "result.gb"})),
    );
    let app = app_with(state);

    let resp = app
        .clone()
        .oneshot(json_request(LOGIN_PATH, None, r#"{"username":"alice","password":"secret"}"#))
        .await
        .unwrap();
    let token = body_json(resp).await["token"].as_str().unwrap().to_string();

    let resp = app
        .oneshot(json_request(JUGGLE_PATH, Some(&token), &juggle_body()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"file": "result.gb"}));
}
