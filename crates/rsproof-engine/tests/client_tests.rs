//! Client tests against an in-process stub of the LanguageTool API.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::Form;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use rsproof_engine::{EngineError, LanguageToolClient, LanguageToolConfig};

async fn stub_check(Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
    let text = form.get("text").cloned().unwrap_or_default();
    let language = form.get("language").cloned().unwrap_or_default();

    if language != "en-US" {
        return (
            StatusCode::BAD_REQUEST,
            format!("Error: '{language}' is not a language code known to LanguageTool"),
        )
            .into_response();
    }

    match text.as_str() {
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "matches": [] })).into_response()
        }
        "garbage" => "not json".into_response(),
        "oversized" => (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Error: Your text exceeds the limit of 20000 characters",
        )
            .into_response(),
        "unprocessable" => StatusCode::UNPROCESSABLE_ENTITY.into_response(),
        "He go to school." => Json(json!({
            "software": { "name": "LanguageTool" },
            "matches": [{
                "message": "The verb form does not agree with the subject.",
                "shortMessage": "Grammatical problem",
                "replacements": [{ "value": "goes" }],
                "offset": 3,
                "length": 2,
                "type": { "typeName": "Hint" },
                "rule": {
                    "id": "SUBJECT_VERB_AGREEMENT",
                    "description": "Subject-verb agreement",
                    "issueType": "grammar",
                    "category": { "id": "GRAMMAR", "name": "Grammar" }
                }
            }]
        }))
        .into_response(),
        _ => Json(json!({ "matches": [] })).into_response(),
    }
}

async fn stub_languages() -> impl IntoResponse {
    Json(json!([
        { "name": "English (US)", "code": "en", "longCode": "en-US" },
        { "name": "German (Germany)", "code": "de", "longCode": "de-DE" }
    ]))
}

async fn spawn_stub() -> SocketAddr {
    let app = Router::new()
        .route("/v2/check", post(stub_check))
        .route("/v2/languages", get(stub_languages));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> LanguageToolClient {
    LanguageToolClient::new(
        LanguageToolConfig::new(format!("http://{addr}")).with_timeout(Duration::from_millis(500)),
    )
    .unwrap()
}

#[tokio::test]
async fn test_check_decodes_matches() {
    let addr = spawn_stub().await;
    let client = client_for(addr);

    let response = client.check("He go to school.").await.unwrap();

    assert_eq!(response.matches.len(), 1);
    let m = &response.matches[0];
    assert_eq!(m.offset, 3);
    assert_eq!(m.length, 2);
    assert_eq!(m.rule.id, "SUBJECT_VERB_AGREEMENT");
    assert_eq!(m.match_type.type_name, "Hint");
}

#[tokio::test]
async fn test_check_clean_text() {
    let addr = spawn_stub().await;
    let response = client_for(addr).check("All good.").await.unwrap();
    assert!(response.matches.is_empty());
}

#[tokio::test]
async fn test_unsupported_language_is_http_status_error() {
    let addr = spawn_stub().await;
    let client = LanguageToolClient::new(
        LanguageToolConfig::new(format!("http://{addr}")).with_language("xx-XX"),
    )
    .unwrap();

    let err = client.check("Hello").await.unwrap_err();
    match err {
        EngineError::HttpStatus { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("xx-XX"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_oversized_text_is_rejected_not_unavailable() {
    let addr = spawn_stub().await;

    let err = client_for(addr).check("oversized").await.unwrap_err();
    match err {
        EngineError::Rejected { status, body } => {
            assert_eq!(status, 413);
            assert!(body.contains("exceeds the limit"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_rejection_body_is_kept_empty() {
    let addr = spawn_stub().await;

    let err = client_for(addr).check("unprocessable").await.unwrap_err();
    match err {
        EngineError::Rejected { status, body } => {
            assert_eq!(status, 422);
            assert!(body.is_empty());
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_engine_times_out() {
    let addr = spawn_stub().await;
    let err = client_for(addr).check("slow").await.unwrap_err();
    assert!(matches!(err, EngineError::Timeout { timeout_ms: 500 }));
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let addr = spawn_stub().await;
    let err = client_for(addr).check("garbage").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr).check("Hello").await.unwrap_err();
    assert!(matches!(err, EngineError::Connection { .. }));
}

#[tokio::test]
async fn test_languages_and_health() {
    let addr = spawn_stub().await;
    let client = client_for(addr);

    let languages = client.languages().await.unwrap();
    assert_eq!(languages.len(), 2);
    assert_eq!(languages[0].long_code, "en-US");
    client.health().await.unwrap();

    let unsupported = LanguageToolClient::new(
        LanguageToolConfig::new(format!("http://{addr}")).with_language("pt-BR"),
    )
    .unwrap();
    assert!(matches!(
        unsupported.health().await,
        Err(EngineError::InvalidConfig { .. })
    ));
}

#[test]
fn test_new_rejects_empty_settings() {
    assert!(matches!(
        LanguageToolClient::new(LanguageToolConfig::new("  ")),
        Err(EngineError::InvalidConfig { .. })
    ));
    assert!(matches!(
        LanguageToolClient::new(LanguageToolConfig::new("http://lt").with_language("")),
        Err(EngineError::InvalidConfig { .. })
    ));
}
