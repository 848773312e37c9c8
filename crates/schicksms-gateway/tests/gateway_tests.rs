// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route-level tests driving the router with `oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use schicksms_config::SchickSmsConfig;
use schicksms_gateway::{build_router, AppState, AuthConfig};
use schicksms_storage::Database;
use schicksms_test_utils::{FakeRunner, Scripted, SpoolDir, SpoolFixture};
use serde_json::{json, Value};
use tower::ServiceExt;

const TOKEN: &str = "test-token";

struct Harness {
    app: Router,
    fixture: SpoolFixture,
    runner: Arc<FakeRunner>,
    _db_dir: tempfile::TempDir,
}

async fn harness_with(token: Option<&str>) -> Harness {
    let fixture = SpoolFixture::new();
    let db_dir = tempfile::tempdir().unwrap();
    let db_path = db_dir.path().join("schicksms.db");
    let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

    let mut config = SchickSmsConfig::default();
    config.gammu = fixture.gammu_config();

    let runner = Arc::new(FakeRunner::new());
    let state = AppState::from_config(&config, runner.clone(), db);
    let app = build_router(state, AuthConfig::new(token.map(str::to_string)));
    Harness {
        app,
        fixture,
        runner,
        _db_dir: db_dir,
    }
}

async fn harness() -> Harness {
    harness_with(Some(TOKEN)).await
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"));
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn call(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

async fn body_bytes(resp: Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(resp: Response) -> Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let h = harness_with(None).await;
    let resp = call(
        &h.app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
}

#[tokio::test]
async fn api_fails_closed_without_configured_token() {
    let h = harness_with(None).await;
    let resp = call(&h.app, request("GET", "/v1/contacts", None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn api_rejects_wrong_or_missing_token() {
    let h = harness().await;
    let wrong = Request::builder()
        .uri("/v1/contacts")
        .header(header::AUTHORIZATION, "Bearer nope")
        .body(Body::empty())
        .unwrap();
    assert_eq!(call(&h.app, wrong).await.status(), StatusCode::UNAUTHORIZED);

    let missing = Request::builder()
        .uri("/v1/contacts")
        .body(Body::empty())
        .unwrap();
    assert_eq!(call(&h.app, missing).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn file_send_is_queued_and_logged() {
    let h = harness().await;
    let resp = call(
        &h.app,
        request(
            "POST",
            "/v1/sms",
            Some(json!({"recipient": "+491701234567", "message": "Hallo", "method": "file"})),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome = body_json(resp).await;
    assert_eq!(outcome["success"], true);
    assert_eq!(outcome["method"], "file");
    assert_eq!(outcome["status"], "queued");
    let filename = outcome["filename"].as_str().unwrap().to_string();
    assert_eq!(h.fixture.list(SpoolDir::Outbox), vec![filename.clone()]);

    let log = body_json(call(&h.app, request("GET", "/v1/history", None)).await).await;
    assert_eq!(log["total"], 1);
    assert_eq!(log["items"][0]["status"], "Gesendet");
    assert_eq!(log["items"][0]["filename"], filename.as_str());
}

#[tokio::test]
async fn default_method_runs_the_injector() {
    let h = harness().await;
    let outcome = body_json(
        call(
            &h.app,
            request(
                "POST",
                "/v1/sms",
                Some(json!({"recipient": " +491701234567 ", "message": "Termin"})),
            ),
        )
        .await,
    )
    .await;
    assert_eq!(outcome["success"], true);
    assert_eq!(outcome["method"], "command");

    let calls = h.runner.calls().await;
    assert_eq!(calls.len(), 1);
    assert!(calls[0].argv.ends_with(&["TEXT".to_string(), "+491701234567".to_string()]));
    assert_eq!(calls[0].stdin.as_deref(), Some("Termin"));
    assert!(h.fixture.list(SpoolDir::Outbox).is_empty());
}

#[tokio::test]
async fn rejected_send_is_not_logged() {
    let h = harness().await;
    let outcome = body_json(
        call(
            &h.app,
            request(
                "POST",
                "/v1/sms",
                Some(json!({"recipient": "+49123; rm -rf /", "message": "x", "method": "both"})),
            ),
        )
        .await,
    )
    .await;
    assert_eq!(outcome["success"], false);
    assert!(outcome["error"].as_str().unwrap().contains("invalid recipient"));
    assert!(h.runner.calls().await.is_empty());

    let log = body_json(call(&h.app, request("GET", "/v1/history", None)).await).await;
    assert_eq!(log["total"], 0);
}

#[tokio::test]
async fn failed_command_surfaces_output() {
    let h = harness().await;
    h.runner.push(Scripted::fail(2, "No modem found")).await;
    let outcome = body_json(
        call(
            &h.app,
            request(
                "POST",
                "/v1/sms",
                Some(json!({"recipient": "+491701234567", "message": "x", "method": "command"})),
            ),
        )
        .await,
    )
    .await;
    assert_eq!(outcome["success"], false);
    assert!(outcome["error"].as_str().unwrap().contains("No modem found"));
}

#[tokio::test]
async fn delivery_status_follows_the_spool() {
    let h = harness().await;
    let name = "OUT_20250213_183445_1a2b3c4d.txt";
    h.fixture.write_raw(SpoolDir::Error, name, "x");
    let resp = body_json(call(&h.app, request("GET", &format!("/v1/sms/status/{name}"), None)).await).await;
    assert_eq!(resp["status"], "error");
    assert_eq!(resp["label"], "Fehler");

    let resp = body_json(call(&h.app, request("GET", "/v1/sms/status/OUT_missing.txt", None)).await).await;
    assert_eq!(resp["status"], "unknown");
}

#[tokio::test]
async fn recent_lists_backups_with_contact_names() {
    let h = harness().await;
    let saved = call(
        &h.app,
        request(
            "POST",
            "/v1/contacts",
            Some(json!({"name": "Oma", "number": "+491701234567"})),
        ),
    )
    .await;
    assert_eq!(saved.status(), StatusCode::OK);

    h.fixture.write_backup(
        SpoolDir::Sent,
        "OUT1.smsbackup",
        Some("+491701234567"),
        Some("20250213T183445Z"),
        Some("Das ist eine ziemlich lange Nachricht an Oma"),
    );
    h.fixture.write_backup(
        SpoolDir::Error,
        "OUT2.smsbackup",
        Some("+4930123456"),
        Some("20250214T090000Z"),
        Some("Kurz"),
    );

    let resp = body_json(call(&h.app, request("GET", "/v1/sms/recent?limit=10", None)).await).await;
    let messages = resp["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["recipient"], "+4930123456");
    assert_eq!(messages[0]["status"], "Fehler");
    assert_eq!(messages[1]["recipient"], "Oma (+491701234567)");
    assert_eq!(messages[1]["message"], "Das ist eine ziemlich lange Na...");
    assert_eq!(messages[1]["date"], "13.02.2025 18:34:45");

    let resp = body_json(call(&h.app, request("GET", "/v1/sms/recent?limit=1", None)).await).await;
    assert_eq!(resp["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn segments_are_counted_in_characters() {
    let h = harness().await;
    let long = "a".repeat(161);
    let resp = body_json(
        call(&h.app, request("GET", &format!("/v1/sms/segments?message={long}"), None)).await,
    )
    .await;
    assert_eq!(resp["length"], 161);
    assert_eq!(resp["segments"], 2);
    assert_eq!(resp["max_length"], 160);
}

#[tokio::test]
async fn contact_crud_reports_conflicts_and_missing_ids() {
    let h = harness().await;
    let a = body_json(
        call(
            &h.app,
            request("POST", "/v1/contacts", Some(json!({"name": "A", "number": "+4911111111"}))),
        )
        .await,
    )
    .await;
    assert_eq!(a["updated"], false);
    let a_id = a["id"].as_i64().unwrap();
    call(
        &h.app,
        request("POST", "/v1/contacts", Some(json!({"name": "B", "number": "+4922222222"}))),
    )
    .await;

    let conflict = call(
        &h.app,
        request(
            "PUT",
            &format!("/v1/contacts/{a_id}"),
            Some(json!({"name": "A", "number": "+4922222222"})),
        ),
    )
    .await;
    assert_eq!(conflict.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(conflict).await["success"], false);

    let bad_number = call(
        &h.app,
        request("POST", "/v1/contacts", Some(json!({"name": "C", "number": "0171"}))),
    )
    .await;
    assert_eq!(bad_number.status(), StatusCode::BAD_REQUEST);

    let list = body_json(call(&h.app, request("GET", "/v1/contacts?search=2222", None)).await).await;
    assert_eq!(list["total"], 1);
    assert_eq!(list["items"][0]["name"], "B");

    let missing = call(&h.app, request("DELETE", "/v1/contacts/999", None)).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let deleted = call(&h.app, request("DELETE", &format!("/v1/contacts/{a_id}"), None)).await;
    assert_eq!(deleted.status(), StatusCode::OK);
}

#[tokio::test]
async fn history_archive_and_export() {
    let h = harness().await;
    for message in ["eins", "zwei"] {
        call(
            &h.app,
            request(
                "POST",
                "/v1/sms",
                Some(json!({"recipient": "+491701234567", "message": message, "method": "command"})),
            ),
        )
        .await;
    }
    let log = body_json(call(&h.app, request("GET", "/v1/history", None)).await).await;
    assert_eq!(log["total"], 2);
    let id = log["items"][0]["id"].as_i64().unwrap();

    let resp = call(&h.app, request("POST", &format!("/v1/history/{id}/archive"), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let archived = body_json(call(&h.app, request("GET", "/v1/history?archived=true", None)).await).await;
    assert_eq!(archived["total"], 1);

    let export = call(&h.app, request("GET", "/v1/history/export?archived=true", None)).await;
    assert_eq!(export.status(), StatusCode::OK);
    assert_eq!(
        export.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let bytes = body_bytes(export).await;
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().nth(1).unwrap().ends_with(",Ja"));

    let resp = call(&h.app, request("POST", &format!("/v1/history/{id}/unarchive"), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = call(&h.app, request("DELETE", &format!("/v1/history/{id}"), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = call(&h.app, request("DELETE", &format!("/v1/history/{id}"), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = call(&h.app, request("POST", "/v1/history/4711/archive", None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn system_status_combines_checks_and_statistics() {
    let h = harness().await;
    let resp = call(&h.app, request("GET", "/v1/status", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let status = body_json(resp).await;
    // The fake runner prints nothing: daemon inactive, modem connected without readings.
    assert_eq!(status["daemon"]["status"], "Inaktiv");
    assert_eq!(status["daemon"]["version"], "");
    assert_eq!(status["daemon"]["device_info"], "");
    assert_eq!(status["modem"]["is_connected"], true);
    assert_eq!(status["modem"]["signal_strength"], "Unbekannt");
    assert!(status["health"].as_str().unwrap().starts_with("unhealthy"));
    assert_eq!(status["statistics"]["total"], 0);
    assert!(status["system"]["os"].is_string());
    assert!(status["system"]["uptime"].as_str().unwrap().starts_with("up "));
    assert!(status["system"]["disk_usage_percent"].is_number());
    assert_eq!(h.runner.calls().await.len(), 2);
}
