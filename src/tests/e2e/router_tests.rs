use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::shell::extract::{ROLES_HEADER, USER_HEADER};
use crate::shell::{graphql, http};
use crate::tests::fixtures::app_state::{make_test_state, seeded_store};

async fn app() -> Router {
    let (state, _) = make_test_state(seeded_store().await);
    let schema = graphql::build_schema(state.clone());
    http::router(state).merge(graphql::router(schema))
}

async fn json(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn as_user(request: axum::http::request::Builder) -> axum::http::request::Builder {
    request
        .header(USER_HEADER, "jane@example.com")
        .header(ROLES_HEADER, "Time Tracker User")
}

#[tokio::test]
async fn logs_time_and_reads_it_back_over_http_and_graphql() {
    let app = app().await;

    let (status, logged) = json(
        &app,
        as_user(Request::post("/api/method/log_time"))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("project=PROJ-001&hours=2.5&log_date=2024-04-15"))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged["message"]["message"], "Logged 2.5 hours for PROJ-001");

    let (status, summary) = json(
        &app,
        as_user(Request::get("/api/method/project_summary?project=PROJ-001&month=4&year=2024"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["message"]["total_amount"], 25.0);
    assert_eq!(summary["message"]["logs"][0]["name"], logged["message"]["time_log"]);

    let (status, graph) = json(
        &app,
        as_user(Request::post(graphql::GRAPHQL_PATH))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"query":"{ projectSummary(project: \"PROJ-001\") { logCount } }"}"#,
            ))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(graph["data"]["projectSummary"]["logCount"], 1);
}

#[tokio::test]
async fn answers_status_for_anonymous_callers() {
    let app = app().await;
    let (status, body) = json(
        &app,
        Request::get("/api/method/app_status").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"]["app"], "Time Tracker");
    assert_eq!(body["message"]["user"], "Guest");
}

#[tokio::test]
async fn guests_cannot_log_time() {
    let app = app().await;
    let (status, body) = json(
        &app,
        Request::post("/api/method/log_time")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("project=PROJ-001&hours=1"))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["exc_type"], "PermissionError");
}
