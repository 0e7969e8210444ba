//! Handler-level tests for the HTTP routes.

use std::sync::Arc;

use axum::{
    Json,
    body::{Body, Bytes},
    extract::State,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use drafter_core::{ChampionRecord, test_support::sample_catalog};
use drafter_scorer::{Recommender, WeightedTraitScorer};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::helpers::{BrokenStore, Harness, body, response_json};
use super::*;

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

fn champions(results: &[drafter_scorer::Recommendation]) -> Vec<&str> {
    results.iter().map(|r| r.champion.as_str()).collect()
}

async fn send(state: AppState, method: Method, uri: &str, payload: Option<&Value>) -> Response {
    let body = payload.map_or_else(Body::empty, |value| {
        Body::from(serde_json::to_vec(value).expect("encode request body"))
    });
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .expect("build request");
    router(state).oneshot(request).await.expect("router is infallible")
}

#[rstest]
#[tokio::test]
async fn questions_expose_text_key_and_weight(harness: Harness) {
    let Json(views) = questions(State(harness.state(WriteMode::Live))).await;

    assert_eq!(views.len(), 15);
    let encoded = serde_json::to_value(&views).expect("encode questions");
    assert_eq!(
        encoded.get(0),
        Some(&json!({
            "text": "L’équipe ennemie est-elle AD heavy ?",
            "key": "heavy_ad",
            "weight": 1
        }))
    );
    assert_eq!(
        encoded.get(9).and_then(|q| q.get("weight")),
        Some(&json!(2))
    );
}

#[rstest]
#[tokio::test]
async fn recommend_ranks_the_stored_catalog(harness: Harness) {
    let request = json!({ "answers": { "need_engage": true, "peeling": true } });

    let Json(results) = recommend(State(harness.state(WriteMode::Live)), body(&request))
        .await
        .expect("recommend");

    assert_eq!(champions(&results), ["Vi", "Sejuani", "Zac"]);
}

#[rstest]
#[case::not_json(Bytes::from_static(b"{not json"))]
#[case::array(Bytes::from_static(b"[1, 2]"))]
#[case::answers_not_object(Bytes::from_static(br#"{"answers": ["need_engage"]}"#))]
#[case::empty(Bytes::new())]
#[tokio::test]
async fn recommend_returns_nothing_for_unusable_bodies(harness: Harness, #[case] raw: Bytes) {
    let Json(results) = recommend(State(harness.state(WriteMode::Live)), raw)
        .await
        .expect("recommend");
    assert!(results.is_empty());
}

#[rstest]
#[tokio::test]
async fn recommend_ignores_non_boolean_answers(harness: Harness) {
    let request = json!({ "answers": { "need_engage": "true", "scaling": 1 } });

    let Json(results) = recommend(State(harness.state(WriteMode::Live)), body(&request))
        .await
        .expect("recommend");

    assert!(results.is_empty());
}

#[rstest]
#[case(json!(0), 1)]
#[case(json!(-5), 1)]
#[case(json!(2), 2)]
#[case(json!(1000), 3)]
#[case(json!(null), 3)]
#[tokio::test]
async fn recommend_clamps_max_results(
    harness: Harness,
    #[case] max_results: Value,
    #[case] expected: usize,
) {
    let request = json!({ "answers": { "need_engage": true }, "max_results": max_results });

    let Json(results) = recommend(State(harness.state(WriteMode::Live)), body(&request))
        .await
        .expect("recommend");

    assert_eq!(results.len(), expected);
}

#[rstest]
#[case(json!("5"))]
#[case(json!(2.5))]
#[tokio::test]
async fn recommend_rejects_non_integer_max_results(harness: Harness, #[case] max_results: Value) {
    let request = json!({ "answers": { "need_engage": true }, "max_results": max_results });

    let err = recommend(State(harness.state(WriteMode::Live)), body(&request))
        .await
        .expect_err("non-integer max_results should fail");
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = response_json(response).await;
    assert_eq!(payload.get("status"), Some(&json!("invalid")));
}

#[rstest]
#[tokio::test]
async fn recommend_prefers_an_inline_payload(harness: Harness) {
    let request = json!({
        "answers": { "frontline": true },
        "payload": {
            "Nunu": { "frontline": true, "icon": "https://cdn/nunu.png" },
            "Broken": 3
        }
    });

    let Json(results) = recommend(State(harness.state(WriteMode::Live)), body(&request))
        .await
        .expect("recommend");

    assert_eq!(champions(&results), ["Nunu"]);
    assert_eq!(
        results.first().map(|r| r.icon.as_str()),
        Some("https://cdn/nunu.png")
    );
}

#[rstest]
#[tokio::test]
async fn recommend_falls_back_to_the_store_for_non_object_payloads(harness: Harness) {
    let request = json!({ "answers": { "scaling": true }, "payload": ["Nunu"] });

    let Json(results) = recommend(State(harness.state(WriteMode::Live)), body(&request))
        .await
        .expect("recommend");

    assert_eq!(champions(&results), ["Ekko"]);
}

#[rstest]
#[tokio::test]
async fn list_champions_returns_the_store(harness: Harness) {
    let Json(catalog) = list_champions(State(harness.state(WriteMode::Live)))
        .await
        .expect("list");
    assert_eq!(catalog, sample_catalog());
}

#[rstest]
#[tokio::test]
async fn live_writes_replace_the_catalog(harness: Harness) {
    let payload = json!({
        "Nunu": { "frontline": true, "lane": "jungle" },
        "Rammus": { "hp_tanks": false, "aa_heavy": true }
    });

    let Json(reply) = save_champions(State(harness.state(WriteMode::Live)), body(&payload))
        .await
        .expect("save");

    assert_eq!(reply, json!({ "status": "saved", "count": 2 }));
    let stored = harness.stored();
    assert_eq!(stored.names().collect::<Vec<_>>(), ["Nunu", "Rammus"]);
    assert_eq!(
        stored.get("Nunu").and_then(|r| r.fields().get("lane")),
        Some(&json!("jungle"))
    );
}

#[rstest]
#[case::not_json(Bytes::from_static(b"nope"))]
#[case::array(Bytes::from_static(b"[]"))]
#[case::record_not_object(Bytes::from_static(br#"{"Nunu": true}"#))]
#[tokio::test]
async fn invalid_writes_are_rejected(
    harness: Harness,
    #[case] raw: Bytes,
    #[values(WriteMode::Live, WriteMode::Proposal)] mode: WriteMode,
) {
    let err = save_champions(State(harness.state(mode)), raw)
        .await
        .expect_err("invalid payload should fail");
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await.get("status"),
        Some(&json!("invalid"))
    );
    assert_eq!(harness.stored(), sample_catalog());
    assert!(!harness.proposals_dir().exists());
}

#[rstest]
#[tokio::test]
async fn proposal_writes_are_recorded_not_applied(harness: Harness) {
    let payload = json!({ "Nunu": { "frontline": true } });

    let Json(reply) = save_champions(State(harness.state(WriteMode::Proposal)), body(&payload))
        .await
        .expect("propose");

    assert_eq!(reply.get("status"), Some(&json!("received")));
    let name = reply
        .get("proposal")
        .and_then(Value::as_str)
        .expect("proposal file name");
    assert!(name.starts_with("champions_") && name.ends_with(".json"));
    let recorded = std::fs::read_to_string(harness.proposals_dir().join(name).as_std_path())
        .expect("read proposal");
    let recorded: Value = serde_json::from_str(&recorded).expect("proposal is JSON");
    assert_eq!(recorded, payload);
    assert_eq!(harness.stored(), sample_catalog());
}

#[rstest]
#[tokio::test]
async fn storage_failures_map_to_server_errors() {
    let state = AppState::new(
        Arc::new(BrokenStore),
        Recommender::with_default_icon(WeightedTraitScorer::default()),
        WriteMode::Live,
        ProposalRecorder::new("unused"),
    );

    let err = list_champions(State(state.clone()))
        .await
        .expect_err("broken store should fail");
    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response_json(response).await.get("status"),
        Some(&json!("error"))
    );

    let payload = json!({ "Nunu": ChampionRecord::from_traits([("frontline", true)]) });
    let err = save_champions(State(state), body(&payload))
        .await
        .expect_err("broken store should fail");
    assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[rstest]
#[tokio::test]
async fn health_reports_ok() {
    let Json(reply) = health().await;
    assert_eq!(reply, json!({ "status": "ok" }));
}

#[rstest]
#[case::questions(Method::GET, "/questions", None, StatusCode::OK)]
#[case::recommend(
    Method::POST,
    "/recommend",
    Some(json!({ "answers": { "need_engage": true } })),
    StatusCode::OK
)]
#[case::list(Method::GET, "/api/champions", None, StatusCode::OK)]
#[case::save(
    Method::POST,
    "/api/champions",
    Some(json!({ "Nunu": { "frontline": true } })),
    StatusCode::OK
)]
#[case::health(Method::GET, "/health", None, StatusCode::OK)]
#[case::recommend_is_post_only(Method::GET, "/recommend", None, StatusCode::METHOD_NOT_ALLOWED)]
#[case::no_catalog_delete(Method::DELETE, "/api/champions", None, StatusCode::METHOD_NOT_ALLOWED)]
#[case::questions_are_read_only(Method::POST, "/questions", None, StatusCode::METHOD_NOT_ALLOWED)]
#[case::unknown_path(Method::GET, "/champions", None, StatusCode::NOT_FOUND)]
#[tokio::test]
async fn router_exposes_the_route_table(
    harness: Harness,
    #[case] method: Method,
    #[case] uri: &str,
    #[case] payload: Option<Value>,
    #[case] expected: StatusCode,
) {
    let response = send(harness.state(WriteMode::Live), method, uri, payload.as_ref()).await;
    assert_eq!(response.status(), expected);
}

#[rstest]
#[tokio::test]
async fn router_serves_ranked_recommendations(harness: Harness) {
    let request = json!({ "answers": { "need_engage": true, "peeling": true }, "max_results": 2 });

    let response = send(
        harness.state(WriteMode::Live),
        Method::POST,
        "/recommend",
        Some(&request),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let ranked = response_json(response).await;
    let names: Vec<_> = ranked
        .as_array()
        .expect("ranked list")
        .iter()
        .filter_map(|entry| entry.get("champion").and_then(Value::as_str))
        .collect();
    assert_eq!(names, ["Vi", "Sejuani"]);
}

#[rstest]
#[tokio::test]
async fn router_serves_questions_without_labels(harness: Harness) {
    let response = send(harness.state(WriteMode::Live), Method::GET, "/questions", None).await;

    let listed = response_json(response).await;
    let first = listed.get(0).expect("first question");
    assert_eq!(first.get("key"), Some(&json!("heavy_ad")));
    assert!(first.get("label").is_none());
}

#[rstest]
#[tokio::test]
async fn router_writes_then_lists_the_catalog(harness: Harness) {
    let payload = json!({ "Rammus": { "hp_tanks": true, "lane": "jungle" } });

    let saved = send(
        harness.state(WriteMode::Live),
        Method::POST,
        "/api/champions",
        Some(&payload),
    )
    .await;
    assert_eq!(
        response_json(saved).await,
        json!({ "status": "saved", "count": 1 })
    );

    let listed = send(harness.state(WriteMode::Live), Method::GET, "/api/champions", None).await;
    assert_eq!(response_json(listed).await, payload);
}

#[rstest]
#[tokio::test]
async fn router_reports_health() {
    let harness = Harness::new();
    let response = send(harness.state(WriteMode::Live), Method::GET, "/health", None).await;
    assert_eq!(response_json(response).await, json!({ "status": "ok" }));
}
