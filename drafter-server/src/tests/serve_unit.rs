//! Tests for store seeding, question loading and proposal recording.

use std::io::ErrorKind;

use chrono::{TimeZone, Utc};
use drafter_core::{
    CatalogStore, MemoryCatalogStore, QuestionSet, SeedOutcome, test_support::sample_catalog,
};
use rstest::{fixture, rstest};
use serde_json::json;

use super::helpers::{Harness, write_utf8};
use super::*;
use crate::{
    config::{DatabaseUrl, ServeConfig},
    proposal::proposal_file_name,
    serve::{build_state, load_questions, seed_store},
};

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[rstest]
fn builtin_seed_fills_an_empty_store() {
    let store = MemoryCatalogStore::default();

    let outcome = seed_store(&store, None).expect("seed");

    assert_eq!(outcome, Some(SeedOutcome::Seeded { records: 16 }));
    assert_eq!(store.len().expect("len"), 16);
}

#[rstest]
fn populated_store_is_left_alone() {
    let store = MemoryCatalogStore::with_catalog(sample_catalog());

    let outcome = seed_store(&store, None).expect("seed");

    assert_eq!(outcome, Some(SeedOutcome::AlreadyPopulated { records: 4 }));
    assert_eq!(store.load().expect("load"), sample_catalog());
}

#[rstest]
fn missing_seed_file_skips_seeding(harness: Harness) {
    let store = MemoryCatalogStore::default();
    let path = harness.root().join("absent.json");

    let outcome = seed_store(&store, Some(&path)).expect("missing seed is not fatal");

    assert_eq!(outcome, None);
    assert!(store.is_empty().expect("check store"));
}

#[rstest]
fn seed_file_is_loaded(harness: Harness) {
    let store = MemoryCatalogStore::default();
    let path = harness.root().join("seed/champions.json");
    write_utf8(&path, br#"{"Nunu": {"frontline": true}, "Rammus": {"hp_tanks": false}}"#);

    let outcome = seed_store(&store, Some(&path)).expect("seed");

    assert_eq!(outcome, Some(SeedOutcome::Seeded { records: 2 }));
    let stored = store.load().expect("load");
    assert!(stored.get("Nunu").is_some_and(|r| r.has_trait("frontline")));
}

#[rstest]
fn malformed_seed_file_is_an_error(harness: Harness) {
    let store = MemoryCatalogStore::default();
    let path = harness.root().join("broken.json");
    write_utf8(&path, b"[\"Nunu\"]");

    let err = seed_store(&store, Some(&path)).expect_err("malformed seed");
    assert!(matches!(err, CliError::Seed(_)), "unexpected error: {err:?}");
    assert!(store.is_empty().expect("check store"));
}

#[rstest]
fn default_questions_apply_without_a_file() {
    let questions = load_questions(None).expect("defaults");
    assert_eq!(questions, QuestionSet::default());
    assert_eq!(questions.len(), 15);
}

#[rstest]
fn custom_questions_are_loaded(harness: Harness) {
    let path = harness.root().join("questions.json");
    write_utf8(
        &path,
        br#"[{"text": "Need a dive?", "key": "dive", "weight": 3, "label": "Dive"}]"#,
    );

    let questions = load_questions(Some(&path)).expect("custom questions");

    assert_eq!(questions.len(), 1);
    let dive = questions.get("dive").expect("dive question");
    assert_eq!(dive.weight, 3);
    assert_eq!(dive.label, "Dive");
}

#[rstest]
fn missing_questions_file_is_reported(harness: Harness) {
    let path = harness.root().join("nowhere.json");

    match load_questions(Some(&path)) {
        Err(CliError::ReadQuestions { path: reported, source }) => {
            assert_eq!(reported, path);
            assert_eq!(source.kind(), ErrorKind::NotFound);
        }
        other => panic!("expected ReadQuestions, found {other:?}"),
    }
}

#[rstest]
#[case::not_json(&b"{"[..])]
#[case::empty_list(&b"[]"[..])]
#[case::duplicate_keys(&br#"[{"text": "a", "key": "k", "weight": 1}, {"text": "b", "key": "k", "weight": 1}]"#[..])]
fn invalid_questions_file_is_reported(harness: Harness, #[case] contents: &[u8]) {
    let path = harness.root().join("questions.json");
    write_utf8(&path, contents);

    let err = load_questions(Some(&path)).expect_err("invalid questions");
    assert!(
        matches!(err, CliError::InvalidQuestions { .. }),
        "unexpected error: {err:?}"
    );
}

#[rstest]
#[tokio::test]
async fn build_state_seeds_and_serves_questions(harness: Harness) {
    let config = ServeConfig {
        listen: "127.0.0.1:0".parse().expect("socket addr"),
        database: DatabaseUrl::Memory,
        seed: None,
        questions: None,
        default_icon: "/static/icons/default.png".to_owned(),
        write_mode: WriteMode::Live,
        proposals_dir: harness.proposals_dir(),
    };

    let state = build_state(&config).expect("state");

    let axum::Json(catalog) = list_champions(axum::extract::State(state))
        .await
        .expect("list");
    assert_eq!(catalog.len(), 16);
}

#[rstest]
fn proposal_names_carry_a_microsecond_timestamp() {
    let at = Utc
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .single()
        .expect("valid timestamp")
        + chrono::Duration::microseconds(42);

    assert_eq!(proposal_file_name(at), "champions_20240102030405000042.json");
}

#[rstest]
fn proposals_are_written_under_the_directory(harness: Harness) {
    let recorder = ProposalRecorder::new(harness.proposals_dir());
    let at = Utc
        .with_ymd_and_hms(2025, 6, 7, 8, 9, 10)
        .single()
        .expect("valid timestamp");
    let payload = json!({ "Nunu": { "frontline": true } });
    let serde_json::Value::Object(payload) = payload else {
        panic!("payload literal is an object");
    };

    let name = recorder.record_at(&payload, at).expect("record");

    assert_eq!(name, "champions_20250607080910000000.json");
    let written = std::fs::read_to_string(harness.proposals_dir().join(&name).as_std_path())
        .expect("read proposal");
    let written: serde_json::Value = serde_json::from_str(&written).expect("JSON");
    assert_eq!(written, serde_json::Value::Object(payload));
}
