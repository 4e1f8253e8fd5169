//! Fallback chain behavior against the in-memory source.
//!
//! These tests verify:
//! - the order in which languages are requested
//! - which label is reported for the attempt that succeeded
//! - that both record shapes normalize to the same entries
//! - that an exhausted chain yields an empty result rather than an error

use multitool_transcript::{
    RawRecord, Snippet, StaticSource, StaticTrack, UNKNOWN_DURATION, fetch_transcript,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn map_record(text: &str, start: f64, duration: f64) -> RawRecord {
    match json!({"text": text, "start": start, "duration": duration}) {
        serde_json::Value::Object(map) => RawRecord::Map(map),
        _ => unreachable!(),
    }
}

fn snippets(parts: &[(&str, f64, f64)]) -> Vec<RawRecord> {
    parts
        .iter()
        .map(|(text, start, duration)| Snippet::new(*text, *start, *duration).into())
        .collect()
}

fn requested(codes: &[&str]) -> Option<Vec<String>> {
    Some(codes.iter().map(|c| c.to_string()).collect())
}

// ==========================================================================
// Default chain
// ==========================================================================

#[tokio::test]
async fn test_korean_manual_track_wins_first() {
    let source = StaticSource::new()
        .with_track(StaticTrack::manual("en", snippets(&[("hello", 0.0, 1.0)])))
        .with_track(StaticTrack::manual("ko", snippets(&[("안녕", 0.0, 1.0)])));

    let fetched = fetch_transcript(&source, "dQw4w9WgXcQ", None).await;

    assert_eq!(fetched.language_used.as_deref(), Some("Korean"));
    assert_eq!(fetched.full_text, "안녕");
    assert_eq!(source.requests(), vec![requested(&["ko"])]);
}

#[tokio::test]
async fn test_default_chain_order_until_english_region() {
    let source = StaticSource::new()
        .with_track(StaticTrack::manual("en-GB", snippets(&[("colour", 0.0, 2.0)])));

    let fetched = fetch_transcript(&source, "dQw4w9WgXcQ", None).await;

    assert_eq!(fetched.language_used.as_deref(), Some("English"));
    assert_eq!(
        source.requests(),
        vec![
            requested(&["ko"]),
            requested(&["ko-auto"]),
            requested(&["en"]),
            requested(&["en-US", "en-GB"]),
        ]
    );
}

#[tokio::test]
async fn test_auto_generated_korean_label() {
    let source = StaticSource::new()
        .with_track(StaticTrack::generated("ko", snippets(&[("자동", 0.0, 1.0)])));

    let fetched = fetch_transcript(&source, "dQw4w9WgXcQ", None).await;

    assert_eq!(
        fetched.language_used.as_deref(),
        Some("Korean (auto-generated)")
    );
}

#[tokio::test]
async fn test_falls_back_to_default_track() {
    let source = StaticSource::new()
        .with_track(StaticTrack::generated("de", snippets(&[("hallo", 1.0, 2.0)])));

    let fetched = fetch_transcript(&source, "dQw4w9WgXcQ", None).await;

    assert_eq!(fetched.language_used.as_deref(), Some("Default language"));
    assert_eq!(source.requests().len(), 7);
    assert_eq!(source.requests().last(), Some(&None));
}

#[tokio::test]
async fn test_no_tracks_yields_empty_result() {
    let source = StaticSource::new();

    let fetched = fetch_transcript(&source, "dQw4w9WgXcQ", None).await;

    assert!(fetched.is_empty());
    assert_eq!(fetched.language_used, None);
    assert_eq!(fetched.duration_label, UNKNOWN_DURATION);
    assert_eq!(fetched.full_text, "");
}

#[tokio::test]
async fn test_unavailable_video_yields_empty_result() {
    let source = StaticSource::new()
        .with_track(StaticTrack::manual("ko", snippets(&[("x", 0.0, 1.0)])))
        .unavailable();

    let fetched = fetch_transcript(&source, "dQw4w9WgXcQ", Some("ko")).await;

    assert!(fetched.is_empty());
    assert_eq!(source.requests().len(), 2);
}

// ==========================================================================
// Requested language
// ==========================================================================

#[tokio::test]
async fn test_requested_language_manual_track() {
    let source = StaticSource::new()
        .with_track(StaticTrack::manual("fr", snippets(&[("bonjour", 0.0, 1.0)])));

    let fetched = fetch_transcript(&source, "dQw4w9WgXcQ", Some("fr")).await;

    assert_eq!(fetched.language_used.as_deref(), Some("fr"));
    assert_eq!(source.requests(), vec![requested(&["fr"])]);
}

#[tokio::test]
async fn test_requested_language_falls_back_to_auto_generated() {
    let source = StaticSource::new()
        .with_track(StaticTrack::generated("fr", snippets(&[("bonjour", 0.0, 1.0)])));

    let fetched = fetch_transcript(&source, "dQw4w9WgXcQ", Some("fr")).await;

    assert_eq!(
        fetched.language_used.as_deref(),
        Some("fr (auto-generated)")
    );
    assert_eq!(
        source.requests(),
        vec![requested(&["fr"]), requested(&["fr-auto", "fr"])]
    );
}

#[tokio::test]
async fn test_requested_language_never_uses_other_languages() {
    let source = StaticSource::new()
        .with_track(StaticTrack::manual("en", snippets(&[("hello", 0.0, 1.0)])));

    let fetched = fetch_transcript(&source, "dQw4w9WgXcQ", Some("fr")).await;

    assert!(fetched.is_empty());
    assert_eq!(source.requests().len(), 2);
}

#[tokio::test]
async fn test_blank_language_means_no_preference() {
    let source = StaticSource::new()
        .with_track(StaticTrack::manual("ko", snippets(&[("안녕", 0.0, 1.0)])));

    let fetched = fetch_transcript(&source, "dQw4w9WgXcQ", Some("  ")).await;

    assert_eq!(fetched.language_used.as_deref(), Some("Korean"));
}

// ==========================================================================
// Normalization
// ==========================================================================

#[tokio::test]
async fn test_record_shapes_normalize_identically() {
    let parts = [("first line", 0.0, 2.5), ("second line", 2.5, 3.0)];
    let as_maps: Vec<RawRecord> = parts
        .iter()
        .map(|(text, start, duration)| map_record(text, *start, *duration))
        .collect();

    let from_maps = fetch_transcript(
        &StaticSource::new().with_track(StaticTrack::manual("ko", as_maps)),
        "dQw4w9WgXcQ",
        None,
    )
    .await;
    let from_snippets = fetch_transcript(
        &StaticSource::new().with_track(StaticTrack::manual("ko", snippets(&parts))),
        "dQw4w9WgXcQ",
        None,
    )
    .await;

    assert_eq!(from_maps, from_snippets);
    assert_eq!(from_maps.full_text, "first line second line");
    assert_eq!(from_maps.word_count(), 4);
}

#[tokio::test]
async fn test_duration_label_uses_last_entry_end() {
    let source = StaticSource::new().with_track(StaticTrack::manual(
        "ko",
        snippets(&[("a", 0.0, 10.0), ("b", 120.0, 5.7)]),
    ));

    let fetched = fetch_transcript(&source, "dQw4w9WgXcQ", None).await;

    assert_eq!(fetched.duration_label, "2m 5s");
}

#[tokio::test]
async fn test_malformed_record_fields_use_defaults() {
    let record = match json!({"text": null, "start": "late", "duration": 3}) {
        serde_json::Value::Object(map) => RawRecord::Map(map),
        _ => unreachable!(),
    };
    let source = StaticSource::new().with_track(StaticTrack::manual("ko", vec![record]));

    let fetched = fetch_transcript(&source, "dQw4w9WgXcQ", None).await;

    assert_eq!(fetched.entries.len(), 1);
    assert_eq!(fetched.entries[0].text, "");
    assert_eq!(fetched.duration_label, "0m 3s");
}
