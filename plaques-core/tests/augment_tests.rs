//! Fixture augmenter behaviour over realistic samples
//!
//! Snapshot consumers depend on the exact ids, years, wording and grid
//! coordinates checked here.

use plaques_core::augment::{augment, fingerprint, GRID_STEP};
use plaques_core::{Position, RawRecord};
use serde_json::{json, Map, Value};

fn plaque(idx: usize, inscription: &str) -> RawRecord {
    let mut props = Map::new();
    props.insert("id1".to_string(), json!(idx.to_string()));
    props.insert("title".to_string(), json!(format!("Plaque {}", idx)));
    props.insert("inscription".to_string(), json!(inscription));
    props.insert("address".to_string(), json!(format!("{} Some Street", idx)));
    RawRecord::new(Position::new(-0.1 + idx as f64 * 0.001, 51.5), props)
}

fn halls(n: usize) -> Vec<RawRecord> {
    (0..n).map(|i| plaque(i, "Town hall")).collect()
}

fn text(record: &RawRecord, key: &str) -> Option<String> {
    record.text(key)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_output_order_and_batch_sizes() {
    let input = halls(300);
    let output = augment(&input);

    // Candidates are every 7th index: 43 of them, capped at 20 + 20
    assert_eq!(output.len(), 340);

    // Originals keep their place
    assert_eq!(text(&output[0], "id1").as_deref(), Some("0"));
    assert_eq!(text(&output[299], "id1").as_deref(), Some("299"));

    // Vintage A follows the originals, vintage B follows A
    assert_eq!(text(&output[300], "id1").as_deref(), Some("2025_0"));
    assert_eq!(text(&output[301], "id1").as_deref(), Some("2025_7"));
    assert_eq!(text(&output[319], "id1").as_deref(), Some("2025_133"));
    assert_eq!(text(&output[320], "id1").as_deref(), Some("2026_140"));
    assert_eq!(text(&output[339], "id1").as_deref(), Some("2026_273"));
}

#[test]
fn test_vintage_wording() {
    let output = augment(&halls(300));

    let a0 = &output[300];
    assert_eq!(text(a0, "erected").as_deref(), Some("2025"));
    assert_eq!(text(a0, "title").as_deref(), Some("Plaque 0 (2025)"));
    assert_eq!(
        text(a0, "inscription").as_deref(),
        Some("Modern building established here in 2025. Town hall")
    );
    assert_eq!(
        text(&output[301], "inscription").as_deref(),
        Some("Historical event commemorated in 2025. Town hall")
    );
    assert_eq!(
        text(&output[302], "inscription").as_deref(),
        Some("Town hall - Plaque erected 2025")
    );
    assert_eq!(
        text(&output[303], "inscription").as_deref(),
        Some("Town hall - Plaque erected 2025")
    );

    let b0 = &output[320];
    assert_eq!(text(b0, "erected").as_deref(), Some("2026"));
    assert_eq!(text(b0, "title").as_deref(), Some("Plaque 140 (2026)"));
    assert_eq!(
        text(b0, "inscription").as_deref(),
        Some("New cultural center opened here in 2026. Town hall")
    );
    assert_eq!(
        text(&output[321], "inscription").as_deref(),
        Some("Memorial event held at this site in 2026. Town hall")
    );
    assert_eq!(
        text(&output[322], "inscription").as_deref(),
        Some("Town hall - Commemorative plaque installed 2026")
    );
}

#[test]
fn test_grid_offsets_from_source() {
    let input = halls(300);
    let output = augment(&input);

    for (i, variant) in output[300..320].iter().enumerate() {
        let source = &input[i * 7];
        let expected_lon = source.position.longitude + (i % 5) as f64 * GRID_STEP;
        let expected_lat = source.position.latitude + (i / 5) as f64 * GRID_STEP;
        assert!(close(variant.position.longitude, expected_lon), "lon at {}", i);
        assert!(close(variant.position.latitude, expected_lat), "lat at {}", i);
    }

    // Batch B restarts its grid at the origin of its own batch index
    let b6 = &output[326];
    let source = &input[(20 + 6) * 7];
    assert!(close(b6.position.longitude, source.position.longitude + GRID_STEP));
    assert!(close(b6.position.latitude, source.position.latitude + GRID_STEP));
}

#[test]
fn test_candidate_selection() {
    let mut input: Vec<RawRecord> = (0..30).map(|i| plaque(i, "Lived here")).collect();
    // Index 7 qualifies by title, 14 by inscription, 15 is off-stride
    input[7] = input[7].with_text("title", "Former Building of Note");
    input[14] = input[14].with_text("inscription", "Site of the old THEATRE");
    input[15] = input[15].with_text("inscription", "Music hall");

    let output = augment(&input);
    let synthetic: Vec<String> = output[30..].iter().filter_map(|r| r.text("id1")).collect();
    assert_eq!(synthetic, vec!["2025_7", "2025_14"]);
}

#[test]
fn test_missing_id_and_title_fall_back() {
    let mut props = Map::new();
    props.insert("inscription".to_string(), json!("Site of a market"));
    let input = vec![RawRecord::new(Position::new(0.0, 51.0), props)];

    let output = augment(&input);
    assert_eq!(output.len(), 2);
    assert_eq!(text(&output[1], "id1").as_deref(), Some("2025_0"));
    assert_eq!(text(&output[1], "title").as_deref(), Some("Plaque (2025)"));
}

#[test]
fn test_override_record_dated_2026() {
    let mut input = halls(30);
    input[14] = input[14].with_text("id1", "6428");
    input[21] = input[21].with_text("address", "470 Baker Street N2, London");

    let output = augment(&input);
    let by_source: Vec<(Option<String>, Option<String>, Option<String>)> = output[30..]
        .iter()
        .map(|r| (r.text("id1"), r.text("erected"), r.text("title")))
        .collect();

    assert_eq!(
        by_source[2],
        (
            Some("2026_6428".to_string()),
            Some("2026".to_string()),
            Some("Plaque 14 (2026)".to_string())
        )
    );
    assert_eq!(by_source[3].0.as_deref(), Some("2026_21"));
    assert_eq!(by_source[3].1.as_deref(), Some("2026"));
    // Inscription wording stays with the 2025 batch
    assert_eq!(
        text(&output[32], "inscription").as_deref(),
        Some("Town hall - Plaque erected 2025")
    );
    assert_eq!(by_source[0].1.as_deref(), Some("2025"));
}

#[test]
fn test_recency_rewrite_only_touches_erected() {
    let input: Vec<RawRecord> = (0..60)
        .map(|i| plaque(i, "Lived here").with_text("erected", "1890"))
        .collect();
    let output = augment(&input);
    assert_eq!(output.len(), 60);

    let expected = [2020, 2021, 2022, 2023, 2024, 2020, 2021, 2022, 2023, 2024];
    for (n, idx) in (0..50).step_by(5).enumerate() {
        assert_eq!(text(&output[idx], "erected"), Some(expected[n].to_string()));

        let mut before = input[idx].properties.clone();
        let mut after = output[idx].properties.clone();
        before.remove("erected");
        after.remove("erected");
        assert_eq!(before, after);
        assert_eq!(input[idx].position, output[idx].position);
    }

    assert_eq!(text(&output[1], "erected").as_deref(), Some("1890"));
    assert_eq!(text(&output[55], "erected").as_deref(), Some("1890"));
}

#[test]
fn test_input_is_not_mutated() {
    let input = halls(60);
    let before = input.clone();
    augment(&input);
    assert_eq!(input, before);
}

#[test]
fn test_deterministic_fingerprint() {
    let input = halls(120);
    let a = fingerprint(&augment(&input)).unwrap();
    let b = fingerprint(&augment(&input)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);

    let other = fingerprint(&augment(&halls(121))).unwrap();
    assert_ne!(a, other);
}

#[test]
fn test_empty_input() {
    assert!(augment(&[]).is_empty());
    let value: Value = serde_json::to_value(augment(&[])).unwrap();
    assert_eq!(value, json!([]));
}
