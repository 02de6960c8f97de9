//! Saved quotes survive a round trip through the SQLite store

use roofquote::core::{KeyValueStore, QuoteStore, SqliteStore, QUOTES_KEY};
use roofquote::entities::{JobDetails, QuoteData, QuoteRecord};
use roofquote::pricing::{Category, Fastener, MeasurementSet, OptionSelections, PriceBook};
use std::thread;
use tempfile::TempDir;

/// Nonzero input for every category that can be nonzero at once
fn full_record() -> QuoteRecord {
    QuoteRecord::new(
        "Hilltop residence",
        QuoteData {
            measurements: MeasurementSet {
                area: 3200.0,
                waste_pct: 12.0,
                hips: 64.0,
                ridges: 48.0,
                gables: 90.0,
                eaves: 210.0,
                valleys: 36.0,
                sidewalls: 22.0,
                endwalls: 14.0,
                transitions: 18.0,
            },
            options: OptionSelections {
                markup_pct: 15.0,
                ..Default::default()
            },
            job: JobDetails {
                customer: "R. Alvarez".to_string(),
                po: "7781".to_string(),
                notes: "Two-story, north face steep".to_string(),
            },
            ..Default::default()
        },
    )
}

#[test]
fn test_round_trip_reproduces_results() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("quotes.db");
    let book = PriceBook::builtin();

    let record = full_record();
    let before = record.recompute(&book);
    for category in Category::ALL {
        if category == Category::CapNails {
            continue;
        }
        assert!(
            before.heavy.line(category).unwrap().total > 0.0,
            "{:?} should be priced",
            category
        );
    }

    {
        let mut store = QuoteStore::new(SqliteStore::open(&path).unwrap());
        store.save(&record).unwrap();
    }

    let store = QuoteStore::new(SqliteStore::open(&path).unwrap());
    let loaded = store.load(record.id).unwrap();
    assert_eq!(loaded.data, record.data);
    assert_eq!(loaded.recompute(&book), before);
}

#[test]
fn test_cap_nail_record_round_trip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("quotes.db");
    let book = PriceBook::builtin();

    let mut record = full_record();
    record.data.options.fastener = Fastener::CapNails;
    let before = record.recompute(&book);
    assert!(before.light.line(Category::CapNails).unwrap().total > 0.0);

    let mut store = QuoteStore::new(SqliteStore::open(&path).unwrap());
    store.save(&record).unwrap();
    let loaded = store.load(record.id).unwrap();
    assert_eq!(loaded.recompute(&book), before);
}

#[test]
fn test_unreadable_entries_are_kept() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("quotes.db");

    let mut kv = SqliteStore::open(&path).unwrap();
    kv.set(QUOTES_KEY, r#"[{"id": 42, "name": "broken"}]"#).unwrap();

    let mut store = QuoteStore::new(kv);
    assert!(store.list().unwrap().is_empty());

    let record = full_record();
    store.save(&record).unwrap();
    assert_eq!(store.list().unwrap().len(), 1);

    let raw = store.into_inner().get(QUOTES_KEY).unwrap().unwrap();
    let entries: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 2);
    assert_eq!(entries[0]["name"], "broken");
}

#[test]
fn test_records_use_camel_case_fields() {
    let record = full_record();
    let json = serde_json::to_value(&record).unwrap();
    assert!(json["createdAt"].is_string());
    assert!(json["appVersion"].is_string());
    assert!(json["id"].as_str().unwrap().starts_with("QUOTE-"));
}

#[test]
fn test_fractional_inputs_survive_exactly() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("quotes.db");
    let book = PriceBook::builtin();

    let mut record = full_record();
    record.data.measurements.area = 911.6760726776201;
    record.data.measurements.waste_pct = 7.300000000000001;
    record.data.measurements.hips = 33.333333333333336;
    record.data.options.markup_pct = 12.345678901234567;
    let before = record.recompute(&book);

    let mut store = QuoteStore::new(SqliteStore::open(&path).unwrap());
    store.save(&record).unwrap();
    let loaded = store.load(record.id).unwrap();

    let (a, b) = (&loaded.data, &record.data);
    assert_eq!(a.measurements.area.to_bits(), b.measurements.area.to_bits());
    assert_eq!(a.measurements.waste_pct.to_bits(), b.measurements.waste_pct.to_bits());
    assert_eq!(a.measurements.hips.to_bits(), b.measurements.hips.to_bits());
    assert_eq!(a.options.markup_pct.to_bits(), b.options.markup_pct.to_bits());
    assert_eq!(loaded.data, record.data);
    assert_eq!(loaded.recompute(&book), before);
}

#[test]
fn test_saved_rules_outlive_setting_changes() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("quotes.db");
    let book = PriceBook::builtin();

    let record = full_record();
    assert!(!record.data.rules.z_metal_wall_addend);
    let before = record.recompute(&book);

    let mut store = QuoteStore::new(SqliteStore::open(&path).unwrap());
    store.save(&record).unwrap();

    let mut flipped = full_record();
    flipped.data.rules.z_metal_wall_addend = true;
    assert_ne!(
        flipped.recompute(&book).heavy.line(Category::ZMetal),
        before.heavy.line(Category::ZMetal)
    );

    let loaded = store.load(record.id).unwrap();
    assert_eq!(loaded.data.rules, record.data.rules);
    assert_eq!(loaded.recompute(&book), before);
}

#[test]
fn test_concurrent_saves_keep_every_record() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("quotes.db");
    SqliteStore::open(&path).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let path = path.clone();
            thread::spawn(move || {
                let mut store = QuoteStore::new(SqliteStore::open(&path).unwrap());
                for n in 0..5 {
                    let mut record = full_record();
                    record.name = format!("worker {} quote {}", worker, n);
                    store.save(&record).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let store = QuoteStore::new(SqliteStore::open(&path).unwrap());
    assert_eq!(store.list().unwrap().len(), 20);
}
