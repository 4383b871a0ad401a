//! End-to-end codec scenarios: decode/encode of a sample record, runtime
//! layout overlays, and a file round-trip.

use std::collections::HashMap;
use std::fs;

use chrono::NaiveDate;
use fixedwidth_rs::{
    Alignment, AttrValue, CodecError, FieldLayout, FieldValue, FixedWidthRecord, FormatterKind,
    LayoutOverlay, OverlayGroup, RecordCodec,
};

/// String(1-20), right-aligned zero-padded integer(21-25), date(26-35).
#[derive(Debug, Default, Clone, PartialEq)]
struct BasicRecord {
    string_data: Option<String>,
    integer_data: Option<i64>,
    date_data: Option<NaiveDate>,
}

impl FixedWidthRecord for BasicRecord {
    fn layout() -> Vec<FieldLayout> {
        vec![
            FieldLayout::new("string_data", 1, 20, FormatterKind::Text),
            FieldLayout::new("integer_data", 21, 5, FormatterKind::Integer)
                .align(Alignment::Right)
                .pad('0'),
            FieldLayout::new("date_data", 26, 10, FormatterKind::Date).with_pattern("%d/%m/%Y"),
        ]
    }

    fn get(&self, field: &str) -> FieldValue {
        match field {
            "string_data" => self.string_data.clone().into(),
            "integer_data" => self.integer_data.into(),
            "date_data" => self.date_data.into(),
            _ => FieldValue::None,
        }
    }

    fn set(&mut self, field: &str, value: FieldValue) {
        match field {
            "string_data" => self.string_data = value.as_text().map(str::to_string),
            "integer_data" => self.integer_data = value.as_int(),
            "date_data" => self.date_data = value.as_date(),
            _ => {}
        }
    }
}

const LINE: &str = "123456789012345678900022717/06/2019";

#[test]
fn load_splits_line_by_declared_offsets() {
    let mut codec = RecordCodec::new();
    let record: BasicRecord = codec.load(LINE).unwrap();
    assert_eq!(record.string_data.as_deref(), Some("12345678901234567890"));
    assert_eq!(record.integer_data, Some(227));
    assert_eq!(record.date_data, NaiveDate::from_ymd_opt(2019, 6, 17));
}

#[test]
fn format_load_round_trip() {
    let mut codec = RecordCodec::new();
    let record = BasicRecord {
        string_data: Some("PAYROLL".to_string()),
        integer_data: Some(42),
        date_data: NaiveDate::from_ymd_opt(2024, 1, 31),
    };
    let line = codec.format(&record).unwrap();
    assert_eq!(line.chars().count(), 35);
    let reloaded: BasicRecord = codec.load(&line).unwrap();
    assert_eq!(reloaded, record);
}

#[test]
fn overlay_shrinks_string_field() {
    let mut codec = RecordCodec::new();
    let mut overlay = LayoutOverlay::new("string_data", AttrValue::Length(10));

    overlay.apply(codec.layout_mut::<BasicRecord>()).unwrap();
    let record: BasicRecord = codec.load(LINE).unwrap();
    assert_eq!(record.string_data.as_deref(), Some("1234567890"));

    overlay.reset(codec.layout_mut::<BasicRecord>()).unwrap();
    let record: BasicRecord = codec.load(LINE).unwrap();
    assert_eq!(record.string_data.as_deref(), Some("12345678901234567890"));
}

#[test]
fn overlay_zero_length_disables_field() {
    let mut codec = RecordCodec::new();
    let mut overlay = LayoutOverlay::new("string_data", AttrValue::Length(0));

    overlay.apply(codec.layout_mut::<BasicRecord>()).unwrap();
    let record: BasicRecord = codec.load(LINE).unwrap();
    assert!(record.string_data.is_none());

    overlay.reset(codec.layout_mut::<BasicRecord>()).unwrap();
}

#[test]
fn overlay_offset_override_overlaps_fields() {
    let mut codec = RecordCodec::new();
    let mut overlay = LayoutOverlay::new("integer_data", AttrValue::Offset(1));

    overlay.apply(codec.layout_mut::<BasicRecord>()).unwrap();
    let record: BasicRecord = codec.load(LINE).unwrap();
    // The integer field now reads the first 5 chars; the string field keeps
    // its own independent layout and is unaffected.
    assert_eq!(record.integer_data, Some(12345));
    assert_eq!(record.string_data.as_deref(), Some("12345678901234567890"));

    overlay.reset(codec.layout_mut::<BasicRecord>()).unwrap();
    let record: BasicRecord = codec.load(LINE).unwrap();
    assert_eq!(record.integer_data, Some(227));
}

#[test]
fn override_map_bad_length_leaves_layout_unchanged() {
    let mut codec = RecordCodec::new();
    let map = HashMap::from([("length".to_string(), "quite long".to_string())]);
    let err = OverlayGroup::from_map("integer_data", &map).unwrap_err();
    assert!(matches!(err, CodecError::Configuration(_)), "got {err:?}");

    let record: BasicRecord = codec.load(LINE).unwrap();
    assert_eq!(record.integer_data, Some(227));
}

#[test]
fn override_map_drives_relayout() {
    let mut codec = RecordCodec::new();
    let map = HashMap::from([
        ("offset".to_string(), "1".to_string()),
        ("length".to_string(), "5".to_string()),
    ]);
    let mut group = OverlayGroup::from_map("integer_data", &map).unwrap();

    group.apply(codec.layout_mut::<BasicRecord>()).unwrap();
    let record: BasicRecord = codec.load(LINE).unwrap();
    assert_eq!(record.integer_data, Some(12345));

    group.reset(codec.layout_mut::<BasicRecord>()).unwrap();
    let record: BasicRecord = codec.load(LINE).unwrap();
    assert_eq!(record.integer_data, Some(227));
}

#[test]
fn encode_truncates_overlong_string() {
    let mut codec = RecordCodec::new();
    let record = BasicRecord {
        string_data: Some("X".repeat(30)),
        integer_data: Some(1),
        date_data: None,
    };
    let line = codec.format(&record).unwrap();
    // LEFT alignment keeps the first 20 characters.
    assert_eq!(&line[..20], "X".repeat(20).as_str());
    assert_eq!(line.chars().count(), 35);
}

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("basic.data");

    let records = vec![
        BasicRecord {
            string_data: Some("FIRST".to_string()),
            integer_data: Some(1),
            date_data: NaiveDate::from_ymd_opt(2019, 6, 17),
        },
        BasicRecord {
            string_data: Some("SECOND".to_string()),
            integer_data: Some(22222),
            date_data: NaiveDate::from_ymd_opt(2024, 12, 1),
        },
    ];

    let mut codec = RecordCodec::new();
    let lines: Vec<String> = records
        .iter()
        .map(|r| codec.format(r).unwrap())
        .collect();
    fs::write(&path, lines.join("\n")).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let reloaded: Vec<BasicRecord> = content
        .lines()
        .map(|line| codec.load(line).unwrap())
        .collect();
    assert_eq!(reloaded, records);
}
