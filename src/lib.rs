//! # fixedwidth-rs
//!
//! A fixed-width record codec library.
//!
//! Maps structured records to and from fixed-width text lines, the layout
//! style used by mainframe batch files and legacy interchange formats:
//! every field occupies a known character offset and length within a line,
//! with a configurable alignment, padding character, and optional value
//! pattern (e.g. a date format).
//!
//! ## Overview
//!
//! - **Field layouts**: offset, length, alignment, padding, pattern per
//!   field. Fields may overlap, aliasing the same line region.
//! - **Value formatters**: text, integer, decimal, boolean, date,
//!   character, plus caller-supplied custom formatters.
//! - **Record codec**: `load` a line into a record, `format` a record into
//!   a line, driven by the record's declared layout.
//! - **Layout overlays**: scoped, reversible runtime overrides of layout
//!   attributes (apply/reset), for variable-length legacy formats.
//!
//! ## Example
//!
//! ```
//! use fixedwidth_rs::{
//!     Alignment, FieldLayout, FieldValue, FixedWidthRecord, FormatterKind, RecordCodec,
//! };
//!
//! // Record layout: Name(8) Salary(8, right-aligned, zero-padded)
//! #[derive(Debug, Default, PartialEq)]
//! struct Employee {
//!     last_name: Option<String>,
//!     salary: Option<i64>,
//! }
//!
//! impl FixedWidthRecord for Employee {
//!     fn layout() -> Vec<FieldLayout> {
//!         vec![
//!             FieldLayout::new("last_name", 1, 8, FormatterKind::Text),
//!             FieldLayout::new("salary", 9, 8, FormatterKind::Integer)
//!                 .align(Alignment::Right)
//!                 .pad('0'),
//!         ]
//!     }
//!
//!     fn get(&self, field: &str) -> FieldValue {
//!         match field {
//!             "last_name" => self.last_name.clone().into(),
//!             "salary" => self.salary.into(),
//!             _ => FieldValue::None,
//!         }
//!     }
//!
//!     fn set(&mut self, field: &str, value: FieldValue) {
//!         match field {
//!             "last_name" => self.last_name = value.as_text().map(str::to_string),
//!             "salary" => self.salary = value.as_int(),
//!             _ => {}
//!         }
//!     }
//! }
//!
//! let mut codec = RecordCodec::new();
//! let employee: Employee = codec.load("SMITH   00050000").unwrap();
//! assert_eq!(employee.last_name.as_deref(), Some("SMITH"));
//! assert_eq!(employee.salary, Some(50_000));
//! assert_eq!(codec.format(&employee).unwrap(), "SMITH   00050000");
//! ```
//!
//! ## Concurrency
//!
//! Single-threaded, synchronous design. [`RecordCodec`] takes `&mut self`,
//! so access to the cached layouts is serialized by the borrow checker.
//! While a [`LayoutOverlay`] is applied, the layout set is shared mutable
//! state: do not run codec operations against the same record type from
//! other threads; serialize access or clone the layout set per thread.

pub mod codec;
pub mod error;
pub mod formatter;
pub mod layout;
pub mod overlay;
pub mod record;

pub use codec::{RecordCodec, decode, decode_field, encode};
pub use error::CodecError;
pub use formatter::{FieldValue, FormatterKind, ValueError, ValueFormatter};
pub use layout::{Alignment, DEFAULT_PADDING, FieldLayout, FormatInstructions, LayoutSet};
pub use overlay::{AttrValue, LayoutAttr, LayoutOverlay, OverlayGroup};
pub use record::FixedWidthRecord;
