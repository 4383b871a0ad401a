//! Record-level codec: assemble and disassemble whole lines.
//!
//! [`decode`] and [`encode`] operate on an explicit [`LayoutSet`];
//! [`RecordCodec`] adds a per-type layout cache and the `load`/`format`
//! entry points. Single-threaded by design: the codec takes `&mut self` so
//! the borrow checker serializes access to the cached layouts, which are
//! shared mutable state while an overlay is active.

use std::any::TypeId;
use std::collections::HashMap;

use crate::error::CodecError;
use crate::formatter::{FieldValue, ValueError};
use crate::layout::{DEFAULT_PADDING, FieldLayout, LayoutSet};
use crate::record::FixedWidthRecord;

fn wrap_value_error(field: &FieldLayout, raw: &str, err: ValueError) -> CodecError {
    match err {
        // Missing required metadata is a layout defect, not a value defect.
        ValueError::MissingPattern => CodecError::Layout {
            field: field.name.clone(),
            message: err.to_string(),
        },
        other => CodecError::Format {
            field: field.name.clone(),
            raw: raw.to_string(),
            message: other.to_string(),
        },
    }
}

/// Decode one field from `line` under its layout.
///
/// A zero-length layout yields [`FieldValue::None`] without consulting the
/// line at all: zeroing a field's length disables it.
pub fn decode_field(layout: &FieldLayout, line: &str) -> Result<FieldValue, CodecError> {
    if layout.length == 0 {
        return Ok(FieldValue::None);
    }
    let raw = layout.extract(line)?;
    let stripped = layout.strip(&raw);
    layout
        .kind
        .formatter()
        .decode(&stripped, &layout.instructions())
        .map_err(|e| wrap_value_error(layout, &stripped, e))
}

/// Decode a full line into a new record.
///
/// Layouts are processed independently in declaration order; overlapping
/// fields simply read the same input region more than once. The first
/// failing field aborts the whole decode; there are no partial records.
pub fn decode<R: FixedWidthRecord>(layouts: &LayoutSet, line: &str) -> Result<R, CodecError> {
    let mut record = R::default();
    for layout in layouts.iter() {
        let value = decode_field(layout, line)?;
        record.set(&layout.name, value);
    }
    Ok(record)
}

/// Encode a record into a line.
///
/// The output buffer spans the maximum `offset - 1 + length` across fields,
/// prefilled with spaces; positions not covered by any field keep that pad.
/// Where fields overlap, later-declared fields overwrite earlier ones:
/// declaration-list order is the authoritative policy, last write wins.
///
/// An absent value ([`FieldValue::None`]) encodes as pure padding. For a
/// zero-padded numeric field that slot reads back as `0`, not as absent:
/// absence does not round-trip through such a field, since the line has no
/// way to distinguish "no value" from "value zero" once the slot is filled
/// with the pad character.
pub fn encode<R: FixedWidthRecord>(layouts: &LayoutSet, record: &R) -> Result<String, CodecError> {
    let mut buffer: Vec<char> = vec![DEFAULT_PADDING; layouts.line_width()];
    for layout in layouts.iter() {
        if layout.length == 0 {
            continue;
        }
        let start = layout.offset.checked_sub(1).ok_or_else(|| CodecError::Layout {
            field: layout.name.clone(),
            message: "offset must be at least 1".to_string(),
        })?;
        let value = record.get(&layout.name);
        let content = layout
            .kind
            .formatter()
            .encode(&value, &layout.instructions())
            .map_err(|e| wrap_value_error(layout, &format!("{value:?}"), e))?;
        for (i, c) in layout.place(&content).chars().enumerate() {
            buffer[start + i] = c;
        }
    }
    Ok(buffer.into_iter().collect())
}

/// Drives decode/encode for record types, caching each type's declared
/// layout on first use.
///
/// The cached [`LayoutSet`] is the state that
/// [`LayoutOverlay`](crate::overlay::LayoutOverlay) mutates through
/// [`RecordCodec::layout_mut`]. Not safe to share across threads while an
/// overlay is active; clone the layout set per thread instead.
#[derive(Debug, Default)]
pub struct RecordCodec {
    layouts: HashMap<TypeId, LayoutSet>,
}

impl RecordCodec {
    pub fn new() -> Self {
        Self::default()
    }

    fn layouts_for<R: FixedWidthRecord + 'static>(&mut self) -> &mut LayoutSet {
        self.layouts
            .entry(TypeId::of::<R>())
            .or_insert_with(|| LayoutSet::new(R::layout()))
    }

    /// Mutable access to the cached layouts of `R`, for applying overlays.
    /// Mutations persist until reset.
    pub fn layout_mut<R: FixedWidthRecord + 'static>(&mut self) -> &mut LayoutSet {
        self.layouts_for::<R>()
    }

    /// Decode `line` into a new `R` under its current (possibly overridden)
    /// layout.
    pub fn load<R: FixedWidthRecord + 'static>(&mut self, line: &str) -> Result<R, CodecError> {
        decode(self.layouts_for::<R>(), line)
    }

    /// Encode `record` into a line under its current (possibly overridden)
    /// layout.
    pub fn format<R: FixedWidthRecord + 'static>(
        &mut self,
        record: &R,
    ) -> Result<String, CodecError> {
        encode(self.layouts_for::<R>(), record)
    }
}
