//! Record-side seam: layout declaration and field accessors.

use crate::formatter::FieldValue;
use crate::layout::FieldLayout;

/// Implemented by record types that map to a fixed-width line.
///
/// This is the discovery/accessor seam: the codec never inspects the type
/// itself, it only consumes the declared layout and the get/set pair. The
/// codec constructs records through `Default` on decode and never retains a
/// reference once an operation completes.
pub trait FixedWidthRecord: Default {
    /// Declared field layouts in declaration order. Called once per record
    /// type; [`RecordCodec`](crate::codec::RecordCodec) caches the result.
    fn layout() -> Vec<FieldLayout>;

    /// Read the named field as a dynamic value. Unset fields return
    /// [`FieldValue::None`].
    fn get(&self, field: &str) -> FieldValue;

    /// Write the named field from a decoded value. The codec only passes
    /// names that appear in [`FixedWidthRecord::layout`].
    fn set(&mut self, field: &str, value: FieldValue);
}
