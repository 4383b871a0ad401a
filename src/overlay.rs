//! Scoped, reversible overrides of field layout attributes.
//!
//! A [`LayoutOverlay`] replaces one attribute of one [`FieldLayout`] and
//! remembers the prior value so it can be restored. An [`OverlayGroup`]
//! batches several attribute overrides for the same field, built fluently
//! or from a configuration string map.
//!
//! Overlays hold one saved generation per attribute. They are the only
//! sanctioned way to mutate a layout set; while one is applied, the layout
//! set is shared mutable state and must not be used from other threads.

use std::collections::HashMap;

use tracing::warn;

use crate::error::CodecError;
use crate::layout::{Alignment, FieldLayout, LayoutSet};

/// Layout attribute addressed by an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutAttr {
    Offset,
    Length,
    Alignment,
    PaddingChar,
    Pattern,
}

/// A typed attribute value: the override to swap in, and the shape of the
/// saved prior value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Offset(usize),
    Length(usize),
    Alignment(Alignment),
    PaddingChar(char),
    Pattern(Option<String>),
}

impl AttrValue {
    pub fn attr(&self) -> LayoutAttr {
        match self {
            AttrValue::Offset(_) => LayoutAttr::Offset,
            AttrValue::Length(_) => LayoutAttr::Length,
            AttrValue::Alignment(_) => LayoutAttr::Alignment,
            AttrValue::PaddingChar(_) => LayoutAttr::PaddingChar,
            AttrValue::Pattern(_) => LayoutAttr::Pattern,
        }
    }

    /// Read the current value of `attr` from a layout.
    pub fn read(layout: &FieldLayout, attr: LayoutAttr) -> AttrValue {
        match attr {
            LayoutAttr::Offset => AttrValue::Offset(layout.offset),
            LayoutAttr::Length => AttrValue::Length(layout.length),
            LayoutAttr::Alignment => AttrValue::Alignment(layout.alignment),
            LayoutAttr::PaddingChar => AttrValue::PaddingChar(layout.padding),
            LayoutAttr::Pattern => AttrValue::Pattern(layout.pattern.clone()),
        }
    }

    /// Write this value into a layout.
    pub fn write(self, layout: &mut FieldLayout) {
        match self {
            AttrValue::Offset(v) => layout.offset = v,
            AttrValue::Length(v) => layout.length = v,
            AttrValue::Alignment(v) => layout.alignment = v,
            AttrValue::PaddingChar(v) => layout.padding = v,
            AttrValue::Pattern(v) => layout.pattern = v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OverlayState {
    Created,
    Applied,
    Reset,
}

/// Single-attribute override with one saved generation.
///
/// Lifecycle: `CREATED -> APPLIED -> RESET`. Calling [`LayoutOverlay::apply`]
/// twice, or [`LayoutOverlay::reset`] before apply, is a caller error.
#[derive(Debug, Clone)]
pub struct LayoutOverlay {
    field: String,
    new_value: AttrValue,
    saved: Option<AttrValue>,
    state: OverlayState,
}

impl LayoutOverlay {
    pub fn new(field: impl Into<String>, new_value: AttrValue) -> Self {
        LayoutOverlay {
            field: field.into(),
            new_value,
            saved: None,
            state: OverlayState::Created,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Swap the override in, recording the prior value.
    pub fn apply(&mut self, layouts: &mut LayoutSet) -> Result<(), CodecError> {
        if self.state != OverlayState::Created {
            return Err(CodecError::State(format!(
                "apply() on overlay for '{}' already {:?}",
                self.field, self.state
            )));
        }
        let layout = layouts.field_mut(&self.field).ok_or_else(|| {
            CodecError::Configuration(format!("no field '{}' in layout", self.field))
        })?;
        self.saved = Some(AttrValue::read(layout, self.new_value.attr()));
        self.new_value.clone().write(layout);
        self.state = OverlayState::Applied;
        Ok(())
    }

    /// Restore the saved value.
    pub fn reset(&mut self, layouts: &mut LayoutSet) -> Result<(), CodecError> {
        if self.state != OverlayState::Applied {
            return Err(CodecError::State(format!(
                "reset() on overlay for '{}' in state {:?}",
                self.field, self.state
            )));
        }
        let layout = layouts.field_mut(&self.field).ok_or_else(|| {
            CodecError::Configuration(format!("no field '{}' in layout", self.field))
        })?;
        if let Some(saved) = self.saved.take() {
            saved.write(layout);
        }
        self.state = OverlayState::Reset;
        Ok(())
    }
}

/// Batched attribute overrides for one field.
///
/// Built fluently (`OverlayGroup::for_field("salary").offset(25).length(10)`)
/// or from a configuration map via [`OverlayGroup::from_map`]. Members apply
/// in insertion order and reset in reverse; each targets a disjoint
/// attribute, so the order carries no meaning.
#[derive(Debug, Clone)]
pub struct OverlayGroup {
    field: String,
    overlays: Vec<LayoutOverlay>,
}

impl OverlayGroup {
    pub fn for_field(field: impl Into<String>) -> Self {
        OverlayGroup {
            field: field.into(),
            overlays: Vec::new(),
        }
    }

    fn with(mut self, value: AttrValue) -> Self {
        self.overlays.push(LayoutOverlay::new(self.field.clone(), value));
        self
    }

    pub fn offset(self, offset: usize) -> Self {
        self.with(AttrValue::Offset(offset))
    }

    pub fn length(self, length: usize) -> Self {
        self.with(AttrValue::Length(length))
    }

    pub fn alignment(self, alignment: Alignment) -> Self {
        self.with(AttrValue::Alignment(alignment))
    }

    pub fn padding_char(self, padding: char) -> Self {
        self.with(AttrValue::PaddingChar(padding))
    }

    pub fn pattern(self, pattern: impl Into<String>) -> Self {
        self.with(AttrValue::Pattern(Some(pattern.into())))
    }

    /// Build a group from a configuration map of attribute name to string
    /// value.
    ///
    /// Recognized keys: `offset`, `length` (integers), `alignment`
    /// (`left`/`right`, case-insensitive), `pattern`, `paddingchar` (first
    /// character of the value). Every entry is validated before anything is
    /// constructed, so a malformed value fails without any layout mutation.
    /// Unrecognized keys are warned about and skipped, not fatal.
    pub fn from_map(
        field: impl Into<String>,
        properties: &HashMap<String, String>,
    ) -> Result<Self, CodecError> {
        let field = field.into();
        let mut group = OverlayGroup::for_field(field.clone());
        for (key, value) in properties {
            match key.to_ascii_lowercase().as_str() {
                "offset" => {
                    let offset = value.trim().parse::<usize>().map_err(|_| {
                        CodecError::Configuration(format!(
                            "offset '{value}' for field '{field}' is not an integer"
                        ))
                    })?;
                    group = group.offset(offset);
                }
                "length" => {
                    let length = value.trim().parse::<usize>().map_err(|_| {
                        CodecError::Configuration(format!(
                            "length '{value}' for field '{field}' is not an integer"
                        ))
                    })?;
                    group = group.length(length);
                }
                "alignment" => {
                    group = group.alignment(Alignment::parse(value)?);
                }
                "pattern" => {
                    group = group.pattern(value.as_str());
                }
                "paddingchar" => {
                    let padding = value.chars().next().ok_or_else(|| {
                        CodecError::Configuration(format!(
                            "empty paddingchar for field '{field}'"
                        ))
                    })?;
                    group = group.padding_char(padding);
                }
                other => {
                    warn!(field = %field, key = %other, "ignoring unknown layout override key");
                }
            }
        }
        Ok(group)
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Apply all member overlays in insertion order.
    ///
    /// The target field is checked up front so a missing field fails before
    /// any member mutates the layout.
    pub fn apply(&mut self, layouts: &mut LayoutSet) -> Result<(), CodecError> {
        if layouts.field(&self.field).is_none() {
            return Err(CodecError::Configuration(format!(
                "no field '{}' in layout",
                self.field
            )));
        }
        for overlay in &mut self.overlays {
            overlay.apply(layouts)?;
        }
        Ok(())
    }

    /// Reset all member overlays in reverse order.
    pub fn reset(&mut self, layouts: &mut LayoutSet) -> Result<(), CodecError> {
        for overlay in self.overlays.iter_mut().rev() {
            overlay.reset(layouts)?;
        }
        Ok(())
    }
}
