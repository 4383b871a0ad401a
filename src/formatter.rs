//! Per-type value formatters.
//!
//! A [`ValueFormatter`] converts between a [`FieldValue`] and its textual
//! form under a set of [`FormatInstructions`]. Formatters never pad or
//! truncate (that is the codec's job), so they stay decoupled from layout.
//!
//! Decoding receives the padding-stripped substring; a blank substring
//! decodes to [`FieldValue::None`] (the text formatter yields an empty
//! string instead). Encoding a [`FieldValue::None`] yields an empty string,
//! which the codec pads out to the full field width.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use thiserror::Error;

use crate::layout::FormatInstructions;

/// Dynamic value passed across the record accessor boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Absent value: decodes from a blank field, encodes to one.
    #[default]
    None,
    Text(String),
    Int(i64),
    Decimal(f64),
    Bool(bool),
    Date(NaiveDate),
    Char(char),
}

impl FieldValue {
    pub fn is_none(&self) -> bool {
        matches!(self, FieldValue::None)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            FieldValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            FieldValue::Char(c) => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::None => Ok(()),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Decimal(d) => write!(f, "{d}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Date(d) => write!(f, "{d}"),
            FieldValue::Char(c) => write!(f, "{c}"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<f64> for FieldValue {
    fn from(d: f64) -> Self {
        FieldValue::Decimal(d)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

impl From<char> for FieldValue {
    fn from(c: char) -> Self {
        FieldValue::Char(c)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => FieldValue::None,
        }
    }
}

/// Failure inside a formatter. The codec wraps it with field context and
/// maps it onto the error taxonomy ([`crate::error::CodecError`]).
#[derive(Debug, Error)]
pub enum ValueError {
    /// The field type needs a pattern and the layout has none. A layout
    /// defect, surfaced at encode/decode time rather than at registration.
    #[error("a pattern is required for this field type")]
    MissingPattern,
    #[error("{0}")]
    Parse(String),
    #[error("{0}")]
    Render(String),
}

/// Stateless bidirectional converter between a field value and its text.
pub trait ValueFormatter: Send + Sync {
    /// Convert a padding-stripped substring into a typed value.
    fn decode(&self, raw: &str, instructions: &FormatInstructions)
    -> Result<FieldValue, ValueError>;

    /// Render a value as unpadded text of at most the field length; the
    /// codec applies padding and truncation afterwards.
    fn encode(&self, value: &FieldValue, instructions: &FormatInstructions)
    -> Result<String, ValueError>;
}

/// Which formatter a field uses.
#[derive(Clone)]
pub enum FormatterKind {
    Text,
    Integer,
    Decimal,
    Boolean,
    Date,
    Character,
    /// Caller-supplied formatter with the same contract as the built-ins.
    Custom(Arc<dyn ValueFormatter>),
}

impl FormatterKind {
    pub fn formatter(&self) -> &dyn ValueFormatter {
        match self {
            FormatterKind::Text => &TextFormatter,
            FormatterKind::Integer => &IntegerFormatter,
            FormatterKind::Decimal => &DecimalFormatter,
            FormatterKind::Boolean => &BooleanFormatter,
            FormatterKind::Date => &DateFormatter,
            FormatterKind::Character => &CharacterFormatter,
            FormatterKind::Custom(f) => f.as_ref(),
        }
    }
}

impl fmt::Debug for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatterKind::Text => "Text",
            FormatterKind::Integer => "Integer",
            FormatterKind::Decimal => "Decimal",
            FormatterKind::Boolean => "Boolean",
            FormatterKind::Date => "Date",
            FormatterKind::Character => "Character",
            FormatterKind::Custom(_) => "Custom(..)",
        };
        write!(f, "{name}")
    }
}

fn mismatch(expected: &str, value: &FieldValue) -> ValueError {
    ValueError::Render(format!("expected {expected} value, got {value:?}"))
}

/// Identity formatter for string data.
pub struct TextFormatter;

impl ValueFormatter for TextFormatter {
    fn decode(&self, raw: &str, _: &FormatInstructions) -> Result<FieldValue, ValueError> {
        Ok(FieldValue::Text(raw.to_string()))
    }

    fn encode(&self, value: &FieldValue, _: &FormatInstructions) -> Result<String, ValueError> {
        match value {
            FieldValue::None => Ok(String::new()),
            FieldValue::Text(s) => Ok(s.clone()),
            other => Err(mismatch("text", other)),
        }
    }
}

/// Formatter for `i64` data.
pub struct IntegerFormatter;

impl ValueFormatter for IntegerFormatter {
    fn decode(&self, raw: &str, _: &FormatInstructions) -> Result<FieldValue, ValueError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(FieldValue::None);
        }
        trimmed
            .parse::<i64>()
            .map(FieldValue::Int)
            .map_err(|e| ValueError::Parse(format!("not an integer: {e}")))
    }

    fn encode(&self, value: &FieldValue, _: &FormatInstructions) -> Result<String, ValueError> {
        match value {
            FieldValue::None => Ok(String::new()),
            FieldValue::Int(i) => Ok(i.to_string()),
            other => Err(mismatch("integer", other)),
        }
    }
}

/// Fraction-digit handling for [`DecimalFormatter`] patterns.
struct DecimalSpec {
    fraction_digits: u32,
    /// Whether the text carries a literal '.' or the decimal point is
    /// implied by position (mainframe style).
    explicit_point: bool,
}

fn decimal_spec(pattern: Option<&str>) -> Result<DecimalSpec, ValueError> {
    let pattern = pattern.unwrap_or(".2");
    let (explicit_point, digits) = match pattern.strip_prefix('.') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    };
    let fraction_digits = digits.parse::<u32>().map_err(|_| {
        ValueError::Parse(format!(
            "bad decimal pattern '{pattern}' (expected e.g. \"2\" or \".2\")"
        ))
    })?;
    Ok(DecimalSpec {
        fraction_digits,
        explicit_point,
    })
}

/// Formatter for `f64` data.
///
/// The pattern selects fraction digits and delimiter style: `"2"` means two
/// fraction digits with the decimal point implied by position (the text
/// carries no `'.'`), `".2"` means an explicit point in the text. Defaults
/// to `".2"` when absent.
pub struct DecimalFormatter;

impl ValueFormatter for DecimalFormatter {
    fn decode(&self, raw: &str, instructions: &FormatInstructions) -> Result<FieldValue, ValueError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(FieldValue::None);
        }
        let spec = decimal_spec(instructions.pattern.as_deref())?;
        if spec.explicit_point {
            trimmed
                .parse::<f64>()
                .map(FieldValue::Decimal)
                .map_err(|e| ValueError::Parse(format!("not a decimal: {e}")))
        } else {
            let scaled = trimmed
                .parse::<i64>()
                .map_err(|e| ValueError::Parse(format!("not a scaled decimal: {e}")))?;
            Ok(FieldValue::Decimal(
                scaled as f64 / 10f64.powi(spec.fraction_digits as i32),
            ))
        }
    }

    fn encode(&self, value: &FieldValue, instructions: &FormatInstructions) -> Result<String, ValueError> {
        let decimal = match value {
            FieldValue::None => return Ok(String::new()),
            FieldValue::Decimal(d) => *d,
            other => return Err(mismatch("decimal", other)),
        };
        if !decimal.is_finite() {
            return Err(ValueError::Render(format!("not a finite decimal: {decimal}")));
        }
        let spec = decimal_spec(instructions.pattern.as_deref())?;
        if spec.explicit_point {
            Ok(format!("{decimal:.prec$}", prec = spec.fraction_digits as usize))
        } else {
            let scaled = (decimal * 10f64.powi(spec.fraction_digits as i32)).round();
            // A cast would saturate silently at the i64 bounds. The upper
            // check is >= because 2^63 itself is not representable in i64.
            if scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
                return Err(ValueError::Render(format!(
                    "decimal {decimal} does not fit a scaled integer with {} fraction digits",
                    spec.fraction_digits
                )));
            }
            Ok((scaled as i64).to_string())
        }
    }
}

fn boolean_tokens(pattern: Option<&str>) -> Result<(String, String), ValueError> {
    let pattern = pattern.unwrap_or("T/F");
    match pattern.split_once('/') {
        Some((t, f)) if !t.is_empty() && !f.is_empty() => Ok((t.to_string(), f.to_string())),
        _ => Err(ValueError::Parse(format!(
            "bad boolean pattern '{pattern}' (expected \"true-token/false-token\")"
        ))),
    }
}

/// Formatter for boolean data. Pattern is `"<true>/<false>"`, default `"T/F"`.
pub struct BooleanFormatter;

impl ValueFormatter for BooleanFormatter {
    fn decode(&self, raw: &str, instructions: &FormatInstructions) -> Result<FieldValue, ValueError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(FieldValue::None);
        }
        let (true_token, false_token) = boolean_tokens(instructions.pattern.as_deref())?;
        if trimmed == true_token {
            Ok(FieldValue::Bool(true))
        } else if trimmed == false_token {
            Ok(FieldValue::Bool(false))
        } else {
            Err(ValueError::Parse(format!(
                "expected '{true_token}' or '{false_token}'"
            )))
        }
    }

    fn encode(&self, value: &FieldValue, instructions: &FormatInstructions) -> Result<String, ValueError> {
        let (true_token, false_token) = boolean_tokens(instructions.pattern.as_deref())?;
        match value {
            FieldValue::None => Ok(String::new()),
            FieldValue::Bool(true) => Ok(true_token),
            FieldValue::Bool(false) => Ok(false_token),
            other => Err(mismatch("boolean", other)),
        }
    }
}

fn date_items(pattern: &str) -> Result<Vec<Item<'_>>, ValueError> {
    let items: Vec<Item> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        Err(ValueError::Parse(format!("bad date pattern '{pattern}'")))
    } else {
        Ok(items)
    }
}

/// Formatter for [`chrono::NaiveDate`] data using strftime patterns.
///
/// The pattern is required; its absence is a layout defect surfaced at
/// encode/decode time, not when the layout is declared.
pub struct DateFormatter;

impl ValueFormatter for DateFormatter {
    fn decode(&self, raw: &str, instructions: &FormatInstructions) -> Result<FieldValue, ValueError> {
        let pattern = instructions
            .pattern
            .as_deref()
            .ok_or(ValueError::MissingPattern)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(FieldValue::None);
        }
        NaiveDate::parse_from_str(trimmed, pattern)
            .map(FieldValue::Date)
            .map_err(|e| ValueError::Parse(format!("not a '{pattern}' date: {e}")))
    }

    fn encode(&self, value: &FieldValue, instructions: &FormatInstructions) -> Result<String, ValueError> {
        let pattern = instructions
            .pattern
            .as_deref()
            .ok_or(ValueError::MissingPattern)?;
        let date = match value {
            FieldValue::None => return Ok(String::new()),
            FieldValue::Date(d) => *d,
            other => return Err(mismatch("date", other)),
        };
        let items = date_items(pattern)?;
        Ok(date.format_with_items(items.into_iter()).to_string())
    }
}

/// Formatter for single-character data.
pub struct CharacterFormatter;

impl ValueFormatter for CharacterFormatter {
    fn decode(&self, raw: &str, _: &FormatInstructions) -> Result<FieldValue, ValueError> {
        match raw.trim().chars().next() {
            Some(c) => Ok(FieldValue::Char(c)),
            None => Ok(FieldValue::None),
        }
    }

    fn encode(&self, value: &FieldValue, _: &FormatInstructions) -> Result<String, ValueError> {
        match value {
            FieldValue::None => Ok(String::new()),
            FieldValue::Char(c) => Ok(c.to_string()),
            other => Err(mismatch("character", other)),
        }
    }
}
