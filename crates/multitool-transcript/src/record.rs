//! Raw caption records and their normalized form
//!
//! Sources hand back caption segments in whatever shape is natural to them:
//! JSON objects keyed by field name, or typed [`Snippet`] values read through
//! accessor methods. [`FieldSource`] hides the difference so normalization is
//! written once, and [`field_or`] never fails; it substitutes the caller's
//! default for anything missing or unreadable.

use serde_json::{Map, Value};

/// Uniform field lookup over heterogeneous record shapes.
pub trait FieldSource {
    /// Look up `name`, returning `None` when the record has no such field.
    fn field(&self, name: &str) -> Option<Value>;
}

impl FieldSource for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl FieldSource for Value {
    fn field(&self, name: &str) -> Option<Value> {
        self.as_object().and_then(|map| map.field(name))
    }
}

/// Attribute-style caption segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    text: String,
    start: f64,
    duration: f64,
}

impl Snippet {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }
}

impl FieldSource for Snippet {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "text" => Some(Value::String(self.text().to_string())),
            "start" => serde_json::Number::from_f64(self.start()).map(Value::Number),
            "duration" => serde_json::Number::from_f64(self.duration()).map(Value::Number),
            _ => None,
        }
    }
}

/// A caption segment as returned by a [`TranscriptSource`](crate::TranscriptSource).
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    /// Key-value record, e.g. `{"text": "...", "start": 1.5, "duration": 2.0}`
    Map(Map<String, Value>),
    /// Typed record read through accessor methods
    Snippet(Snippet),
}

impl FieldSource for RawRecord {
    fn field(&self, name: &str) -> Option<Value> {
        match self {
            RawRecord::Map(map) => map.field(name),
            RawRecord::Snippet(snippet) => snippet.field(name),
        }
    }
}

impl From<Snippet> for RawRecord {
    fn from(snippet: Snippet) -> Self {
        RawRecord::Snippet(snippet)
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        RawRecord::Map(map)
    }
}

/// Conversion from a looked-up JSON value, lenient where that is harmless.
pub trait FromField: Sized {
    fn from_field(value: Value) -> Option<Self>;
}

impl FromField for String {
    fn from_field(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl FromField for f64 {
    fn from_field(value: Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Read `name` from any record shape, falling back to `default`.
pub fn field_or<T: FromField>(record: &impl FieldSource, name: &str, default: T) -> T {
    record
        .field(name)
        .and_then(T::from_field)
        .unwrap_or(default)
}

/// Normalized caption segment.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub text: String,
    /// Offset from the start of the video, in seconds
    pub start: f64,
    /// Segment length, in seconds
    pub duration: f64,
}

impl TranscriptEntry {
    pub fn from_record(record: &impl FieldSource) -> Self {
        Self {
            text: field_or(record, "text", String::new()),
            start: field_or(record, "start", 0.0),
            duration: field_or(record, "duration", 0.0),
        }
    }
}
