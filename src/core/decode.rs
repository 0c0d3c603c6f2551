//! Purpose: Typed decode failures raised while turning wire JSON into entities.
//! Exports: `DecodeError`, `DecodeErrorKind`.
//! Role: Single taxonomy for codec failures, independent of transport and status errors.
//! Invariants: Display text is stable and re-classifies to the same kind when it round-trips
//!             through `serde::de::Error::custom` (nested entities rely on this).
//! Invariants: Decode failures are terminal; nothing here fills in defaults.
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeErrorKind {
    MissingField,
    MalformedTimestamp,
    UnknownEnumValue,
    InvalidType,
    Syntax,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    field: Option<String>,
    value: Option<String>,
    message: String,
}

const MISSING_FIELD: &str = "missing field `";
const MALFORMED_TIMESTAMP: &str = "malformed timestamp `";
const UNKNOWN_VARIANT: &str = "unknown variant `";

impl DecodeError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            kind: DecodeErrorKind::MissingField,
            message: format!("{MISSING_FIELD}{field}`"),
            field: Some(field),
            value: None,
        }
    }

    pub fn malformed_timestamp(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            kind: DecodeErrorKind::MalformedTimestamp,
            message: format!("{MALFORMED_TIMESTAMP}{raw}`, expected an RFC 3339 date-time"),
            field: None,
            value: Some(raw),
        }
    }

    pub fn unknown_enum_value(raw: impl Into<String>, expected: &[&str]) -> Self {
        let raw = raw.into();
        let expected = expected
            .iter()
            .map(|token| format!("`{token}`"))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            kind: DecodeErrorKind::UnknownEnumValue,
            message: format!("{UNKNOWN_VARIANT}{raw}`, expected one of {expected}"),
            field: None,
            value: Some(raw),
        }
    }

    pub fn invalid_type(message: impl Into<String>) -> Self {
        Self {
            kind: DecodeErrorKind::InvalidType,
            message: message.into(),
            field: None,
            value: None,
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self {
            kind: DecodeErrorKind::Syntax,
            message: message.into(),
            field: None,
            value: None,
        }
    }

    pub fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    /// Wire key of the missing field, for `MissingField`.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Offending wire text, for `MalformedTimestamp` and `UnknownEnumValue`.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Classifies a `serde_json` failure into the decode taxonomy.
    pub fn from_serde(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => Self::from_message(&err.to_string()),
            serde_json::error::Category::Syntax
            | serde_json::error::Category::Eof
            | serde_json::error::Category::Io => Self::syntax(err.to_string()),
        }
    }

    pub(crate) fn from_message(raw: &str) -> Self {
        let message = strip_position(raw);
        let kind = categorize_message(message);
        let quoted = backtick_value(message).map(str::to_string);
        let (field, value) = match kind {
            DecodeErrorKind::MissingField => (quoted, None),
            DecodeErrorKind::MalformedTimestamp | DecodeErrorKind::UnknownEnumValue => {
                (None, quoted)
            }
            DecodeErrorKind::InvalidType | DecodeErrorKind::Syntax => (None, None),
        };
        Self {
            kind,
            field,
            value,
            message: message.to_string(),
        }
    }
}

pub(crate) fn categorize_message(message: &str) -> DecodeErrorKind {
    if message.starts_with(MISSING_FIELD) {
        DecodeErrorKind::MissingField
    } else if message.starts_with(MALFORMED_TIMESTAMP) {
        DecodeErrorKind::MalformedTimestamp
    } else if message.starts_with(UNKNOWN_VARIANT) {
        DecodeErrorKind::UnknownEnumValue
    } else {
        DecodeErrorKind::InvalidType
    }
}

// serde_json appends " at line L column C" for errors raised while reading text.
fn strip_position(message: &str) -> &str {
    let Some(idx) = message.rfind(" at line ") else {
        return message;
    };
    let tail = &message[idx + " at line ".len()..];
    let mut parts = tail.split(" column ");
    let line_ok = parts
        .next()
        .is_some_and(|line| !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()));
    let column_ok = parts
        .next()
        .is_some_and(|col| !col.is_empty() && col.bytes().all(|b| b.is_ascii_digit()));
    if line_ok && column_ok && parts.next().is_none() {
        &message[..idx]
    } else {
        message
    }
}

fn backtick_value(message: &str) -> Option<&str> {
    let start = message.find('`')? + 1;
    let len = message[start..].find('`')?;
    Some(&message[start..start + len])
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for DecodeError {}
