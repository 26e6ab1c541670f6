//! The upstream compiler-service payload, deserialized leniently.
//!
//! Every field is optional and tolerates the wrong JSON type: a value that
//! cannot be interpreted is treated as absent rather than failing the whole
//! payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

/// One upstream compiler-service response of unknown shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Payload {
    /// Explicit success flag reported by the service.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub success: Option<bool>,
    /// Process exit code of the toolchain, when reported.
    #[serde(default, alias = "exitCode", deserialize_with = "lenient_i64")]
    pub exit_code: Option<i64>,
    /// Error bucket: structured entries and/or plain strings.
    #[serde(default, deserialize_with = "lenient_entries")]
    pub errors: Vec<RawEntry>,
    /// Warning bucket: structured entries and/or plain strings.
    #[serde(default, deserialize_with = "lenient_entries")]
    pub warnings: Vec<RawEntry>,
    /// Combined toolchain output.
    #[serde(default, deserialize_with = "lenient_string")]
    pub output: Option<String>,
    /// Captured standard output.
    #[serde(default, deserialize_with = "lenient_string")]
    pub stdout: Option<String>,
    /// Captured standard error.
    #[serde(default, deserialize_with = "lenient_string")]
    pub stderr: Option<String>,
}

/// An element of an `errors`/`warnings` array.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEntry {
    /// An object already carrying message and location fields.
    Structured(Entry),
    /// A plain line of toolchain text.
    Text(String),
}

/// A structured diagnostic entry as sent by the compiler service.
///
/// Also accepts the solc standard-JSON field names `errorCode`, `type`, and
/// `formattedMessage`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Entry {
    /// The diagnostic message.
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    /// A preformatted message, used when `message` is absent.
    #[serde(
        default,
        rename = "formattedMessage",
        deserialize_with = "lenient_string"
    )]
    pub formatted_message: Option<String>,
    /// 1-based line number.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub line: Option<u32>,
    /// 1-based column number.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub column: Option<u32>,
    /// Source file path as reported.
    #[serde(default, deserialize_with = "lenient_string")]
    pub file: Option<String>,
    /// Toolchain diagnostic code.
    #[serde(default, alias = "errorCode", deserialize_with = "lenient_string")]
    pub code: Option<String>,
    /// Severity keyword (`error`, `warning`, `info`).
    #[serde(default, deserialize_with = "lenient_string")]
    pub severity: Option<String>,
    /// Compiler error class (`ParserError`, `TypeError`, `Warning`, ...).
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
}

impl Payload {
    /// Builds a payload from an arbitrary response body.
    ///
    /// A JSON object is read as a payload, a JSON string as `output` text, and
    /// anything else (including malformed JSON) as raw `output` text. Never
    /// fails.
    pub fn from_text(body: &str) -> Self {
        let trimmed = body.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('"') {
            match serde_json::from_str::<Value>(trimmed) {
                Ok(Value::String(text)) => return Self::from_output(text),
                Ok(value @ Value::Object(_)) => match serde_json::from_value::<Payload>(value) {
                    Ok(payload) => return payload,
                    Err(e) => warn!(error = %e, "payload object rejected, reading body as text"),
                },
                Ok(_) => {}
                Err(e) => debug!(error = %e, "body is not JSON, reading as text"),
            }
        }
        Self::from_output(body)
    }

    /// Builds a text-only payload.
    pub fn from_output(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            ..Self::default()
        }
    }

    /// Sets the explicit success flag.
    pub fn with_success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    /// Sets the toolchain exit code.
    pub fn with_exit_code(mut self, exit_code: i64) -> Self {
        self.exit_code = Some(exit_code);
        self
    }

    /// Appends a structured entry to the error bucket.
    pub fn with_error(mut self, entry: Entry) -> Self {
        self.errors.push(RawEntry::Structured(entry));
        self
    }

    /// Appends a structured entry to the warning bucket.
    pub fn with_warning(mut self, entry: Entry) -> Self {
        self.warnings.push(RawEntry::Structured(entry));
        self
    }

    /// Returns the explicit exit signal, if the service reported one.
    ///
    /// With both `success` and `exit_code` present, the run counts as
    /// non-failing only if `success` is `true` and the exit code is `0`.
    pub fn exit_signal(&self) -> Option<bool> {
        match (self.success, self.exit_code) {
            (None, None) => None,
            (Some(success), None) => Some(success),
            (None, Some(code)) => Some(code == 0),
            (Some(success), Some(code)) => Some(success && code == 0),
        }
    }
}

impl Entry {
    /// Creates an entry with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Sets file, line, and column.
    pub fn at(mut self, file: impl Into<String>, line: u32, column: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Sets the diagnostic code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the severity keyword.
    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    /// Returns the message text, falling back to `formattedMessage`.
    pub fn text(&self) -> Option<&str> {
        [&self.message, &self.formatted_message]
            .into_iter()
            .flatten()
            .map(|s| s.as_str())
            .find(|s| !s.trim().is_empty())
    }
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts an array of objects and/or strings, or a single string.
fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<RawEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(Value::String(text)) => return Ok(vec![RawEntry::Text(text)]),
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(RawEntry::Text(text)),
            value @ Value::Object(_) => match serde_json::from_value::<Entry>(value) {
                Ok(entry) => Some(RawEntry::Structured(entry)),
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry");
                    None
                }
            },
            other => {
                debug!(value = %other, "skipping non-entry array element");
                None
            }
        })
        .collect())
}
