//! Submitted form data shaped as a backend record

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::FormConfig;
use crate::schema::CollectionSchema;

/// Value a checked HTML checkbox posts when it has no explicit `value` attribute.
pub const CHECKBOX_ON: &str = "on";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormBodyError {
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),

    #[error("semicolon separator in form body")]
    Semicolon,

    #[error("form body is not valid UTF-8")]
    InvalidUtf8,
}

/// Parse an `application/x-www-form-urlencoded` body, rejecting what lenient decoders let through:
/// a `%` not followed by two hex digits, `;` anywhere in a pair, and non-UTF-8 text.
pub fn parse_form_body(body: &[u8]) -> Result<Vec<(String, String)>, FormBodyError> {
    let mut pairs = Vec::new();
    for piece in body.split(|&b| b == b'&') {
        if piece.is_empty() {
            continue;
        }
        if piece.contains(&b';') {
            return Err(FormBodyError::Semicolon);
        }
        let (key, value) = match piece.iter().position(|&b| b == b'=') {
            Some(eq) => (&piece[..eq], &piece[eq + 1..]),
            None => (piece, &piece[piece.len()..]),
        };
        pairs.push((decode_component(key)?, decode_component(value)?));
    }
    Ok(pairs)
}

fn decode_component(raw: &[u8]) -> Result<String, FormBodyError> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        match raw[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hex = |at: usize| raw.get(at).and_then(|b| char::from(*b).to_digit(16));
                match (hex(i + 1), hex(i + 2)) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi * 16 + lo) as u8);
                        i += 3;
                    }
                    _ => {
                        let end = (i + 3).min(raw.len());
                        let escape = String::from_utf8_lossy(&raw[i..end]).into_owned();
                        return Err(FormBodyError::InvalidEscape(escape));
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).map_err(|_| FormBodyError::InvalidUtf8)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Submission {
    fields: Map<String, Value>,
}

impl Submission {
    /// Build from posted pairs. The first value of each key wins; `"on"` becomes `true`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut fields = Map::new();
        for (key, value) in pairs {
            fields
                .entry(key)
                .or_insert_with(|| coerce(value.as_ref()));
        }
        Self { fields }
    }

    /// Set every declared boolean that was not posted to `false`.
    ///
    /// Browsers omit unchecked checkboxes entirely, so absence is the only signal.
    pub fn fill_unchecked_booleans(&mut self, schema: &CollectionSchema, options: &FormConfig) {
        for name in schema.bool_fields() {
            if options.is_excluded(name) || self.fields.contains_key(name) {
                continue;
            }
            self.fields.insert(name.to_string(), Value::Bool(false));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

fn coerce(raw: &str) -> Value {
    if raw == CHECKBOX_ON {
        Value::Bool(true)
    } else {
        Value::String(raw.to_string())
    }
}
