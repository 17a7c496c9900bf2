//! Ordered, flat key/value source documents.
//!
//! A source document is a JSON object whose values are (or are coerced to) strings.
//! Key order is significant: it fixes the order of batches sent for translation and the
//! order of the output records.

use crate::error::{DocumentError, DocumentResult};
use serde_json::Value;

/// An ordered mapping from message key to source text.
///
/// Built once from JSON text and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDocument {
    entries: Vec<(String, String)>,
}

impl SourceDocument {
    /// Parse a flat JSON object into a document.
    ///
    /// String values are taken verbatim. Any other value is coerced the way a JavaScript
    /// `String(value)` call would: `1.0` becomes `1`, `["a", 1]` becomes `a,1` and an object
    /// becomes `[object Object]`. A key that appears twice keeps its first position and its
    /// last value.
    ///
    /// # Errors
    ///
    /// * [`DocumentError::Parse`] - the text is not valid JSON
    /// * [`DocumentError::NotAnObject`] - the root value is not an object
    ///
    /// # Example
    ///
    /// ```
    /// use flatjson_i18n::SourceDocument;
    ///
    /// let doc = SourceDocument::parse(r#"{"b": "World", "a": 2}"#).unwrap();
    /// assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    /// assert_eq!(doc.get("a"), Some("2"));
    /// ```
    pub fn parse(text: &str) -> DocumentResult<Self> {
        let json: Value = serde_json::from_str(text)?;
        let obj = match json {
            Value::Object(obj) => obj,
            other => return Err(DocumentError::NotAnObject(value_kind(&other))),
        };

        let entries = obj
            .into_iter()
            .map(|(key, value)| (key, coerce_to_string(value)))
            .collect();

        Ok(Self { entries })
    }

    /// Build a document from already-ordered pairs. Later duplicates overwrite the value of
    /// the first occurrence in place.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(existing) => existing.1 = value,
                None => entries.push((key, value)),
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the source text for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, value)` pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn coerce_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(&n),
        Value::Array(items) => join_array(items),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Array elements joined with `,`; `null` elements become empty.
fn join_array(items: Vec<Value>) -> String {
    items
        .into_iter()
        .map(|item| match item {
            Value::Null => String::new(),
            other => coerce_to_string(other),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn number_to_string(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) => format_f64(f),
        None => n.to_string(),
    }
}

/// Shortest round-trip digits laid out with JavaScript's `Number#toString` rules: plain
/// notation for exponents in `-7..21`, `1e+21` style otherwise, and no trailing `.0`.
fn format_f64(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if !f.is_finite() {
        return f.to_string();
    }

    let sci = format!("{:e}", f.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, (n - 1).abs())
        }
    };

    if f.is_sign_negative() {
        format!("-{}", body)
    } else {
        body
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
