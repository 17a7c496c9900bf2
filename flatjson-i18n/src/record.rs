use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One translated entry of a source document.
///
/// `translated_value` is empty when the entry's batch could not be translated; callers
/// decide how to present that gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    /// The message key
    pub name: String,
    /// The original source text
    pub value: String,
    /// The translation, or an empty string
    pub translated_value: String,
}

impl OutputRecord {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        translated_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            translated_value: translated_value.into(),
        }
    }

    /// Whether a translation is present
    pub fn is_translated(&self) -> bool {
        !self.translated_value.is_empty()
    }

    /// The translation, falling back to the original text when it is empty
    pub fn value_or_original(&self) -> &str {
        if self.is_translated() {
            &self.translated_value
        } else {
            &self.value
        }
    }
}

/// Build the saved flat JSON object: `name -> translatedValue`, falling back to the original
/// value for untranslated records. Record order is kept.
pub fn records_to_json(records: &[OutputRecord]) -> Value {
    let mut map = Map::with_capacity(records.len());
    for record in records {
        map.insert(
            record.name.clone(),
            Value::String(record.value_or_original().to_string()),
        );
    }
    Value::Object(map)
}

/// Pretty-print the saved object with two-space indentation
pub fn records_to_pretty_json(records: &[OutputRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&records_to_json(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let record = OutputRecord::new("a", "Hello %s", "Bonjour %s");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "a", "value": "Hello %s", "translatedValue": "Bonjour %s"})
        );
    }

    #[test]
    fn test_value_or_original() {
        assert_eq!(OutputRecord::new("a", "Hi", "Salut").value_or_original(), "Salut");
        assert_eq!(OutputRecord::new("a", "Hi", "").value_or_original(), "Hi");
    }

    #[test]
    fn test_records_to_json_falls_back_and_keeps_order() {
        let records = vec![
            OutputRecord::new("second", "Two", "二"),
            OutputRecord::new("first", "One", ""),
        ];
        let json = records_to_json(&records);
        let obj = json.as_object().unwrap();
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["second", "first"]);
        assert_eq!(obj["second"], "二");
        assert_eq!(obj["first"], "One");
    }

    #[test]
    fn test_pretty_json_uses_two_space_indent() {
        let records = vec![OutputRecord::new("k", "v", "t")];
        let text = records_to_pretty_json(&records).unwrap();
        assert_eq!(text, "{\n  \"k\": \"t\"\n}");
    }
}
