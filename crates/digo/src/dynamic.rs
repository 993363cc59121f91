//! Records built at runtime from a list of annotations.
//!
//! Each annotation gets one slot typed after its kind: a string for
//! `stringfield()` and `emailfield()`, an integer for `intfield()`. The
//! JSON name doubles as the field identifier.

use serde_json::{Map, Value};

use crate::annotation::{parse_annotation, FieldKind};
use crate::decode::Decoder;
use crate::error::DecodeError;
use crate::matchers::Matchers;
use crate::options::DecodeOptions;
use crate::record::{Field, Record, Slot};

#[derive(Debug, Clone, PartialEq)]
enum DynamicValue {
    Str(String),
    Int(i64),
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    name: String,
    annotation: String,
    value: DynamicValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicRecord {
    entries: Vec<Entry>,
}

impl DynamicRecord {
    /// Builds a record with one zeroed slot per non-empty annotation.
    pub fn from_annotations<S: AsRef<str>>(
        annotations: &[S],
        options: &DecodeOptions,
    ) -> Result<Self, DecodeError> {
        let matchers = Matchers::shared();
        let mut entries = Vec::with_capacity(annotations.len());
        for annotation in annotations {
            let annotation = annotation.as_ref();
            let Some(spec) = parse_annotation(annotation.trim(), annotation, matchers, options)? else {
                continue;
            };
            let value = match spec.kind {
                FieldKind::String | FieldKind::Email => DynamicValue::Str(String::new()),
                FieldKind::Int => DynamicValue::Int(0),
            };
            entries.push(Entry {
                name: spec.name,
                annotation: annotation.to_string(),
                value,
            });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current slot value by JSON name.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry_json(&entry.value))
    }

    /// All slots as a JSON object. Fields absent from the input keep their
    /// zero value.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for entry in &self.entries {
            map.insert(entry.name.clone(), entry_json(&entry.value));
        }
        Value::Object(map)
    }
}

fn entry_json(value: &DynamicValue) -> Value {
    match value {
        DynamicValue::Str(s) => Value::String(s.clone()),
        DynamicValue::Int(n) => Value::from(*n),
    }
}

impl Record for DynamicRecord {
    fn fields(&mut self) -> Vec<Field<'_>> {
        self.entries
            .iter_mut()
            .map(|entry| {
                let slot = match &mut entry.value {
                    DynamicValue::Str(s) => Slot::Str(s),
                    DynamicValue::Int(n) => Slot::Int(n),
                };
                Field::new(&entry.name, &entry.annotation, slot)
            })
            .collect()
    }
}

/// Validates `raw` against `annotations` and returns the decoded object.
pub fn check_document<S: AsRef<str>>(
    raw: &[u8],
    annotations: &[S],
    options: DecodeOptions,
) -> Result<Value, DecodeError> {
    let mut record = DynamicRecord::from_annotations(annotations, &options)?;
    Decoder::with_options(options).decode(raw, &mut record)?;
    Ok(record.to_json())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slots_follow_kind() {
        let record = DynamicRecord::from_annotations(
            &["name, stringfield()", "uid, intfield()", "", "mail, emailfield()"],
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record.to_json(), json!({"name": "", "uid": 0, "mail": ""}));
    }

    #[test]
    fn test_check_document() {
        let value = check_document(
            br#"{"name":"toto","uid":3.9,"extra":true}"#,
            &["name, stringfield(), required()", "uid, intfield(), minmax(2|5)"],
            DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(value, json!({"name": "toto", "uid": 3}));
    }

    #[test]
    fn test_check_document_error() {
        let err = check_document(
            br#"{"uid":9}"#,
            &["uid, intfield(), minmax(2|5)"],
            DecodeOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "field: uid is too big");
    }

    #[test]
    fn test_bad_annotation_uses_text_as_ident() {
        let err = DynamicRecord::from_annotations(&[" uid "], &DecodeOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "field: uid is incorrect");
    }

    #[test]
    fn test_get() {
        let mut record =
            DynamicRecord::from_annotations(&["uid, intfield()"], &DecodeOptions::default()).unwrap();
        Decoder::new().decode(br#"{"uid":-2}"#, &mut record).unwrap();
        assert_eq!(record.get("uid"), Some(json!(-2)));
        assert_eq!(record.get("missing"), None);
    }
}
