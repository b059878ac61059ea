// ABOUTME: Document values, write options and server-timestamp sentinels
// ABOUTME: Shared merge and field-path helpers used by every adapter

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};

/// A stored document: always a JSON object at the top level
pub type Document = Map<String, Value>;

const SENTINEL_KEY: &str = "__jobtrack_sentinel__";
const SERVER_TIMESTAMP: &str = "serverTimestamp";

/// Options for `DocumentStore::set`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Deep-merge into an existing document instead of replacing it
    pub merge: bool,
}

impl SetOptions {
    pub fn overwrite() -> Self {
        Self { merge: false }
    }

    pub fn merge() -> Self {
        Self { merge: true }
    }
}

/// Outcome of a successful write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteResult {
    /// Time the store assigned to every server-timestamp sentinel in the write
    pub write_time: DateTime<Utc>,
}

/// Opaque marker replaced by the store with its write time
pub fn server_timestamp() -> Value {
    let mut marker = Map::new();
    marker.insert(
        SENTINEL_KEY.to_string(),
        Value::String(SERVER_TIMESTAMP.to_string()),
    );
    Value::Object(marker)
}

pub fn is_server_timestamp(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            map.len() == 1
                && map.get(SENTINEL_KEY).and_then(Value::as_str) == Some(SERVER_TIMESTAMP)
        }
        _ => false,
    }
}

/// Replace every sentinel, at any depth, with `at` as an RFC 3339 string
pub(crate) fn resolve_sentinels(doc: &mut Document, at: DateTime<Utc>) {
    let stamp = at.to_rfc3339();
    for value in doc.values_mut() {
        resolve_value(value, &stamp);
    }
}

fn resolve_value(value: &mut Value, stamp: &str) {
    if is_server_timestamp(value) {
        *value = Value::String(stamp.to_string());
        return;
    }
    match value {
        Value::Object(map) => {
            for nested in map.values_mut() {
                resolve_value(nested, stamp);
            }
        }
        Value::Array(items) => {
            for item in items {
                resolve_value(item, stamp);
            }
        }
        _ => {}
    }
}

/// Deep merge: nested objects merge key by key, everything else is replaced
pub(crate) fn deep_merge(target: &mut Document, patch: Document) {
    for (key, value) in patch {
        let merge_nested = matches!(target.get(&key), Some(Value::Object(_)))
            && value.is_object()
            && !is_server_timestamp(&value);

        if merge_nested {
            if let (Some(Value::Object(existing)), Value::Object(incoming)) =
                (target.get_mut(&key), value)
            {
                deep_merge(existing, incoming);
            }
        } else {
            target.insert(key, value);
        }
    }
}

/// Apply an update: each key replaces one field, dotted keys address nested fields
pub(crate) fn apply_field_updates(target: &mut Document, partial: Document) -> StoreResult<()> {
    for (field_path, value) in partial {
        let parts: Vec<&str> = field_path.split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(StoreError::InvalidDocument(format!(
                "invalid field path '{}'",
                field_path
            )));
        }
        set_field(target, &parts, value);
    }
    Ok(())
}

fn set_field(target: &mut Document, parts: &[&str], value: Value) {
    let (head, rest) = match parts.split_first() {
        Some(split) => split,
        None => return,
    };

    if rest.is_empty() {
        target.insert((*head).to_string(), value);
        return;
    }

    let entry = target
        .entry((*head).to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(nested) = entry {
        set_field(nested, rest, value);
    }
}

/// Interpret a JSON value as a document
pub(crate) fn into_document(value: Value) -> StoreResult<Document> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        into_document(value).unwrap()
    }

    #[test]
    fn test_sentinel_detection() {
        assert!(is_server_timestamp(&server_timestamp()));
        assert!(!is_server_timestamp(&json!("serverTimestamp")));
        assert!(!is_server_timestamp(&json!({ "__jobtrack_sentinel__": "other" })));
    }

    #[test]
    fn test_resolve_sentinels_at_any_depth() {
        let at = Utc.with_ymd_and_hms(2024, 3, 28, 12, 0, 0).unwrap();
        let mut d = doc(json!({
            "updatedAt": server_timestamp(),
            "nested": { "at": server_timestamp(), "keep": 1 },
            "list": [server_timestamp()]
        }));

        resolve_sentinels(&mut d, at);

        let stamp = at.to_rfc3339();
        assert_eq!(d["updatedAt"], json!(stamp));
        assert_eq!(d["nested"]["at"], json!(stamp));
        assert_eq!(d["nested"]["keep"], json!(1));
        assert_eq!(d["list"][0], json!(stamp));
    }

    #[test]
    fn test_deep_merge_keeps_unsupplied_fields() {
        let mut target = doc(json!({
            "notifications": { "weeklyReport": true, "emailNotifications": true },
            "privacy": { "dataCollection": true }
        }));

        deep_merge(
            &mut target,
            doc(json!({ "notifications": { "weeklyReport": false } })),
        );

        assert_eq!(
            Value::Object(target),
            json!({
                "notifications": { "weeklyReport": false, "emailNotifications": true },
                "privacy": { "dataCollection": true }
            })
        );
    }

    #[test]
    fn test_deep_merge_replaces_with_sentinel() {
        let mut target = doc(json!({ "updatedAt": { "old": true } }));
        deep_merge(&mut target, doc(json!({ "updatedAt": server_timestamp() })));
        assert!(is_server_timestamp(&target["updatedAt"]));
    }

    #[test]
    fn test_field_updates_replace_whole_top_level_values() {
        let mut target = doc(json!({
            "profile": { "firstName": "Jane", "lastName": "Doe" },
            "privacy": { "dataCollection": true }
        }));

        apply_field_updates(&mut target, doc(json!({ "profile": { "firstName": "J" } }))).unwrap();

        assert_eq!(target["profile"], json!({ "firstName": "J" }));
        assert_eq!(target["privacy"], json!({ "dataCollection": true }));
    }

    #[test]
    fn test_field_updates_with_dotted_paths() {
        let mut target = doc(json!({ "profile": { "firstName": "Jane", "lastName": "Doe" } }));

        apply_field_updates(&mut target, doc(json!({ "profile.firstName": "J" }))).unwrap();

        assert_eq!(target["profile"], json!({ "firstName": "J", "lastName": "Doe" }));
    }

    #[test]
    fn test_field_updates_reject_empty_segments() {
        let mut target = Document::new();
        let result = apply_field_updates(&mut target, doc(json!({ "profile..x": 1 })));
        assert!(matches!(result, Err(StoreError::InvalidDocument(_))));
    }

    #[test]
    fn test_into_document_rejects_non_objects() {
        assert!(into_document(json!([1, 2])).is_err());
    }
}
