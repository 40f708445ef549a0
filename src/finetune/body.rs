//! Request body assembly.

use crate::types::{Extra, JsonObject};
use serde_json::Value;

/// Builds a JSON body on top of passthrough keys.
#[derive(Debug, Default)]
pub(crate) struct BodyBuilder {
    body: JsonObject,
}

impl BodyBuilder {
    /// Start from the caller's passthrough keys; later `set` calls overwrite them.
    pub(crate) fn with_extra(extra: Extra) -> Self {
        Self { body: extra }
    }

    pub(crate) fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.body.insert(key.to_string(), value.into());
        self
    }

    /// Insert only when present. An absent value leaves any passthrough key untouched.
    pub(crate) fn set_opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    /// Insert when present, otherwise remove any passthrough key of the same name.
    pub(crate) fn set_or_remove<V: Into<Value>>(mut self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => {
                self.body.remove(key);
                self
            }
        }
    }

    /// Drop every key whose value is JSON `null`.
    pub(crate) fn without_nulls(mut self) -> Self {
        self.body.retain(|_, v| !v.is_null());
        self
    }

    pub(crate) fn build(self) -> JsonObject {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extra(value: Value) -> Extra {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn named_fields_overwrite_extra() {
        let body = BodyBuilder::with_extra(extra(json!({"taskId": 1, "note": "x"})))
            .set("taskId", 2)
            .build();
        assert_eq!(Value::Object(body), json!({"taskId": 2, "note": "x"}));
    }

    #[test]
    fn absent_optional_keeps_extra() {
        let body = BodyBuilder::with_extra(extra(json!({"description": "from extra"})))
            .set_opt::<String>("description", None)
            .build();
        assert_eq!(body["description"], json!("from extra"));
    }

    #[test]
    fn absent_filter_removes_extra() {
        let body = BodyBuilder::with_extra(extra(json!({"marker": "x", "status": "Running"})))
            .set_or_remove::<String>("marker", None)
            .set_or_remove("maxKeys", Some(5))
            .build();
        assert_eq!(
            Value::Object(body),
            json!({"status": "Running", "maxKeys": 5})
        );
    }

    #[test]
    fn without_nulls_keeps_falsy_values() {
        let body = BodyBuilder::default()
            .set("maxKeys", 0)
            .set("pageReverse", false)
            .set("marker", Value::Null)
            .without_nulls()
            .build();
        assert_eq!(
            Value::Object(body),
            json!({"maxKeys": 0, "pageReverse": false})
        );
    }
}
