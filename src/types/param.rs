//! Arguments that accept either a known enumeration or its raw wire string.

use crate::consts::{TrainMode, TrainParameterScale, WireEnum};
use crate::{Error, Result};
use serde_json::Value;

/// Enum-or-string argument, normalized to the raw string for the wire.
///
/// Enum variants and strings convert infallibly. Loosely typed input (for
/// instance a JSON number read from a config file) goes through `TryFrom`
/// and fails with [`Error::InvalidType`] before any request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrEnumParam<E: WireEnum> {
    Known(E),
    Raw(String),
}

pub type TrainModeParam = StrEnumParam<TrainMode>;
pub type ParameterScaleParam = StrEnumParam<TrainParameterScale>;

impl<E: WireEnum> StrEnumParam<E> {
    /// Raw string sent in the payload.
    pub fn wire_value(&self) -> &str {
        match self {
            StrEnumParam::Known(e) => e.value(),
            StrEnumParam::Raw(s) => s.as_str(),
        }
    }

    /// The enum variant, when the raw string names one.
    pub fn known(&self) -> Option<E> {
        match self {
            StrEnumParam::Known(e) => Some(*e),
            StrEnumParam::Raw(s) => E::from_value(s),
        }
    }

    fn expected() -> &'static str {
        match E::TYPE_NAME {
            "TrainMode" => "string or TrainMode",
            "TrainParameterScale" => "string or TrainParameterScale",
            _ => "string or enum",
        }
    }
}

impl<E: WireEnum> From<StrEnumParam<E>> for Value {
    fn from(param: StrEnumParam<E>) -> Self {
        Value::String(param.wire_value().to_string())
    }
}

/// Name of the JSON type, used in type mismatch errors.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl From<TrainMode> for TrainModeParam {
    fn from(mode: TrainMode) -> Self {
        StrEnumParam::Known(mode)
    }
}

impl From<TrainParameterScale> for ParameterScaleParam {
    fn from(scale: TrainParameterScale) -> Self {
        StrEnumParam::Known(scale)
    }
}

impl<E: WireEnum> From<&str> for StrEnumParam<E> {
    fn from(value: &str) -> Self {
        StrEnumParam::Raw(value.to_string())
    }
}

impl<E: WireEnum> From<String> for StrEnumParam<E> {
    fn from(value: String) -> Self {
        StrEnumParam::Raw(value)
    }
}

impl<E: WireEnum> From<&String> for StrEnumParam<E> {
    fn from(value: &String) -> Self {
        StrEnumParam::Raw(value.clone())
    }
}

impl<E: WireEnum> TryFrom<&Value> for StrEnumParam<E> {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(StrEnumParam::Raw(s.clone())),
            other => Err(Error::InvalidType {
                expected: Self::expected(),
                received: json_type_name(other).to_string(),
            }),
        }
    }
}

impl<E: WireEnum> TryFrom<Value> for StrEnumParam<E> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(StrEnumParam::Raw(s)),
            other => <Self as TryFrom<&Value>>::try_from(&other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enum_normalizes_to_value() {
        let p = TrainModeParam::from(TrainMode::PostPretrain);
        assert_eq!(p.wire_value(), "PostPretrain");
        assert_eq!(p.known(), Some(TrainMode::PostPretrain));
    }

    #[test]
    fn raw_string_is_kept_unchanged() {
        let p = TrainModeParam::from("sft-custom");
        assert_eq!(p.wire_value(), "sft-custom");
        assert_eq!(p.known(), None);

        let p = ParameterScaleParam::from(String::from("LoRA"));
        assert_eq!(p.known(), Some(TrainParameterScale::LoRa));
    }

    #[test]
    fn json_string_is_accepted() {
        let p = TrainModeParam::try_from(json!("SFT")).unwrap();
        assert_eq!(p, StrEnumParam::Raw("SFT".to_string()));
    }

    #[test]
    fn non_string_json_is_rejected_with_type_name() {
        for (value, name) in [
            (json!(1), "number"),
            (json!(true), "bool"),
            (json!(null), "null"),
            (json!(["SFT"]), "array"),
            (json!({"mode": "SFT"}), "object"),
        ] {
            match TrainModeParam::try_from(&value) {
                Err(Error::InvalidType { expected, received }) => {
                    assert_eq!(expected, "string or TrainMode");
                    assert_eq!(received, name);
                }
                other => panic!("expected InvalidType for {}, got {:?}", value, other),
            }
        }
    }

    #[test]
    fn into_json_value() {
        let p: ParameterScaleParam = TrainParameterScale::FullFineTuning.into();
        assert_eq!(Value::from(p), json!("FullFineTuning"));
    }
}
