//! Tagged input schemas for tool arguments.
//!
//! Each tool declares its arguments as a list of [`FieldSpec`]s. Validation
//! checks presence, primitive kind and enum membership, fills declared
//! defaults, drops unknown keys, and yields [`ValidatedArgs`] that the
//! handler turns into its own typed input struct.

use crate::error::ToolError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

// =============================================================================
// Field kinds
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    Enum { values: Vec<String> },
}

impl FieldKind {
    /// Check a JSON value against this kind.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            FieldKind::String if value.is_string() => Ok(()),
            FieldKind::Integer if value.is_i64() || value.is_u64() => Ok(()),
            FieldKind::Boolean if value.is_boolean() => Ok(()),
            FieldKind::Enum { values } => match value.as_str() {
                Some(s) if values.iter().any(|v| v == s) => Ok(()),
                Some(s) => Err(format!(
                    "invalid enum value '{}', expected one of: {}",
                    s,
                    values.join(", ")
                )),
                None => Err(format!("expected string for enum, got {}", value_type_name(value))),
            },
            other => Err(format!(
                "expected {}, got {}",
                other.json_type(),
                value_type_name(value)
            )),
        }
    }

    fn json_type(&self) -> &'static str {
        match self {
            FieldKind::String | FieldKind::Enum { .. } => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
        }
    }
}

fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Field specs
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "presence", content = "value", rename_all = "snake_case")]
pub enum Presence {
    Required,
    Optional,
    Defaulted(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub description: String,
    pub presence: Presence,
}

impl FieldSpec {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: String::new(),
            presence: Presence::Required,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            FieldKind::Enum {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.presence = Presence::Defaulted(default.into());
        self
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }

    fn to_json_schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), json!(self.kind.json_type()));
        if let FieldKind::Enum { values } = &self.kind {
            prop.insert("enum".into(), json!(values));
        }
        if let Presence::Defaulted(default) = &self.presence {
            prop.insert("default".into(), default.clone());
        }
        if !self.description.is_empty() {
            prop.insert("description".into(), json!(self.description));
        }
        Value::Object(prop)
    }
}

// =============================================================================
// Input schema
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputSchema {
    fields: Vec<FieldSpec>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.retain(|f| f.name != spec.name);
        self.fields.push(spec);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Validate `args` and fill defaults.
    ///
    /// `null` is accepted as "no arguments". All problems are collected and
    /// reported together in one [`ToolError::Validation`].
    pub fn validate(&self, args: &Value) -> Result<ValidatedArgs, ToolError> {
        let empty = Map::new();
        let provided = match args {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                return Err(ToolError::Validation(format!(
                    "arguments must be a JSON object, got {}",
                    value_type_name(other)
                )))
            }
        };

        let mut validated = Map::new();
        let mut errors = Vec::new();

        for spec in &self.fields {
            match provided.get(&spec.name) {
                Some(value) if !value.is_null() || spec.is_required() => {
                    match spec.kind.check(value) {
                        Ok(()) => {
                            validated.insert(spec.name.clone(), value.clone());
                        }
                        Err(e) => errors.push(format!("Field '{}': {}", spec.name, e)),
                    }
                }
                _ => match &spec.presence {
                    Presence::Required => {
                        errors.push(format!("Missing required field: {}", spec.name))
                    }
                    Presence::Defaulted(default) => {
                        validated.insert(spec.name.clone(), default.clone());
                    }
                    Presence::Optional => {}
                },
            }
        }

        if errors.is_empty() {
            Ok(ValidatedArgs(validated))
        } else {
            Err(ToolError::Validation(errors.join("; ")))
        }
    }

    /// JSON-Schema rendering used for capability discovery.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.to_json_schema()))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Arguments that passed [`InputSchema::validate`], defaults included.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedArgs(Map<String, Value>);

impl ValidatedArgs {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Deserialize into a handler's typed input.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, ToolError> {
        serde_json::from_value(self.into_value())
            .map_err(|e| ToolError::Validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_schema() -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::string("path").describe("Relative path"))
            .field(FieldSpec::string("content"))
            .field(FieldSpec::enumeration("encoding", ["utf8", "base64"]).with_default("utf8"))
            .field(FieldSpec::integer("limit").optional())
    }

    #[test]
    fn test_defaults_are_filled() {
        let args = write_schema()
            .validate(&json!({"path": "a.txt", "content": "x"}))
            .unwrap();
        assert_eq!(args.get("encoding"), Some(&json!("utf8")));
        assert_eq!(args.get("limit"), None);
    }

    #[test]
    fn test_missing_required_reports_every_field() {
        let err = write_schema().validate(&json!({})).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Missing required field: path"), "{msg}");
        assert!(msg.contains("Missing required field: content"), "{msg}");
    }

    #[test]
    fn test_enum_violation() {
        let err = write_schema()
            .validate(&json!({"path": "a", "content": "b", "encoding": "latin1"}))
            .unwrap_err();
        assert!(matches!(err, ToolError::Validation(ref m) if m.contains("latin1")));
    }

    #[test]
    fn test_type_violation() {
        let err = write_schema()
            .validate(&json!({"path": 7, "content": "b"}))
            .unwrap_err();
        assert!(matches!(err, ToolError::Validation(ref m) if m.contains("expected string, got number")));
    }

    #[test]
    fn test_null_required_is_rejected() {
        let err = write_schema()
            .validate(&json!({"path": null, "content": "b"}))
            .unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }

    #[test]
    fn test_null_optional_takes_default() {
        let args = write_schema()
            .validate(&json!({"path": "a", "content": "b", "encoding": null}))
            .unwrap();
        assert_eq!(args.get("encoding"), Some(&json!("utf8")));
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let args = write_schema()
            .validate(&json!({"path": "a", "content": "b", "extra": true}))
            .unwrap();
        assert_eq!(args.get("extra"), None);
    }

    #[test]
    fn test_non_object_arguments_rejected() {
        assert!(write_schema().validate(&json!(["a"])).is_err());
        let args = InputSchema::new()
            .field(FieldSpec::string("path").with_default(""))
            .validate(&Value::Null)
            .unwrap();
        assert_eq!(args.get("path"), Some(&json!("")));
    }

    #[test]
    fn test_json_schema_rendering() {
        let schema = write_schema().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["path", "content"]));
        assert_eq!(schema["properties"]["encoding"]["enum"], json!(["utf8", "base64"]));
        assert_eq!(schema["properties"]["encoding"]["default"], "utf8");
        assert_eq!(schema["properties"]["path"]["description"], "Relative path");
    }

    #[test]
    fn test_into_typed() {
        #[derive(serde::Deserialize)]
        struct Input {
            path: String,
            encoding: String,
        }

        let input: Input = write_schema()
            .validate(&json!({"path": "a", "content": "b"}))
            .unwrap()
            .into_typed()
            .unwrap();
        assert_eq!(input.path, "a");
        assert_eq!(input.encoding, "utf8");
    }
}
