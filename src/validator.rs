//! Schema text validation.
//!
//! A single pass over the candidate JSON: parse, top-level shape, per-field
//! checks in declaration order, then duplicate-id detection. The first error
//! encountered is returned; nothing is aggregated. Field-level errors are
//! therefore always reported before a duplicate-id error for the same field.

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::types::{json_type_name, FormSchema, InputKind};

/// Validate raw schema text into a typed [`FormSchema`].
///
/// # Errors
///
/// Returns the first [`SchemaError`] encountered: `Parse` for syntactically
/// invalid JSON, `EmptySchema` for an empty top-level object, `Shape` for a
/// mistyped key, the per-field errors for bad field descriptors, and
/// `DuplicateId` when two fields share an id.
pub fn validate(raw: &str) -> Result<FormSchema, SchemaError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| SchemaError::Parse { source })?;
    validate_value(&value)
}

/// Validate an already-parsed JSON value into a typed [`FormSchema`].
pub fn validate_value(value: &Value) -> Result<FormSchema, SchemaError> {
    let Some(root) = value.as_object() else {
        return Err(SchemaError::Shape {
            path: "/".to_string(),
            expected: "an object",
            actual: json_type_name(value).to_string(),
        });
    };

    if root.is_empty() {
        return Err(SchemaError::EmptySchema);
    }

    let fields = check_root(root)?;

    for (index, field) in fields.iter().enumerate() {
        check_field(index, field)?;
    }

    check_duplicate_ids(fields)?;

    // Every shape the typed model rejects has been checked above, so this
    // conversion only fails on shapes the checks missed.
    serde_json::from_value(value.clone()).map_err(|source| SchemaError::Parse { source })
}

/// Load and validate a schema file.
///
/// # Errors
///
/// Returns `SchemaError::FileNotFound` / `SchemaError::Read` for I/O
/// failures, otherwise whatever [`validate`] returns for the file content.
pub fn load_schema(path: &Path) -> Result<FormSchema, SchemaError> {
    if !path.exists() {
        return Err(SchemaError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    validate(&content)
}

/// Check top-level keys; returns the `fields` array on success.
fn check_root(root: &Map<String, Value>) -> Result<&Vec<Value>, SchemaError> {
    match root.get("formTitle") {
        Some(Value::String(s)) if !s.trim().is_empty() => {}
        Some(other) => {
            return Err(SchemaError::Shape {
                path: "/formTitle".to_string(),
                expected: "a non-empty string",
                actual: json_type_name(other).to_string(),
            })
        }
        None => {
            return Err(SchemaError::Shape {
                path: "/formTitle".to_string(),
                expected: "a non-empty string",
                actual: "nothing".to_string(),
            })
        }
    }

    if let Some(desc) = root.get("formDescription") {
        if !desc.is_string() {
            return Err(SchemaError::Shape {
                path: "/formDescription".to_string(),
                expected: "a string",
                actual: json_type_name(desc).to_string(),
            });
        }
    }

    match root.get("fields") {
        Some(Value::Array(fields)) => Ok(fields),
        Some(other) => Err(SchemaError::Shape {
            path: "/fields".to_string(),
            expected: "an array",
            actual: json_type_name(other).to_string(),
        }),
        None => Err(SchemaError::Shape {
            path: "/fields".to_string(),
            expected: "an array",
            actual: "nothing".to_string(),
        }),
    }
}

/// Check one field descriptor.
fn check_field(index: usize, value: &Value) -> Result<(), SchemaError> {
    let Some(field) = value.as_object() else {
        return Err(SchemaError::Shape {
            path: format!("/fields/{index}"),
            expected: "an object",
            actual: json_type_name(value).to_string(),
        });
    };

    // Presence checks first, matching the reported error order: id, type,
    // label, then kind membership.
    let id = match field.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.as_str(),
        _ => return Err(SchemaError::MissingId { index }),
    };

    let kind_name = match field.get("type") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.as_str(),
        _ => return Err(SchemaError::MissingKind { index }),
    };

    match field.get("label") {
        Some(Value::String(s)) if !s.trim().is_empty() => {}
        _ => {
            return Err(SchemaError::MissingLabel { id: id.to_string() });
        }
    }

    let kind = InputKind::parse(kind_name).ok_or_else(|| SchemaError::UnknownKind {
        id: id.to_string(),
        kind: kind_name.to_string(),
    })?;

    if let Some(required) = field.get("required") {
        if !required.is_boolean() {
            return Err(SchemaError::Shape {
                path: format!("/fields/{index}/required"),
                expected: "a boolean",
                actual: json_type_name(required).to_string(),
            });
        }
    }

    if let Some(placeholder) = field.get("placeholder") {
        if !placeholder.is_string() {
            return Err(SchemaError::Shape {
                path: format!("/fields/{index}/placeholder"),
                expected: "a string",
                actual: json_type_name(placeholder).to_string(),
            });
        }
    }

    if let Some(rule) = field.get("validation") {
        check_validation_rule(index, id, rule)?;
    }

    if let Some(options) = field.get("options") {
        check_options(index, options)?;
    }

    if kind.needs_options() {
        let non_empty = field
            .get("options")
            .and_then(Value::as_array)
            .is_some_and(|opts| !opts.is_empty());
        if !non_empty {
            return Err(SchemaError::MissingOptions { id: id.to_string() });
        }
    }

    if let Some(default) = field.get("defaultValue") {
        if !matches!(
            default,
            Value::String(_) | Value::Number(_) | Value::Bool(_)
        ) {
            return Err(SchemaError::Shape {
                path: format!("/fields/{index}/defaultValue"),
                expected: "a string, number, or boolean",
                actual: json_type_name(default).to_string(),
            });
        }
    }

    Ok(())
}

/// Type-check the four optional rule members and compile `pattern`.
fn check_validation_rule(index: usize, id: &str, rule: &Value) -> Result<(), SchemaError> {
    let Some(rule) = rule.as_object() else {
        return Err(SchemaError::Shape {
            path: format!("/fields/{index}/validation"),
            expected: "an object",
            actual: json_type_name(rule).to_string(),
        });
    };

    for key in ["pattern", "message"] {
        if let Some(v) = rule.get(key) {
            if !v.is_string() {
                return Err(SchemaError::Shape {
                    path: format!("/fields/{index}/validation/{key}"),
                    expected: "a string",
                    actual: json_type_name(v).to_string(),
                });
            }
        }
    }

    for key in ["min", "max"] {
        if let Some(v) = rule.get(key) {
            if !v.is_number() {
                return Err(SchemaError::Shape {
                    path: format!("/fields/{index}/validation/{key}"),
                    expected: "a number",
                    actual: json_type_name(v).to_string(),
                });
            }
        }
    }

    if let Some(Value::String(pattern)) = rule.get("pattern") {
        Regex::new(pattern).map_err(|e| SchemaError::Pattern {
            id: id.to_string(),
            message: e.to_string(),
        })?;
    }

    Ok(())
}

/// Check each options entry is a `{value, label}` pair of strings.
fn check_options(index: usize, options: &Value) -> Result<(), SchemaError> {
    let Some(options) = options.as_array() else {
        return Err(SchemaError::Shape {
            path: format!("/fields/{index}/options"),
            expected: "an array",
            actual: json_type_name(options).to_string(),
        });
    };

    for (i, option) in options.iter().enumerate() {
        let entry = option.as_object().filter(|o| {
            matches!(o.get("value"), Some(Value::String(_)))
                && matches!(o.get("label"), Some(Value::String(_)))
        });
        if entry.is_none() {
            return Err(SchemaError::Shape {
                path: format!("/fields/{index}/options/{i}"),
                expected: "an object with string 'value' and 'label'",
                actual: json_type_name(option).to_string(),
            });
        }
    }

    Ok(())
}

/// Runs after per-field checks so each field's id is known to be a string.
fn check_duplicate_ids(fields: &[Value]) -> Result<(), SchemaError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for field in fields {
        if let Some(id) = field.get("id").and_then(Value::as_str) {
            if !seen.insert(id) {
                return Err(SchemaError::DuplicateId { id: id.to_string() });
            }
        }
    }
    Ok(())
}
