//! Core types for the form schema model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Closed set of field kinds a schema may declare.
///
/// The wire names match the HTML input-type vocabulary used in the schema
/// text format. Presentational kinds (`button`, `hidden`, `image`, `range`,
/// `reset`, `submit`) are accepted by the validator but produce no control
/// when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Email,
    Password,
    Number,
    Search,
    Tel,
    Url,
    Date,
    #[serde(rename = "datetime-local", alias = "datetime")]
    DateTimeLocal,
    Time,
    Week,
    Month,
    Color,
    Checkbox,
    Select,
    Radio,
    Textarea,
    File,
    Button,
    Hidden,
    Image,
    Range,
    Reset,
    Submit,
}

impl InputKind {
    /// Parse a kind from its wire name.
    ///
    /// Returns `None` for unknown values (caller should error).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(InputKind::Text),
            "email" => Some(InputKind::Email),
            "password" => Some(InputKind::Password),
            "number" => Some(InputKind::Number),
            "search" => Some(InputKind::Search),
            "tel" => Some(InputKind::Tel),
            "url" => Some(InputKind::Url),
            "date" => Some(InputKind::Date),
            "datetime-local" | "datetime" => Some(InputKind::DateTimeLocal),
            "time" => Some(InputKind::Time),
            "week" => Some(InputKind::Week),
            "month" => Some(InputKind::Month),
            "color" => Some(InputKind::Color),
            "checkbox" => Some(InputKind::Checkbox),
            "select" => Some(InputKind::Select),
            "radio" => Some(InputKind::Radio),
            "textarea" => Some(InputKind::Textarea),
            "file" => Some(InputKind::File),
            "button" => Some(InputKind::Button),
            "hidden" => Some(InputKind::Hidden),
            "image" => Some(InputKind::Image),
            "range" => Some(InputKind::Range),
            "reset" => Some(InputKind::Reset),
            "submit" => Some(InputKind::Submit),
            _ => None,
        }
    }

    /// The wire name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Password => "password",
            InputKind::Number => "number",
            InputKind::Search => "search",
            InputKind::Tel => "tel",
            InputKind::Url => "url",
            InputKind::Date => "date",
            InputKind::DateTimeLocal => "datetime-local",
            InputKind::Time => "time",
            InputKind::Week => "week",
            InputKind::Month => "month",
            InputKind::Color => "color",
            InputKind::Checkbox => "checkbox",
            InputKind::Select => "select",
            InputKind::Radio => "radio",
            InputKind::Textarea => "textarea",
            InputKind::File => "file",
            InputKind::Button => "button",
            InputKind::Hidden => "hidden",
            InputKind::Image => "image",
            InputKind::Range => "range",
            InputKind::Reset => "reset",
            InputKind::Submit => "submit",
        }
    }

    /// True for the single-line input kinds that share the text widget.
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            InputKind::Text
                | InputKind::Email
                | InputKind::Password
                | InputKind::Number
                | InputKind::Search
                | InputKind::Tel
                | InputKind::Url
                | InputKind::Date
                | InputKind::DateTimeLocal
                | InputKind::Time
                | InputKind::Week
                | InputKind::Month
                | InputKind::Color
        )
    }

    /// True for kinds that never render a bound control.
    pub fn is_presentational(&self) -> bool {
        matches!(
            self,
            InputKind::Button
                | InputKind::Hidden
                | InputKind::Image
                | InputKind::Range
                | InputKind::Reset
                | InputKind::Submit
        )
    }

    /// True for kinds whose control is populated from `options`.
    pub fn needs_options(&self) -> bool {
        matches!(self, InputKind::Select | InputKind::Radio)
    }
}

/// One entry of a `select` or `radio` option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

/// Optional per-field constraint applied at submission time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Regular expression the submitted string must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Message shown inline when the pattern does not match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Lower bound for numeric values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound for numeric values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// A scalar default value: string, number, or boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    String(String),
}

impl Scalar {
    /// Convert into the equivalent JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Scalar::String(s) => Value::String(s.clone()),
        }
    }
}

/// One form field descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Unique (within one schema) non-empty identifier.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InputKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
    /// Ordered choices for `select`/`radio` kinds, ignored otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,
    #[serde(rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Scalar>,
}

impl Field {
    /// Absent `required` means not required.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// The whole form: title, optional description, ordered fields.
///
/// Instances are replaced wholesale on every successful validation and never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(rename = "formTitle")]
    pub title: String,
    #[serde(rename = "formDescription", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<Field>,
}

impl FormSchema {
    /// Serialize back to the schema text format (pretty-printed).
    pub fn to_text(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// The canonical contact-form sample schema.
    pub fn sample() -> Self {
        FormSchema {
            title: "Contact Form".to_string(),
            description: Some("Please fill in the details below.".to_string()),
            fields: vec![
                Field {
                    id: "name".to_string(),
                    kind: InputKind::Text,
                    label: "Name".to_string(),
                    required: Some(true),
                    placeholder: None,
                    validation: None,
                    options: None,
                    default_value: None,
                },
                Field {
                    id: "email".to_string(),
                    kind: InputKind::Email,
                    label: "Email".to_string(),
                    required: Some(true),
                    placeholder: None,
                    validation: None,
                    options: None,
                    default_value: None,
                },
                Field {
                    id: "message".to_string(),
                    kind: InputKind::Textarea,
                    label: "Message".to_string(),
                    required: Some(false),
                    placeholder: None,
                    validation: None,
                    options: None,
                    default_value: None,
                },
            ],
        }
    }
}
