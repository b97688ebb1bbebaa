//! Field rendering and the submission state machine.
//!
//! [`render_fields`] maps each field descriptor to a bound control through an
//! exhaustive match over [`InputKind`]. Presentational kinds produce no
//! control; unknown kinds cannot reach the renderer because the validator's
//! closed enum rejects them at parse time.
//!
//! [`FormInstance`] is the two-state machine driving submissions:
//! `Editable` until a submission passes every per-field check, then
//! `Submitted` (terminal) until the active schema is replaced.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{FieldError, SubmitError, Violation};
use crate::types::{ChoiceOption, Field, FormSchema, InputKind};

/// Default inline message for a missing required value.
pub const REQUIRED_MESSAGE: &str = "This field is required";
/// Default inline message for a pattern mismatch.
pub const PATTERN_MESSAGE: &str = "Invalid pattern";
/// Label of the explicit no-selection entry on select widgets.
pub const SELECT_PLACEHOLDER: &str = "Select an option";

/// One bound input control in the render plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    pub field_id: String,
    pub label: String,
    pub required: bool,
    pub widget: Widget,
}

/// The input presentation a control uses, one variant per rendered kind
/// group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    /// Single-line input shared by all text-like kinds.
    Text {
        kind: InputKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    /// Boolean control, label rendered inline.
    Checkbox,
    /// Closed-choice control with an explicit no-selection entry.
    Select {
        options: Vec<ChoiceOption>,
        placeholder_label: String,
    },
    /// Mutually exclusive choices, one control per option.
    RadioGroup { options: Vec<ChoiceOption> },
    /// Multi-line text input.
    TextArea {
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    /// File-selection control; the bound value is the selected handle(s).
    FilePicker,
}

/// Render every field of a schema, in schema order.
pub fn render_fields(schema: &FormSchema) -> Vec<Control> {
    schema.fields.iter().filter_map(render_field).collect()
}

/// Map one field to its control, or `None` for presentational kinds.
pub fn render_field(field: &Field) -> Option<Control> {
    let widget = match field.kind {
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
        | InputKind::Color => Widget::Text {
            kind: field.kind,
            placeholder: field.placeholder.clone(),
        },
        InputKind::Checkbox => Widget::Checkbox,
        InputKind::Select => Widget::Select {
            options: field.options.clone().unwrap_or_default(),
            placeholder_label: SELECT_PLACEHOLDER.to_string(),
        },
        InputKind::Radio => Widget::RadioGroup {
            options: field.options.clone().unwrap_or_default(),
        },
        InputKind::Textarea => Widget::TextArea {
            placeholder: field.placeholder.clone(),
        },
        InputKind::File => Widget::FilePicker,
        InputKind::Button
        | InputKind::Hidden
        | InputKind::Image
        | InputKind::Range
        | InputKind::Reset
        | InputKind::Submit => return None,
    };

    Some(Control {
        field_id: field.id.clone(),
        label: field.label.clone(),
        required: field.is_required(),
        widget,
    })
}

/// Frozen id-to-value mapping captured at the moment of successful submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    values: Map<String, Value>,
}

impl Snapshot {
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn get(&self, field_id: &str) -> Option<&Value> {
        self.values.get(field_id)
    }
}

/// Submission state of a form instance.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Editable,
    /// Terminal until the schema is replaced.
    Submitted(Snapshot),
}

/// A rendered form bound to one schema.
pub struct FormInstance {
    schema: FormSchema,
    state: FormState,
}

impl FormInstance {
    pub fn new(schema: FormSchema) -> Self {
        FormInstance {
            schema,
            state: FormState::Editable,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.state, FormState::Submitted(_))
    }

    /// The frozen submission snapshot, once submitted.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match &self.state {
            FormState::Submitted(snapshot) => Some(snapshot),
            FormState::Editable => None,
        }
    }

    /// Render plan for the current schema.
    pub fn controls(&self) -> Vec<Control> {
        render_fields(&self.schema)
    }

    /// Run a submission attempt.
    ///
    /// Violations are collected per field, in schema order, and block the
    /// submit; on success the machine moves to `Submitted` and further
    /// submissions are rejected until [`FormInstance::replace_schema`].
    ///
    /// # Errors
    ///
    /// `SubmitError::AlreadySubmitted` once in the submitted state,
    /// `SubmitError::Invalid` carrying every per-field violation otherwise.
    pub fn submit(&mut self, values: &Map<String, Value>) -> Result<(), SubmitError> {
        if self.is_submitted() {
            return Err(SubmitError::AlreadySubmitted);
        }

        let mut errors = Vec::new();
        let mut snapshot = Map::new();

        for field in &self.schema.fields {
            if field.kind.is_presentational() {
                continue;
            }
            let value = values.get(&field.id);
            check_value(field, value, &mut errors);
            snapshot.insert(field.id.clone(), bound_value(field, value));
        }

        if !errors.is_empty() {
            return Err(SubmitError::Invalid { errors });
        }

        self.state = FormState::Submitted(Snapshot { values: snapshot });
        Ok(())
    }

    /// Replace the schema wholesale; resets the machine to `Editable`.
    pub fn replace_schema(&mut self, schema: FormSchema) {
        self.schema = schema;
        self.state = FormState::Editable;
    }
}

/// Check one submitted value against its field's rules.
fn check_value(field: &Field, value: Option<&Value>, errors: &mut Vec<FieldError>) {
    let empty = match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        // An unchecked checkbox does not satisfy `required`
        Some(Value::Bool(checked)) if field.kind == InputKind::Checkbox => !checked,
        Some(_) => false,
    };

    if empty {
        if field.is_required() {
            errors.push(FieldError {
                field_id: field.id.clone(),
                violation: Violation::Required,
                message: REQUIRED_MESSAGE.to_string(),
            });
        }
        // No further rules apply to an empty value
        return;
    }

    let Some(rule) = &field.validation else {
        return;
    };

    if let (Some(pattern), Some(Value::String(s))) = (&rule.pattern, value) {
        // The validator compiled the pattern already; a failure here means
        // the field never went through `validate`, so skip rather than panic.
        if let Ok(re) = Regex::new(pattern) {
            if !re.is_match(s) {
                errors.push(FieldError {
                    field_id: field.id.clone(),
                    violation: Violation::Pattern,
                    message: rule
                        .message
                        .clone()
                        .unwrap_or_else(|| PATTERN_MESSAGE.to_string()),
                });
            }
        }
    }

    if let Some(n) = numeric_value(field, value) {
        if let Some(min) = rule.min {
            if n < min {
                errors.push(FieldError {
                    field_id: field.id.clone(),
                    violation: Violation::Range,
                    message: format!("Value must be at least {min}"),
                });
            }
        }
        if let Some(max) = rule.max {
            if n > max {
                errors.push(FieldError {
                    field_id: field.id.clone(),
                    violation: Violation::Range,
                    message: format!("Value must be at most {max}"),
                });
            }
        }
    }
}

/// Numeric reading of a submitted value, for bounds checks.
///
/// Number inputs submit strings, so those are parsed; other kinds only
/// produce a number when the value already is one.
fn numeric_value(field: &Field, value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if field.kind == InputKind::Number => s.parse().ok(),
        _ => None,
    }
}

/// The value frozen into the snapshot for one field.
fn bound_value(field: &Field, value: Option<&Value>) -> Value {
    match value {
        Some(v) => {
            if field.kind == InputKind::Checkbox {
                Value::Bool(v.as_bool().unwrap_or(false))
            } else {
                v.clone()
            }
        }
        None => match (&field.default_value, field.kind) {
            (Some(default), _) => default.to_value(),
            (None, InputKind::Checkbox) => Value::Bool(false),
            (None, InputKind::File) => Value::Null,
            (None, _) => Value::String(String::new()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate;
    use serde_json::json;

    fn schema(fields: Value) -> FormSchema {
        validate(&json!({ "formTitle": "Form", "fields": fields }).to_string()).unwrap()
    }

    fn values(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    // === Render plan ===

    #[test]
    fn text_like_kinds_share_text_widget() {
        let schema = schema(json!([
            { "id": "name", "type": "text", "label": "Name", "placeholder": "Jane" },
            { "id": "when", "type": "datetime-local", "label": "When" },
            { "id": "shade", "type": "color", "label": "Shade" }
        ]));
        let controls = render_fields(&schema);

        assert_eq!(controls.len(), 3);
        assert_eq!(
            controls[0].widget,
            Widget::Text {
                kind: InputKind::Text,
                placeholder: Some("Jane".to_string())
            }
        );
        assert!(matches!(
            &controls[1].widget,
            Widget::Text { kind: InputKind::DateTimeLocal, .. }
        ));
    }

    #[test]
    fn select_gets_placeholder_entry() {
        let schema = schema(json!([{
            "id": "size",
            "type": "select",
            "label": "Size",
            "options": [
                { "value": "s", "label": "Small" },
                { "value": "l", "label": "Large" }
            ]
        }]));
        let controls = render_fields(&schema);

        match &controls[0].widget {
            Widget::Select {
                options,
                placeholder_label,
            } => {
                assert_eq!(options.len(), 2);
                assert_eq!(placeholder_label, SELECT_PLACEHOLDER);
            }
            other => panic!("expected select widget, got {other:?}"),
        }
    }

    #[test]
    fn radio_renders_one_control_group() {
        let schema = schema(json!([{
            "id": "plan",
            "type": "radio",
            "label": "Plan",
            "options": [
                { "value": "free", "label": "Free" },
                { "value": "pro", "label": "Pro" }
            ]
        }]));
        let controls = render_fields(&schema);

        assert!(matches!(
            &controls[0].widget,
            Widget::RadioGroup { options } if options.len() == 2
        ));
    }

    #[test]
    fn presentational_kinds_are_skipped() {
        let schema = schema(json!([
            { "id": "name", "type": "text", "label": "Name" },
            { "id": "go", "type": "submit", "label": "Go" },
            { "id": "token", "type": "hidden", "label": "Token" },
            { "id": "bio", "type": "textarea", "label": "Bio" }
        ]));
        let controls = render_fields(&schema);

        let ids: Vec<&str> = controls.iter().map(|c| c.field_id.as_str()).collect();
        assert_eq!(ids, ["name", "bio"]);
    }

    #[test]
    fn checkbox_and_file_widgets() {
        let schema = schema(json!([
            { "id": "agree", "type": "checkbox", "label": "I agree", "required": true },
            { "id": "cv", "type": "file", "label": "CV" }
        ]));
        let controls = render_fields(&schema);

        assert_eq!(controls[0].widget, Widget::Checkbox);
        assert!(controls[0].required);
        assert_eq!(controls[1].widget, Widget::FilePicker);
    }

    // === Submission ===

    #[test]
    fn submit_blocks_on_missing_required() {
        let mut form = FormInstance::new(schema(json!([
            { "id": "name", "type": "text", "label": "Name", "required": true },
            { "id": "bio", "type": "textarea", "label": "Bio" }
        ])));

        let err = form.submit(&values(json!({ "name": "" }))).unwrap_err();
        match err {
            SubmitError::Invalid { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field_id, "name");
                assert_eq!(errors[0].violation, Violation::Required);
                assert_eq!(errors[0].message, REQUIRED_MESSAGE);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert!(!form.is_submitted());
    }

    #[test]
    fn submit_enforces_pattern() {
        let mut form = FormInstance::new(schema(json!([{
            "id": "code",
            "type": "text",
            "label": "Code",
            "validation": { "pattern": "^[0-9]+$", "message": "Digits only" }
        }])));

        let err = form.submit(&values(json!({ "code": "abc" }))).unwrap_err();
        match err {
            SubmitError::Invalid { errors } => {
                assert_eq!(errors[0].violation, Violation::Pattern);
                assert_eq!(errors[0].message, "Digits only");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }

        form.submit(&values(json!({ "code": "123" }))).unwrap();
        assert!(form.is_submitted());
    }

    #[test]
    fn pattern_mismatch_uses_default_message() {
        let mut form = FormInstance::new(schema(json!([{
            "id": "code",
            "type": "text",
            "label": "Code",
            "validation": { "pattern": "^[0-9]+$" }
        }])));

        let err = form.submit(&values(json!({ "code": "abc" }))).unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Invalid { errors } if errors[0].message == PATTERN_MESSAGE
        ));
    }

    #[test]
    fn empty_optional_value_skips_pattern() {
        let mut form = FormInstance::new(schema(json!([{
            "id": "code",
            "type": "text",
            "label": "Code",
            "validation": { "pattern": "^[0-9]+$" }
        }])));

        form.submit(&values(json!({ "code": "" }))).unwrap();
    }

    #[test]
    fn submit_enforces_bounds_on_number_fields() {
        let mut form = FormInstance::new(schema(json!([{
            "id": "age",
            "type": "number",
            "label": "Age",
            "validation": { "min": 18, "max": 99 }
        }])));

        let err = form.submit(&values(json!({ "age": "12" }))).unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Invalid { errors }
                if errors[0].violation == Violation::Range
                    && errors[0].message == "Value must be at least 18"
        ));

        let err = form.submit(&values(json!({ "age": 120 }))).unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Invalid { errors } if errors[0].message == "Value must be at most 99"
        ));

        form.submit(&values(json!({ "age": 42 }))).unwrap();
    }

    #[test]
    fn violations_collected_per_field_in_order() {
        let mut form = FormInstance::new(schema(json!([
            { "id": "name", "type": "text", "label": "Name", "required": true },
            { "id": "email", "type": "email", "label": "Email", "required": true },
            { "id": "bio", "type": "textarea", "label": "Bio" }
        ])));

        let err = form.submit(&values(json!({}))).unwrap_err();
        match err {
            SubmitError::Invalid { errors } => {
                let ids: Vec<&str> = errors.iter().map(|e| e.field_id.as_str()).collect();
                assert_eq!(ids, ["name", "email"]);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn required_checkbox_must_be_checked() {
        let mut form = FormInstance::new(schema(json!([
            { "id": "agree", "type": "checkbox", "label": "I agree", "required": true }
        ])));

        let err = form.submit(&values(json!({ "agree": false }))).unwrap_err();
        assert!(matches!(err, SubmitError::Invalid { .. }));

        form.submit(&values(json!({ "agree": true }))).unwrap();
    }

    #[test]
    fn snapshot_freezes_submitted_values() {
        let mut form = FormInstance::new(schema(json!([
            { "id": "name", "type": "text", "label": "Name" },
            { "id": "newsletter", "type": "checkbox", "label": "Subscribe" },
            { "id": "go", "type": "submit", "label": "Go" }
        ])));

        form.submit(&values(json!({ "name": "Alice" }))).unwrap();
        let snapshot = form.snapshot().unwrap();

        assert_eq!(snapshot.get("name"), Some(&json!("Alice")));
        // Unchecked checkbox freezes as false
        assert_eq!(snapshot.get("newsletter"), Some(&json!(false)));
        // Presentational fields never enter the snapshot
        assert_eq!(snapshot.get("go"), None);
    }

    #[test]
    fn absent_value_falls_back_to_default() {
        let mut form = FormInstance::new(schema(json!([
            { "id": "country", "type": "text", "label": "Country", "defaultValue": "NL" }
        ])));

        form.submit(&values(json!({}))).unwrap();
        assert_eq!(form.snapshot().unwrap().get("country"), Some(&json!("NL")));
    }

    #[test]
    fn second_submit_is_rejected() {
        let mut form = FormInstance::new(schema(json!([
            { "id": "name", "type": "text", "label": "Name" }
        ])));

        form.submit(&values(json!({ "name": "Alice" }))).unwrap();
        let err = form.submit(&values(json!({ "name": "Bob" }))).unwrap_err();
        assert!(matches!(err, SubmitError::AlreadySubmitted));

        // Snapshot is unchanged by the rejected attempt
        assert_eq!(form.snapshot().unwrap().get("name"), Some(&json!("Alice")));
    }

    #[test]
    fn replace_schema_resets_to_editable() {
        let mut form = FormInstance::new(schema(json!([
            { "id": "name", "type": "text", "label": "Name" }
        ])));
        form.submit(&values(json!({ "name": "Alice" }))).unwrap();
        assert!(form.is_submitted());

        form.replace_schema(schema(json!([
            { "id": "email", "type": "email", "label": "Email" }
        ])));
        assert!(!form.is_submitted());
        assert_eq!(form.state(), &FormState::Editable);

        form.submit(&values(json!({ "email": "a@b.com" }))).unwrap();
        assert!(form.is_submitted());
    }
}
