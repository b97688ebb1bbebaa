//! Editor session: raw schema text, live validation, and the active form.
//!
//! The session is the single writer of the active schema. Every text change
//! runs the validator; only a successful validation replaces the schema (and
//! resets the form's submission state). On failure the previous valid schema
//! stays in effect, so the rendered form never reflects partially-invalid
//! text.

use crate::error::SchemaError;
use crate::render::FormInstance;
use crate::types::FormSchema;
use crate::validator::validate;

/// Holds the current raw text and the last known-valid schema.
#[derive(Default)]
pub struct EditorSession {
    text: String,
    form: Option<FormInstance>,
    last_error: Option<SchemaError>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from initial text, validating it immediately.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut session = Self::new();
        let _ = session.on_text_change(text);
        session
    }

    /// Accept a text change and re-validate.
    ///
    /// On success the new schema replaces the active one wholesale and the
    /// form resets to editable. On failure the error is recorded for display
    /// and the active schema is left untouched.
    pub fn on_text_change(
        &mut self,
        text: impl Into<String>,
    ) -> Result<&FormSchema, &SchemaError> {
        self.text = text.into();
        match validate(&self.text) {
            Ok(schema) => {
                self.last_error = None;
                let form = match self.form.take() {
                    Some(mut form) => {
                        form.replace_schema(schema);
                        form
                    }
                    None => FormInstance::new(schema),
                };
                Ok(self.form.insert(form).schema())
            }
            Err(err) => Err(&*self.last_error.insert(err)),
        }
    }

    /// The current raw text, valid or not.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The last known-valid schema driving the rendered form.
    pub fn active_schema(&self) -> Option<&FormSchema> {
        self.form.as_ref().map(FormInstance::schema)
    }

    pub fn form(&self) -> Option<&FormInstance> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormInstance> {
        self.form.as_mut()
    }

    /// Message for the most recent failed validation, cleared on success.
    pub fn last_error(&self) -> Option<&SchemaError> {
        self.last_error.as_ref()
    }

    /// The format-document action: pretty-print the text when it parses as
    /// JSON, leave it alone otherwise. Returns whether it was reformatted.
    pub fn format_text(&mut self) -> bool {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&self.text) else {
            return false;
        };
        match serde_json::to_string_pretty(&value) {
            Ok(pretty) => {
                self.text = pretty;
                true
            }
            Err(_) => false,
        }
    }
}
