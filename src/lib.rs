//! Schema-driven forms
//!
//! Validates a JSON form-schema text into a typed [`FormSchema`], renders it
//! into a sequence of bound input controls, and runs submissions through
//! per-field required/pattern/bounds checks. The collected values freeze
//! into a snapshot that can be exported as a JSON artifact or clipboard
//! text.
//!
//! # Example
//!
//! ```
//! use dynform::{validate, render_fields, FormInstance, Widget};
//! use serde_json::json;
//!
//! let schema = validate(&json!({
//!     "formTitle": "Contact Form",
//!     "fields": [
//!         { "id": "name", "type": "text", "label": "Name", "required": true },
//!         { "id": "email", "type": "email", "label": "Email", "required": true }
//!     ]
//! }).to_string()).unwrap();
//!
//! let controls = render_fields(&schema);
//! assert_eq!(controls.len(), 2);
//! assert!(matches!(controls[0].widget, Widget::Text { .. }));
//!
//! let mut form = FormInstance::new(schema);
//! let values = match json!({ "name": "Alice", "email": "a@b.com" }) {
//!     serde_json::Value::Object(map) => map,
//!     _ => unreachable!(),
//! };
//! form.submit(&values).unwrap();
//! assert_eq!(form.snapshot().unwrap().get("name"), Some(&json!("Alice")));
//! ```
//!
//! # Validation policy
//!
//! The validator returns the first error it encounters, in declaration
//! order, rather than an aggregated list. Unknown field kinds are rejected
//! at parse time by the closed [`InputKind`] enumeration; at render time
//! only presentational kinds (button, hidden, image, range, reset, submit)
//! are skipped.

mod error;
mod export;
mod render;
mod session;
mod types;
mod validator;

pub use error::{ExportError, FieldError, SchemaError, SubmitError, Violation};
pub use export::{
    copy_submission, submission_json, write_submission, Clipboard, Notifier, StderrNotifier,
    SUBMISSION_FILENAME,
};
pub use render::{
    render_field, render_fields, Control, FormInstance, FormState, Snapshot, Widget,
    PATTERN_MESSAGE, REQUIRED_MESSAGE, SELECT_PLACEHOLDER,
};
pub use session::EditorSession;
pub use types::{
    json_type_name, ChoiceOption, Field, FormSchema, InputKind, Scalar, ValidationRule,
};
pub use validator::{load_schema, validate, validate_value};
