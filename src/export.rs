//! Submission export: the download artifact, clipboard, and notifications.
//!
//! Export operates on the frozen [`Snapshot`] taken at the moment of
//! successful submit. Failures here are one-shot and user-visible; they
//! never touch form state.

use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::render::Snapshot;

/// Name of the downloadable submission artifact.
pub const SUBMISSION_FILENAME: &str = "form-submission.json";

/// Serialize a snapshot as pretty-printed JSON text.
pub fn submission_json(snapshot: &Snapshot) -> String {
    // A flat string-keyed map always serializes
    serde_json::to_string_pretty(snapshot).unwrap_or_default()
}

/// Write the submission artifact into `dir`, returning the written path.
///
/// # Errors
///
/// Returns `ExportError::Write` if the file cannot be written.
pub fn write_submission(snapshot: &Snapshot, dir: &Path) -> Result<PathBuf, ExportError> {
    let path = dir.join(SUBMISSION_FILENAME);
    std::fs::write(&path, submission_json(snapshot)).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Clipboard seam; the host supplies the real implementation.
pub trait Clipboard {
    /// Place text on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Clipboard` when the write fails.
    fn write_text(&mut self, text: &str) -> Result<(), ExportError>;
}

/// Copy the submission JSON to a clipboard.
pub fn copy_submission(
    snapshot: &Snapshot,
    clipboard: &mut dyn Clipboard,
) -> Result<(), ExportError> {
    clipboard.write_text(&submission_json(snapshot))
}

/// Transient-notification seam: show a message, no return value.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Notifier that prints to stderr; used by the CLI.
#[derive(Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
