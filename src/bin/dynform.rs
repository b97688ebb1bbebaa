//! dynform CLI
//!
//! Command-line interface for validating form schemas, inspecting their
//! render plan, and running submissions.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

use dynform::{
    json_type_name, load_schema, render_fields, submission_json, write_submission, FormInstance,
    FormSchema, Notifier, StderrNotifier, SubmitError, Widget,
};

#[derive(Parser)]
#[command(name = "dynform")]
#[command(about = "Validate, render, and submit schema-driven forms")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a schema file against the form-schema shape rules
    Validate {
        /// Schema file to validate
        schema: PathBuf,

        /// Output the result as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Print the render plan for a schema (one line per bound control)
    Render {
        /// Schema file to render
        schema: PathBuf,

        /// Output the control list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a submission against a schema and export the snapshot
    Submit {
        /// Schema file driving the form
        schema: PathBuf,

        /// JSON file with a flat field-id to value object
        #[arg(long)]
        values: PathBuf,

        /// Directory to write form-submission.json into (stdout if not set)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pretty-print a schema file (the format-document action)
    Fmt {
        /// Schema file to format
        schema: PathBuf,

        /// Rewrite the file in place instead of printing to stdout
        #[arg(long)]
        write: bool,
    },

    /// Print the built-in contact-form sample schema
    Sample,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { schema, json } => run_validate(&schema, json),
        Commands::Render { schema, json } => run_render(&schema, json),
        Commands::Submit {
            schema,
            values,
            output,
            json,
        } => run_submit(&schema, &values, output.as_deref(), json),
        Commands::Fmt { schema, write } => run_fmt(&schema, write),
        Commands::Sample => {
            println!("{}", FormSchema::sample().to_text());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_validate(schema_path: &Path, json_output: bool) -> Result<(), u8> {
    match load_schema(schema_path) {
        Ok(schema) => {
            if json_output {
                println!(r#"{{"valid":true}}"#);
            } else {
                println!(
                    "Valid: \"{}\" with {} field(s)",
                    schema.title,
                    schema.fields.len()
                );
            }
            Ok(())
        }
        Err(e) => {
            report_error(json_output, &e.to_string());
            Err(e.exit_code() as u8)
        }
    }
}

fn run_render(schema_path: &Path, json_output: bool) -> Result<(), u8> {
    let schema = load_schema(schema_path).map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;

    let controls = render_fields(&schema);

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&controls).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", schema.title);
    if let Some(description) = &schema.description {
        println!("{description}");
    }
    println!();

    for control in &controls {
        let widget = match &control.widget {
            Widget::Text { kind, .. } => kind.as_str().to_string(),
            Widget::Checkbox => "checkbox".to_string(),
            Widget::Select { options, .. } => format!("select ({} options)", options.len()),
            Widget::RadioGroup { options } => format!("radio ({} options)", options.len()),
            Widget::TextArea { .. } => "textarea".to_string(),
            Widget::FilePicker => "file".to_string(),
        };
        let marker = if control.required { " *" } else { "" };
        println!("  {:<20} {}{} [{}]", control.field_id, control.label, marker, widget);
    }

    Ok(())
}

fn run_submit(
    schema_path: &Path,
    values_path: &Path,
    output: Option<&Path>,
    json_output: bool,
) -> Result<(), u8> {
    let schema = load_schema(schema_path).map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;

    let values = load_values(values_path, json_output)?;

    let mut form = FormInstance::new(schema);
    match form.submit(&values) {
        Ok(()) => {}
        Err(SubmitError::Invalid { errors }) => {
            if json_output {
                let out = serde_json::json!({ "submitted": false, "errors": errors });
                println!("{out}");
            } else {
                eprintln!("Submission blocked:");
                for error in errors {
                    eprintln!("  {error}");
                }
            }
            return Err(1);
        }
        Err(e @ SubmitError::AlreadySubmitted) => {
            report_error(json_output, &e.to_string());
            return Err(e.exit_code() as u8);
        }
    }

    // submit() moved the form into the submitted state
    let Some(snapshot) = form.snapshot() else {
        report_error(json_output, "submission produced no snapshot");
        return Err(2);
    };

    StderrNotifier.notify("Form submitted successfully");

    match output {
        Some(dir) => {
            let path = write_submission(snapshot, dir).map_err(|e| {
                report_error(json_output, &e.to_string());
                e.exit_code() as u8
            })?;
            if json_output {
                let out = serde_json::json!({ "submitted": true, "path": path });
                println!("{out}");
            } else {
                println!("Wrote {}", path.display());
            }
        }
        None => {
            println!("{}", submission_json(snapshot));
        }
    }

    Ok(())
}

fn run_fmt(schema_path: &Path, write: bool) -> Result<(), u8> {
    // Format only requires syntactically valid JSON, like the editor widget
    let content = std::fs::read_to_string(schema_path).map_err(|e| {
        eprintln!("Error: cannot read {}: {}", schema_path.display(), e);
        3u8
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|e| {
        eprintln!("Error: invalid JSON: {e}");
        2u8
    })?;

    let pretty = serde_json::to_string_pretty(&value).map_err(|e| {
        eprintln!("Error serializing output: {e}");
        2u8
    })?;

    if write {
        std::fs::write(schema_path, pretty + "\n").map_err(|e| {
            eprintln!("Error: cannot write {}: {}", schema_path.display(), e);
            3u8
        })?;
    } else {
        println!("{pretty}");
    }

    Ok(())
}

/// Load a flat field-id to value object from a JSON file.
fn load_values(path: &Path, json_output: bool) -> Result<Map<String, Value>, u8> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        report_error(json_output, &format!("cannot read {}: {}", path.display(), e));
        3u8
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|e| {
        report_error(json_output, &format!("invalid values JSON: {e}"));
        2u8
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => {
            report_error(
                json_output,
                &format!("values must be a JSON object, got {}", json_type_name(&other)),
            );
            Err(2)
        }
    }
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        let out = serde_json::json!({ "valid": false, "error": msg });
        println!("{out}");
    } else {
        eprintln!("Error: {msg}");
    }
}
