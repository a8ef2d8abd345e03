//! Rendering of manifest problems: ariadne reports for bad type text and
//! one-line JSON objects for `--json`.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use jsbind_common::syntax::ShapeParseErrorKind;
use jsbind_common::ResolveError;

use crate::manifest::TypeTextError;

fn error_code(kind: &ShapeParseErrorKind) -> &'static str {
    match kind {
        ShapeParseErrorKind::UnrecognizedShape(_) => "T0001",
        ShapeParseErrorKind::UnexpectedToken { .. } => "T0002",
        ShapeParseErrorKind::UnexpectedEnd { .. } => "T0003",
        ShapeParseErrorKind::InvalidLength(_) => "T0004",
        ShapeParseErrorKind::DuplicateField(_) => "T0005",
        ShapeParseErrorKind::TrailingInput(_) => "T0006",
    }
}

fn label_message(kind: &ShapeParseErrorKind) -> &'static str {
    match kind {
        ShapeParseErrorKind::UnrecognizedShape(_) => "no conversion exists for this type",
        ShapeParseErrorKind::UnexpectedToken { .. } => "unexpected token",
        ShapeParseErrorKind::UnexpectedEnd { .. } => "type ends here",
        ShapeParseErrorKind::InvalidLength(_) => "not an integer literal",
        ShapeParseErrorKind::DuplicateField(_) => "declared again here",
        ShapeParseErrorKind::TrailingInput(_) => "not part of the type",
    }
}

/// Render a type-expression error against its own text.
pub fn render_type_error(err: &TypeTextError, color: bool) -> String {
    let range = err.error.span.to_range(err.text.len());
    let report = Report::build(ReportKind::Error, range.clone())
        .with_code(error_code(&err.error.kind))
        .with_message(format!("{} in {}", err.error, err.origin))
        .with_config(Config::default().with_color(color))
        .with_label(
            Label::new(range)
                .with_message(label_message(&err.error.kind))
                .with_color(Color::Red),
        )
        .finish();

    let mut buf = Vec::new();
    match report.write(Source::from(err.text.as_str()), &mut buf) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => format!("error: {} in {}\n", err.error, err.origin),
    }
}

pub fn type_error_json(err: &TypeTextError) -> serde_json::Value {
    serde_json::json!({
        "code": error_code(&err.error.kind),
        "severity": "error",
        "message": err.error.to_string(),
        "origin": err.origin.to_string(),
        "text": err.text,
        "span": err.error.span,
    })
}

pub fn resolve_error_json(function: &str, err: &ResolveError) -> serde_json::Value {
    serde_json::json!({
        "function": function,
        "severity": "error",
        "message": err.to_string(),
        "breadcrumbs": err.breadcrumbs(),
        "cause": err.root_cause(),
    })
}
