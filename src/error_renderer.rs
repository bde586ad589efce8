//! Error rendering using ariadne.
//!
//! Conversion errors only carry spans; the caller supplies the source text
//! they point into.

use crate::{Diagnostic, Error, Severity};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;

/// Character set for rendering error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    #[default]
    Unicode,
    Ascii,
}

/// Configuration for error rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig<'a> {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// The filename to display, `<unknown>` if not provided.
    pub filename: Option<&'a str>,
    pub charset: CharSet,
}

impl Default for RenderConfig<'_> {
    fn default() -> Self {
        Self {
            color: true,
            filename: None,
            charset: CharSet::Unicode,
        }
    }
}

/// Renders `error` to stderr with the default configuration.
///
/// # Example
/// ```no_run
/// use cinder::{ConvertError, Error, Repr, Span, render_error};
///
/// let source = "$handler(1)";
/// let err = ConvertError::NotCallable { from: Repr::Float64 };
/// render_error(&Error::from_convert(err, Span::new(0, 8)), source);
/// ```
pub fn render_error(error: &Error, source: &str) {
    render_error_to(error, source, &mut std::io::stderr(), &RenderConfig::default()).ok();
}

/// Renders `error` to a writer with the given configuration.
pub fn render_error_to(
    error: &Error,
    source: &str,
    writer: &mut dyn Write,
    config: &RenderConfig,
) -> std::io::Result<()> {
    let filename = config.filename.unwrap_or("<unknown>");

    if error.is_internal() {
        writeln!(writer, "Internal compiler error, please report it.")?;
    }
    render_diagnostics(source, error.diagnostics(), writer, config, filename)
}

fn render_diagnostics(
    source: &str,
    diagnostics: &[Diagnostic],
    writer: &mut dyn Write,
    config: &RenderConfig,
    filename: &str,
) -> std::io::Result<()> {
    let charset = match config.charset {
        CharSet::Unicode => ariadne::CharSet::Unicode,
        CharSet::Ascii => ariadne::CharSet::Ascii,
    };

    for diag in diagnostics {
        let mut colors = ColorGenerator::new();
        colors.next();

        let kind = match diag.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
            Severity::Info => ReportKind::Advice,
        };

        let ariadne_config = ariadne::Config::default()
            .with_color(config.color)
            .with_char_set(charset);

        let mut report = Report::build(kind, (filename, diag.span.0.clone()))
            .with_message(&diag.message)
            .with_config(ariadne_config);

        if let Some(code) = &diag.code {
            report = report.with_code(code);
        }

        let color = colors.next();
        report = report.with_label(
            Label::new((filename, diag.span.0.clone()))
                .with_message(&diag.message)
                .with_color(color),
        );

        for related in &diag.related {
            let color = colors.next();
            report = report.with_label(
                Label::new((filename, related.span.0.clone()))
                    .with_message(&related.message)
                    .with_color(color),
            );
        }

        for help_msg in &diag.help {
            report = report.with_help(help_msg);
        }

        report
            .finish()
            .write((filename, Source::from(source)), &mut *writer)?;
    }

    Ok(())
}
