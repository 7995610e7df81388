#![forbid(unsafe_code)]

//! Human-readable output with optional color

use crate::engine::CheckResult;
use crate::normalize::Normalizer;
use crate::rules::RuleChain;
use crate::types::NormalizerKind;
use std::io::{self, Write};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Human-readable formatter
pub struct HumanFormatter {
    use_color: bool,
}

impl HumanFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Format a check result: one block per file, then a summary line
    pub fn format_check(&self, result: &CheckResult) -> String {
        self.render(|out| {
            for finding in &result.findings {
                out.set_color(ColorSpec::new().set_bold(true))?;
                write!(out, "{}:{}", finding.file.display(), finding.line)?;
                out.reset()?;
                writeln!(out, ": not normalized")?;

                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                writeln!(out, "  - {}", finding.found.escape_debug())?;
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                writeln!(out, "  + {}", finding.expected.escape_debug())?;
                out.reset()?;
            }

            if !result.findings.is_empty() {
                writeln!(out)?;
            }

            let skipped = if result.files_skipped > 0 {
                format!(" ({} skipped)", result.files_skipped)
            } else {
                String::new()
            };

            if result.is_clean() {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(out, "All {} files normalized", result.files_checked)?;
            } else {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
                write!(
                    out,
                    "{} of {} files not normalized",
                    result.findings.len(),
                    result.files_checked
                )?;
            }
            out.reset()?;
            writeln!(out, "{}", skipped)
        })
    }

    /// Format the effective rule chains of a normalizer
    pub fn format_rules(&self, kind: NormalizerKind, normalizer: &Normalizer) -> String {
        self.render(|out| {
            out.set_color(ColorSpec::new().set_bold(true))?;
            write!(out, "Normalizer: {}", kind)?;
            out.reset()?;
            writeln!(out, " (core: {})", normalizer.core())?;

            let transform = normalizer.transform();
            if !transform.is_identity() {
                let sign = if transform.delta() < 0 { '-' } else { '+' };
                writeln!(
                    out,
                    "Transform: {} shifted by {}{:#X}, {} exclusions, {} overrides",
                    transform.block(),
                    sign,
                    transform.delta().unsigned_abs(),
                    transform.exclusions().len(),
                    transform.overrides().len()
                )?;
            }

            write_chain(out, "Pre rules", normalizer.pre_rules())?;
            write_chain(out, "Post rules", normalizer.post_rules())
        })
    }

    fn render(&self, write: impl FnOnce(&mut Buffer) -> io::Result<()>) -> String {
        let mut buffer = if self.use_color {
            Buffer::ansi()
        } else {
            Buffer::no_color()
        };
        if let Err(e) = write(&mut buffer) {
            tracing::warn!(error = %e, "failed to render output");
        }
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }
}

fn write_chain(out: &mut Buffer, title: &str, chain: &RuleChain) -> io::Result<()> {
    writeln!(out, "{}:", title)?;
    if chain.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for rule in chain {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(out, "  {:>6} {:<10}", rule.priority().value(), rule.kind_name())?;
        out.reset()?;
        writeln!(
            out,
            " {} -> {}",
            rule.pattern().as_str().escape_debug(),
            rule.replacement().escape_debug()
        )?;
    }
    Ok(())
}
