#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Check output is one JSON object per line in a deterministic order:
//! 1. All finding records (sorted by file)
//! 2. One status record
//!
//! Rule listings are one record per rule, pre chain first, each chain in
//! execution order.

use crate::engine::CheckResult;
use crate::normalize::Normalizer;
use crate::rules::RuleChain;
use crate::types::NormalizerKind;
use serde::Serialize;
use std::path::PathBuf;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format a check result as JSONL
    pub fn format_check(&self, result: &CheckResult) -> String {
        let mut output = String::new();

        for finding in &result.findings {
            push_record(
                &mut output,
                &FindingRecord {
                    record_type: "finding",
                    file: finding.file.clone(),
                    line: finding.line,
                    found: &finding.found,
                    expected: &finding.expected,
                },
            );
        }

        push_record(
            &mut output,
            &StatusRecord {
                record_type: "status",
                passed: result.is_clean(),
                files_checked: result.files_checked as u64,
                files_skipped: result.files_skipped as u64,
                files_not_normalized: result.findings.len() as u64,
            },
        );

        output
    }

    /// Format the rule chains of a normalizer as JSONL
    pub fn format_rules(&self, kind: NormalizerKind, normalizer: &Normalizer) -> String {
        let mut output = String::new();
        push_chain(&mut output, kind, "pre", normalizer.pre_rules());
        push_chain(&mut output, kind, "post", normalizer.post_rules());
        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_chain(output: &mut String, kind: NormalizerKind, chain: &'static str, rules: &RuleChain) {
    for (index, rule) in rules.iter().enumerate() {
        push_record(
            output,
            &RuleRecord {
                record_type: "rule",
                normalizer: kind.as_str(),
                chain,
                index,
                kind: rule.kind_name(),
                priority: rule.priority().value(),
                pattern: rule.pattern().as_str(),
                replacement: rule.replacement(),
            },
        );
    }
}

fn push_record(output: &mut String, record: &impl Serialize) {
    if let Ok(json) = serde_json::to_string(record) {
        output.push_str(&json);
        output.push('\n');
    }
}

/// Finding record for JSONL output
#[derive(Debug, Serialize)]
struct FindingRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    file: PathBuf,
    line: usize,
    found: &'a str,
    expected: &'a str,
}

/// Status record for JSONL output
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    files_checked: u64,
    files_skipped: u64,
    files_not_normalized: u64,
}

/// Rule record for JSONL output
#[derive(Debug, Serialize)]
struct RuleRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    normalizer: &'static str,
    chain: &'static str,
    index: usize,
    kind: &'static str,
    priority: u32,
    pattern: &'a str,
    replacement: &'a str,
}
