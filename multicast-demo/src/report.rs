//! Report generation
//!
//! Renders scenario transcripts as plain text or JSON.

use crate::config::OutputFormat;
use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

/// Everything one scenario did, step by step
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub scenario: String,
    pub steps: Vec<Step>,
}

/// One operation on a delegate and what invoking it produced
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub action: String,
    pub is_nil: bool,
    /// Return value of the invocation (absent for void delegates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    /// Lines written by the handlers, in call order
    pub history: Vec<String>,
}

pub fn render(transcripts: &[Transcript], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Txt => render_txt(transcripts),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(transcripts)? + "\n"),
    }
}

fn render_txt(transcripts: &[Transcript]) -> Result<String> {
    let mut out = String::new();
    for transcript in transcripts {
        writeln!(out, "═══════════════════════════════════════════════")?;
        writeln!(out, "  {}", transcript.scenario)?;
        writeln!(out, "═══════════════════════════════════════════════")?;
        for step in &transcript.steps {
            writeln!(out, "{}", step.action)?;
            if step.is_nil {
                writeln!(out, "handler is nil")?;
            }
            if let Some(result) = step.result {
                writeln!(out, "The result is {}", result)?;
            }
            writeln!(out, "The event history is:")?;
            for line in &step.history {
                writeln!(out, "{}", line)?;
            }
            writeln!(out)?;
        }
    }
    Ok(out)
}
