use crate::errors::Result;
use crate::replacer::ReplaceStrategy;
use crate::summary::RunSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Defines the possible output formats for the end-of-run summary.
#[derive(clap::ValueEnum, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A simple, human-readable text block.
    #[default]
    Text,
    /// A single JSON object, suitable for machine processing.
    Json,
}

/// Run details shown alongside the counters.
pub struct ReportContext<'a> {
    pub root: &'a Path,
    pub strategy: ReplaceStrategy,
    pub dry_run: bool,
}

/// Handles the formatting of a [`RunSummary`] into the selected format.
pub struct OutputFormatter {
    format: OutputFormat,
    tool_name: String,
    tool_version: String,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Writes the formatted summary to a given writer.
    pub fn write_summary<W: Write>(
        &self,
        writer: &mut W,
        summary: &RunSummary,
        context: &ReportContext<'_>,
    ) -> Result<()> {
        let output = match self.format {
            OutputFormat::Text => self.format_text(summary, context),
            OutputFormat::Json => self.format_json(summary, context)?,
        };

        writer.write_all(output.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn format_text(&self, summary: &RunSummary, context: &ReportContext<'_>) -> String {
        let rule = "=".repeat(30);
        let headline = if context.dry_run {
            "Dry run complete. No files were written."
        } else {
            "Replacement complete."
        };

        let mut output = String::new();
        output.push_str(&format!("\n{rule}\n"));
        output.push_str(&format!("{headline}\n"));
        output.push_str(&format!("Total files scanned: {}\n", summary.files_scanned));
        output.push_str(&format!("Total files modified: {}\n", summary.files_modified));
        output.push_str(&format!("Total replacements made: {}\n", summary.replacements_made));
        output.push_str(&format!("{rule}\n"));
        output
    }

    fn format_json(&self, summary: &RunSummary, context: &ReportContext<'_>) -> Result<String> {
        #[derive(Serialize)]
        struct JsonOutput<'a> {
            tool: ToolInfo<'a>,
            finished_at: DateTime<Utc>,
            root: String,
            strategy: ReplaceStrategy,
            dry_run: bool,
            #[serde(flatten)]
            summary: &'a RunSummary,
        }

        #[derive(Serialize)]
        struct ToolInfo<'a> {
            name: &'a str,
            version: &'a str,
        }

        let output = JsonOutput {
            tool: ToolInfo {
                name: &self.tool_name,
                version: &self.tool_version,
            },
            finished_at: Utc::now(),
            root: context.root.display().to_string(),
            strategy: context.strategy,
            dry_run: context.dry_run,
            summary,
        };

        let mut json = serde_json::to_string(&output)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::path::PathBuf;

    fn render(format: OutputFormat, dry_run: bool) -> String {
        let summary = RunSummary {
            files_scanned: 5,
            files_modified: 1,
            replacements_made: 2,
        };
        let root = PathBuf::from("/srv/site");
        let context = ReportContext {
            root: &root,
            strategy: ReplaceStrategy::Sequential,
            dry_run,
        };
        let mut out = Vec::new();
        OutputFormatter::new(format)
            .write_summary(&mut out, &summary, &context)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_summary_block() {
        let text = render(OutputFormat::Text, false);
        assert!(text.contains("Replacement complete.\n"));
        assert!(text.contains("Total files scanned: 5\n"));
        assert!(text.contains("Total files modified: 1\n"));
        assert!(text.contains("Total replacements made: 2\n"));
        assert!(text.ends_with(&format!("{}\n", "=".repeat(30))));
    }

    #[test]
    fn test_text_summary_marks_dry_run() {
        assert!(render(OutputFormat::Text, true).contains("Dry run complete."));
    }

    #[test]
    fn test_json_summary_fields() {
        let value: Value = serde_json::from_str(&render(OutputFormat::Json, false)).unwrap();
        assert_eq!(value["tool"]["name"], "linkswap");
        assert_eq!(value["root"], "/srv/site");
        assert_eq!(value["strategy"], "sequential");
        assert_eq!(value["dry_run"], false);
        assert_eq!(value["files_scanned"], 5);
        assert_eq!(value["files_modified"], 1);
        assert_eq!(value["replacements_made"], 2);
        assert!(value["finished_at"].is_string());
    }
}
