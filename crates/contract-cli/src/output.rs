//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use chrono::NaiveDate;
use colored::*;
use contract_domain::{AnalysisResult, ExtractionResult, Metadata, Severity};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an extraction result.
    pub fn format_extraction(&self, result: &ExtractionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => Ok(self.metadata_table(&result.metadata)),
        }
    }

    /// Format an analysis result.
    pub fn format_analysis(&self, result: &AnalysisResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => Ok(self.format_analysis_tables(result)),
        }
    }

    fn format_analysis_tables(&self, result: &AnalysisResult) -> String {
        let mut sections = vec![self.metadata_table(&result.metadata)];

        if result.risks.is_empty() {
            sections.push(self.colorize("No risks found.", "green"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Severity", "ID", "Title", "Detail"]);
            for risk in &result.risks {
                builder.push_record([
                    risk.severity.as_str(),
                    risk.id.as_str(),
                    risk.title.as_str(),
                    risk.detail.as_str(),
                ]);
            }
            sections.push(self.heading(&format!("Risks ({})", result.risks.len())));
            sections.push(table(builder));
        }

        if result.compliance.is_empty() {
            sections.push(self.colorize("All policies satisfied.", "green"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Severity", "Policy", "Title", "Finding"]);
            for issue in &result.compliance {
                builder.push_record([
                    issue.severity.as_str(),
                    issue.policy_id.as_str(),
                    issue.title.as_str(),
                    issue.finding.as_str(),
                ]);
            }
            sections.push(self.heading(&format!(
                "Compliance issues ({})",
                result.compliance.len()
            )));
            sections.push(table(builder));
        }

        let worst = result
            .risks
            .iter()
            .map(|r| r.severity)
            .chain(result.compliance.iter().map(|c| c.severity))
            .max();
        if let Some(severity) = worst {
            sections.push(self.severity_line(severity));
        }

        sections.join("\n\n")
    }

    fn metadata_table(&self, metadata: &Metadata) -> String {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let date = |value: &Option<NaiveDate>| value.map(|d| d.to_string()).unwrap_or_default();

        let parties = metadata
            .parties
            .iter()
            .map(|p| {
                if p.role.is_empty() {
                    p.name.clone()
                } else {
                    format!("{} ({})", p.name, p.role)
                }
            })
            .collect::<Vec<_>>()
            .join("; ");

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Title".to_string(), text(&metadata.title)]);
        builder.push_record(["Parties".to_string(), parties]);
        builder.push_record(["Effective date".to_string(), date(&metadata.effective_date)]);
        builder.push_record(["Execution date".to_string(), date(&metadata.execution_date)]);
        builder.push_record(["Expiration date".to_string(), date(&metadata.expiration_date)]);
        builder.push_record(["Renewal terms".to_string(), text(&metadata.renewal_terms)]);
        builder.push_record(["Governing law".to_string(), text(&metadata.governing_law)]);
        builder.push_record(["Jurisdiction".to_string(), text(&metadata.jurisdiction)]);
        builder.push_record(["Amounts".to_string(), metadata.amounts.join(", ")]);
        builder.push_record([
            "Obligations".to_string(),
            metadata.obligations.len().to_string(),
        ]);

        format!("{}\n{}", self.heading("Metadata"), table(builder))
    }

    fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn severity_line(&self, severity: Severity) -> String {
        let line = format!("Highest severity: {}", severity.as_str());
        match severity {
            Severity::Critical | Severity::High => self.error(&line),
            Severity::Medium => self.warning(&line),
            Severity::Low => self.info(&line),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn table(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
