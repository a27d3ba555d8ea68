use super::ui;
use crate::core::config::OutputFormat;
use crate::core::profile::{FinancialProfile, profile_warnings};
use crate::core::report::{Report, SectionBody};
use crate::core::{Recommendation, evaluate, render};
use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Serialize)]
struct JsonOutput<'a> {
    profile: &'a FinancialProfile,
    recommendation: &'a Recommendation,
    report: &'a Report,
}

/// Evaluates the profile and formats the resulting report.
pub fn run(profile: &FinancialProfile, format: OutputFormat) -> Result<String> {
    for warning in profile_warnings(profile) {
        warn!(%warning, "Questionable profile input");
    }

    let recommendation = evaluate(profile);
    let report = render(&recommendation);
    info!(sections = report.sections.len(), ?format, "Rendered report");

    let output = match format {
        OutputFormat::Table => display_as_table(&report),
        OutputFormat::Html => report.to_html(),
        OutputFormat::Json => serde_json::to_string_pretty(&JsonOutput {
            profile,
            recommendation: &recommendation,
            report: &report,
        })?,
    };
    Ok(output)
}

/// Terminal rendering: one block per section, tables for key/value data.
pub fn display_as_table(report: &Report) -> String {
    let mut output = String::new();

    for section in &report.sections {
        output.push_str(&format!(
            "\n{}\n",
            ui::style_text(&section.heading, ui::StyleType::Heading)
        ));

        if let SectionBody::Overview { summary, .. } = &section.body {
            if !summary.is_empty() {
                output.push_str(&format!("\n{summary}\n"));
            }
        }
        if let Some(intro) = &section.intro {
            output.push_str(&format!(
                "\n{}\n",
                ui::style_text(intro, ui::StyleType::Subtle)
            ));
        }

        match &section.body {
            SectionBody::Overview { metrics, .. } => {
                let mut table = ui::new_styled_table();
                table.set_header(vec![ui::header_cell("Metric"), ui::header_cell("Value")]);
                for m in metrics {
                    table.add_row(vec![Cell::new(&m.label), ui::metric_cell(&m.value)]);
                }
                output.push_str(&format!("\n{table}\n"));
            }
            SectionBody::Allocation(shares) => {
                let mut table = ui::new_styled_table();
                table.set_header(vec![
                    ui::header_cell("Category"),
                    ui::header_cell("Share of Surplus"),
                ]);
                for a in shares {
                    table.add_row(vec![Cell::new(&a.category), ui::percentage_cell(a.percentage)]);
                }
                output.push_str(&format!("\n{table}\n"));
            }
            SectionBody::List(items) => {
                output.push('\n');
                for (i, item) in items.iter().enumerate() {
                    output.push_str(&format!("  {}. {item}\n", i + 1));
                }
            }
            SectionBody::Text(text) => {
                output.push_str(&format!(
                    "\n{}\n",
                    ui::style_text(text, ui::StyleType::Emphasis)
                ));
            }
        }
    }

    output
}
