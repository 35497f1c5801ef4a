use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use tagscan_config::OutputFormat;
use tagscan_core::OverallSummary;
use tagscan_pipeline::RunReport;

use crate::ui;

pub mod table;

fn table_options() -> table::TableOptions {
    table::TableOptions {
        max_width: ui::prefs().term_width,
    }
}

/// Render any serializable value. Tables show one `key value` row per
/// top-level field.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let rows = match serde_json::to_value(value)? {
                Value::Object(map) => map
                    .into_iter()
                    .map(|(key, value)| vec![key, value_to_cell(&value)])
                    .collect(),
                scalar => vec![vec![String::from("value"), value_to_cell(&scalar)]],
            };
            Ok(table::render_table(&["key", "value"], &rows, table_options()))
        }
    }
}

/// Render a collated summary. JSON forms are the bare nested map; the table
/// lists one `parent child count` row per pair, followed by the run report
/// when there is one.
pub fn render_summary(
    summary: &OverallSummary,
    report: Option<&RunReport>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(summary, format);
    }

    if summary.is_empty() {
        let mut out = String::from("(no tags)");
        if let Some(report) = report {
            out.push_str("\n\n");
            out.push_str(&report.summary_line());
        }
        return Ok(out);
    }

    let rows = match summary {
        OverallSummary::Totals(totals) => totals
            .iter()
            .map(|(parent, child, count)| {
                vec![parent.to_string(), child.to_string(), count.to_string()]
            })
            .collect::<Vec<_>>(),
        OverallSummary::Averages(averages) => averages
            .iter()
            .map(|(parent, child, mean)| {
                vec![parent.to_string(), child.to_string(), format!("{mean:.4}")]
            })
            .collect(),
    };

    let mut out = table::render_table(&["parent", "child", "count"], &rows, table_options());
    if let Some(report) = report {
        out.push_str("\n\n");
        out.push_str(&report.summary_line());
    }
    Ok(out)
}

/// Write rendered output to `path`, or to stdout when there is none.
pub fn emit(rendered: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "summary written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
