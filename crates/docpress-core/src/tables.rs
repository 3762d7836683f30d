//! CSV table rendering.
//!
//! `!table[path.csv]` references are replaced with a sanitized HTML table.
//! Header cells may carry pipe-separated modifiers: `hover <text>` becomes a
//! `title` attribute, `align left|right` becomes an inline text-alignment
//! style. A failed table becomes a bracketed diagnostic instead of aborting
//! the document.

use std::collections::HashMap;
use std::path::Path;

use crate::config::IgnoreLists;
use crate::patterns::CSV_TABLE_RE;
use crate::sanitize::clean_table_fragment;
use crate::util::{escape_html, resolve_relative};

/// Validation hook for `align` modifier values.
///
/// Lenient rendering passes `None` and silently ignores unrecognized values;
/// strict rendering supplies a validator that rejects them.
pub type AlignValidator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

/// Table rendering error, shown inline as a diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("table file has no header row")]
    Empty,

    #[error("{0}")]
    InvalidAlignment(String),
}

/// Strict `align` validator: only `left` and `right` are accepted.
pub fn strict_align_validator(value: &str) -> Result<(), String> {
    if value == "left" || value == "right" {
        Ok(())
    } else {
        Err(format!(
            "Invalid alignment value: {value}. Must be 'left' or 'right'"
        ))
    }
}

/// Replace every `!table[...]` reference in `body`.
///
/// Paths resolve relative to `doc_dir`. References whose filename is on the
/// table ignore list pass through verbatim.
pub fn convert_tables(
    body: &str,
    doc_dir: &Path,
    ignore: &IgnoreLists,
    align_validator: Option<AlignValidator<'_>>,
) -> String {
    CSV_TABLE_RE
        .replace_all(body, |caps: &regex::Captures<'_>| {
            let csv_ref = &caps[1];
            let table_name = csv_ref.rsplit('/').next().unwrap_or(csv_ref);
            if ignore.ignores_table(table_name) {
                return caps[0].to_owned();
            }

            let csv_path = resolve_relative(doc_dir, csv_ref);
            match render_table(&csv_path, align_validator) {
                Ok(html) => html,
                Err(e) => format!("[Failed to load table from {} - {e}]", csv_path.display()),
            }
        })
        .into_owned()
}

/// Render one CSV file as a sanitized HTML table fragment.
fn render_table(
    csv_path: &Path,
    align_validator: Option<AlignValidator<'_>>,
) -> Result<String, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)?;

    let mut records = reader.records();
    let headers = records.next().ok_or(TableError::Empty)??;

    let mut html = String::from("<div class='data-table'><table>\n<thead>\n<tr>");
    let mut alignments: HashMap<usize, String> = HashMap::new();

    for (i, raw_header) in headers.iter().enumerate() {
        let mut title_attr = String::new();
        let mut parts = raw_header.split('|').map(str::trim);
        let header = parts.next().unwrap_or("");

        for part in parts {
            if let Some(hover_text) = part.strip_prefix("hover ") {
                title_attr = format!(" title='{}'", escape_html(hover_text));
            } else if let Some(align_value) = part.strip_prefix("align ") {
                if let Some(validate) = align_validator {
                    validate(align_value).map_err(TableError::InvalidAlignment)?;
                }
                if align_value == "left" || align_value == "right" {
                    alignments.insert(i, format!(" style='text-align:{align_value}'"));
                }
            }
        }
        html.push_str(&format!("<th{title_attr}>{header}</th>"));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for record in records {
        let record = record?;
        html.push_str("<tr>");
        for (i, cell) in record.iter().enumerate() {
            let align_style = alignments.get(&i).map(String::as_str).unwrap_or("");
            html.push_str(&format!("<td{align_style}>{cell}</td>"));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table></div>");

    Ok(clean_table_fragment(&html))
}
