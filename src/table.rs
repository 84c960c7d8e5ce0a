// Subject score table for the results pane
use crate::model::{Section, Subject};

pub const NAME_HEADER: &str = "name";
pub const SCORE_COLUMNS: [&str; 3] = ["Term 1", "Term 2", "Final"];
pub const MISSING: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub enum SubjectTableView {
    Table(SubjectTable),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectTable {
    pub columns: Vec<String>,
    pub rows: Vec<SubjectRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectRow {
    pub name: String,
    pub cells: Vec<String>,
}

pub fn render_subject_table(section: &Section) -> SubjectTableView {
    if section.subjects.is_empty() {
        return SubjectTableView::Empty;
    }

    let mut extra_columns: Vec<&str> = Vec::new();
    for subject in &section.subjects {
        for key in subject.extra.keys() {
            if !extra_columns.contains(&key.as_str()) {
                extra_columns.push(key);
            }
        }
    }

    let columns = SCORE_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(extra_columns.iter().map(|c| c.to_string()))
        .collect();

    let rows = section
        .subjects
        .iter()
        .map(|subject| SubjectRow {
            name: subject.name.clone(),
            cells: row_cells(subject, &extra_columns),
        })
        .collect();

    SubjectTableView::Table(SubjectTable { columns, rows })
}

fn row_cells(subject: &Subject, extra_columns: &[&str]) -> Vec<String> {
    let mut cells: Vec<String> = [subject.gpa_term_1, subject.gpa_term_2, subject.gpa_cn]
        .into_iter()
        .map(format_optional)
        .collect();

    for key in extra_columns {
        let cell = match subject.extra.get(*key) {
            None | Some(serde_json::Value::Null) => MISSING.to_string(),
            Some(serde_json::Value::Number(n)) => match n.as_f64() {
                Some(v) => format_score(v),
                None => n.to_string(),
            },
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        cells.push(cell);
    }
    cells
}

pub fn format_optional(value: Option<f64>) -> String {
    value.map(format_score).unwrap_or_else(|| MISSING.to_string())
}

/// One decimal place, rounding half up on the shortest decimal form of the
/// value (8.95 -> "9.0"). Negative values round half away from zero.
pub fn format_score(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    match round_half_up_tenths(value.abs()) {
        Some(tenths) => {
            let sign = if value < 0.0 && tenths != 0 { "-" } else { "" };
            format!("{}{}.{}", sign, tenths / 10, tenths % 10)
        }
        None => format!("{:.1}", value),
    }
}

// Display for f64 never uses exponent notation, so the repr is digits[.digits]
fn round_half_up_tenths(magnitude: f64) -> Option<u128> {
    let repr = magnitude.to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let frac = frac_part.as_bytes();

    let mut tenths = int_part.parse::<u128>().ok()?.checked_mul(10)?;
    if let Some(d) = frac.first() {
        tenths += u128::from(d - b'0');
    }
    if frac.get(1).is_some_and(|d| *d >= b'5') {
        tenths += 1;
    }
    Some(tenths)
}

impl SubjectTable {
    /// Header, rule and one line per subject, columns padded to a common width.
    pub fn render_lines(&self) -> Vec<String> {
        let mut widths = vec![NAME_HEADER.chars().count()];
        widths.extend(self.columns.iter().map(|c| c.chars().count()));
        for row in &self.rows {
            widths[0] = widths[0].max(row.name.chars().count());
            for (i, cell) in row.cells.iter().enumerate() {
                widths[i + 1] = widths[i + 1].max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        let mut header = pad_right(NAME_HEADER, widths[0]);
        for (i, column) in self.columns.iter().enumerate() {
            header.push_str(" | ");
            header.push_str(&pad_left(column, widths[i + 1]));
        }
        lines.push(header);

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        lines.push(rule.join("-+-"));

        for row in &self.rows {
            let mut line = pad_right(&row.name, widths[0]);
            for (i, cell) in row.cells.iter().enumerate() {
                line.push_str(" | ");
                line.push_str(&pad_left(cell, widths[i + 1]));
            }
            lines.push(line);
        }
        lines
    }
}

fn pad_right(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(fill))
}

fn pad_left(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.chars().count());
    format!("{}{}", " ".repeat(fill), text)
}
