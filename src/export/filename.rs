//! Export file naming.

use chrono::NaiveDate;

use crate::record::ChangeRecord;

/// `ECA_<id>_<YYYY-MM-DD>`, plus `.<extension>` when one is given.
///
/// The id is the ECR number, else the document number, else `Draft`.
pub fn export_filename(record: &ChangeRecord, date: NaiveDate, extension: &str) -> String {
    let stem = format!(
        "ECA_{}_{}",
        sanitize(record.export_id()),
        date.format("%Y-%m-%d")
    );
    if extension.is_empty() {
        stem
    } else {
        format!("{}.{}", stem, extension)
    }
}

/// Keep ids usable as a single path component.
fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}
