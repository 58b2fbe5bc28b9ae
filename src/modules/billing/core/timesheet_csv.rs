use crate::modules::time_entries::core::time_entry::TimeEntry;

pub const HEADER: &str = "Date,Employee,Hours,Description";

/// Characters outside `[A-Za-z0-9._-]` in the project id become `_`, so the
/// name is always safe inside a quoted `Content-Disposition` value.
pub fn file_name(project: &str, year: i32, month: u32) -> String {
    let project: String = project
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    format!("timesheet_{project}_{year}_{month}.csv")
}

/// Header plus one line per entry, newline separated, no trailing newline.
pub fn render(entries: &[TimeEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(HEADER.to_string());
    for entry in entries {
        lines.push(
            [
                entry.log_date.to_string(),
                field(&entry.logged_by),
                entry.hours.normalize().to_string(),
                field(&entry.description),
            ]
            .join(","),
        );
    }
    lines.join("\n")
}

fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
