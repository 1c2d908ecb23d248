//! Report rows and the run summary derived from them.

use std::collections::BTreeSet;
use std::fmt;

use super::user::RemoteUser;

/// One line of the CSV report: the four projected fields of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRow {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
}

impl ReportRow {
    /// Fields in header order, absent values as empty strings.
    pub fn fields(&self) -> [&str; 4] {
        [
            self.name.as_deref().unwrap_or_default(),
            self.username.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default(),
            self.company.as_deref().unwrap_or_default(),
        ]
    }
}

impl From<&RemoteUser> for ReportRow {
    fn from(user: &RemoteUser) -> Self {
        Self {
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            company: user.company_name().map(str::to_string),
        }
    }
}

/// Project every user to a report row, preserving input order.
pub fn project(users: &[RemoteUser]) -> Vec<ReportRow> {
    users.iter().map(ReportRow::from).collect()
}

/// Distinct, non-empty company names in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanySet(BTreeSet<String>);

impl CompanySet {
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        Self(
            rows.iter()
                .filter_map(|r| r.company.as_deref())
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Renders as `['Acme', 'Globex']`, always on a single line.
impl fmt::Display for CompanySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, name) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_quoted(f, name)?;
        }
        f.write_str("]")
    }
}

/// Quote a name as a string literal: single quotes unless the name holds a
/// `'` and no `"`, with control characters and line separators escaped.
fn write_quoted(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let quote = if name.contains('\'') && !name.contains('"') {
        '"'
    } else {
        '\''
    };

    write!(f, "{quote}")?;
    for ch in name.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{c}")?,
            c if c.is_control() => write!(f, "\\x{:02x}", c as u32)?,
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04x}", ch as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}

/// Totals printed once the report has been written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub companies: CompanySet,
}

impl Summary {
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        Self {
            total: rows.len(),
            companies: CompanySet::from_rows(rows),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total users: {} | Companies: {}", self.total, self.companies)
    }
}
