//! Derived presentations of a `StatusModel`.
//!
//! Two widgets exist: the "updated at" line and the database listing. Both
//! are pure functions of the model and the display options, so any number of
//! consumers can render the same model without coordination.

use std::fmt::Write;

use serde::Serialize;

use crate::display::{DisplayOptions, ErrorVisibility};
use crate::model::StatusModel;

/// "Updated at" line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatedAtView {
    pub label: String,
    pub text: String,
    /// Present only under `ErrorVisibility::Indicator` after a failed poll.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseRow {
    pub label: &'static str,
    pub value: String,
}

/// Database listing (version, max connections, opened connections).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseView {
    pub rows: Vec<DatabaseRow>,
}

/// Whole status page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub lang: &'static str,
    pub title: &'static str,
    pub updated_at: UpdatedAtView,
    pub database_heading: &'static str,
    pub database: DatabaseView,
}

pub const PAGE_TITLE: &str = "Status";
pub const DATABASE_HEADING: &str = "Database";
pub const ROW_VERSION: &str = "Database Version";
pub const ROW_MAX_CONNECTIONS: &str = "Max Connections";
pub const ROW_OPENED_CONNECTIONS: &str = "Opened Connections";

pub fn render_updated_at(model: &StatusModel, opts: &DisplayOptions) -> UpdatedAtView {
    let locale = opts.locale;
    let text = match model.snapshot() {
        Some(s) => opts.format_updated_at(s),
        None => locale.loading().to_string(),
    };

    let notice = match (opts.error_visibility, model.last_error()) {
        (ErrorVisibility::Indicator, Some(failure)) => {
            let prefix = if model.is_loading() {
                locale.failed_notice()
            } else {
                locale.stale_notice()
            };
            Some(format!("{prefix} ({})", failure.kind.label()))
        }
        _ => None,
    };

    UpdatedAtView {
        label: locale.updated_at_label().to_string(),
        text,
        notice,
    }
}

pub fn render_database(model: &StatusModel, opts: &DisplayOptions) -> DatabaseView {
    let values = match model.snapshot() {
        Some(s) => [
            s.db_version.clone(),
            s.max_connections.to_string(),
            s.active_connections.to_string(),
        ],
        None => {
            let loading = opts.locale.loading();
            [loading.to_string(), loading.to_string(), loading.to_string()]
        }
    };

    let labels = [ROW_VERSION, ROW_MAX_CONNECTIONS, ROW_OPENED_CONNECTIONS];
    DatabaseView {
        rows: labels
            .into_iter()
            .zip(values)
            .map(|(label, value)| DatabaseRow { label, value })
            .collect(),
    }
}

impl PageView {
    pub fn new(opts: &DisplayOptions, updated_at: UpdatedAtView, database: DatabaseView) -> Self {
        Self {
            lang: opts.locale.tag(),
            title: PAGE_TITLE,
            updated_at,
            database_heading: DATABASE_HEADING,
            database,
        }
    }

    /// Standalone HTML document that reloads itself every `refresh_secs`.
    pub fn to_html(&self, refresh_secs: u64) -> String {
        let mut out = String::with_capacity(512);
        let _ = write!(
            out,
            "<!doctype html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta http-equiv=\"refresh\" content=\"{}\">\n<title>{}</title>\n</head>\n<body>\n",
            self.lang,
            refresh_secs.max(1),
            escape_html(self.title),
        );
        let _ = writeln!(out, "<h1>{}</h1>", escape_html(self.title));
        let _ = writeln!(
            out,
            "<div>{}: {}</div>",
            escape_html(&self.updated_at.label),
            escape_html(&self.updated_at.text),
        );
        if let Some(notice) = &self.updated_at.notice {
            let _ = writeln!(out, "<div class=\"notice\">{}</div>", escape_html(notice));
        }
        let _ = writeln!(out, "<h2>{}</h2>\n<ul>", escape_html(self.database_heading));
        for row in &self.database.rows {
            let _ = writeln!(out, "<li>{}: {}</li>", escape_html(row.label), escape_html(&row.value));
        }
        out.push_str("</ul>\n</body>\n</html>\n");
        out
    }

    /// Plain text, one line per item.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = write!(out, "{}: {}", self.updated_at.label, self.updated_at.text);
        if let Some(notice) = &self.updated_at.notice {
            let _ = write!(out, " [{notice}]");
        }
        let _ = writeln!(out, "\n{}", self.database_heading);
        for row in &self.database.rows {
            let _ = writeln!(out, "- {}: {}", row.label, row.value);
        }
        out
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
