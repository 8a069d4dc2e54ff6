use std::io::{self, Write};

use serde::Serialize;
use tracker_core::{
    query, ExportReconciliation, QueryPage, RemoteReconciliation, Summary, TableQuery,
};

const ALL_FOLLOW_BACK: &str = "Everyone you follow follows you back!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonView<'a, T> {
    summary: Summary,
    page: usize,
    total_pages: usize,
    total_matches: usize,
    rows: Vec<&'a T>,
}

pub fn render_export(
    out: &mut dyn Write,
    result: &ExportReconciliation,
    request: &TableQuery,
    mode: OutputMode,
) -> io::Result<()> {
    let page = query(&result.unfollowers, request);
    match mode {
        OutputMode::Json => write_json(out, result.summary, page),
        OutputMode::Text => {
            write_summary(out, &result.summary)?;
            if result.unfollowers.is_empty() {
                return writeln!(out, "{ALL_FOLLOW_BACK}");
            }
            let rows = page
                .rows
                .iter()
                .map(|row| {
                    vec![
                        row.username.clone(),
                        row.you_followed.clone(),
                        row.they_followed.to_string(),
                    ]
                })
                .collect();
            write_table(
                out,
                &["Username", "You followed", "They followed"],
                rows,
                &page,
            )
        }
    }
}

pub fn render_remote(
    out: &mut dyn Write,
    result: &RemoteReconciliation,
    request: &TableQuery,
    mode: OutputMode,
) -> io::Result<()> {
    let page = query(&result.unfollowers, request);
    match mode {
        OutputMode::Json => write_json(out, result.summary, page),
        OutputMode::Text => {
            write_summary(out, &result.summary)?;
            if result.unfollowers.is_empty() {
                return writeln!(out, "{ALL_FOLLOW_BACK}");
            }
            let rows = page.rows.iter().map(|name| vec![name.to_string()]).collect();
            write_table(out, &["Username"], rows, &page)
        }
    }
}

fn write_summary(out: &mut dyn Write, summary: &Summary) -> io::Result<()> {
    writeln!(
        out,
        "Not following back: {}  Followers: {}  Following: {}",
        summary.unfollowers, summary.total_followers, summary.total_following
    )?;
    writeln!(out)
}

fn write_json<T: Serialize>(
    out: &mut dyn Write,
    summary: Summary,
    page: QueryPage<'_, T>,
) -> io::Result<()> {
    let view = JsonView {
        summary,
        page: page.page,
        total_pages: page.total_pages,
        total_matches: page.total_matches,
        rows: page.rows,
    };
    serde_json::to_writer_pretty(&mut *out, &view)?;
    writeln!(out)
}

fn write_table<T>(
    out: &mut dyn Write,
    headers: &[&str],
    rows: Vec<Vec<String>>,
    page: &QueryPage<'_, T>,
) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No users found matching your search.");
    }

    let index_width = (page.first_index + rows.len() - 1).to_string().len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write!(out, "{:>index_width$}", "#")?;
    for (header, &width) in headers.iter().zip(&widths) {
        write!(out, "  {header:<width$}")?;
    }
    writeln!(out)?;

    for (offset, row) in rows.iter().enumerate() {
        write!(out, "{:>index_width$}", page.first_index + offset)?;
        for (cell, &width) in row.iter().zip(&widths) {
            write!(out, "  {cell:<width$}")?;
        }
        writeln!(out)?;
    }

    if page.total_pages > 1 {
        writeln!(out)?;
        writeln!(out, "Page {} of {}", page.page, page.total_pages)?;
    }
    Ok(())
}
