//! Operator board rendering
//!
//! The board is redrawn in full after every action: the active call, the
//! staging window front to back, the skipped list with recall positions and
//! the completed list.

use anyhow::{Context, Result};
use serde::Serialize;

use super::{format_compact_table, BoardFormat, BoardRole, ColourManager, CompactFormat};
use crate::queue::QueueSnapshot;

#[derive(Serialize)]
struct BoardJson<'a> {
    session_id: &'a str,
    #[serde(flatten)]
    state: &'a QueueSnapshot,
}

/// Render a snapshot in the requested format, newline-terminated
pub fn render_board(
    snapshot: &QueueSnapshot,
    session_id: &str,
    colours: &ColourManager,
    format: BoardFormat,
) -> Result<String> {
    match format {
        BoardFormat::Text => Ok(render_text(snapshot, colours)),
        BoardFormat::Compact => Ok(format!("{}\n", snapshot.to_compact_format())),
        BoardFormat::Json => {
            let json = serde_json::to_string(&BoardJson { session_id, state: snapshot })
                .context("Failed to serialize board snapshot")?;
            Ok(format!("{}\n", json))
        }
    }
}

fn render_text(snapshot: &QueueSnapshot, colours: &ColourManager) -> String {
    let mut out = String::new();
    let heading = |title: String| format!("{}\n", colours.paint(BoardRole::Heading, &title));
    let placeholder = || format!("  {}\n", colours.paint(BoardRole::Muted, "-"));

    out.push_str(&heading(format!("Now calling ({} of {} loaded)", snapshot.cursor, snapshot.total)));
    match &snapshot.active {
        Some(active) => out.push_str(&format!("  >>> {} <<<\n", colours.paint(BoardRole::Active, active))),
        None if snapshot.staging.is_empty() => {
            out.push_str(&format!("  {}\n", colours.paint(BoardRole::Warning, "Nothing left to call")))
        }
        None => out.push_str(&format!(
            "  {}\n",
            colours.paint(BoardRole::Notice, "No active call - enter 'next' to call")
        )),
    }
    out.push('\n');

    out.push_str(&heading(format!("Staging ({})", snapshot.staging.len())));
    if snapshot.staging.is_empty() {
        out.push_str(&placeholder());
    }
    for id in &snapshot.staging {
        out.push_str(&format!("  {}\n", colours.paint(BoardRole::Staged, id)));
    }
    if snapshot.remaining > 0 {
        let pending = format!("(+{} not yet staged)", snapshot.remaining);
        out.push_str(&format!("  {}\n", colours.paint(BoardRole::Muted, &pending)));
    }
    out.push('\n');

    out.push_str(&heading(format!("Skipped ({})", snapshot.skipped.len())));
    if snapshot.skipped.is_empty() {
        out.push_str(&placeholder());
    } else {
        // painted after layout so escape codes do not skew the column widths
        let rows: Vec<Vec<String>> = snapshot
            .skipped
            .iter()
            .enumerate()
            .map(|(i, id)| vec![(i + 1).to_string(), id.clone()])
            .collect();
        for line in format_compact_table(&["Recall #", "Identifier"], &rows).lines() {
            out.push_str(&format!("{}\n", colours.paint(BoardRole::Skipped, line)));
        }
    }
    out.push('\n');

    out.push_str(&heading(format!("Completed ({})", snapshot.completed.len())));
    if snapshot.completed.is_empty() {
        out.push_str(&placeholder());
    } else {
        out.push_str(&format!("  {}\n", colours.paint(BoardRole::Completed, &snapshot.completed.join(", "))));
    }

    out
}
