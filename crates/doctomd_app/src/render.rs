use std::fmt::Write;

use doctomd_core::{AppViewModel, ResultRowView, ViewPhase};

const PROGRESS_BAR_CELLS: usize = 20;

/// Renders the currently visible panel as terminal text. Exactly one panel
/// is shown per view phase.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    if let Some(warning) = &view.capability_warning {
        let _ = writeln!(out, "⚠️  {warning}");
    }

    match view.phase {
        ViewPhase::Selecting => render_selection(view, &mut out),
        ViewPhase::Uploading => render_progress(view, &mut out),
        ViewPhase::Results => render_results(view, &mut out),
        ViewPhase::Error => render_error(view, &mut out),
    }

    out
}

/// A transient warning line, shown once and not repeated on re-render.
pub fn notice(message: &str) -> String {
    format!("⚠️  {message}")
}

fn render_selection(view: &AppViewModel, out: &mut String) {
    if !view.file_list_visible {
        let _ = writeln!(out, "No files selected. Add .doc or .docx files with: add <path>...");
    } else {
        let _ = writeln!(out, "Selected files ({}):", view.file_count);
        for (position, row) in view.files.iter().enumerate() {
            let _ = writeln!(
                out,
                "  [{}] {} {} ({})",
                position + 1,
                row.icon,
                row.name,
                row.size_label
            );
        }
    }
    if view.convert_enabled {
        let _ = writeln!(out, "Commands: add <path>..., rm <n>, clear, convert, quit");
    } else {
        let _ = writeln!(out, "Commands: add <path>..., rm <n>, clear, quit");
    }
}

fn render_progress(view: &AppViewModel, out: &mut String) {
    let percent = view.progress_percent as usize;
    let filled = (percent * PROGRESS_BAR_CELLS) / 100;
    let _ = writeln!(
        out,
        "Converting... [{}{}] {percent}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_CELLS - filled)
    );
}

fn render_results(view: &AppViewModel, out: &mut String) {
    let _ = writeln!(out, "Conversion complete:");
    for (position, row) in view.results.iter().enumerate() {
        match row {
            ResultRowView::Converted {
                original, markdown, ..
            } => {
                let _ = writeln!(
                    out,
                    "  ✅ {original} → {markdown} (save with: download {})",
                    position + 1
                );
            }
            ResultRowView::Failed { original, message } => {
                let _ = writeln!(out, "  ❌ {original}: {message}");
            }
        }
    }
    if view.download_all_enabled {
        let _ = writeln!(out, "Commands: download all, download <n>, new, quit");
    } else {
        let _ = writeln!(out, "Commands: new, quit");
    }
}

fn render_error(view: &AppViewModel, out: &mut String) {
    let message = view.error_message.as_deref().unwrap_or("Upload failed");
    let _ = writeln!(out, "❌ Conversion failed: {message}");
    let _ = writeln!(out, "Commands: retry, quit");
}
