use std::io::{self, Write};

use qa_core::{AnswerView, AppViewModel, ExportKind, ExportStatus, RequestStatus};

/// Writes view changes to a terminal. Only what changed since the last view
/// is printed: the request status block and the latest export outcome.
pub struct TerminalRenderer<W: Write> {
    out: W,
    shown_status: Option<RequestStatus>,
    shown_export: Option<ExportStatus>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown_status: None,
            shown_export: None,
        }
    }

    pub fn render(&mut self, view: &AppViewModel) -> io::Result<()> {
        if self.shown_status != Some(view.status) {
            self.shown_status = Some(view.status);
            self.render_status(view)?;
        }
        if view.last_export.is_some() && view.last_export != self.shown_export {
            self.shown_export = view.last_export.clone();
            if let Some(export) = &view.last_export {
                render_export(&mut self.out, export)?;
            }
        }
        self.out.flush()
    }

    fn render_status(&mut self, view: &AppViewModel) -> io::Result<()> {
        let file = view.file_name.as_deref().unwrap_or("no file selected");
        match view.status {
            RequestStatus::Idle => writeln!(self.out, "Selected: {file}"),
            RequestStatus::Submitting => writeln!(self.out, "Processing {file}..."),
            RequestStatus::Failed => writeln!(
                self.out,
                "Error: {}",
                view.error.as_deref().unwrap_or_default()
            ),
            RequestStatus::Succeeded => render_results(&mut self.out, view),
        }
    }
}

fn render_results(out: &mut impl Write, view: &AppViewModel) -> io::Result<()> {
    writeln!(out, "Generated {} Q&A pairs", view.result_count)?;
    for row in &view.results {
        writeln!(out)?;
        writeln!(out, "Q{}: {}", row.number, row.question)?;
        match &row.answer {
            AnswerView::FreeText(text) => {
                for line in text.lines() {
                    writeln!(out, "    {line}")?;
                }
            }
            AnswerView::MultipleChoice(options) => {
                for option in options {
                    let mark = if option.selected { '✓' } else { ' ' };
                    writeln!(out, "  {mark} {}. {}", option.key, option.text)?;
                }
            }
        }
    }
    Ok(())
}

fn render_export(out: &mut impl Write, export: &ExportStatus) -> io::Result<()> {
    let label = match export.kind {
        ExportKind::Document => "PDF",
        ExportKind::Snapshot => "JSON",
    };
    match &export.result {
        Ok(path) => writeln!(out, "{label} export saved to {path}"),
        Err(message) => writeln!(out, "{label} export failed: {message}"),
    }
}
