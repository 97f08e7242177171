//! Plain text rendering of the sequencer state

use std::fmt::Write;

use gridseq_core::{NOTE_OCTAVE_OFFSET, PageColor, ResolutionColor, StepColor, StepSequencer, note_name};

/// Loop range and play position supplied by the transport
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportView {
    pub play_step: Option<u64>,
    pub loop_start_page: u64,
    pub loop_end_page: Option<u64>,
}

fn cell_char(color: StepColor) -> char {
    match color {
        StepColor::HiliteContent => '@',
        StepColor::HiliteNoContent => '|',
        StepColor::Content => 'X',
        StepColor::ContentCont => '=',
        StepColor::NoContent => '.',
    }
}

fn page_char(color: PageColor) -> char {
    match color {
        PageColor::Active => '>',
        PageColor::Selected => '*',
        PageColor::OutsideLoop => '-',
        PageColor::Page => 'o',
    }
}

pub fn render(seq: &StepSequencer, transport: &TransportView) -> String {
    let mut out = String::new();
    let nav = seq.navigator();
    let grid = seq.grid();

    let _ = writeln!(
        out,
        "page {}/{}  resolution {}  page length {} beats",
        nav.edit_page() + 1,
        nav.total_pages(),
        seq.resolution().name,
        seq.length_of_one_page(nav.page_size()),
    );

    for row in (0..grid.num_rows()).rev() {
        let label = seq
            .row_note(row)
            .map(|n| note_name(n, NOTE_OCTAVE_OFFSET))
            .unwrap_or_default();
        let cells: String = seq
            .row_colors(row, transport.play_step)
            .into_iter()
            .map(cell_char)
            .collect();
        let _ = writeln!(out, "{:>4} {}", label, cells);
    }

    let loop_end = transport.loop_end_page.unwrap_or(nav.total_pages());
    let pages: String = (0..nav.total_pages())
        .map(|p| page_char(seq.page_color(transport.loop_start_page, loop_end, transport.play_step, p)))
        .collect();
    let _ = writeln!(out, "pages {}", pages);

    let resolutions: Vec<String> = seq
        .resolutions()
        .iter()
        .zip(seq.resolution_colors())
        .map(|(entry, color)| match color {
            ResolutionColor::Selected => format!("[{}]", entry.name),
            ResolutionColor::Resolution => entry.name.clone(),
            ResolutionColor::Off => "-".to_string(),
        })
        .collect();
    let _ = writeln!(out, "res   {}", resolutions.join(" "));

    let editor = seq.editor();
    let note = seq.row_note(editor.row()).unwrap_or(seq.config().root_note);
    let (step_line, note_line) = editor.header(note);
    let _ = writeln!(out, "{}  {}", step_line, note_line);
    for cell in editor.cells(grid) {
        let control = cell.control.map(|c| c.to_string()).unwrap_or_default();
        let _ = writeln!(out, "  {:<10} {:>10} {:>4}", cell.label, cell.text, control);
    }
    out
}
