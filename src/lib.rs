mod cursor;
mod error;
mod fonts;
mod format;
mod layout;
mod model;
mod note;
mod pdf;
mod sink;
mod wrap;

pub use cursor::{Advance, LinePosition, PageCursor};
pub use error::Error;
pub use format::{Emphasis, FieldFormatter, RenderedLine, TextRun, format_decimal, format_value};
pub use layout::{ATTRIBUTION_LABEL, DrawInstruction, Layout, LayoutConfig, LayoutEngine, attribution_row};
pub use model::{
    Attribution, Block, Field, FieldGroup, LabelPlacement, MAX_ROW_FIELDS, ReportModel,
    ReportModelBuilder, Value, Width,
};
pub use note::{NoteAuthor, Patient, ProgressNote};
pub use pdf::{PdfPage, PdfSink};
pub use sink::{RenderSink, emit};
pub use wrap::wrap;

use std::path::Path;

/// Lay out `model` with `engine` and write it as PDF bytes.
pub fn render_pdf(engine: &LayoutEngine, model: &ReportModel) -> Result<Vec<u8>, Error> {
    let layout = engine.render(model);
    let cfg = engine.config();
    let sink = PdfSink::new(model.title(), cfg.page_width, cfg.page_height);
    emit(&layout, sink)
}

/// Read a progress note from JSON at `input` and write its report to `output`.
pub fn convert_note_to_pdf(
    engine: &LayoutEngine,
    input: &Path,
    output: &Path,
) -> Result<(), Error> {
    let json = std::fs::read_to_string(input)?;
    let report = ProgressNote::from_json(&json)?.to_report()?;
    let bytes = render_pdf(engine, &report)?;
    std::fs::write(output, bytes).map_err(Error::Io)
}
