use crate::error::Error;
use crate::format::TextRun;
use crate::layout::Layout;

/// Backend that turns positioned lines into an output artifact.
///
/// Pages are scoped: every `begin_page` is matched by exactly one `end_page`,
/// and `draw_text` only ever receives the page currently open.
pub trait RenderSink {
    type Page;

    fn begin_page(&mut self) -> Result<Self::Page, Error>;

    fn draw_text(
        &mut self,
        page: &mut Self::Page,
        x: i32,
        y: i32,
        font_size: f32,
        runs: &[TextRun],
    ) -> Result<(), Error>;

    fn end_page(&mut self, page: Self::Page) -> Result<(), Error>;

    fn finalize(self) -> Result<Vec<u8>, Error>;
}

/// Replay a finished layout into `sink` and return the finished document.
pub fn emit<S: RenderSink>(layout: &Layout, mut sink: S) -> Result<Vec<u8>, Error> {
    let mut open: Option<(usize, S::Page)> = None;

    for instr in &layout.instructions {
        let same_page = matches!(&open, Some((index, _)) if *index == instr.page_index);
        if !same_page {
            if let Some((index, page)) = open.take() {
                log::debug!("closing page {index}");
                sink.end_page(page)?;
            }
            open = Some((instr.page_index, sink.begin_page()?));
        }
        if let Some((_, page)) = open.as_mut() {
            sink.draw_text(page, instr.x, instr.y, instr.font_size, &instr.runs)?;
        }
    }

    // The last page is committed once here, even when nothing flowed onto it
    let (index, page) = match open.take() {
        Some(open) => open,
        None => (0, sink.begin_page()?),
    };
    log::debug!("closing page {index}");
    sink.end_page(page)?;

    sink.finalize()
}
