use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::Error;
use crate::fonts::{BaseFonts, register_base_fonts, to_winansi_bytes};
use crate::format::TextRun;
use crate::sink::RenderSink;

/// Content stream of the page currently being drawn.
pub struct PdfPage {
    content: Content,
}

/// [`RenderSink`] writing a PDF with one compressed content stream per page.
pub struct PdfSink {
    pdf: Pdf,
    next_id: i32,
    catalog_id: Ref,
    pages_id: Ref,
    page_ids: Vec<Ref>,
    fonts: BaseFonts,
    page_width: f32,
    page_height: f32,
}

impl PdfSink {
    pub fn new(title: &str, page_width: f32, page_height: f32) -> Self {
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let info_id = alloc();
        let fonts = register_base_fonts(&mut pdf, &mut alloc);

        pdf.document_info(info_id)
            .title(TextStr(title))
            .producer(TextStr(concat!("progress-note-pdf ", env!("CARGO_PKG_VERSION"))));

        PdfSink {
            pdf,
            next_id,
            catalog_id,
            pages_id,
            page_ids: Vec::new(),
            fonts,
            page_width,
            page_height,
        }
    }

    fn alloc(&mut self) -> Ref {
        let r = Ref::new(self.next_id);
        self.next_id += 1;
        r
    }
}

impl RenderSink for PdfSink {
    type Page = PdfPage;

    fn begin_page(&mut self) -> Result<PdfPage, Error> {
        Ok(PdfPage { content: Content::new() })
    }

    fn draw_text(
        &mut self,
        page: &mut PdfPage,
        x: i32,
        y: i32,
        font_size: f32,
        runs: &[TextRun],
    ) -> Result<(), Error> {
        let content = &mut page.content;
        content.begin_text();
        content.next_line(x as f32, y as f32);
        // Runs share one text object so each continues where the previous ended
        for run in runs {
            let font = self.fonts.for_emphasis(run.emphasis);
            content.set_font(Name(font.pdf_name), font_size);
            content.show(Str(&to_winansi_bytes(&run.text)));
        }
        content.end_text();
        Ok(())
    }

    fn end_page(&mut self, page: PdfPage) -> Result<(), Error> {
        let page_id = self.alloc();
        let content_id = self.alloc();

        let raw = page.content.finish();
        let compressed = compress_to_vec_zlib(raw.as_slice(), 6);
        self.pdf
            .stream(content_id, &compressed)
            .filter(Filter::FlateDecode);

        {
            let mut pdf_page = self.pdf.page(page_id);
            pdf_page
                .media_box(Rect::new(0.0, 0.0, self.page_width, self.page_height))
                .parent(self.pages_id)
                .contents(content_id);
            let mut resources = pdf_page.resources();
            let mut fonts = resources.fonts();
            for entry in self.fonts.entries() {
                fonts.pair(Name(entry.pdf_name), entry.font_ref);
            }
        }

        log::debug!(
            "wrote page {} ({} bytes compressed)",
            self.page_ids.len(),
            compressed.len()
        );
        self.page_ids.push(page_id);
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<u8>, Error> {
        if self.page_ids.is_empty() {
            return Err(Error::Pdf("document has no pages".into()));
        }
        let count = i32::try_from(self.page_ids.len())
            .map_err(|_| Error::Pdf("too many pages".into()))?;

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .kids(self.page_ids.iter().copied())
            .count(count);

        let bytes = self.pdf.finish();
        log::info!("PDF finished: {} page(s), {} bytes", count, bytes.len());
        Ok(bytes)
    }
}
