use crate::{error::PdfragError, map_err};
use pdfium_render::prelude::Pdfium;
use std::time::Instant;
use tracing::debug;

/// Parses PDFs with pdfium. The text of every page is extracted in page order
/// and the pages are joined with a newline.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfParser;

impl PdfParser {
    pub fn parse(&self, input: &[u8]) -> Result<String, PdfragError> {
        let start = Instant::now();

        let bindings = map_err!(Pdfium::bind_to_system_library());
        let pdfium = Pdfium::new(bindings);

        let document = map_err!(pdfium.load_pdf_from_byte_slice(input, None));

        let mut pages = vec![];
        for page in document.pages().iter() {
            let text = map_err!(page.text());
            pages.push(text.all());
        }

        debug!(
            "Finished processing PDF ({} pages), took {}ms",
            pages.len(),
            Instant::now().duration_since(start).as_millis()
        );

        Ok(pages.join("\n"))
    }
}
