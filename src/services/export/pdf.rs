//! Paginated PDF export
//!
//! Layout happens in two steps. [`layout_pdf`] is pure: it sanitizes each
//! line to Basic Latin, wraps it to the printable width, and assigns page and
//! position. [`render_pdf`] then draws that layout with printpdf's built-in
//! Courier font, so every glyph has the same advance and wrapping is exact.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use super::{split_lines, ExportError};

/// A4 width
pub const PAGE_WIDTH_MM: f32 = 210.0;
/// A4 height
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Left, right and top margin
pub const MARGIN_MM: f32 = 10.0;
/// Space kept free at the bottom before breaking to a new page
pub const BOTTOM_MARGIN_MM: f32 = 15.0;
/// Height of one text line
pub const LINE_HEIGHT_MM: f32 = 10.0;
pub const FONT_SIZE_PT: f32 = 12.0;
/// Inner padding of a cell on each side
const CELL_PADDING_MM: f32 = 1.0;
/// Courier advance width as a fraction of the font size
const COURIER_ADVANCE_EM: f32 = 0.6;
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Character substituted for anything the PDF font cannot show
pub const REPLACEMENT_CHAR: char = '?';

/// One wrapped row of text at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    /// Index of the input line this row came from
    pub source_line: usize,
    pub x_mm: f32,
    /// Distance from the top edge of the page to the baseline
    pub baseline_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPage {
    pub lines: Vec<PlacedLine>,
}

/// Positioned text for every page of the document
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub pages: Vec<LayoutPage>,
}

impl PageLayout {
    /// Number of input lines laid out, each as its own paragraph cell
    pub fn paragraph_count(&self) -> usize {
        let mut count = 0;
        let mut last = None;
        for line in self.pages.iter().flat_map(|page| &page.lines) {
            if last != Some(line.source_line) {
                count += 1;
                last = Some(line.source_line);
            }
        }
        count
    }

    /// All rows in document order
    pub fn rows(&self) -> impl Iterator<Item = &PlacedLine> {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }
}

/// Characters that fit on one row of the printable area
pub fn chars_per_line() -> usize {
    let char_width = FONT_SIZE_PT * COURIER_ADVANCE_EM * MM_PER_PT;
    let usable = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - 2.0 * CELL_PADDING_MM;
    ((usable / char_width).floor() as usize).max(1)
}

/// Replace everything outside Basic Latin with [`REPLACEMENT_CHAR`].
///
/// Tabs become a space; other control characters are replaced as well.
pub fn to_basic_latin(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            '\t' => ' ',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => REPLACEMENT_CHAR,
        })
        .collect()
}

/// Wrap one ASCII line to `width` characters, breaking at the last space
/// that fits and hard-breaking words longer than a row.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut rest = line;

    while rest.len() > width {
        let window = &rest[..=width];
        match window.rfind(' ') {
            Some(split) if split > 0 => {
                rows.push(rest[..split].to_string());
                rest = &rest[split + 1..];
            }
            _ => {
                rows.push(rest[..width].to_string());
                rest = &rest[width..];
            }
        }
    }

    rows.push(rest.to_string());
    rows
}

/// Compute the paginated layout for a text
pub fn layout_pdf(text: &str) -> PageLayout {
    let width = chars_per_line();
    let page_break_at = PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM;
    let font_size_mm = FONT_SIZE_PT * MM_PER_PT;
    // Text sits vertically centred in its cell
    let baseline_offset = LINE_HEIGHT_MM / 2.0 + 0.3 * font_size_mm;

    let mut pages = vec![LayoutPage::default()];
    let mut y = MARGIN_MM;

    for (source_line, line) in split_lines(text).into_iter().enumerate() {
        for row in wrap_line(&to_basic_latin(line), width) {
            if y + LINE_HEIGHT_MM > page_break_at {
                pages.push(LayoutPage::default());
                y = MARGIN_MM;
            }
            if let Some(page) = pages.last_mut() {
                page.lines.push(PlacedLine {
                    text: row,
                    source_line,
                    x_mm: MARGIN_MM + CELL_PADDING_MM,
                    baseline_mm: y + baseline_offset,
                });
            }
            y += LINE_HEIGHT_MM;
        }
    }

    PageLayout { pages }
}

/// Render text to PDF bytes. `title` becomes the document title.
pub fn render_pdf(text: &str, title: &str) -> Result<Vec<u8>, ExportError> {
    let layout = layout_pdf(text);

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let mut targets = vec![(first_page, first_layer)];
    for _ in 1..layout.pages.len() {
        targets.push(doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1"));
    }

    for (page, (page_index, layer_index)) in layout.pages.iter().zip(targets) {
        let layer = doc.get_page(page_index).get_layer(layer_index);
        for line in page.lines.iter().filter(|line| !line.text.is_empty()) {
            layer.use_text(
                line.text.clone(),
                FONT_SIZE_PT,
                Mm(line.x_mm),
                Mm(PAGE_HEIGHT_MM - line.baseline_mm),
                &font,
            );
        }
    }

    doc.save_to_bytes().map_err(|e| ExportError::Pdf(e.to_string()))
}
