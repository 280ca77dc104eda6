//! Page cursor and auto-layout table drawing shared by the vector
//! renderer's sections.
//!
//! Every drawing step advances the cursor by exactly the height it
//! consumed; tables paginate themselves by re-drawing their header row
//! on the continuation page when a row would cross the bottom limit.

use printpdf::{
    IndirectFontRef, Line, Mm, PdfDocumentReference, PdfLayerReference, Point,
};

pub(crate) const PAGE_WIDTH: f32 = 210.0;
pub(crate) const PAGE_HEIGHT: f32 = 297.0;
pub(crate) const MARGIN: f32 = 12.0;
pub(crate) const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// Consumed-height limit after which nothing more fits on the page.
pub(crate) const BOTTOM_LIMIT: f32 = PAGE_HEIGHT - MARGIN;

pub(crate) const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph advance, as a fraction of the font size.
const AVG_CHAR_EM: f32 = 0.5;
const CELL_PAD: f32 = 1.4;

pub(crate) struct Fonts {
    pub regular: IndirectFontRef,
    pub bold: IndirectFontRef,
    pub italic: IndirectFontRef,
}

/// Tracks vertical consumption from the top of the current page.
/// PDF coordinates grow upward; `y()` converts as needed.
pub(crate) struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    pub layer: PdfLayerReference,
    from_top: f32,
    pages: usize,
}

impl<'a> PageCursor<'a> {
    pub fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self { doc, layer, from_top: MARGIN, pages: 1 }
    }

    /// Millimetres consumed from the top of the current page,
    /// including the top margin.
    pub fn from_top(&self) -> f32 {
        self.from_top
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Current baseline position in page coordinates.
    pub fn y(&self) -> f32 {
        PAGE_HEIGHT - self.from_top
    }

    pub fn advance(&mut self, height: f32) {
        self.from_top += height;
    }

    pub fn break_page(&mut self) {
        self.pages += 1;
        let (page, layer) =
            self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Page {}", self.pages));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.from_top = MARGIN;
    }

    /// Starts a new page if `needed` millimetres no longer fit.
    pub fn ensure_room(&mut self, needed: f32) {
        if self.from_top + needed > BOTTOM_LIMIT {
            self.break_page();
        }
    }

    pub fn text(&self, text: &str, size: f32, x: f32, font: &IndirectFontRef) {
        self.layer.use_text(text, size, Mm(x), Mm(self.y()), font);
    }

    pub fn text_centered(&self, text: &str, size: f32, font: &IndirectFontRef) {
        let x = (PAGE_WIDTH - text_width_mm(text, size)) / 2.0;
        self.text(text, size, x, font);
    }

    /// Right-aligned against the given right edge.
    pub fn text_right(&self, text: &str, size: f32, right: f32, font: &IndirectFontRef) {
        let x = right - text_width_mm(text, size);
        self.text(text, size, x, font);
    }

    /// Full-width horizontal rule at the current position.
    pub fn rule(&mut self) {
        let y = self.y();
        self.line(MARGIN, PAGE_WIDTH - MARGIN, y, y);
        self.advance(2.0);
    }

    pub fn line(&self, x1: f32, x2: f32, y1: f32, y2: f32) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(y1)), false),
                (Point::new(Mm(x2), Mm(y2)), false),
            ],
            is_closed: false,
        });
    }
}

/// Estimated width of a Helvetica string, in millimetres.
pub(crate) fn text_width_mm(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * PT_TO_MM * AVG_CHAR_EM
}

fn max_chars(width: f32, size: f32) -> usize {
    let usable = (width - 2.0 * CELL_PAD).max(1.0);
    ((usable / (size * PT_TO_MM * AVG_CHAR_EM)) as usize).max(1)
}

/// Greedy word wrap against a character budget; words longer than the
/// budget are hard-split.
pub(crate) fn wrap_text(text: &str, budget: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > budget {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split: String = word.chars().take(budget).collect();
            let rest_start = split.len();
            lines.push(split);
            word = &word[rest_start..];
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > budget && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[derive(Clone, Copy)]
pub(crate) struct Column {
    pub header: &'static str,
    pub width: f32,
}

/// Draws a bordered table at the cursor, columns laid out left to
/// right from the page margin. Continuation pages repeat the header.
pub(crate) fn draw_table(
    cursor: &mut PageCursor<'_>,
    fonts: &Fonts,
    columns: &[Column],
    rows: &[Vec<String>],
    font_size: f32,
) {
    let header: Vec<String> = columns.iter().map(|column| column.header.to_string()).collect();

    cursor.ensure_room(row_height(columns, &header, font_size) * 2.0);
    draw_row(cursor, columns, &header, font_size, &fonts.bold, true);

    for row in rows {
        let height = row_height(columns, row, font_size);
        if cursor.from_top() + height > BOTTOM_LIMIT {
            cursor.break_page();
            draw_row(cursor, columns, &header, font_size, &fonts.bold, true);
        }
        draw_row(cursor, columns, row, font_size, &fonts.regular, false);
    }
}

fn row_height(columns: &[Column], cells: &[String], font_size: f32) -> f32 {
    let line_height = font_size * PT_TO_MM + 1.6;
    let lines = columns
        .iter()
        .zip(cells.iter())
        .map(|(column, cell)| wrap_text(cell, max_chars(column.width, font_size)).len())
        .max()
        .unwrap_or(1);
    lines as f32 * line_height + CELL_PAD
}

fn draw_row(
    cursor: &mut PageCursor<'_>,
    columns: &[Column],
    cells: &[String],
    font_size: f32,
    font: &IndirectFontRef,
    with_top_border: bool,
) {
    let line_height = font_size * PT_TO_MM + 1.6;
    let height = row_height(columns, cells, font_size);
    let top = cursor.y();
    let bottom = top - height;
    let table_width: f32 = columns.iter().map(|column| column.width).sum();

    if with_top_border {
        cursor.line(MARGIN, MARGIN + table_width, top, top);
    }

    let mut x = MARGIN;
    for (column, cell) in columns.iter().zip(cells.iter()) {
        let budget = max_chars(column.width, font_size);
        for (index, line) in wrap_text(cell, budget).iter().enumerate() {
            let y = top - CELL_PAD - (index as f32 + 1.0) * line_height + 1.0;
            cursor.layer.use_text(line, font_size, Mm(x + CELL_PAD), Mm(y), font);
        }
        cursor.line(x, x, top, bottom);
        x += column.width;
    }
    cursor.line(x, x, top, bottom);
    cursor.line(MARGIN, MARGIN + table_width, bottom, bottom);

    cursor.advance(height);
}

#[cfg(test)]
mod tests {
    use super::{max_chars, text_width_mm, wrap_text};

    #[test]
    fn wrap_respects_the_budget() {
        let lines = wrap_text("DO charges payable at destination by consignee", 16);
        assert!(lines.iter().all(|line| line.chars().count() <= 16));
        assert_eq!(lines.concat().replace(' ', ""), "DOchargespayableatdestinationbyconsignee");
    }

    #[test]
    fn overlong_words_are_hard_split() {
        let lines = wrap_text("ABCDEFGHIJKLMNOP", 4);
        assert_eq!(lines, ["ABCD", "EFGH", "IJKL", "MNOP"]);
    }

    #[test]
    fn empty_text_still_occupies_one_line() {
        assert_eq!(wrap_text("   ", 10), vec![String::new()]);
    }

    #[test]
    fn width_estimate_scales_with_font_size() {
        assert!(text_width_mm("QUOTATION", 16.0) > text_width_mm("QUOTATION", 8.0));
        assert!(max_chars(30.0, 8.0) > max_chars(30.0, 12.0));
    }
}
