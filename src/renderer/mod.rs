//! Renderer - headless card views and a terminal text renderer
//!
//! Two levels of output:
//!
//! - [`card_views`] exposes the visible slots as px geometry (card index,
//!   x relative to the viewport, width) for any host to draw.
//! - [`render_lines`] draws the track into text lines for a terminal
//!   host: one bordered box per visible card with the category/date line,
//!   title, summary and link, measured with unicode display widths so CJK
//!   content clips correctly. Partially visible cards clip at the
//!   viewport edges.
//!
//! An empty carousel renders the placeholder message instead of a track.

use unicode_width::UnicodeWidthChar;

use crate::carousel::Carousel;

/// Rendered rows per card box: borders, meta, title, two summary rows and
/// the link row.
pub const CARD_ROWS: usize = 7;

/// Message shown when there are no cards yet.
pub const PLACEHOLDER: &str = "Updates will appear here soon. Stay tuned!";

// =============================================================================
// Geometry views
// =============================================================================

/// One visible card slot in viewport-relative px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardView {
    pub index: usize,
    /// Left edge relative to the viewport; negative when partially
    /// scrolled out on the left.
    pub x: f32,
    pub width: f32,
}

/// The card slots currently intersecting the viewport, left to right.
///
/// Empty before the first layout pass and for an empty card list.
pub fn card_views(carousel: &Carousel) -> Vec<CardView> {
    let Some(layout) = carousel.layout() else {
        return Vec::new();
    };
    if carousel.is_empty() || layout.card_width <= 0.0 {
        return Vec::new();
    }

    let gap = carousel.options().gap;
    let stride = layout.card_width + gap;
    let offset = carousel.offset();

    let mut views = Vec::new();
    for index in 0..carousel.card_count() {
        let x = index as f32 * stride - offset;
        if x + layout.card_width <= 0.0 {
            continue;
        }
        if x >= layout.width {
            break;
        }
        views.push(CardView {
            index,
            x,
            width: layout.card_width,
        });
    }
    views
}

// =============================================================================
// Text rendering
// =============================================================================

/// Character canvas with display-width-aware placement.
///
/// Wide (2-cell) characters occupy their cell plus a continuation cell;
/// a wide character that would straddle the clip edge degrades to a space.
struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

/// Continuation marker for the second cell of a wide character.
const WIDE_CONT: char = '\0';

impl Canvas {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![' '; cols * rows],
        }
    }

    fn put(&mut self, col: isize, row: usize, ch: char) {
        if row >= self.rows || col < 0 {
            return;
        }
        let col = col as usize;
        if col >= self.cols {
            return;
        }
        let w = ch.width().unwrap_or(0);
        if w == 2 {
            if col + 1 >= self.cols {
                self.cells[row * self.cols + col] = ' ';
                return;
            }
            self.cells[row * self.cols + col] = ch;
            self.cells[row * self.cols + col + 1] = WIDE_CONT;
        } else {
            self.cells[row * self.cols + col] = ch;
        }
    }

    /// Write a string starting at `col`, clipping at the canvas edges.
    fn put_str(&mut self, col: isize, row: usize, s: &str) {
        let mut at = col;
        for ch in s.chars() {
            let w = ch.width().unwrap_or(0) as isize;
            if w == 0 {
                continue;
            }
            self.put(at, row, ch);
            at += w;
        }
    }

    fn into_lines(self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                self.cells[row * self.cols..(row + 1) * self.cols]
                    .iter()
                    .filter(|&&c| c != WIDE_CONT)
                    .collect()
            })
            .collect()
    }
}

/// Truncate to a display width, appending an ellipsis when cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let total: usize = text.chars().filter_map(|c| c.width()).sum();
    if total <= width {
        return text.to_string();
    }

    let target = width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > target {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Word-agnostic wrap to a display width, at most `max_lines` lines; the
/// last line truncates with an ellipsis if content remains.
fn wrap_to_width(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut used = 0usize;

    for (i, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if w == 0 {
            continue;
        }
        if used + w > width {
            lines.push(std::mem::take(&mut current));
            used = 0;
            if lines.len() == max_lines {
                let remainder: String = ch.to_string() + &text[i + ch.len_utf8()..];
                let last = lines.last_mut().unwrap();
                if !remainder.trim().is_empty() {
                    *last = truncate_to_width(&format!("{last}{remainder}"), width);
                }
                return lines;
            }
        }
        current.push(ch);
        used += w;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn draw_card(canvas: &mut Canvas, x: isize, width: usize, carousel: &Carousel, index: usize) {
    if width < 4 {
        return;
    }
    let card = &carousel.cards()[index];
    let inner = width - 4; // borders plus one cell padding each side

    // Borders.
    canvas.put(x, 0, '┌');
    canvas.put(x, CARD_ROWS - 1, '└');
    for c in 1..width as isize - 1 {
        canvas.put(x + c, 0, '─');
        canvas.put(x + c, CARD_ROWS - 1, '─');
    }
    canvas.put(x + width as isize - 1, 0, '┐');
    canvas.put(x + width as isize - 1, CARD_ROWS - 1, '┘');
    for row in 1..CARD_ROWS - 1 {
        canvas.put(x, row, '│');
        canvas.put(x + width as isize - 1, row, '│');
    }

    let meta = format!("{} · {}", card.category, card.date);
    canvas.put_str(x + 2, 1, &truncate_to_width(&meta, inner));
    canvas.put_str(x + 2, 2, &truncate_to_width(&card.title, inner));
    for (i, line) in wrap_to_width(&card.summary, inner, 2).iter().enumerate() {
        canvas.put_str(x + 2, 3 + i, line);
    }
    canvas.put_str(x + 2, 5, &truncate_to_width(&card.link, inner));
}

/// Render the carousel into `cols`-wide text lines.
///
/// `px_per_cell` maps the carousel's px geometry onto terminal cells; it
/// should match the [`crate::input::InputMap`] used for mouse routing.
pub fn render_lines(carousel: &Carousel, cols: u16, px_per_cell: f32) -> Vec<String> {
    let cols = cols as usize;
    if carousel.is_empty() {
        let line = truncate_to_width(PLACEHOLDER, cols);
        let pad = cols.saturating_sub(line.chars().filter_map(|c| c.width()).sum::<usize>()) / 2;
        return vec![format!("{}{}", " ".repeat(pad), line)];
    }

    let views = card_views(carousel);
    if views.is_empty() || px_per_cell <= 0.0 {
        return Vec::new();
    }

    let mut canvas = Canvas::new(cols, CARD_ROWS);
    for view in views {
        let x = (view.x / px_per_cell).round() as isize;
        let width = (view.width / px_per_cell).round().max(1.0) as usize;
        draw_card(&mut canvas, x, width, carousel, view.index);
    }
    canvas.into_lines()
}
