use crate::dictionary::VariableDictionary;
use crate::render::canvas::Canvas;
use crate::render::color::Color;
use crate::render::primitives::*;

pub const FIGURE_WIDTH_IN: f64 = 10.0;
pub const FIGURE_HEIGHT_IN: f64 = 8.0;
/// Column widths as fractions of the figure width.
pub const COLUMN_WIDTHS: [f64; 2] = [0.2, 0.6];
/// Background cycle by row index; the header is row 0.
pub const ROW_COLORS: [&str; 2] = ["#F5F5F5", "#FFFFFF"];

const BASE_FONT_SIZE: f64 = 10.0;
const TABLE_SCALE: f64 = 1.2;
const MIN_FONT_SIZE: f64 = 5.0;
const CELL_PADDING: f64 = 4.0;

/// Largest font size (starting at the scaled base size) at which every cell fits its column
/// and every row fits the figure height.
pub fn fit_font_size(rows: &[[&str; 2]], column_widths: [f64; 2], max_height: f64) -> f64 {
    let mut size = BASE_FONT_SIZE * TABLE_SCALE;
    while size > MIN_FONT_SIZE {
        let fits_width = rows.iter().all(|row| {
            row.iter().zip(column_widths).all(|(cell, width)| {
                estimate_text_width(cell, size) + 2.0 * CELL_PADDING <= width
            })
        });
        let fits_height = row_height(size) * rows.len() as f64 <= max_height;
        if fits_width && fits_height {
            break;
        }
        size -= 0.5;
    }
    size.max(MIN_FONT_SIZE)
}

fn row_height(font_size: f64) -> f64 {
    font_size * 1.75
}

/// Render the dictionary as a two-column table image (SVG).
pub fn render(dictionary: &VariableDictionary) -> String {
    let mut canvas = Canvas::from_inches(FIGURE_WIDTH_IN, FIGURE_HEIGHT_IN);
    let rows = dictionary.table_rows();

    let column_widths = COLUMN_WIDTHS.map(|fraction| fraction * canvas.width);
    let table_width: f64 = column_widths.iter().sum();
    let font_size = fit_font_size(&rows, column_widths, canvas.height * 0.95);
    let row_h = row_height(font_size);

    let left = (canvas.width - table_width) / 2.0;
    let top = (canvas.height - row_h * rows.len() as f64) / 2.0;

    let text_style = TextStyle {
        size: font_size,
        baseline: TextBaseline::Central,
        ..Default::default()
    };

    for (row_idx, row) in rows.iter().enumerate() {
        let y = top + row_idx as f64 * row_h;
        let fill = Color::hex(ROW_COLORS[row_idx % ROW_COLORS.len()]);
        let mut x = left;
        for (cell, width) in row.iter().zip(column_widths) {
            canvas.rect(x, y, width, row_h, &Style::outlined(fill, Color::BLACK, 0.5));
            canvas.text(x + CELL_PADDING, y + row_h / 2.0, cell, &text_style);
            x += width;
        }
    }

    canvas.finish_svg()
}
