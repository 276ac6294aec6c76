use crate::{foundation::core::Rect, layout::model::SlotCount};

// Margins and gutters as fractions of the strip box width, taken from the
// booth's strip markup. Percentage padding in the source layout is resolved
// against the box width, so all vertical spacing derives from width too.
const SINGLE_PAD: f64 = 0.10;
const SINGLE_GAP: f64 = 0.05;
const DOUBLE_PAD: f64 = 0.05;
const DOUBLE_GAP: f64 = 0.0375;

/// Cell aspect ratio (width over height); capture frames are 4:3.
pub const CELL_ASPECT: f64 = 4.0 / 3.0;

/// Slot cell rectangles for a strip box of the given pixel size.
///
/// Geometry is fixed per slot count: 4 slots form a single top-to-bottom
/// column; 8 slots form two columns of four filled column-major (slots 0–3
/// left, 4–7 right). The remaining space below the last row is the strip's
/// footer margin.
pub fn slot_rects(slot_count: SlotCount, width: f64, _height: f64) -> Vec<Rect> {
    match slot_count {
        SlotCount::Four => {
            let pad = SINGLE_PAD * width;
            let gap = SINGLE_GAP * width;
            let cell_w = width - 2.0 * pad;
            let cell_h = cell_w / CELL_ASPECT;
            (0..4)
                .map(|row| {
                    let y = pad + row as f64 * (cell_h + gap);
                    Rect::new(pad, y, pad + cell_w, y + cell_h)
                })
                .collect()
        }
        SlotCount::Eight => {
            let pad = DOUBLE_PAD * width;
            let gap = DOUBLE_GAP * width;
            let cell_w = (width - 2.0 * pad - gap) / 2.0;
            let cell_h = cell_w / CELL_ASPECT;
            (0..8)
                .map(|idx| {
                    let col = idx / 4; // column-major
                    let row = idx % 4;
                    let x = pad + col as f64 * (cell_w + gap);
                    let y = pad + row as f64 * (cell_h + gap);
                    Rect::new(x, y, x + cell_w, y + cell_h)
                })
                .collect()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
