// this_file: crates/pixfont-bitmap/src/lib.rs

//! Pixfont Bitmap: one bit per pixel, nothing more
//!
//! Pixel fonts are drawn cell by cell. Every glyph in a pixfont tree is a
//! [`MonoBitmap`]: a rectangle of cells that are either ink (`1`) or
//! background (`0`). This crate holds every operation the toolkit performs on
//! those rectangles.
//!
//! ## What You Can Do
//!
//! - **Measure**: empty margins on each edge ([`MonoBitmap::left_padding`] and friends)
//! - **Reshape**: pad or crop per side ([`MonoBitmap::resize`]), resample
//!   ([`MonoBitmap::scale`]), cut out a region ([`MonoBitmap::crop`])
//! - **Composite**: stamp ink on ([`MonoBitmap::plus`]) or off ([`MonoBitmap::minus`])
//! - **Grow**: spread ink into its neighborhood ([`MonoBitmap::dilate`])
//! - **Collide**: ask whether two placed bitmaps touch ([`MonoBitmap::is_overlapped`])
//! - **Store**: move through PNG files with the [`codec`] module
//!
//! Every operation returns a fresh bitmap; the receiver is never touched.
//!
//! ```
//! use pixfont_bitmap::MonoBitmap;
//!
//! let dot = MonoBitmap::from_rows(&[[0u8, 0, 0], [0, 1, 0], [0, 0, 0]])?;
//! let blob = dot.dilate(1)?;
//! assert_eq!(blob, MonoBitmap::create(3, 3, true));
//! # Ok::<(), pixfont_bitmap::BitmapError>(())
//! ```

use std::fmt;

pub mod bold;
pub mod codec;
pub mod error;

pub use bold::BoldMethod;
pub use error::{BitmapError, Result};
pub use codec::{GlyphRaster, Rgb, MASK_COLOR};

/// Products closer than this to an integer count as that integer when flooring
const FLOOR_TOLERANCE: f64 = 1e-9;

/// A monochrome raster, stored row-major with one byte per cell
///
/// Cells hold exactly `0` or `1`. Two bitmaps are equal when their sizes match
/// and every cell matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MonoBitmap {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl MonoBitmap {
    /// A `width` x `height` rectangle, all background or all ink
    pub fn create(width: usize, height: usize, filled: bool) -> Self {
        Self {
            width,
            height,
            cells: vec![u8::from(filled); width * height],
        }
    }

    /// Builds a bitmap from nested rows; any non-zero value becomes ink
    ///
    /// Every row must have the same length as the first one.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut cells = Vec::with_capacity(width * height);

        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(BitmapError::RaggedRows {
                    row: index,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row.iter().map(|&value| u8::from(value != 0)));
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// One row of cells
    ///
    /// # Panics
    ///
    /// Panics if `y` is not below [`height`](Self::height).
    pub fn row(&self, y: usize) -> &[u8] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Copies the cells out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows().map(<[u8]>::to_vec).collect()
    }

    /// Cell value at `(x, y)`, or `None` outside the bitmap
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index_of(i64::from(x), i64::from(y))
            .map(|index| self.cells[index])
    }

    /// Whether `(x, y)` holds ink; outside the bitmap is never ink
    pub fn is_ink(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(1)
    }

    /// Sets one cell; writes outside the bitmap are ignored
    pub fn set(&mut self, x: i32, y: i32, ink: bool) {
        if let Some(index) = self.index_of(i64::from(x), i64::from(y)) {
            self.cells[index] = u8::from(ink);
        }
    }

    pub fn is_x_inside(&self, x: i32) -> bool {
        x >= 0 && (x as usize) < self.width
    }

    pub fn is_y_inside(&self, y: i32) -> bool {
        y >= 0 && (y as usize) < self.height
    }

    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        self.is_x_inside(x) && self.is_y_inside(y)
    }

    /// Whether any cell holds ink
    pub fn has_ink(&self) -> bool {
        self.cells.iter().any(|&cell| cell != 0)
    }

    fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    fn column_is_empty(&self, x: usize) -> bool {
        (0..self.height).all(|y| self.cells[y * self.width + x] == 0)
    }

    fn row_is_empty(&self, y: usize) -> bool {
        self.row(y).iter().all(|&cell| cell == 0)
    }

    /// Empty columns before the first inked one, counted from the left edge
    pub fn left_padding(&self) -> usize {
        (0..self.width)
            .take_while(|&x| self.column_is_empty(x))
            .count()
    }

    /// Empty columns after the last inked one, counted from the right edge
    pub fn right_padding(&self) -> usize {
        (0..self.width)
            .rev()
            .take_while(|&x| self.column_is_empty(x))
            .count()
    }

    /// Empty rows above the first inked one
    pub fn top_padding(&self) -> usize {
        (0..self.height).take_while(|&y| self.row_is_empty(y)).count()
    }

    /// Empty rows below the last inked one
    pub fn bottom_padding(&self) -> usize {
        (0..self.height)
            .rev()
            .take_while(|&y| self.row_is_empty(y))
            .count()
    }

    /// Grows or shrinks each side independently
    ///
    /// Positive amounts add background, negative amounts cut cells away. The
    /// result is `(width + left + right) x (height + top + bottom)`; a negative
    /// result is an error.
    pub fn resize(&self, left: i32, right: i32, top: i32, bottom: i32) -> Result<Self> {
        let width = self.width as i64 + i64::from(left) + i64::from(right);
        let height = self.height as i64 + i64::from(top) + i64::from(bottom);
        if width < 0 || height < 0 {
            return Err(BitmapError::InvalidDimensions { width, height });
        }

        let mut bitmap = Self::create(width as usize, height as usize, false);
        for y in 0..bitmap.height {
            let sy = y as i64 - i64::from(top);
            for x in 0..bitmap.width {
                let sx = x as i64 - i64::from(left);
                if let Some(index) = self.index_of(sx, sy) {
                    bitmap.cells[y * bitmap.width + x] = self.cells[index];
                }
            }
        }
        Ok(bitmap)
    }

    /// Nearest-neighbor resample by independent horizontal and vertical factors
    ///
    /// Output size is `floor(size * factor)`; output cell `i` samples source
    /// cell `floor(i / factor)`. Scaling by `n` and then by `1 / n` gives back
    /// the original.
    pub fn scale(&self, scale_x: f64, scale_y: f64) -> Result<Self> {
        for factor in [scale_x, scale_y] {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(BitmapError::InvalidArgument(format!(
                    "scale factor must be a positive number: {factor}"
                )));
            }
        }

        let width = stable_floor(self.width as f64 * scale_x) as usize;
        let height = stable_floor(self.height as f64 * scale_y) as usize;
        let source_x: Vec<usize> = (0..width)
            .map(|x| source_index(x, scale_x, self.width))
            .collect();

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            let row = self.row(source_index(y, scale_y, self.height));
            cells.extend(source_x.iter().map(|&sx| row[sx]));
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Copy of `self` with the ink of `other` added at `(x, y)`
    pub fn plus(&self, other: &MonoBitmap, x: i32, y: i32) -> Self {
        self.stamp(other, x, y, 1)
    }

    /// Copy of `self` with the cells under the ink of `other` at `(x, y)` cleared
    pub fn minus(&self, other: &MonoBitmap, x: i32, y: i32) -> Self {
        self.stamp(other, x, y, 0)
    }

    fn stamp(&self, other: &MonoBitmap, x: i32, y: i32, value: u8) -> Self {
        let mut bitmap = self.clone();
        for (ox, oy) in other.ink_cells() {
            let tx = ox as i64 + i64::from(x);
            let ty = oy as i64 + i64::from(y);
            if let Some(index) = bitmap.index_of(tx, ty) {
                bitmap.cells[index] = value;
            }
        }
        bitmap
    }

    fn ink_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell != 0)
            .map(move |(index, _)| (index % self.width, index / self.width))
    }

    /// Whether `other`, placed at `(x, y)`, puts ink on any inked cell of `self`
    pub fn is_overlapped(&self, other: &MonoBitmap, x: i32, y: i32) -> bool {
        other.ink_cells().any(|(ox, oy)| {
            self.index_of(ox as i64 + i64::from(x), oy as i64 + i64::from(y))
                .is_some_and(|index| self.cells[index] != 0)
        })
    }

    /// Spreads every ink cell over the square of cells within `radius`
    ///
    /// This is the stroke used for synthetic bolding and for the kerning
    /// safety margin. Growth is clipped to the bitmap; `radius` must be
    /// positive.
    pub fn dilate(&self, radius: i32) -> Result<Self> {
        if radius <= 0 {
            return Err(BitmapError::InvalidArgument(format!(
                "the stroke size must be a positive number: {radius}"
            )));
        }

        let radius = radius as i64;
        let mut bitmap = self.clone();
        for (x, y) in self.ink_cells() {
            let (x, y) = (x as i64, y as i64);
            for ty in (y - radius).max(0)..=(y + radius).min(self.height as i64 - 1) {
                for tx in (x - radius).max(0)..=(x + radius).min(self.width as i64 - 1) {
                    bitmap.cells[ty as usize * self.width + tx as usize] = 1;
                }
            }
        }
        Ok(bitmap)
    }

    /// Extracts the `width` x `height` region whose top-left cell is `(x, y)`
    ///
    /// Unlike [`resize`](Self::resize) there is no implicit padding: the whole
    /// region must lie inside the bitmap.
    pub fn crop(&self, x: i32, y: i32, width: usize, height: usize) -> Result<Self> {
        let fits = x >= 0
            && y >= 0
            && x as usize + width <= self.width
            && y as usize + height <= self.height;
        if !fits {
            return Err(BitmapError::RegionOutOfBounds {
                x,
                y,
                width,
                height,
                bitmap_width: self.width,
                bitmap_height: self.height,
            });
        }

        let (x, y) = (x as usize, y as usize);
        let mut cells = Vec::with_capacity(width * height);
        for row in self.rows().skip(y).take(height) {
            cells.extend_from_slice(&row[x..x + width]);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Text dump for debugging: one token per cell, one line per row
    ///
    /// `end`, when given, is written just before each newline so trailing
    /// background stays visible.
    pub fn draw(&self, ink: &str, background: &str, end: Option<&str>) -> String {
        let mut text = String::with_capacity((self.width * 2 + 2) * self.height);
        for row in self.rows() {
            for &cell in row {
                text.push_str(if cell == 0 { background } else { ink });
            }
            if let Some(end) = end {
                text.push_str(end);
            }
            text.push('\n');
        }
        text
    }
}

impl fmt::Display for MonoBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.draw("██", "  ", None))
    }
}

fn stable_floor(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < FLOOR_TOLERANCE {
        rounded
    } else {
        value.floor()
    }
}

fn source_index(index: usize, factor: f64, limit: usize) -> usize {
    let source = stable_floor(index as f64 / factor) as usize;
    source.min(limit.saturating_sub(1))
}
