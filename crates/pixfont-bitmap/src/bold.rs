//! Synthetic bolding
//!
//! Three recipes for deriving a bold weight from a regular glyph, built only
//! from resize, compositing, scaling and dilation.

use std::fmt;
use std::str::FromStr;

use crate::error::{BitmapError, Result};
use crate::MonoBitmap;

/// Which bolding recipe to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoldMethod {
    /// Stroke at 4x and halve: a bold at double resolution
    #[default]
    Inflation,
    /// Overlap a copy shifted one cell right, keeping counters open
    MoveRight,
    /// Overlap a copy shifted one cell left, keeping counters open
    MoveLeft,
}

impl BoldMethod {
    pub const ALL: [BoldMethod; 3] = [
        BoldMethod::Inflation,
        BoldMethod::MoveRight,
        BoldMethod::MoveLeft,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BoldMethod::Inflation => "inflation",
            BoldMethod::MoveRight => "move-right",
            BoldMethod::MoveLeft => "move-left",
        }
    }

    pub fn apply(self, bitmap: &MonoBitmap) -> Result<MonoBitmap> {
        match self {
            BoldMethod::Inflation => inflation(bitmap),
            BoldMethod::MoveRight => move_right_and_overlap(bitmap),
            BoldMethod::MoveLeft => move_left_and_overlap(bitmap),
        }
    }
}

impl fmt::Display for BoldMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoldMethod {
    type Err = BitmapError;

    fn from_str(s: &str) -> Result<Self> {
        BoldMethod::ALL
            .into_iter()
            .find(|method| method.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BitmapError::InvalidArgument(format!("unknown bold method: '{s}'")))
    }
}

/// Widens every stroke rightwards; the result is one column wider
///
/// Cells that would close a one-cell gap between strokes are dropped again,
/// so counters stay open.
pub fn move_right_and_overlap(bitmap: &MonoBitmap) -> Result<MonoBitmap> {
    let solid = bitmap.resize(1, 0, 0, 0)?.plus(bitmap, 0, 0);
    let shadow = solid.minus(bitmap, 0, 0).resize(1, 0, 0, 0)?;
    Ok(solid.minus(&shadow, 0, 0))
}

/// Mirror image of [`move_right_and_overlap`]
pub fn move_left_and_overlap(bitmap: &MonoBitmap) -> Result<MonoBitmap> {
    let solid = bitmap.resize(0, 1, 0, 0)?.plus(bitmap, 1, 0);
    let shadow = solid.minus(bitmap, 1, 0).resize(-1, 0, 0, 0)?;
    Ok(solid.minus(&shadow, 0, 0))
}

/// Bold at double resolution
///
/// The glyph is blown up 4x, stroked by one cell and halved again, so the
/// result is `2 * width + 1` by `2 * height + 1`.
pub fn inflation(bitmap: &MonoBitmap) -> Result<MonoBitmap> {
    bitmap
        .scale(4.0, 4.0)?
        .resize(1, 1, 1, 1)?
        .dilate(1)?
        .scale(0.5, 0.5)?
        .resize(1, -1, -1, 1)
}
