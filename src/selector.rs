//! Maps a day fraction onto a chronologically ordered wallpaper list.
//!
//! The first entry covers the start of the day and the last one the end, so
//! the selected index is `round(fraction * (len - 1))`. Rounding is half away
//! from zero (`f64::round`): a fraction landing exactly between two slots
//! picks the later one.

use std::path::{Path, PathBuf};

/// Index of the wallpaper for `fraction`, or `None` when the list is empty.
///
/// `fraction` is clamped to `[0, 1]`; NaN counts as 0.
pub fn select_index(fraction: f64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let index = (fraction * (len - 1) as f64).round() as usize;
    Some(index.min(len - 1))
}

pub fn select_file(fraction: f64, wallpapers: &[PathBuf]) -> Option<&Path> {
    select_index(fraction, wallpapers.len()).map(|index| wallpapers[index].as_path())
}
