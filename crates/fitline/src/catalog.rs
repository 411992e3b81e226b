//! Grow-only fitting for catalog listings.
//!
//! Listing thumbnails render stored text that was already fitted once when
//! the product was personalised, so they never shrink or truncate; they only
//! take up slack left by the coarser integer fit, in half-unit steps against
//! the plain length metric.

use crate::measure::TextMeasurer;

/// Font-size step for the catalog grow pass.
pub const CATALOG_FONT_STEP: f64 = 0.5;

/// Grows `text` from `start_font` toward `max_font` while it keeps fitting
/// within `max_length`, backing off half a step on overshoot. The result is
/// clamped into `[min_font, max_font]`, so stored text that already overflows
/// at `start_font` cannot back off below the line's floor.
///
/// A failed probe stops the growth at the last known-good size.
pub fn grow_to_fit(
    measurer: &dyn TextMeasurer,
    text: &str,
    start_font: f64,
    min_font: f64,
    max_font: f64,
    max_length: f64,
) -> f64 {
    let clamped = |font: f64| font.min(max_font).max(min_font);

    let mut font = start_font;
    let mut length = match measurer.measure(text, font) {
        Ok(length) => length,
        Err(error) => {
            tracing::warn!(font, %error, "catalog length probe failed; not growing");
            return clamped(font);
        }
    };

    while font < max_font && length < max_length {
        font += CATALOG_FONT_STEP;
        length = match measurer.measure(text, font) {
            Ok(length) => length,
            Err(error) => {
                tracing::warn!(font, %error, "catalog length probe failed; stopping growth");
                return clamped(font - CATALOG_FONT_STEP);
            }
        };
    }

    if length > max_length {
        font -= CATALOG_FONT_STEP;
    }
    clamped(font)
}

/// Balancing rule for a multi-line listing: when the grown sizes disagree,
/// every line renders at the smallest; when they already agree, nothing needs
/// adjusting.
pub fn balanced_font(sizes: &[f64]) -> Option<f64> {
    let (&first, rest) = sizes.split_first()?;
    let mut min_font = first;
    let mut adjustment_needed = false;
    for &size in rest {
        if size != min_font {
            adjustment_needed = true;
            min_font = min_font.min(size);
        }
    }
    adjustment_needed.then_some(min_font)
}
