//! The text measurement oracle consumed by the fitting engine.
//!
//! The engine never touches a rendering substrate directly; the host supplies
//! an implementation backed by whatever it renders with (SVG
//! `getComputedTextLength`/`getEndPositionOfChar`, a font metrics table, ...).
//! Measurements must be synchronous and reflect current layout: an
//! implementation over a live renderer has to force a reflow before
//! returning, or fit decisions will read stale geometry.

use unicode_width::UnicodeWidthChar;

/// A failed measurement probe.
///
/// Probe failures are not fatal to the engine: the affected check is treated
/// as "no overflow" and logged, erring toward showing text rather than
/// refusing to render.
#[derive(Debug, Clone, thiserror::Error)]
#[error("text measurement failed: {message}")]
pub struct MeasureError {
    message: String,
}

impl MeasureError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub trait TextMeasurer {
    /// Rendered length of `text` at `font_size` along the line's baseline or
    /// path.
    fn measure(&self, text: &str, font_size: f64) -> Result<f64, MeasureError>;

    /// Geometric end position of the last character.
    ///
    /// Some rendering engines clip overflowing text before the length metric
    /// updates; the end position still moves (to zero or past the limit) and
    /// catches those cases. Environments without a separate end-position API
    /// can keep the default, which reuses the length metric.
    fn end_position(&self, text: &str, font_size: f64) -> Result<f64, MeasureError> {
        self.measure(text, font_size)
    }
}

/// Width-proportional measurer: every character cell is
/// `font_size * char_width_factor` wide, with double-width glyphs counting
/// twice. The default oracle for headless use and for tests.
#[derive(Debug, Clone)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
}

impl Default for DeterministicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_factor: 0.6,
        }
    }
}

impl DeterministicTextMeasurer {
    pub fn new(char_width_factor: f64) -> Self {
        Self { char_width_factor }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> Result<f64, MeasureError> {
        let cells: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
        Ok(cells as f64 * font_size * self.char_width_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_measure_is_linear_in_font_size() {
        let measurer = DeterministicTextMeasurer::new(0.5);
        assert_eq!(measurer.measure("abcd", 10.0).unwrap(), 20.0);
        assert_eq!(measurer.measure("abcd", 20.0).unwrap(), 40.0);
    }

    #[test]
    fn wide_glyphs_count_double() {
        let measurer = DeterministicTextMeasurer::new(1.0);
        let narrow = measurer.measure("ab", 10.0).unwrap();
        let wide = measurer.measure("日本", 10.0).unwrap();
        assert_eq!(wide, narrow * 2.0);
    }

    #[test]
    fn end_position_defaults_to_length() {
        let measurer = DeterministicTextMeasurer::default();
        assert_eq!(
            measurer.end_position("abc", 12.0).unwrap(),
            measurer.measure("abc", 12.0).unwrap()
        );
    }
}
