//! The single-line fit state machine: grow, shrink, truncate.
//!
//! A [`Line`] is one physical text slot. It is created once, rebound to new
//! geometry whenever the active line count changes, and hidden (never
//! destroyed) while unused. Font-size search is a linear one-unit walk in
//! both directions: the search space is bounded by `max_font - min_font`
//! steps, and a one-unit step is cheap relative to the correctness risk of
//! skipping sizes across a text reflow.

use fitline_core::LineFormat;

use crate::measure::TextMeasurer;

/// Font-size step for the grow/shrink search.
pub const FONT_STEP: f64 = 1.0;

/// Trimmed strings shorter than this never count as overflowing; rendering
/// engines report unusable metrics for near-empty strings.
const MIN_OVERFLOW_CHECK_CHARS: usize = 3;

/// Outcome of [`Line::set_text`], consumed by the manager when deciding
/// whether sibling lines should re-probe their headroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextChange {
    Unchanged,
    Grew,
    Shrank,
}

/// One text slot: bound geometry/font bounds plus current fit state.
#[derive(Debug, Clone, Default)]
pub struct Line {
    format: Option<LineFormat>,
    max_length: f64,
    /// Last text requested via [`Line::set_text`].
    source_text: String,
    /// Text as displayed; a prefix of `source_text` when truncated.
    current_text: String,
    /// This line's own best-fit size, always within the bound font range.
    font_size: f64,
    /// Size the line actually renders at; the balance step may pull it below
    /// `font_size`.
    render_font_size: f64,
    text_too_long: bool,
    hidden: bool,
}

impl Line {
    /// Binds geometry and font bounds, resetting the line to empty.
    ///
    /// Formats are validated at load time, so binding never fails.
    pub fn set_format(&mut self, format: LineFormat) {
        self.max_length = format.max_length();
        self.font_size = format.max_font;
        self.render_font_size = format.max_font;
        self.format = Some(format);
        self.source_text.clear();
        self.current_text.clear();
        self.text_too_long = false;
        self.hidden = false;
    }

    /// Marks the slot unused and clears its display. The format stays bound;
    /// reactivation goes through [`Line::set_format`].
    pub fn hide(&mut self) {
        self.hidden = true;
        self.current_text.clear();
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn format(&self) -> Option<&LineFormat> {
        self.format.as_ref()
    }

    /// Displayed text; a prefix of the requested text when truncated.
    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn render_font_size(&self) -> f64 {
        self.render_font_size
    }

    pub fn text_too_long(&self) -> bool {
        self.text_too_long
    }

    pub fn max_length(&self) -> f64 {
        self.max_length
    }

    /// Sets the line's text and re-runs the fit search as needed.
    ///
    /// `force` skips the no-op fast paths; the manager sets it after a format
    /// rebind so stale state cannot survive a reformat.
    pub fn set_text(&mut self, text: &str, force: bool, measurer: &dyn TextMeasurer) -> TextChange {
        let Some(format) = self.format.clone() else {
            return TextChange::Unchanged;
        };

        if !force {
            if text == self.source_text {
                return TextChange::Unchanged;
            }
            // A longer extension of text that is already too long is also too
            // long; skip the re-measurement. Only true length-increasing
            // edits qualify — a same-length or shorter replacement that
            // happens to share the truncated prefix is measured again.
            if self.text_too_long
                && text.len() > self.source_text.len()
                && text.starts_with(self.current_text.as_str())
            {
                return TextChange::Unchanged;
            }
        }

        let previous = self.font_size;
        self.text_too_long = false;
        self.source_text = text.to_string();

        if text.is_empty() {
            self.font_size = format.max_font;
            self.current_text.clear();
        } else if self.overflows(measurer, text, self.font_size) {
            self.shrink(&format, text, measurer);
        } else if self.font_size < format.max_font {
            self.font_size = self.grow(&format, text, self.font_size, measurer);
            self.current_text = text.to_string();
        } else {
            self.current_text = text.to_string();
        }

        self.render_font_size = self.font_size;

        if self.font_size > previous {
            TextChange::Grew
        } else if self.font_size < previous {
            TextChange::Shrank
        } else {
            TextChange::Unchanged
        }
    }

    /// Re-probes upward headroom for the current text.
    ///
    /// Called by the manager after a sibling line shrank; never after a mere
    /// text shortening, which would make sizes flicker on every keystroke.
    pub fn maybe_grow(&mut self, measurer: &dyn TextMeasurer) {
        let Some(format) = self.format.clone() else {
            return;
        };
        // A truncated line sits at the font floor by construction; growing
        // the truncated remainder would break the truncation invariant.
        if self.text_too_long {
            return;
        }
        let text = self.current_text.clone();
        let grown = self.grow(&format, &text, self.font_size, measurer);
        self.font_size = grown;
        self.render_font_size = grown;
    }

    /// Clamped write of the rendered size; the balance step is the only
    /// caller that passes something other than the line's own best fit.
    pub fn set_render_font_size(&mut self, desired: f64) {
        if let Some(format) = &self.format {
            self.render_font_size = format.clamp_font(desired);
        }
    }

    /// Steps the font down until the text fits, truncating at the floor.
    fn shrink(&mut self, format: &LineFormat, text: &str, measurer: &dyn TextMeasurer) {
        let mut font = self.font_size;
        let mut overflowing = true; // would not be here otherwise

        while overflowing && font > format.min_font {
            font = (font - FONT_STEP).max(format.min_font);
            overflowing = self.overflows(measurer, text, font);
        }

        self.text_too_long = overflowing;

        // At the font floor and still too long: drop trailing characters.
        // The short-string rule in `overflows` guarantees termination.
        let mut kept = text.to_string();
        while overflowing && !kept.is_empty() {
            kept.pop();
            overflowing = self.overflows(measurer, &kept, font);
        }

        self.current_text = kept;
        self.font_size = font;
    }

    /// Steps the font up while the text keeps fitting, backing off one step
    /// if the last increment overshot.
    fn grow(
        &self,
        format: &LineFormat,
        text: &str,
        start: f64,
        measurer: &dyn TextMeasurer,
    ) -> f64 {
        let mut font = start;
        while font < format.max_font && !self.overflows(measurer, text, font) {
            font = (font + FONT_STEP).min(format.max_font);
        }
        if self.overflows(measurer, text, font) {
            font = (font - FONT_STEP).max(format.min_font);
        }
        font
    }

    /// The double overflow check: length metric first, end position second.
    /// Probe failures count as "no overflow" for that probe only.
    fn overflows(&self, measurer: &dyn TextMeasurer, text: &str, font_size: f64) -> bool {
        let text = text.trim();
        if text.chars().count() < MIN_OVERFLOW_CHECK_CHARS {
            return false;
        }

        match measurer.measure(text, font_size) {
            Ok(length) if length > self.max_length => return true,
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(
                    chars = text.chars().count(),
                    font_size,
                    %error,
                    "length probe failed; treating as no overflow"
                );
                return false;
            }
        }

        match measurer.end_position(text, font_size) {
            Ok(end) => end == 0.0 || end > self.max_length,
            Err(error) => {
                tracing::warn!(
                    chars = text.chars().count(),
                    font_size,
                    %error,
                    "end-position probe failed; treating as no overflow"
                );
                false
            }
        }
    }
}
