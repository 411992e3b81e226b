use std::cell::Cell;

use fitline_core::{Align, LineFormat};

use crate::measure::{MeasureError, TextMeasurer};

mod catalog;
mod editor;

pub(crate) fn line_format(min_font: f64, max_font: f64, width: f64) -> LineFormat {
    LineFormat {
        x: 100.0,
        y: 50.0,
        width,
        path: None,
        align: Align::Center,
        min_font,
        max_font,
    }
}

/// Probe-counting oracle: width = chars × font size × factor.
pub(crate) struct CountingMeasurer {
    pub factor: f64,
    pub probes: Cell<usize>,
}

impl CountingMeasurer {
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            probes: Cell::new(0),
        }
    }

    pub fn reset(&self) {
        self.probes.set(0);
    }

    pub fn count(&self) -> usize {
        self.probes.get()
    }
}

impl TextMeasurer for CountingMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> Result<f64, MeasureError> {
        self.probes.set(self.probes.get() + 1);
        Ok(text.chars().count() as f64 * font_size * self.factor)
    }
}

/// Length metric always fits, but the end position reports the clip that
/// some rendering engines produce before the length metric updates.
pub(crate) struct ClippedEndMeasurer;

impl TextMeasurer for ClippedEndMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> Result<f64, MeasureError> {
        Ok(text.chars().count() as f64 * font_size * 0.01)
    }

    fn end_position(&self, _text: &str, _font_size: f64) -> Result<f64, MeasureError> {
        Ok(0.0)
    }
}

/// Every probe fails, as seen with certain engines on odd inputs.
pub(crate) struct FailingMeasurer;

impl TextMeasurer for FailingMeasurer {
    fn measure(&self, _text: &str, _font_size: f64) -> Result<f64, MeasureError> {
        Err(MeasureError::new("substrate exploded"))
    }
}

/// Reports a huge length for everything long enough to be checked.
pub(crate) struct AlwaysOverflowMeasurer;

impl TextMeasurer for AlwaysOverflowMeasurer {
    fn measure(&self, _text: &str, _font_size: f64) -> Result<f64, MeasureError> {
        Ok(1.0e9)
    }
}
