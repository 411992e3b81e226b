//! Owns the line pool, the active format, and the cross-line balance step.

use std::sync::Arc;

use fitline_core::{FormatSet, MAX_LINES};

use crate::FitOptions;
use crate::line::{Line, TextChange};
use crate::measure::TextMeasurer;

/// The multi-line fitting engine.
///
/// Keeps a fixed pool of [`MAX_LINES`] line slots; the first
/// `current_line_count` are active, the rest are hidden. Every public
/// operation runs to completion synchronously — callers drive it from input
/// event handlers (keystroke, reformat, image change) and read the per-line
/// results back afterwards.
pub struct LineManager {
    lines: Vec<Line>,
    formats: FormatSet,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    balance: bool,
    current_line_count: usize,
    message: Vec<String>,
    too_many_lines: bool,
}

impl LineManager {
    pub fn new(formats: FormatSet, options: FitOptions) -> Self {
        let mut manager = Self {
            lines: vec![Line::default(); MAX_LINES],
            measurer: options.measurer,
            balance: options.balance,
            current_line_count: 0,
            message: Vec::new(),
            too_many_lines: false,
            formats,
        };
        let minimum = manager.formats.min_line_count();
        manager.maybe_change_line_count(minimum);
        manager
    }

    /// Switches the active line count, clamped to the supported range.
    ///
    /// Returns whether the count (and therefore every active line's format)
    /// actually changed. `too_many_lines` reflects the unclamped request.
    pub fn maybe_change_line_count(&mut self, target: usize) -> bool {
        self.too_many_lines = target > self.formats.max_line_count();
        let clamped = self.formats.clamp_line_count(target);
        if clamped == self.current_line_count {
            return false;
        }

        // Contiguity is validated at FormatSet construction, so the clamped
        // count always has a format.
        let Some(format) = self.formats.get(clamped).cloned() else {
            debug_assert!(false, "clamped line count {clamped} has no format");
            return false;
        };

        self.current_line_count = clamped;
        for (line, line_format) in self.lines[..clamped].iter_mut().zip(format.lines()) {
            line.set_format(line_format.clone());
        }
        for line in &mut self.lines[clamped..] {
            line.hide();
        }
        tracing::debug!(line_count = clamped, "rebound line formats");
        true
    }

    /// Displays a message, one entry per line, adapting the line count to the
    /// message length. Entries beyond the supported maximum are kept in the
    /// stored message but dropped from display.
    pub fn display_message(&mut self, lines: Vec<String>) {
        let format_changed = self.maybe_change_line_count(lines.len());
        self.message = lines;
        self.run_fit_pass(format_changed);
    }

    /// Re-displays the stored message, re-fitting every line from scratch.
    /// Used after an external reformat (changed image, dragged geometry).
    pub fn refresh(&mut self) {
        self.maybe_change_line_count(self.message.len());
        self.run_fit_pass(true);
    }

    /// Single-line convenience for text-input driven products.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.display_message(vec![text.into()]);
    }

    fn run_fit_pass(&mut self, force_rewrite: bool) {
        let measurer = Arc::clone(&self.measurer);

        let mut any_shrank = false;
        for (line, text) in self.lines[..self.current_line_count]
            .iter_mut()
            .zip(&self.message)
        {
            if line.set_text(text, force_rewrite, measurer.as_ref()) == TextChange::Shrank {
                any_shrank = true;
            }
        }

        // A line shrinking can drop the balanced size; give the siblings one
        // chance to re-probe their headroom. Skipped after a reformat, where
        // every line was already fitted from scratch.
        if !force_rewrite && any_shrank {
            for line in &mut self.lines[..self.current_line_count] {
                line.maybe_grow(measurer.as_ref());
            }
        }

        if self.balance {
            self.balance_fonts();
        } else {
            self.apply_own_sizes();
        }
    }

    /// Renders all active lines at the smallest best-fit size among them.
    ///
    /// Only the rendered size moves; each line's own best fit is retained, so
    /// a later edit can still grow lines back toward their own ceilings.
    pub fn balance_fonts(&mut self) {
        let active = &mut self.lines[..self.current_line_count];
        let Some(first) = active.first() else {
            return;
        };

        let mut min_font = first.font_size();
        let mut max_font = first.font_size();
        for line in active.iter() {
            min_font = min_font.min(line.font_size());
            max_font = max_font.max(line.font_size());
        }

        if min_font == max_font {
            // Already uniform; make sure every line carries its own size.
            for line in active.iter_mut() {
                let own = line.font_size();
                line.set_render_font_size(own);
            }
        } else {
            for line in active.iter_mut() {
                line.set_render_font_size(min_font);
            }
        }
    }

    /// Renders every active line at its own best-fit size.
    pub fn apply_own_sizes(&mut self) {
        for line in &mut self.lines[..self.current_line_count] {
            let own = line.font_size();
            line.set_render_font_size(own);
        }
    }

    /// True when any active line had to drop characters.
    pub fn text_too_long(&self) -> bool {
        self.active_lines().iter().any(Line::text_too_long)
    }

    /// True when the last displayed message had more lines than the layout
    /// supports.
    pub fn too_many_lines(&self) -> bool {
        self.too_many_lines
    }

    pub fn current_line_count(&self) -> usize {
        self.current_line_count
    }

    pub fn min_line_count(&self) -> usize {
        self.formats.min_line_count()
    }

    pub fn max_line_count(&self) -> usize {
        self.formats.max_line_count()
    }

    pub fn active_lines(&self) -> &[Line] {
        &self.lines[..self.current_line_count]
    }

    pub fn inactive_lines(&self) -> &[Line] {
        &self.lines[self.current_line_count..]
    }

    /// The stored message, including entries dropped from display.
    pub fn message(&self) -> &[String] {
        &self.message
    }

    pub fn formats(&self) -> &FormatSet {
        &self.formats
    }

    /// Updates the caller-owned balance flag; takes effect on the next
    /// display pass.
    pub fn set_balance(&mut self, balance: bool) {
        self.balance = balance;
    }
}
