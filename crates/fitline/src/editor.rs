//! Interactive layout editing: numeric-field edits and pointer drags over
//! line regions.
//!
//! Two numeric policies coexist. During a drag gesture values stay
//! unclamped floats so the dragged region tracks the pointer smoothly; at
//! drag end (and for every keyboard edit) values snap to their floor and the
//! font bounds cross-clamp against each other. A per-attribute "keep same"
//! flag replicates an edit to every active line instead of only the line
//! under the pointer.

use fitline_core::geom::Vector;
use fitline_core::{Align, Format, LineFormat, MAX_LINES, Result, TextPath};

/// Editable attributes of a line, in stored-column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAttr {
    Y,
    X,
    Align,
    Width,
    MinFont,
    MaxFont,
}

impl EditAttr {
    fn index(self) -> usize {
        match self {
            EditAttr::Y => 0,
            EditAttr::X => 1,
            EditAttr::Align => 2,
            EditAttr::Width => 3,
            EditAttr::MinFont => 4,
            EditAttr::MaxFont => 5,
        }
    }
}

/// A value for one editable attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditValue {
    Number(f64),
    Align(Align),
}

/// Pointer gestures, already translated to layout coordinates by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    Move {
        delta: Vector,
    },
    Resize {
        delta_left: f64,
        delta_width: f64,
        delta_height: f64,
    },
    /// Gesture finished: snap every numeric field to its floor.
    End,
}

/// Which font bound a resize gesture edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizingFont {
    Min,
    #[default]
    Max,
}

impl SizingFont {
    fn attr(self) -> EditAttr {
        match self {
            SizingFont::Min => EditAttr::MinFont,
            SizingFont::Max => EditAttr::MaxFont,
        }
    }
}

/// Per-attribute replication flags. Everything except `Y` starts replicated:
/// lines of one layout usually share X, width, alignment and font bounds, but
/// never their vertical position.
#[derive(Debug, Clone)]
pub struct KeepSame {
    flags: [bool; 6],
}

impl Default for KeepSame {
    fn default() -> Self {
        let mut flags = [true; 6];
        flags[EditAttr::Y.index()] = false;
        Self { flags }
    }
}

impl KeepSame {
    pub fn get(&self, attr: EditAttr) -> bool {
        self.flags[attr.index()]
    }

    pub fn set(&mut self, attr: EditAttr, keep: bool) {
        self.flags[attr.index()] = keep;
    }
}

/// Range limits for numeric fields, derived from the layout image size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditBounds {
    pub max_width: f64,
    pub max_height: f64,
}

impl EditBounds {
    fn range(&self, attr: EditAttr) -> (f64, f64) {
        match attr {
            EditAttr::Y => (0.0, self.max_height),
            EditAttr::X | EditAttr::Width => (0.0, self.max_width),
            EditAttr::MinFont | EditAttr::MaxFont => (1.0, (self.max_height / 2.0).floor()),
            EditAttr::Align => (0.0, 0.0),
        }
    }

    fn clamp(&self, attr: EditAttr, value: f64) -> f64 {
        let (min, max) = self.range(attr);
        // min wins over max so a degenerate image (fonts floor at 1 but
        // half its height rounds to 0) degrades instead of panicking.
        value.min(max).max(min)
    }
}

/// One line's editable state.
#[derive(Debug, Clone, Default)]
pub struct EditableLine {
    x: f64,
    y: f64,
    width: f64,
    align: Align,
    min_font: f64,
    max_font: f64,
    path: Option<TextPath>,
    dragging: bool,
}

impl EditableLine {
    fn load(&mut self, format: &LineFormat, bounds: &EditBounds) {
        self.path = format.path.clone();
        self.align = format.align;
        self.dragging = false;
        self.set_x(format.x, bounds);
        self.set_y(format.y, bounds);
        self.set_width(format.width, bounds);
        // Max before min so the cross-clamp sees the loaded ceiling.
        self.max_font = bounds.clamp(EditAttr::MaxFont, format.max_font).floor();
        self.set_min_font(format.min_font, bounds);
        self.set_max_font(format.max_font, bounds);
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn min_font(&self) -> f64 {
        self.min_font
    }

    pub fn max_font(&self) -> f64 {
        self.max_font
    }

    pub fn value(&self, attr: EditAttr) -> EditValue {
        match attr {
            EditAttr::Y => EditValue::Number(self.y),
            EditAttr::X => EditValue::Number(self.x),
            EditAttr::Align => EditValue::Align(self.align),
            EditAttr::Width => EditValue::Number(self.width),
            EditAttr::MinFont => EditValue::Number(self.min_font),
            EditAttr::MaxFont => EditValue::Number(self.max_font),
        }
    }

    pub fn to_line_format(&self) -> LineFormat {
        LineFormat {
            x: self.x,
            y: self.y,
            width: self.width,
            path: self.path.clone(),
            align: self.align,
            min_font: self.min_font,
            max_font: self.max_font,
        }
    }

    /// Ranged value during a drag, floored integer otherwise.
    fn store(&self, attr: EditAttr, value: f64, bounds: &EditBounds) -> f64 {
        let ranged = bounds.clamp(attr, value);
        if self.dragging { ranged } else { ranged.floor() }
    }

    fn set_x(&mut self, value: f64, bounds: &EditBounds) {
        self.x = self.store(EditAttr::X, value, bounds);
    }

    fn set_y(&mut self, value: f64, bounds: &EditBounds) {
        self.y = self.store(EditAttr::Y, value, bounds);
    }

    fn set_width(&mut self, value: f64, bounds: &EditBounds) {
        self.width = self.store(EditAttr::Width, value, bounds);
    }

    fn set_min_font(&mut self, value: f64, bounds: &EditBounds) {
        let mut ranged = bounds.clamp(EditAttr::MinFont, value);
        if !self.dragging {
            ranged = ranged.min(self.max_font);
        }
        self.min_font = if self.dragging { ranged } else { ranged.floor() };
    }

    fn set_max_font(&mut self, value: f64, bounds: &EditBounds) {
        let mut ranged = bounds.clamp(EditAttr::MaxFont, value);
        if !self.dragging {
            ranged = ranged.max(self.min_font);
        }
        self.max_font = if self.dragging { ranged } else { ranged.floor() };
    }

    fn set_sizing_font(&mut self, sizing: SizingFont, value: f64, bounds: &EditBounds) {
        match sizing {
            SizingFont::Min => self.set_min_font(value, bounds),
            SizingFont::Max => self.set_max_font(value, bounds),
        }
    }

    fn sizing_font(&self, sizing: SizingFont) -> f64 {
        match sizing {
            SizingFont::Min => self.min_font,
            SizingFont::Max => self.max_font,
        }
    }

    fn apply(&mut self, attr: EditAttr, value: EditValue, bounds: &EditBounds) -> bool {
        if self.value(attr) == value {
            return false;
        }
        match (attr, value) {
            (EditAttr::Y, EditValue::Number(v)) => self.set_y(v, bounds),
            (EditAttr::X, EditValue::Number(v)) => self.set_x(v, bounds),
            (EditAttr::Width, EditValue::Number(v)) => self.set_width(v, bounds),
            (EditAttr::MinFont, EditValue::Number(v)) => self.set_min_font(v, bounds),
            (EditAttr::MaxFont, EditValue::Number(v)) => self.set_max_font(v, bounds),
            (EditAttr::Align, EditValue::Align(align)) => self.align = align,
            _ => return false,
        }
        true
    }

    fn handle_drag(
        &mut self,
        event: DragEvent,
        is_source: bool,
        keep: &KeepSame,
        sizing: SizingFont,
        bounds: &EditBounds,
    ) {
        match event {
            DragEvent::Move { delta } => {
                self.dragging = true;
                if is_source || keep.get(EditAttr::X) {
                    self.set_x(self.x + delta.x, bounds);
                }
                if is_source || keep.get(EditAttr::Y) {
                    self.set_y(self.y + delta.y, bounds);
                }
            }
            DragEvent::Resize {
                delta_left,
                delta_width,
                delta_height,
            } => {
                let sizing_attr = sizing.attr();
                if !(is_source
                    || keep.get(EditAttr::X)
                    || keep.get(EditAttr::Width)
                    || keep.get(sizing_attr))
                {
                    return;
                }
                self.dragging = true;
                if delta_width != 0.0 {
                    if is_source || keep.get(EditAttr::X) {
                        self.set_x(self.x + delta_left, bounds);
                    }
                    if is_source || keep.get(EditAttr::Width) {
                        self.set_width(self.width + delta_width, bounds);
                    }
                }
                if delta_height != 0.0 && (is_source || keep.get(sizing_attr)) {
                    // The sizing rectangle is centre-anchored, so an edge
                    // delta changes the font by twice its height.
                    let current = self.sizing_font(sizing);
                    self.set_sizing_font(sizing, current + delta_height * 2.0, bounds);
                }
            }
            DragEvent::End => {
                self.dragging = false;
                self.set_x(self.x, bounds);
                self.set_y(self.y, bounds);
                self.set_width(self.width, bounds);
                let current = self.sizing_font(sizing);
                self.set_sizing_font(sizing, current, bounds);
            }
        }
    }
}

/// The admin-side layout editor over one format's worth of lines.
pub struct LayoutEditor {
    lines: Vec<EditableLine>,
    active_count: usize,
    keep_same: KeepSame,
    sizing: SizingFont,
    bounds: EditBounds,
    current_line: usize,
}

impl LayoutEditor {
    pub fn new(bounds: EditBounds) -> Self {
        Self {
            lines: vec![EditableLine::default(); MAX_LINES],
            active_count: 0,
            keep_same: KeepSame::default(),
            sizing: SizingFont::default(),
            bounds,
            current_line: 0,
        }
    }

    /// Loads a format's lines for editing.
    pub fn set_format(&mut self, format: &Format) {
        self.active_count = format.line_count();
        for (line, line_format) in self.lines.iter_mut().zip(format.lines()) {
            line.load(line_format, &self.bounds);
        }
        self.current_line = 0;
    }

    /// Emits the edited format; validation catches anything the clamps let
    /// through.
    pub fn to_format(&self) -> Result<Format> {
        Format::new(
            self.active_lines()
                .iter()
                .map(EditableLine::to_line_format)
                .collect(),
        )
    }

    pub fn active_lines(&self) -> &[EditableLine] {
        &self.lines[..self.active_count]
    }

    pub fn line(&self, index: usize) -> Option<&EditableLine> {
        self.lines.get(index)
    }

    pub fn keep_same(&self) -> &KeepSame {
        &self.keep_same
    }

    pub fn sizing(&self) -> SizingFont {
        self.sizing
    }

    /// Keyboard/table edit of one attribute. Replicated to every active line
    /// when the attribute is flagged "keep same". Returns whether any line
    /// changed.
    pub fn set_value(&mut self, line: usize, attr: EditAttr, value: EditValue) -> bool {
        if line >= self.active_count {
            return false;
        }
        self.current_line = line;

        if self.keep_same.get(attr) {
            let mut modified = false;
            for editable in &mut self.lines[..self.active_count] {
                modified |= editable.apply(attr, value, &self.bounds);
            }
            modified
        } else {
            self.lines[line].apply(attr, value, &self.bounds)
        }
    }

    /// Fans a pointer gesture out to every active line; only the source line
    /// and lines sharing a replicated attribute react.
    pub fn drag(&mut self, source: usize, event: DragEvent) {
        if source >= self.active_count {
            return;
        }
        self.current_line = source;
        for (index, line) in self.lines[..self.active_count].iter_mut().enumerate() {
            line.handle_drag(
                event,
                index == source,
                &self.keep_same,
                self.sizing,
                &self.bounds,
            );
        }
    }

    /// Toggles replication for one attribute. Switching it on pushes the
    /// current line's value to all active lines.
    pub fn set_keep_same(&mut self, attr: EditAttr, keep: bool) -> bool {
        self.keep_same.set(attr, keep);
        if keep && self.current_line < self.active_count {
            let value = self.lines[self.current_line].value(attr);
            return self.set_value(self.current_line, attr, value);
        }
        false
    }

    /// Recomputes the replication flag for an attribute from the current
    /// values and returns it.
    pub fn all_same(&mut self, attr: EditAttr) -> bool {
        let all_same = match self.active_lines().split_first() {
            Some((first, rest)) => {
                let check = first.value(attr);
                rest.iter().all(|line| line.value(attr) == check)
            }
            None => true,
        };
        self.keep_same.set(attr, all_same);
        all_same
    }

    pub fn set_sizing(&mut self, sizing: SizingFont) {
        self.sizing = sizing;
    }

    /// Re-derives the numeric ranges from a new image size and re-clamps
    /// every line's current values into them.
    pub fn set_max_sizes(&mut self, max_width: f64, max_height: f64) {
        self.bounds = EditBounds {
            max_width,
            max_height,
        };
        let bounds = self.bounds;
        for line in &mut self.lines[..self.active_count] {
            line.set_x(line.x, &bounds);
            line.set_y(line.y, &bounds);
            line.set_width(line.width, &bounds);
            line.set_min_font(line.min_font, &bounds);
            line.set_max_font(line.max_font, &bounds);
        }
    }
}
