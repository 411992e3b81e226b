//! Line formats: per-line-count geometry and font bounds for a layout.
//!
//! The host stores the format table as a JSON array of
//! `{ "l": <line count>, "f": <compact string> }` entries, where the compact
//! string holds one `y,x,width,align,minFont,maxFont[,path]` record per line,
//! joined with `|`. [`FormatSet::from_json`] parses and validates that form;
//! [`FormatSet::to_json`] emits it back for the save path.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geom::{Point, point};

/// Number of physical line slots a display keeps alive. Slots beyond the
/// active line count are hidden, never destroyed.
pub const MAX_LINES: usize = 10;

/// Fraction of a text path's total length usable by glyphs. The trailing
/// margin absorbs baseline rounding at the path ends.
pub const PATH_LENGTH_MARGIN: f64 = 0.9;

/// Horizontal alignment of a line within its region.
///
/// Stored as single-letter codes (`L`/`C`/`R`); unknown codes fall back to
/// centered, matching the stored-data convention.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

impl Align {
    pub fn from_code(code: &str) -> Self {
        match code {
            "L" => Align::Left,
            "R" => Align::Right,
            _ => Align::Center,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Align::Left => "L",
            Align::Center => "C",
            Align::Right => "R",
        }
    }

    /// SVG `text-anchor` value for this alignment.
    pub fn anchor(self) -> &'static str {
        match self {
            Align::Left => "start",
            Align::Center => "middle",
            Align::Right => "end",
        }
    }

    /// SVG `startOffset` value for path-shaped baselines.
    pub fn start_offset(self) -> &'static str {
        match self {
            Align::Left => "0%",
            Align::Center => "50%",
            Align::Right => "100%",
        }
    }
}

/// A path-shaped baseline: the `href` of the path element plus its resolved
/// total length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPath {
    pub href: String,
    pub length: f64,
}

/// Geometry and font bounds for one text line slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineFormat {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// When set, the line renders along this path and `width` is ignored for
    /// measurement purposes.
    pub path: Option<TextPath>,
    pub align: Align,
    pub min_font: f64,
    pub max_font: f64,
}

impl LineFormat {
    pub fn position(&self) -> Point {
        point(self.x, self.y)
    }

    /// Measurement ceiling for this line: the straight width, or 90% of the
    /// path length (see [`PATH_LENGTH_MARGIN`]).
    pub fn max_length(&self) -> f64 {
        match &self.path {
            Some(path) => path.length * PATH_LENGTH_MARGIN,
            None => self.width,
        }
    }

    /// Clamps a desired font size into this line's `[min_font, max_font]`.
    pub fn clamp_font(&self, desired: f64) -> f64 {
        desired.min(self.max_font).max(self.min_font)
    }

    /// Compact wire form: `y,x,width,align,minFont,maxFont[,path]`.
    pub fn to_compact(&self) -> String {
        let mut out = format!(
            "{},{},{},{},{},{}",
            self.y,
            self.x,
            self.width,
            self.align.code(),
            self.min_font,
            self.max_font
        );
        if let Some(path) = &self.path {
            out.push(',');
            out.push_str(&path.href);
        }
        out
    }

    fn validate(&self, index: usize) -> Result<()> {
        for (field, value) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("minFont", self.min_font),
            ("maxFont", self.max_font),
        ] {
            if !value.is_finite() {
                return Err(Error::NonFiniteValue { index, field });
            }
        }
        if self.min_font < 1.0 {
            return Err(Error::FontBelowMinimum {
                index,
                value: self.min_font,
            });
        }
        if self.min_font > self.max_font {
            return Err(Error::FontBoundsReversed {
                index,
                min_font: self.min_font,
                max_font: self.max_font,
            });
        }
        match &self.path {
            Some(path) => {
                if !(path.length.is_finite() && path.length > 0.0) {
                    return Err(Error::NonPositivePathLength {
                        index,
                        href: path.href.clone(),
                        length: path.length,
                    });
                }
            }
            None => {
                if self.width <= 0.0 {
                    return Err(Error::NonPositiveWidth {
                        index,
                        width: self.width,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Resolves a path `href` to the total geometric length of the baseline,
/// standing in for the rendering environment's `getTotalLength()`.
pub trait PathResolver {
    fn path_length(&self, href: &str) -> Option<f64>;
}

/// Resolver for layouts that only use straight baselines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPaths;

impl PathResolver for NoPaths {
    fn path_length(&self, _href: &str) -> Option<f64> {
        None
    }
}

impl PathResolver for HashMap<String, f64> {
    fn path_length(&self, href: &str) -> Option<f64> {
        self.get(href).copied()
    }
}

/// The immutable per-line-count layout: one [`LineFormat`] per simultaneously
/// visible line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Format {
    lines: Vec<LineFormat>,
}

impl Format {
    pub fn new(lines: Vec<LineFormat>) -> Result<Self> {
        let count = lines.len();
        if !(1..=MAX_LINES).contains(&count) {
            return Err(Error::LineCountOutOfRange { count });
        }
        for (index, line) in lines.iter().enumerate() {
            line.validate(index)?;
        }
        Ok(Self { lines })
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[LineFormat] {
        &self.lines
    }

    /// Parses the `|`-separated compact form, resolving path lengths through
    /// `resolver`.
    pub fn from_compact(compact: &str, resolver: &dyn PathResolver) -> Result<Self> {
        let lines = compact
            .split('|')
            .enumerate()
            .map(|(index, raw)| parse_compact_line(raw, index, resolver))
            .collect::<Result<Vec<_>>>()?;
        Self::new(lines)
    }

    pub fn to_compact(&self) -> String {
        self.lines
            .iter()
            .map(LineFormat::to_compact)
            .collect::<Vec<_>>()
            .join("|")
    }
}

fn parse_compact_line(raw: &str, index: usize, resolver: &dyn PathResolver) -> Result<LineFormat> {
    let malformed = |message: String| Error::MalformedFormatLine {
        line: raw.to_string(),
        message,
    };

    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() < 6 {
        return Err(malformed(format!(
            "expected at least 6 comma-separated fields, found {}",
            parts.len()
        )));
    }

    let number = |slot: usize, field: &str| -> Result<f64> {
        parts[slot]
            .parse::<f64>()
            .map_err(|_| malformed(format!("field `{field}` is not numeric: `{}`", parts[slot])))
    };

    // Stored field order is y,x,width,align,minFont,maxFont[,path].
    let y = number(0, "y")?;
    let x = number(1, "x")?;
    let width = number(2, "width")?;
    let align = Align::from_code(parts[3]);
    let min_font = number(4, "minFont")?;
    let max_font = number(5, "maxFont")?;

    let path = match parts.get(6) {
        Some(href) if !href.is_empty() => {
            let length = resolver
                .path_length(href)
                .ok_or_else(|| Error::UnknownPath {
                    index,
                    href: href.to_string(),
                })?;
            Some(TextPath {
                href: href.to_string(),
                length,
            })
        }
        _ => None,
    };

    Ok(LineFormat {
        x,
        y,
        width,
        path,
        align,
        min_font,
        max_font,
    })
}

#[derive(Debug, Deserialize, Serialize)]
struct FormatEntry {
    l: serde_json::Value,
    f: String,
}

/// Every format a layout supports, keyed by line count.
///
/// Counts must form a contiguous range so that clamping a requested count
/// always lands on an available format.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatSet {
    formats: BTreeMap<usize, Format>,
}

impl FormatSet {
    pub fn new(formats: impl IntoIterator<Item = Format>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for format in formats {
            map.insert(format.line_count(), format);
        }
        if map.is_empty() {
            return Err(Error::EmptyFormatSet);
        }
        let mut expected = *map.keys().next().unwrap_or(&1);
        for &count in map.keys() {
            if count != expected {
                return Err(Error::NonContiguousLineCounts { missing: expected });
            }
            expected += 1;
        }
        Ok(Self { formats: map })
    }

    /// Parses the stored `[{ "l": n, "f": "..." }, ...]` table.
    pub fn from_json(value: &serde_json::Value, resolver: &dyn PathResolver) -> Result<Self> {
        let entries: Vec<FormatEntry> = serde_json::from_value(value.clone())?;
        let mut formats = Vec::with_capacity(entries.len());
        for entry in &entries {
            let declared = parse_line_count(&entry.l)?;
            let format = Format::from_compact(&entry.f, resolver)?;
            if format.line_count() != declared {
                return Err(Error::LineCountMismatch {
                    declared,
                    actual: format.line_count(),
                });
            }
            formats.push(format);
        }
        Self::new(formats)
    }

    pub fn to_json(&self) -> serde_json::Value {
        let entries: Vec<serde_json::Value> = self
            .formats
            .values()
            .map(|format| {
                serde_json::json!({
                    "l": format.line_count(),
                    "f": format.to_compact(),
                })
            })
            .collect();
        serde_json::Value::Array(entries)
    }

    pub fn min_line_count(&self) -> usize {
        self.formats.keys().next().copied().unwrap_or(0)
    }

    pub fn max_line_count(&self) -> usize {
        self.formats.keys().next_back().copied().unwrap_or(0)
    }

    pub fn get(&self, line_count: usize) -> Option<&Format> {
        self.formats.get(&line_count)
    }

    /// Clamps a requested line count into the supported range.
    pub fn clamp_line_count(&self, target: usize) -> usize {
        target
            .max(self.min_line_count())
            .min(self.max_line_count())
    }
}

fn parse_line_count(raw: &serde_json::Value) -> Result<usize> {
    let parsed = match raw {
        serde_json::Value::Number(n) => n.as_u64().map(|n| n as usize),
        serde_json::Value::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| Error::InvalidLineCount {
        raw: raw.to_string(),
    })
}
