pub type Result<T> = std::result::Result<T, Error>;

/// Format preconditions are fatal: a malformed format must be rejected at
/// load time because geometry corruption cannot be detected later from
/// font-size symptoms alone.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("format table defines no line formats")]
    EmptyFormatSet,

    #[error("line count {count} is outside 1..={max}", max = crate::MAX_LINES)]
    LineCountOutOfRange { count: usize },

    #[error("format declared for {declared} lines but defines {actual} line entries")]
    LineCountMismatch { declared: usize, actual: usize },

    #[error("format table skips the {missing}-line format; supported counts must be contiguous")]
    NonContiguousLineCounts { missing: usize },

    #[error("format entry has invalid line count `{raw}`")]
    InvalidLineCount { raw: String },

    #[error("malformed format line `{line}`: {message}")]
    MalformedFormatLine { line: String, message: String },

    #[error("line {index}: field `{field}` is not finite")]
    NonFiniteValue { index: usize, field: &'static str },

    #[error("line {index}: minimum font {min_font} exceeds maximum font {max_font}")]
    FontBoundsReversed {
        index: usize,
        min_font: f64,
        max_font: f64,
    },

    #[error("line {index}: font size {value} is below 1")]
    FontBelowMinimum { index: usize, value: f64 },

    #[error("line {index}: width {width} is not positive")]
    NonPositiveWidth { index: usize, width: f64 },

    #[error("line {index}: no length known for text path `{href}`")]
    UnknownPath { index: usize, href: String },

    #[error("line {index}: text path `{href}` has non-positive length {length}")]
    NonPositivePathLength {
        index: usize,
        href: String,
        length: f64,
    },

    #[error("format table JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
