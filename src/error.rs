//! Configuration errors.
//!
//! Detection itself never fails: missing caret, empty lines, ignored tags and
//! declining rules are reported as [`PassOutcome`](crate::PassOutcome)s. The
//! only fallible step is building the active rule set from [`Options`](crate::Options).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A name in `include_formats` is not in the rule catalog.
    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    /// A name appears more than once in `include_formats`.
    #[error("format `{0}` is listed more than once")]
    DuplicateFormat(String),

    /// `include_formats` was given but lists nothing.
    #[error("include_formats is empty; omit it to enable every format")]
    EmptyFormatList,
}
