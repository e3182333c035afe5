//! Error taxonomy for range joins.
//!
//! Every failure names the parameter it concerns and carries the offending
//! value. Variants fall into two families: malformed call parameters
//! ([`ErrorFamily::Parameter`]) and unusable input ranges
//! ([`ErrorFamily::Range`]). Request-decoding failures from the JSON and TOML
//! surfaces form a third, [`ErrorFamily::Request`].

use std::fmt;

use thiserror::Error;

/// The call parameter an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    LeftRange,
    RightRange,
    LeftColumns,
    RightColumns,
    JoinType,
    HasHeader,
}

impl Param {
    /// Name of the parameter as it appears in the callable surface.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftRange => "left_range",
            Self::RightRange => "right_range",
            Self::LeftColumns => "left_columns",
            Self::RightColumns => "right_columns",
            Self::JoinType => "join_type",
            Self::HasHeader => "has_header",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse grouping of [`JoinError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorFamily {
    /// Unsupported join type or malformed column specification.
    Parameter,
    /// Input range unusable for joining.
    Range,
    /// Request payload or configuration could not be decoded.
    Request,
}

/// Errors raised while validating or executing a range join.
#[derive(Debug, Error)]
pub enum JoinError {
    // === Parameter family ===
    #[error("join_type '{0}' is not supported (expected INNER or LEFT)")]
    JoinType(String),

    #[error("left_columns names {left} column(s) but right_columns names {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("{param} must name at least one column")]
    EmptySpec { param: Param },

    #[error("{param}[{position}] is not an integer: {value}")]
    NonInteger {
        param: Param,
        position: usize,
        value: String,
    },

    #[error("{param} lists column {index} more than once")]
    DuplicateColumn { param: Param, index: i64 },

    #[error("{param}[{position}] = {index} is out of range - column indexes start at 1")]
    InvalidBounds {
        param: Param,
        position: usize,
        index: i64,
    },

    // === Range family ===
    #[error("{param} is not a range (expected a two-dimensional array)")]
    NotARange { param: Param },

    #[error("{param} is empty")]
    EmptyRange { param: Param },

    #[error("{param} contains only blank cells")]
    EmptyAfterTrim { param: Param },

    #[error("{param} row {row} has {found} column(s), expected {expected}")]
    IrregularRange {
        param: Param,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{param} column {index} is out of bounds (range has {width} column(s))")]
    ColumnOutOfBounds {
        param: Param,
        index: usize,
        width: usize,
    },

    #[error("{param} has no data rows ({rows} row(s), header={has_header})")]
    InsufficientRows {
        param: Param,
        rows: usize,
        has_header: bool,
    },

    // === Request family ===
    #[error("{param} has the wrong type: {detail}")]
    ParameterType { param: Param, detail: String },

    #[error("malformed join request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl JoinError {
    /// Family this error belongs to.
    #[must_use]
    pub const fn family(&self) -> ErrorFamily {
        match self {
            Self::JoinType(_)
            | Self::LengthMismatch { .. }
            | Self::EmptySpec { .. }
            | Self::NonInteger { .. }
            | Self::DuplicateColumn { .. }
            | Self::InvalidBounds { .. } => ErrorFamily::Parameter,
            Self::NotARange { .. }
            | Self::EmptyRange { .. }
            | Self::EmptyAfterTrim { .. }
            | Self::IrregularRange { .. }
            | Self::ColumnOutOfBounds { .. }
            | Self::InsufficientRows { .. } => ErrorFamily::Range,
            Self::ParameterType { .. } | Self::Json(_) | Self::Config(_) => ErrorFamily::Request,
        }
    }

    /// Parameter the error refers to, when it concerns a single one.
    #[must_use]
    pub const fn param(&self) -> Option<Param> {
        match self {
            Self::JoinType(_) => Some(Param::JoinType),
            Self::EmptySpec { param }
            | Self::NonInteger { param, .. }
            | Self::DuplicateColumn { param, .. }
            | Self::InvalidBounds { param, .. }
            | Self::NotARange { param }
            | Self::EmptyRange { param }
            | Self::EmptyAfterTrim { param }
            | Self::IrregularRange { param, .. }
            | Self::ColumnOutOfBounds { param, .. }
            | Self::InsufficientRows { param, .. }
            | Self::ParameterType { param, .. } => Some(*param),
            Self::LengthMismatch { .. } | Self::Json(_) | Self::Config(_) => None,
        }
    }
}

/// Result alias used across the rangejoin crates.
pub type Result<T> = std::result::Result<T, JoinError>;
