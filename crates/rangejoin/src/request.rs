//! Join requests: the owned form of a `sql_join` call and its JSON encoding.
//!
//! JSON requests look like
//!
//! ```json
//! {
//!   "left_range":  [["id", "n"], [1, "a"]],
//!   "right_range": [["id", "m"], [1, "x"]],
//!   "left_columns": 1,
//!   "right_columns": [1],
//!   "join_type": "left",
//!   "has_header": true
//! }
//! ```
//!
//! Every field may be omitted or `null`.

use rangejoin_engine::{execute_join, validate_join};
use rangejoin_error::{JoinError, Param, Result};
use rangejoin_types::{CellValue, ColumnArg, JoinType, Range, RangeInput};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// A join call with every argument optional.
#[derive(Debug, Default)]
pub struct JoinRequest {
    pub left_range: Option<RangeInput>,
    pub right_range: Option<RangeInput>,
    pub left_columns: Option<ColumnArg>,
    pub right_columns: Option<ColumnArg>,
    /// Case-insensitive `INNER` or `LEFT`.
    pub join_type: Option<String>,
    pub has_header: Option<bool>,
}

impl JoinRequest {
    /// Request joining `left` with `right`; columns still to be set.
    pub fn new(left: impl Into<RangeInput>, right: impl Into<RangeInput>) -> Self {
        Self {
            left_range: Some(left.into()),
            right_range: Some(right.into()),
            ..Self::default()
        }
    }

    /// Set the paired join columns (1-based).
    pub fn on(mut self, left: impl Into<ColumnArg>, right: impl Into<ColumnArg>) -> Self {
        self.left_columns = Some(left.into());
        self.right_columns = Some(right.into());
        self
    }

    pub fn join_type(mut self, join_type: JoinType) -> Self {
        self.join_type = Some(join_type.as_str().to_owned());
        self
    }

    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = Some(has_header);
        self
    }

    /// `true` when no argument at all was supplied.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.left_range.is_none()
            && self.right_range.is_none()
            && self.left_columns.is_none()
            && self.right_columns.is_none()
            && self.join_type.is_none()
            && self.has_header.is_none()
    }

    /// Validate and run the join.
    ///
    /// Returns `Ok(None)` for a blank request.
    ///
    /// # Errors
    ///
    /// The first validation failure; see [`JoinError`].
    pub fn execute(self) -> Result<Option<Range>> {
        if self.is_blank() {
            debug!("blank join request");
            return Ok(None);
        }

        let left = self
            .left_range
            .map_or_else(Range::default, RangeInput::resolve);
        let right = self
            .right_range
            .map_or_else(Range::default, RangeInput::resolve);
        let validated = validate_join(
            left,
            right,
            self.left_columns.unwrap_or(ColumnArg::List(Vec::new())),
            self.right_columns.unwrap_or(ColumnArg::List(Vec::new())),
            self.join_type.as_deref(),
            self.has_header.unwrap_or(true),
        )?;
        execute_join(&validated).map(Some)
    }

    /// Decode a JSON request.
    ///
    /// # Errors
    ///
    /// [`JoinError::Json`] for malformed JSON or unknown fields,
    /// [`JoinError::NotARange`] for a range that is not an array of arrays of
    /// scalars, and [`JoinError::ParameterType`] for other mistyped fields.
    pub fn from_json(text: &str) -> Result<Self> {
        let wire: WireRequest = serde_json::from_str(text)?;
        wire.decode()
    }

    /// Decode a request from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// As for [`JoinRequest::from_json`].
    pub fn from_value(value: Value) -> Result<Self> {
        let wire: WireRequest = serde_json::from_value(value)?;
        wire.decode()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct WireRequest {
    left_range: Option<Value>,
    right_range: Option<Value>,
    left_columns: Option<Value>,
    right_columns: Option<Value>,
    join_type: Option<Value>,
    has_header: Option<Value>,
}

impl WireRequest {
    fn decode(self) -> Result<JoinRequest> {
        Ok(JoinRequest {
            left_range: self
                .left_range
                .map(|v| range_from_value(Param::LeftRange, v))
                .transpose()?,
            right_range: self
                .right_range
                .map(|v| range_from_value(Param::RightRange, v))
                .transpose()?,
            left_columns: self
                .left_columns
                .map(|v| columns_from_value(Param::LeftColumns, v))
                .transpose()?,
            right_columns: self
                .right_columns
                .map(|v| columns_from_value(Param::RightColumns, v))
                .transpose()?,
            join_type: self
                .join_type
                .map(|v| match v {
                    Value::String(s) => Ok(s),
                    other => Err(wrong_type(Param::JoinType, "a string", &other)),
                })
                .transpose()?,
            has_header: self
                .has_header
                .map(|v| match v {
                    Value::Bool(b) => Ok(b),
                    other => Err(wrong_type(Param::HasHeader, "a boolean", &other)),
                })
                .transpose()?,
        })
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn wrong_type(param: Param, expected: &str, found: &Value) -> JoinError {
    JoinError::ParameterType {
        param,
        detail: format!("expected {expected}, found {}", json_type(found)),
    }
}

fn scalar(value: Value) -> Option<CellValue> {
    match value {
        Value::Null => Some(CellValue::Null),
        Value::Bool(b) => Some(CellValue::Bool(b)),
        Value::Number(n) => n.as_f64().map(CellValue::Number),
        Value::String(s) => Some(CellValue::Text(s)),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn range_from_value(param: Param, value: Value) -> Result<RangeInput> {
    let Value::Array(rows) = value else {
        return Err(JoinError::NotARange { param });
    };
    rows.into_iter()
        .map(|row| {
            let Value::Array(cells) = row else {
                return Err(JoinError::NotARange { param });
            };
            cells
                .into_iter()
                .map(|cell| scalar(cell).ok_or(JoinError::NotARange { param }))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<Vec<CellValue>>>>()
        .map(RangeInput::Raw)
}

fn columns_from_value(param: Param, value: Value) -> Result<ColumnArg> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| {
                let found = json_type(&item);
                scalar(item).ok_or_else(|| JoinError::ParameterType {
                    param,
                    detail: format!("column entries must be scalars, found {found}"),
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(ColumnArg::List),
        Value::Object(_) => Err(wrong_type(param, "a column number or list", &value)),
        other => scalar(other)
            .map(ColumnArg::Single)
            .ok_or_else(|| JoinError::ParameterType {
                param,
                detail: "expected a column number or list".to_owned(),
            }),
    }
}
