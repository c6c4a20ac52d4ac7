use crate::model::InputKind;
use crate::types::ColumnType;
use snafu::prelude::*;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum EncodingError {
    #[snafu(display("Missing value for column {column} at row {row}"))]
    MissingField { column: String, row: usize },

    #[snafu(display(
        "Column {column} of type {declared_type} expects a {expected} value, got {found} at row {row}"
    ))]
    TypeMismatch {
        column: String,
        declared_type: String,
        row: usize,
        expected: InputKind,
        found: InputKind,
    },

    #[snafu(display("Cannot parse {value:?} as {target} for column {column} at row {row}: {source}"))]
    ParseFailure {
        column: String,
        row: usize,
        value: String,
        target: ColumnType,
        source: ParseError,
    },

    #[snafu(display("Unsupported type {declared_type} for column {column}"))]
    UnsupportedType {
        column: String,
        declared_type: String,
    },
}

pub type EncodingResult<T> = std::result::Result<T, EncodingError>;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum ParseError {
    #[snafu(display("{source}"))]
    Integer { source: std::num::ParseIntError },

    #[snafu(display("{source}"))]
    Calendar { source: chrono::ParseError },

    #[snafu(display("expected layout {layout}"))]
    Layout { layout: &'static str },

    #[snafu(display("sign prefix is not permitted"))]
    SignPrefix,

    #[snafu(display("second out of range"))]
    LeapSecond,
}

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum ModelError {
    #[snafu(display("Column {column} holds a non-scalar value at row {row}"))]
    NonScalarValue { column: String, row: usize },
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
