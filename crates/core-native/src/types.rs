use crate::model::InputKind;

/// Column type tags as they appear in warehouse result metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
pub enum ColumnType {
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Int256,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    UInt256,
    Float32,
    Float64,
    String,
    DateTime,
    Date,
    Bool,
}

/// How a single value of a column is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEncoding {
    Int8,
    Int16,
    Int32,
    UInt8,
    UInt16,
    UInt32,
    Float32,
    Float64,
    Int64,
    UInt64,
    String,
    DateTime,
    Date,
    Bool,
}

impl ColumnType {
    /// Returns `None` for the types that cannot be encoded.
    #[must_use]
    pub const fn wire_encoding(self) -> Option<WireEncoding> {
        match self {
            Self::Int8 => Some(WireEncoding::Int8),
            Self::Int16 => Some(WireEncoding::Int16),
            Self::Int32 => Some(WireEncoding::Int32),
            Self::UInt8 => Some(WireEncoding::UInt8),
            Self::UInt16 => Some(WireEncoding::UInt16),
            Self::UInt32 => Some(WireEncoding::UInt32),
            Self::Float32 => Some(WireEncoding::Float32),
            Self::Float64 => Some(WireEncoding::Float64),
            Self::Int64 => Some(WireEncoding::Int64),
            Self::UInt64 => Some(WireEncoding::UInt64),
            Self::String => Some(WireEncoding::String),
            Self::DateTime => Some(WireEncoding::DateTime),
            Self::Date => Some(WireEncoding::Date),
            Self::Bool => Some(WireEncoding::Bool),
            // Listed by the warehouse but there is no agreed textual form for them yet.
            Self::Int128 | Self::Int256 | Self::UInt128 | Self::UInt256 => None,
        }
    }
}

impl WireEncoding {
    #[must_use]
    pub const fn input_kind(self) -> InputKind {
        match self {
            Self::Int8
            | Self::Int16
            | Self::Int32
            | Self::UInt8
            | Self::UInt16
            | Self::UInt32
            | Self::Float32
            | Self::Float64 => InputKind::Number,
            Self::Int64 | Self::UInt64 | Self::String | Self::DateTime | Self::Date => {
                InputKind::Text
            }
            Self::Bool => InputKind::Boolean,
        }
    }

    /// Encoded size of one value, `None` for variable length values.
    #[must_use]
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Int8 | Self::UInt8 | Self::Bool => Some(1),
            Self::Int16 | Self::UInt16 | Self::Date => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float32 | Self::DateTime => Some(4),
            Self::Int64 | Self::UInt64 | Self::Float64 => Some(8),
            Self::String => None,
        }
    }
}
