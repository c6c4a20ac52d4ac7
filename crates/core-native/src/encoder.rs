use crate::buffer::NativeBuffer;
use crate::error::{
    CalendarSnafu, EncodingResult, IntegerSnafu, LayoutSnafu, LeapSecondSnafu, MissingFieldSnafu,
    ParseError, ParseFailureSnafu, SignPrefixSnafu, TypeMismatchSnafu, UnsupportedTypeSnafu,
};
use crate::model::{ColumnDescriptor, ResultSet, Scalar};
use crate::types::{ColumnType, WireEncoding};
use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use snafu::prelude::*;
use std::str::FromStr;

const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

// Layouts use `0` for a required ASCII digit, any other byte must match literally.
const DATE_LAYOUT: &str = "0000-00-00";
const DATE_TIME_LAYOUT: &str = "0000-00-00 00:00:00";
const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Encodes a result set into the native columnar format.
///
/// The header holds the column count and the row count, followed by one block per
/// column: its name, its declared type and then the value of every row in order.
/// Every declared type is resolved before anything is written, so an unsupported
/// column fails the call even when there are no rows.
#[tracing::instrument(
    name = "native::encode",
    level = "debug",
    skip_all,
    fields(columns = result.columns.len(), rows = result.rows.len()),
    err
)]
pub fn encode(result: &ResultSet) -> EncodingResult<Bytes> {
    let columns = result
        .columns
        .iter()
        .map(ColumnEncoder::resolve)
        .collect::<EncodingResult<Vec<_>>>()?;

    let mut buffer = NativeBuffer::with_capacity(estimate_capacity(&columns, result.rows.len()));
    buffer.put_len(columns.len());
    buffer.put_len(result.rows.len());

    for column in &columns {
        buffer.put_string(&column.descriptor.name);
        buffer.put_string(&column.descriptor.r#type);

        for (row, values) in result.rows.iter().enumerate() {
            let value = values
                .get(&column.descriptor.name)
                .context(MissingFieldSnafu {
                    column: &column.descriptor.name,
                    row,
                })?;
            column.write(&mut buffer, row, value)?;
        }
    }

    tracing::trace!(bytes = buffer.len(), "encoded result set");
    Ok(buffer.freeze())
}

fn estimate_capacity(columns: &[ColumnEncoder<'_>], rows: usize) -> usize {
    columns
        .iter()
        .map(|column| {
            let header = column.descriptor.name.len() + column.descriptor.r#type.len() + 2;
            // Strings are at least their length prefix.
            header + rows * column.encoding.fixed_width().unwrap_or(1)
        })
        .sum::<usize>()
        + 2 * 10
}

struct ColumnEncoder<'a> {
    descriptor: &'a ColumnDescriptor,
    r#type: ColumnType,
    encoding: WireEncoding,
}

impl<'a> ColumnEncoder<'a> {
    fn resolve(descriptor: &'a ColumnDescriptor) -> EncodingResult<Self> {
        let unsupported = || {
            UnsupportedTypeSnafu {
                column: &descriptor.name,
                declared_type: &descriptor.r#type,
            }
            .build()
        };
        let r#type = ColumnType::from_str(&descriptor.r#type).map_err(|_| unsupported())?;
        let encoding = r#type.wire_encoding().ok_or_else(unsupported)?;
        Ok(Self {
            descriptor,
            r#type,
            encoding,
        })
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn write(&self, buffer: &mut NativeBuffer, row: usize, value: &Scalar) -> EncodingResult<()> {
        match self.encoding {
            WireEncoding::Int8 => buffer.put_i8(truncate_i32(self.number(row, value)?) as i8),
            WireEncoding::Int16 => buffer.put_i16(truncate_i32(self.number(row, value)?) as i16),
            WireEncoding::Int32 => buffer.put_i32(truncate_i32(self.number(row, value)?)),
            WireEncoding::UInt8 => buffer.put_u8(truncate_i32(self.number(row, value)?) as u8),
            WireEncoding::UInt16 => buffer.put_u16(truncate_i32(self.number(row, value)?) as u16),
            WireEncoding::UInt32 => buffer.put_u32(truncate_i64(self.number(row, value)?) as u32),
            WireEncoding::Float32 => buffer.put_f32(self.number(row, value)? as f32),
            WireEncoding::Float64 => buffer.put_f64(self.number(row, value)?),
            WireEncoding::Int64 => {
                let text = self.text(row, value)?;
                buffer.put_i64(self.parsed(row, text, parse_i64(text))?);
            }
            WireEncoding::UInt64 => {
                let text = self.text(row, value)?;
                buffer.put_u64(self.parsed(row, text, parse_u64(text))?);
            }
            WireEncoding::String => buffer.put_string(self.text(row, value)?),
            WireEncoding::DateTime => {
                let text = self.text(row, value)?;
                let seconds = self.parsed(row, text, parse_date_time(text))?;
                buffer.put_u32(seconds as u32);
            }
            WireEncoding::Date => {
                let text = self.text(row, value)?;
                let seconds = self.parsed(row, text, parse_date(text))?;
                buffer.put_u16((seconds / SECONDS_PER_DAY) as u16);
            }
            WireEncoding::Bool => buffer.put_bool(self.boolean(row, value)?),
        }
        Ok(())
    }

    fn number(&self, row: usize, value: &Scalar) -> EncodingResult<f64> {
        match value {
            Scalar::Number(number) => Ok(*number),
            other => self.mismatch(row, other),
        }
    }

    fn text<'v>(&self, row: usize, value: &'v Scalar) -> EncodingResult<&'v str> {
        match value {
            Scalar::Text(text) => Ok(text.as_str()),
            other => self.mismatch(row, other),
        }
    }

    fn boolean(&self, row: usize, value: &Scalar) -> EncodingResult<bool> {
        match value {
            Scalar::Boolean(boolean) => Ok(*boolean),
            other => self.mismatch(row, other),
        }
    }

    fn mismatch<T>(&self, row: usize, found: &Scalar) -> EncodingResult<T> {
        TypeMismatchSnafu {
            column: &self.descriptor.name,
            declared_type: &self.descriptor.r#type,
            row,
            expected: self.encoding.input_kind(),
            found: found.kind(),
        }
        .fail()
    }

    fn parsed<T>(&self, row: usize, text: &str, parsed: Result<T, ParseError>) -> EncodingResult<T> {
        parsed.context(ParseFailureSnafu {
            column: &self.descriptor.name,
            row,
            value: text,
            target: self.r#type,
        })
    }
}

// Numbers narrow the way x86-64 converts them: truncate toward zero into a signed
// 32-bit (or 64-bit for UInt32) register, NaN and overflow produce the minimum
// value, then the low bytes are kept.
#[allow(clippy::cast_possible_truncation)]
fn truncate_i32(value: f64) -> i32 {
    let truncated = value.trunc();
    if (-2_147_483_648.0..2_147_483_648.0).contains(&truncated) {
        truncated as i32
    } else {
        i32::MIN
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_i64(value: f64) -> i64 {
    let truncated = value.trunc();
    if (-9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0).contains(&truncated) {
        truncated as i64
    } else {
        i64::MIN
    }
}

fn parse_i64(text: &str) -> Result<i64, ParseError> {
    text.parse::<i64>().context(IntegerSnafu)
}

fn parse_u64(text: &str) -> Result<u64, ParseError> {
    ensure!(!text.starts_with('+'), SignPrefixSnafu);
    text.parse::<u64>().context(IntegerSnafu)
}

fn parse_date_time(text: &str) -> Result<i64, ParseError> {
    ensure!(
        matches_layout(text, DATE_TIME_LAYOUT),
        LayoutSnafu {
            layout: DATE_TIME_LAYOUT
        }
    );
    let date_time = NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT).context(CalendarSnafu)?;
    // chrono reads second 60 as a leap second folded into the nanoseconds.
    ensure!(date_time.nanosecond() < 1_000_000_000, LeapSecondSnafu);
    Ok(date_time.and_utc().timestamp())
}

fn parse_date(text: &str) -> Result<i64, ParseError> {
    ensure!(
        matches_layout(text, DATE_LAYOUT),
        LayoutSnafu {
            layout: DATE_LAYOUT
        }
    );
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT).context(CalendarSnafu)?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp())
}

fn matches_layout(text: &str, layout: &str) -> bool {
    text.len() == layout.len()
        && text
            .bytes()
            .zip(layout.bytes())
            .all(|(actual, expected)| match expected {
                b'0' => actual.is_ascii_digit(),
                literal => actual == literal,
            })
}
