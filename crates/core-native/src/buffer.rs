use bytes::{BufMut, Bytes, BytesMut};

/// Append-only output sink for the native columnar format.
///
/// Fixed width values are little-endian, lengths and counts are unsigned LEB128.
#[derive(Debug, Default)]
pub struct NativeBuffer {
    buf: BytesMut,
}

impl NativeBuffer {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn put_uvarint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buf.put_u8((value as u8) | 0x80);
            value >>= 7;
        }
        self.buf.put_u8(value as u8);
    }

    #[allow(clippy::as_conversions)]
    pub fn put_len(&mut self, len: usize) {
        self.put_uvarint(len as u64);
    }

    pub fn put_string(&mut self, value: &str) {
        self.put_len(value.len());
        self.buf.put_slice(value.as_bytes());
    }

    pub fn put_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    pub fn put_i8(&mut self, value: i8) {
        self.buf.put_i8(value);
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn put_i16(&mut self, value: i16) {
        self.buf.put_i16_le(value);
    }

    pub fn put_u16(&mut self, value: u16) {
        self.buf.put_u16_le(value);
    }

    pub fn put_i32(&mut self, value: i32) {
        self.buf.put_i32_le(value);
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    pub fn put_i64(&mut self, value: i64) {
        self.buf.put_i64_le(value);
    }

    pub fn put_u64(&mut self, value: u64) {
        self.buf.put_u64_le(value);
    }

    pub fn put_f32(&mut self, value: f32) {
        self.buf.put_f32_le(value);
    }

    pub fn put_f64(&mut self, value: f64) {
        self.buf.put_f64_le(value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[must_use]
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}
