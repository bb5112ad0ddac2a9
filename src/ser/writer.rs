use super::error::{SerError, SerKind, SerResult};

/// Append-only little-endian encoder mirroring [`ByteReader`](super::ByteReader).
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    out: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
        }
    }

    pub fn put_u8(&mut self, value: u8) {
        self.out.push(value);
    }

    pub fn put_u16(&mut self, value: u16) {
        self.out.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_u32(&mut self, value: u32) {
        self.out.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_bool(&mut self, value: bool) {
        self.put_u8(value as u8);
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    /// Writes a `u32` item count, rejecting collections that do not fit.
    pub fn put_count(&mut self, count: usize, kind: SerKind, field: &'static str) -> SerResult<()> {
        let count = u32::try_from(count).map_err(|_| SerError::invalid_length(kind, field))?;
        self.put_u32(count);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }
}
