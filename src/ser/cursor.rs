use super::error::{SerError, SerKind, SerResult};

/// Cursor over a byte slice providing little-endian reads with error context.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Current offset within the slice.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    /// Reads exactly `len` bytes.
    pub fn read_exact(
        &mut self,
        len: usize,
        kind: SerKind,
        field: &'static str,
    ) -> SerResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(SerError::unexpected_end(kind, field));
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.bytes[start..start + len])
    }

    /// Reads a fixed-size byte array.
    pub fn read_array<const N: usize>(
        &mut self,
        kind: SerKind,
        field: &'static str,
    ) -> SerResult<[u8; N]> {
        let bytes = self.read_exact(N, kind, field)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self, kind: SerKind, field: &'static str) -> SerResult<u8> {
        Ok(self.read_array::<1>(kind, field)?[0])
    }

    pub fn read_u16(&mut self, kind: SerKind, field: &'static str) -> SerResult<u16> {
        Ok(u16::from_le_bytes(self.read_array::<2>(kind, field)?))
    }

    pub fn read_u32(&mut self, kind: SerKind, field: &'static str) -> SerResult<u32> {
        Ok(u32::from_le_bytes(self.read_array::<4>(kind, field)?))
    }

    /// Reads a boolean stored as `0` or `1`; any other byte is rejected.
    pub fn read_bool(&mut self, kind: SerKind, field: &'static str) -> SerResult<bool> {
        match self.read_u8(kind, field)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(SerError::invalid_value(kind, field)),
        }
    }

    /// Reads a `u32` item count and checks that `count * item_size` bytes are
    /// still available, so callers can preallocate safely.
    pub fn read_count(
        &mut self,
        item_size: usize,
        kind: SerKind,
        field: &'static str,
    ) -> SerResult<usize> {
        let count = self.read_u32(kind, field)? as usize;
        let needed = count
            .checked_mul(item_size)
            .ok_or_else(|| SerError::invalid_length(kind, field))?;
        if needed > self.remaining() {
            return Err(SerError::invalid_length(kind, field));
        }
        Ok(count)
    }

    /// Fails with [`SerError::TrailingBytes`] unless the input is exhausted.
    pub fn finish(&self, kind: SerKind) -> SerResult<()> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(SerError::trailing_bytes(kind, self.offset, remaining)),
        }
    }
}

impl<'a> From<&'a [u8]> for ByteReader<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ByteReader::new(bytes)
    }
}
