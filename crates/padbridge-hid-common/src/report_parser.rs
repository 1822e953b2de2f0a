//! Length-checked report parsing and fixed-capacity report building
//!
//! Every read is bounds-checked; a short buffer yields
//! [`ReportError::Malformed`] instead of an out-of-range access.

use crate::{ReportError, ReportResult};

/// Borrow the first `N` bytes of `data` as a fixed-size array.
///
/// This is the entry point for every typed report view: once a view holds a
/// `&[u8; N]`, its field accessors cannot read past the end of the report.
pub fn fixed_view<const N: usize>(data: &[u8]) -> ReportResult<&[u8; N]> {
    let report_id = *data.first().ok_or(ReportError::Empty)?;
    data.get(..N)
        .and_then(|head| <&[u8; N]>::try_from(head).ok())
        .ok_or(ReportError::Malformed {
            report_id,
            expected: N,
            actual: data.len(),
        })
}

/// Sequential reader over a borrowed report buffer.
pub struct ReportParser<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ReportParser<'a> {
    /// Start reading at `offset` (clamped to the buffer end).
    pub fn at(data: &'a [u8], offset: usize) -> Self {
        Self {
            buffer: data,
            position: offset.min(data.len()),
        }
    }

    fn short(&self, wanted: usize) -> ReportError {
        ReportError::Malformed {
            report_id: self.buffer.first().copied().unwrap_or(0),
            expected: self.position.saturating_add(wanted),
            actual: self.buffer.len(),
        }
    }

    pub fn read_u8(&mut self) -> ReportResult<u8> {
        let value = *self.buffer.get(self.position).ok_or_else(|| self.short(1))?;
        self.position += 1;
        Ok(value)
    }

    pub fn read_array<const N: usize>(&mut self) -> ReportResult<[u8; N]> {
        let end = self.position.saturating_add(N);
        let bytes: [u8; N] = self
            .buffer
            .get(self.position..end)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| self.short(N))?;
        self.position = end;
        Ok(bytes)
    }

    pub fn read_u16_be(&mut self) -> ReportResult<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32_be(&mut self) -> ReportResult<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Borrow the next `count` bytes without copying.
    pub fn read_bytes(&mut self, count: usize) -> ReportResult<&'a [u8]> {
        let buffer: &'a [u8] = self.buffer;
        let end = self.position.saturating_add(count);
        let bytes = buffer
            .get(self.position..end)
            .ok_or_else(|| self.short(count))?;
        self.position = end;
        Ok(bytes)
    }
}

/// Fixed-capacity, allocation-free report builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportBuilder<const N: usize> {
    buffer: [u8; N],
    len: usize,
}

impl<const N: usize> ReportBuilder<N> {
    pub const fn new() -> Self {
        Self {
            buffer: [0u8; N],
            len: 0,
        }
    }

    pub fn write_u8(&mut self, value: u8) -> ReportResult<&mut Self> {
        self.write_bytes(&[value])
    }

    pub fn write_u32_be(&mut self, value: u32) -> ReportResult<&mut Self> {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> ReportResult<&mut Self> {
        let end = self.len.saturating_add(data.len());
        let overflow = ReportError::Overflow {
            len: end,
            capacity: N,
        };
        let dst = self.buffer.get_mut(self.len..end).ok_or(overflow)?;
        dst.copy_from_slice(data);
        self.len = end;
        Ok(self)
    }

    /// Append `count` copies of `value`.
    pub fn fill(&mut self, value: u8, count: usize) -> ReportResult<&mut Self> {
        let end = self.len.saturating_add(count);
        let overflow = ReportError::Overflow {
            len: end,
            capacity: N,
        };
        self.buffer.get_mut(self.len..end).ok_or(overflow)?.fill(value);
        self.len = end;
        Ok(self)
    }

    /// Mutable access to already-written bytes starting at `offset`.
    pub fn written_mut(&mut self, offset: usize) -> &mut [u8] {
        self.buffer.get_mut(offset..self.len).unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.buffer.get(..self.len).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const N: usize> Default for ReportBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}
