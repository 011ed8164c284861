//! Bounds-checked scalar reads at absolute buffer offsets.

use crate::error::{DecodeError, DecodeResult};

/// Immutable view over a model buffer.
///
/// All reads take an absolute byte offset and fail with
/// [`DecodeError::OutOfBounds`] rather than reading past the end.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> DecodeResult<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(DecodeError::OutOfBounds {
                offset,
                len,
                available: self.data.len(),
            })
    }

    fn array<const N: usize>(&self, offset: usize) -> DecodeResult<[u8; N]> {
        let bytes = self.slice(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&self, offset: usize) -> DecodeResult<u8> {
        let [b] = self.array::<1>(offset)?;
        Ok(b)
    }

    /// Read a little-endian 16-bit signed integer.
    ///
    /// Raw values strictly above `0x8000` fold into the negative range. The
    /// raw value `0x8000` itself stays at `+32768`, which is why this returns
    /// an `i32`.
    pub fn read_i16(&self, offset: usize) -> DecodeResult<i32> {
        let [b0, b1] = self.array::<2>(offset)?;
        let value = i32::from(b0) | (i32::from(b1) << 8);
        Ok(if value > 0x8000 { value - 0x1_0000 } else { value })
    }

    /// Read a little-endian two's-complement 32-bit signed integer.
    pub fn read_i32(&self, offset: usize) -> DecodeResult<i32> {
        Ok(i32::from_le_bytes(self.array::<4>(offset)?))
    }

    /// Reconstruct an IEEE-754 binary32 value from its four stored bytes.
    ///
    /// The byte at `offset + 3` carries the sign and the high exponent bits.
    /// An all-zero exponent with zero mantissa is exactly `0.0`; an all-zero
    /// exponent otherwise is a denormal. There is no NaN or infinity
    /// handling: those patterns go through the normalized formula.
    #[allow(clippy::cast_possible_truncation)]
    pub fn read_f32(&self, offset: usize) -> DecodeResult<f32> {
        let [b3, b2, b1, b0] = self.array::<4>(offset)?;

        let sign = if b0 >> 7 == 1 { -1.0 } else { 1.0 };
        let exponent = i32::from((b0 << 1) | (b1 >> 7)) - 127;
        let mantissa = (u32::from(b1 & 0x7f) << 16) | (u32::from(b2) << 8) | u32::from(b3);

        if mantissa == 0 && exponent == -127 {
            return Ok(0.0);
        }

        let value = if exponent == -127 {
            sign * f64::from(mantissa) * 2f64.powi(-126 - 23)
        } else {
            sign * (1.0 + f64::from(mantissa) * 2f64.powi(-23)) * 2f64.powi(exponent)
        };

        Ok(value as f32)
    }

    /// Read a NUL-terminated string from a fixed-width field.
    ///
    /// Bytes after the first NUL are ignored; invalid UTF-8 is replaced.
    pub fn read_fixed_str(&self, offset: usize, width: usize) -> DecodeResult<String> {
        let field = self.slice(offset, width)?;
        let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        Ok(String::from_utf8_lossy(&field[..end]).into_owned())
    }
}

/// Resolve `base + relative` into an absolute buffer position.
pub(crate) fn resolve_offset(
    base: usize,
    relative: i32,
    field: &'static str,
) -> DecodeResult<usize> {
    let absolute = i64::try_from(base).unwrap_or(i64::MAX) + i64::from(relative);
    usize::try_from(absolute).map_err(|_| DecodeError::NegativeOffset {
        field,
        value: absolute,
    })
}

/// Interpret a stored count as a length no greater than `max`.
pub(crate) fn count(value: i32, field: &'static str, max: usize) -> DecodeResult<usize> {
    let len = usize::try_from(value).map_err(|_| DecodeError::NegativeCount { field, value })?;
    if len > max {
        return Err(DecodeError::CountTooLarge { field, value, max });
    }
    Ok(len)
}
