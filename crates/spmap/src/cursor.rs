//! Sequential, bounds-checked reads over a borrowed byte slice.
//!
//! Every read checks the requested span against the unread tail *before*
//! touching the data. A failed read leaves the offset where it was, so the
//! error can report exactly where decoding stopped.
//!
//! Multi-byte values use the byte order of the platform the map files are
//! produced on (x86 Windows), i.e. little-endian, regardless of the host.
use alloc::vec::Vec;
use core::mem::size_of;

use bstr::BString;

use crate::error::CursorError;

mod sealed {
    pub trait Sealed {}
}

/// A fixed-size primitive the cursor can read and the encoder can write.
pub trait Primitive: Copy + sealed::Sealed {
    /// Encoded width in bytes.
    const SIZE: usize;
    /// Type name used in diagnostics.
    const NAME: &'static str;

    /// Decodes `Self` from exactly [`Self::SIZE`] little-endian bytes.
    #[doc(hidden)]
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Appends the little-endian encoding of `self`.
    #[doc(hidden)]
    fn write_le(self, out: &mut Vec<u8>);
}

macro_rules! impl_primitive {
    ($($ty:ty),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Primitive for $ty {
            const SIZE: usize = size_of::<$ty>();
            const NAME: &'static str = stringify!($ty);

            #[inline]
            fn from_le_slice(bytes: &[u8]) -> Self {
                let mut raw = [0u8; size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                <$ty>::from_le_bytes(raw)
            }

            #[inline]
            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }
        }
    )*};
}

impl_primitive!(i8, u8, i16, u16, i32, u32, f32);

/// Read cursor over an immutable byte slice.
///
/// Invariant: `0 <= offset <= bytes.len()`.
#[derive(Debug, Clone)]
pub struct BinaryCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> BinaryCursor<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Current read position from the start of the buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Non-failing probe: would a read of `count` bytes succeed?
    #[must_use]
    pub fn can_read(&self, count: usize) -> bool {
        count <= self.remaining()
    }

    /// Reads the next `T` and advances past it.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfBounds`] if fewer than `T::SIZE` bytes remain.
    pub fn read_scalar<T: Primitive>(&mut self) -> Result<T, CursorError> {
        let bytes = self.take(T::SIZE, T::NAME)?;
        Ok(T::from_le_slice(bytes))
    }

    /// Returns a view of the next `count` bytes and advances past them.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfBounds`] if fewer than `count` bytes remain.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], CursorError> {
        self.take(count, "bytes")
    }

    /// Reads a fixed-length, NUL-padded string field of `len` bytes.
    ///
    /// The text ends at the first NUL; anything after it is padding. The
    /// bytes are kept as they are: map files name their assets in the
    /// authoring system's ANSI code page, which is often not UTF-8.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfBounds`] if fewer than `len` bytes remain.
    pub fn read_fixed_str(&mut self, len: usize) -> Result<BString, CursorError> {
        let field = self.take(len, "fixed-length string")?;
        let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        Ok(BString::from(&field[..end]))
    }

    #[inline]
    fn take(&mut self, count: usize, what: &'static str) -> Result<&'a [u8], CursorError> {
        if !self.can_read(count) {
            return Err(CursorError::OutOfBounds {
                what,
                offset: self.offset,
                requested: count,
                available: self.remaining(),
            });
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.bytes[start..self.offset])
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use rstest::rstest;

    use super::*;

    #[test]
    fn reads_little_endian_scalars_in_sequence() {
        let bytes = [0xF5u8, 0xFF, 0xFF, 0xFF, 0x20, 0x00, 0x07, 0x80];
        let mut cursor = BinaryCursor::new(&bytes);

        assert_eq!(cursor.read_scalar::<i32>().unwrap(), -11);
        assert_eq!(cursor.read_scalar::<i16>().unwrap(), 32);
        assert_eq!(cursor.read_scalar::<u8>().unwrap(), 7);
        assert_eq!(cursor.read_scalar::<i8>().unwrap(), i8::MIN);
        assert!(cursor.is_empty());
    }

    #[test]
    fn reads_floats() {
        let bytes = 1.5f32.to_le_bytes();
        let mut cursor = BinaryCursor::new(&bytes);
        assert!((cursor.read_scalar::<f32>().unwrap() - 1.5).abs() < f32::EPSILON);
    }

    #[rstest]
    #[case::empty(&[], 4)]
    #[case::short_by_one(&[1, 2, 3], 4)]
    #[case::two_for_four(&[1, 2], 4)]
    fn out_of_bounds_leaves_offset_unchanged(#[case] bytes: &[u8], #[case] requested: usize) {
        let mut cursor = BinaryCursor::new(bytes);
        let err = cursor.read_scalar::<u32>().unwrap_err();
        assert_eq!(
            err,
            CursorError::OutOfBounds {
                what: "u32",
                offset: 0,
                requested,
                available: bytes.len(),
            }
        );
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.remaining(), bytes.len());
    }

    #[test]
    fn read_bytes_is_a_view_into_the_buffer() {
        let bytes = vec![1u8, 2, 3, 4, 5];
        let mut cursor = BinaryCursor::new(&bytes);
        cursor.read_scalar::<u8>().unwrap();
        let view = cursor.read_bytes(3).unwrap();
        assert_eq!(view, &[2, 3, 4]);
        assert_eq!(view.as_ptr(), bytes[1..].as_ptr());
        assert_eq!(cursor.remaining(), 1);
        assert!(cursor.read_bytes(2).is_err());
        assert_eq!(cursor.read_bytes(1).unwrap(), &[5]);
        assert_eq!(cursor.read_bytes(0).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn can_read_drives_read_until_exhausted() {
        let bytes = [1u8, 0, 0, 0, 2, 0, 0, 0, 9];
        let mut cursor = BinaryCursor::new(&bytes);
        let mut values = vec![];
        while cursor.can_read(i32::SIZE) {
            values.push(cursor.read_scalar::<i32>().unwrap());
        }
        assert_eq!(values, vec![1, 2]);
        assert_eq!(cursor.remaining(), 1);
    }

    #[rstest]
    #[case::padded(b"T.bmp\0\0\0\0\0", b"T.bmp")]
    #[case::garbage_after_nul(b"ab\0junk\0\0\0", b"ab")]
    #[case::no_terminator(b"abcdefghij", b"abcdefghij")]
    #[case::empty(b"\0\0\0\0\0\0\0\0\0\0", b"")]
    #[case::cp949(b"\xB8\xCA.bmp\0\0\0\0", b"\xB8\xCA.bmp")]
    fn fixed_str_stops_at_first_nul(#[case] field: &[u8; 10], #[case] expected: &[u8]) {
        let mut cursor = BinaryCursor::new(field);
        assert_eq!(cursor.read_fixed_str(10).unwrap(), expected);
        assert!(cursor.is_empty());
    }
}
