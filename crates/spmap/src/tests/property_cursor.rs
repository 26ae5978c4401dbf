use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::quickcheck_tests;
use crate::{BinaryCursor, CursorError, Primitive};

/// Property: a read succeeds iff the span fits in `remaining()`, and then
/// advances the offset by exactly the span; otherwise nothing moves.
#[test]
fn read_bytes_bounds_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Vec<u8>, skip: usize, count: usize) -> bool {
        let mut cursor = BinaryCursor::new(&bytes);
        let skip = skip % (bytes.len() + 1);
        if cursor.read_bytes(skip).is_err() {
            return false;
        }

        let count = count % (bytes.len() + 8);
        let remaining = cursor.remaining();
        match cursor.read_bytes(count) {
            Ok(view) => {
                count <= remaining
                    && view == &bytes[skip..skip + count]
                    && cursor.offset() == skip + count
            }
            Err(CursorError::OutOfBounds {
                offset,
                requested,
                available,
                ..
            }) => {
                count > remaining
                    && offset == skip
                    && requested == count
                    && available == remaining
                    && cursor.offset() == skip
            }
        }
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Vec<u8>, usize, usize) -> bool);
}

fn scalar_prop<T: Primitive + PartialEq>(
    bytes: &[u8],
    skip: usize,
    expected: impl Fn(&[u8]) -> T,
) -> bool {
    let mut cursor = BinaryCursor::new(bytes);
    let skip = skip % (bytes.len() + 1);
    if cursor.read_bytes(skip).is_err() {
        return false;
    }
    let fits = cursor.can_read(T::SIZE);
    match cursor.read_scalar::<T>() {
        Ok(v) => {
            fits
                && cursor.offset() == skip + T::SIZE
                && v == expected(&bytes[skip..skip + T::SIZE])
        }
        Err(_) => !fits && cursor.offset() == skip,
    }
}

#[test]
fn read_scalar_bounds_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Vec<u8>, skip: usize) -> bool {
        scalar_prop::<u8>(&bytes, skip, |b| b[0])
            && scalar_prop::<i16>(&bytes, skip, |b| i16::from_le_bytes([b[0], b[1]]))
            && scalar_prop::<u16>(&bytes, skip, |b| u16::from_le_bytes([b[0], b[1]]))
            && scalar_prop::<i32>(&bytes, skip, |b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            && scalar_prop::<u32>(&bytes, skip, |b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Vec<u8>, usize) -> bool);
}

#[quickcheck_macros::quickcheck]
fn can_read_matches_remaining(bytes: Vec<u8>, count: usize) -> bool {
    let cursor = BinaryCursor::new(&bytes);
    cursor.can_read(count) == (count <= bytes.len()) && cursor.remaining() == bytes.len()
}
