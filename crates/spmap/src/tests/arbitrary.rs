use alloc::vec::Vec;

use bstr::BString;
use quickcheck::{Arbitrary, Gen};

use crate::{MapArea, MapHeader, PlacedLayer, PlacedTile, TileMap};

/// A filename that fits a fixed-length field: no NUL, shorter than the
/// field. Mostly ASCII with backslashes, plus some high bytes as code-page
/// names have.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Filename(pub BString);

impl Arbitrary for Filename {
    fn arbitrary(g: &mut Gen) -> Self {
        const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789_-.\\/ \xB0\xB8\xC0\xCA\xFE";
        let len = usize::arbitrary(g) % 24;
        let name: Vec<u8> = (0..len)
            .map(|_| *g.choose(ALPHABET).unwrap_or(&b'a'))
            .collect();
        Self(name.into())
    }
}

/// Small list so generated maps stay cheap to encode.
fn small_vec<T: Arbitrary>(g: &mut Gen, max: usize) -> Vec<T> {
    let len = usize::arbitrary(g) % (max + 1);
    (0..len).map(|_| T::arbitrary(g)).collect()
}

impl Arbitrary for MapHeader {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            sentinel: *g
                .choose(&[MapHeader::SENTINEL, MapHeader::LEGACY_SENTINEL])
                .unwrap_or(&MapHeader::SENTINEL),
            tile_width: i32::arbitrary(g),
            tile_height: i32::arbitrary(g),
            map_width: i32::arbitrary(g),
            map_height: i32::arbitrary(g),
            unknown_width: i32::arbitrary(g),
            unknown_height: i32::arbitrary(g),
            tile_count: i16::arbitrary(g),
            layer_count: i16::arbitrary(g),
            unknown_flag_0: i16::arbitrary(g),
            minimap_file_count: i16::arbitrary(g),
            unknown_flag_1: i16::arbitrary(g),
            unknown_flag_2: i16::arbitrary(g),
        }
    }
}

impl Arbitrary for MapArea {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            area_type: i32::arbitrary(g),
            x0: i32::arbitrary(g),
            y0: i32::arbitrary(g),
            x1: i32::arbitrary(g),
            y1: i32::arbitrary(g),
        }
    }
}

impl Arbitrary for PlacedTile {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            x: i32::arbitrary(g),
            y: i32::arbitrary(g),
            tile_index: i32::arbitrary(g),
        }
    }
}

impl Arbitrary for PlacedLayer {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            x: i32::arbitrary(g),
            y: i32::arbitrary(g),
            unknown_shorts: core::array::from_fn(|_| i16::arbitrary(g)),
            unknown_word: i32::arbitrary(g),
            layer_index: i16::arbitrary(g),
            unknown_bytes: core::array::from_fn(|_| u8::arbitrary(g)),
            unknown_words: core::array::from_fn(|_| i32::arbitrary(g)),
        }
    }
}

impl Arbitrary for TileMap {
    fn arbitrary(g: &mut Gen) -> Self {
        let names = |g: &mut Gen| -> Vec<BString> {
            small_vec::<Filename>(g, 3).into_iter().map(|f| f.0).collect()
        };
        let layer_filenames = names(g);
        let mut map = TileMap {
            header: MapHeader::arbitrary(g),
            tile_filenames: names(g),
            layer_color_keys: layer_filenames.iter().map(|_| i32::arbitrary(g)).collect(),
            layer_filenames,
            minimap_filenames: names(g),
            map_areas: small_vec(g, 3),
            placed_tiles: small_vec(g, 4),
            placed_layers: small_vec(g, 2),
            unknown_values: small_vec(g, 4),
        };
        map.sync_counts();
        map
    }
}
