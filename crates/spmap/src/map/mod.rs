//! The SurvivalProject `.map` layout.
//!
//! All fields are little-endian and laid out back to back:
//!
//! ```text
//! header            MapHeader (40 bytes)
//! tile filenames    tile_count         x [u8; FILENAME_LEN]
//! layer filenames   layer_count        x [u8; FILENAME_LEN]
//! layer color keys  layer_count        x i32
//! minimap filenames minimap_file_count x [u8; FILENAME_LEN]
//! map areas         i32 count, then    x MapArea
//! placed tiles      i32 count, then    x PlacedTile
//! placed layers     i32 count, then    x PlacedLayer
//! unknown values    i32 until end of file
//! ```
use alloc::vec::Vec;

use bstr::BString;

mod decode;
mod encode;
mod tree;

pub use decode::{MapDecoder, decode};

/// Width of every fixed-length filename field (`MAX_PATH`).
pub const FILENAME_LEN: usize = 260;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapHeader {
    /// Leading marker word; identifies the file variant.
    pub sentinel: i32,
    pub tile_width: i32,
    pub tile_height: i32,
    pub map_width: i32,
    pub map_height: i32,
    pub unknown_width: i32,
    pub unknown_height: i32,
    pub tile_count: i16,
    pub layer_count: i16,
    pub unknown_flag_0: i16,
    pub minimap_file_count: i16,
    pub unknown_flag_1: i16,
    pub unknown_flag_2: i16,
}

impl MapHeader {
    /// Sentinel written by current map files.
    pub const SENTINEL: i32 = -1;
    /// Sentinel written by older map files.
    pub const LEGACY_SENTINEL: i32 = -11;
    /// Encoded size in bytes.
    pub const SIZE: usize = 7 * 4 + 6 * 2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapArea {
    pub area_type: i32,
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl MapArea {
    pub const SIZE: usize = 5 * 4;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacedTile {
    pub x: i32,
    pub y: i32,
    pub tile_index: i32,
}

impl PlacedTile {
    pub const SIZE: usize = 3 * 4;
}

/// One placed layer record. The meaning of the `unknown_*` groups is not
/// known; they are carried through in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacedLayer {
    pub x: i32,
    pub y: i32,
    pub unknown_shorts: [i16; 4],
    pub unknown_word: i32,
    pub layer_index: i16,
    pub unknown_bytes: [u8; 2],
    pub unknown_words: [i32; 5],
}

impl PlacedLayer {
    pub const SIZE: usize = 2 * 4 + 4 * 2 + 4 + 2 + 2 + 5 * 4;
}

/// A fully decoded map file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileMap {
    pub header: MapHeader,
    /// Filenames are raw bytes in the authoring code page, NUL excluded.
    pub tile_filenames: Vec<BString>,
    pub layer_filenames: Vec<BString>,
    pub layer_color_keys: Vec<i32>,
    pub minimap_filenames: Vec<BString>,
    pub map_areas: Vec<MapArea>,
    pub placed_tiles: Vec<PlacedTile>,
    pub placed_layers: Vec<PlacedLayer>,
    /// Trailing words after the last record.
    pub unknown_values: Vec<i32>,
}
