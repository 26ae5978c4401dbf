use alloc::vec::Vec;

use super::{FILENAME_LEN, MapArea, MapHeader, PlacedLayer, PlacedTile, TileMap};
use crate::cursor::Primitive;

impl MapHeader {
    /// Appends the encoded header to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        for word in [
            self.sentinel,
            self.tile_width,
            self.tile_height,
            self.map_width,
            self.map_height,
            self.unknown_width,
            self.unknown_height,
        ] {
            word.write_le(out);
        }
        for short in [
            self.tile_count,
            self.layer_count,
            self.unknown_flag_0,
            self.minimap_file_count,
            self.unknown_flag_1,
            self.unknown_flag_2,
        ] {
            short.write_le(out);
        }
    }
}

impl MapArea {
    pub fn write_to(&self, out: &mut Vec<u8>) {
        for word in [self.area_type, self.x0, self.y0, self.x1, self.y1] {
            word.write_le(out);
        }
    }
}

impl PlacedTile {
    pub fn write_to(&self, out: &mut Vec<u8>) {
        for word in [self.x, self.y, self.tile_index] {
            word.write_le(out);
        }
    }
}

impl PlacedLayer {
    pub fn write_to(&self, out: &mut Vec<u8>) {
        self.x.write_le(out);
        self.y.write_le(out);
        for short in self.unknown_shorts {
            short.write_le(out);
        }
        self.unknown_word.write_le(out);
        self.layer_index.write_le(out);
        out.extend_from_slice(&self.unknown_bytes);
        for word in self.unknown_words {
            word.write_le(out);
        }
    }
}

/// Writes `name` as a NUL-padded [`FILENAME_LEN`] field, truncating so at
/// least one terminator remains.
fn write_filename(name: &[u8], out: &mut Vec<u8>) {
    let len = name.len().min(FILENAME_LEN - 1);
    out.extend_from_slice(&name[..len]);
    out.resize(out.len() + FILENAME_LEN - len, 0);
}

fn write_count(len: usize, out: &mut Vec<u8>) {
    i32::try_from(len).unwrap_or(i32::MAX).write_le(out);
}

impl TileMap {
    /// Encodes the map back into the binary layout.
    ///
    /// The header is written as stored: its counts are not recomputed, so a
    /// header that disagrees with the filename and color-key lists produces
    /// a file that decodes differently. The record sections carry their own
    /// counts and are always consistent.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            MapHeader::SIZE
                + (self.tile_filenames.len()
                    + self.layer_filenames.len()
                    + self.minimap_filenames.len())
                    * FILENAME_LEN
                + self.layer_color_keys.len() * 4
                + 12
                + self.map_areas.len() * MapArea::SIZE
                + self.placed_tiles.len() * PlacedTile::SIZE
                + self.placed_layers.len() * PlacedLayer::SIZE
                + self.unknown_values.len() * 4,
        );

        self.header.write_to(&mut out);
        for name in &self.tile_filenames {
            write_filename(name, &mut out);
        }
        for name in &self.layer_filenames {
            write_filename(name, &mut out);
        }
        for key in &self.layer_color_keys {
            key.write_le(&mut out);
        }
        for name in &self.minimap_filenames {
            write_filename(name, &mut out);
        }

        write_count(self.map_areas.len(), &mut out);
        for area in &self.map_areas {
            area.write_to(&mut out);
        }
        write_count(self.placed_tiles.len(), &mut out);
        for tile in &self.placed_tiles {
            tile.write_to(&mut out);
        }
        write_count(self.placed_layers.len(), &mut out);
        for layer in &self.placed_layers {
            layer.write_to(&mut out);
        }
        for value in &self.unknown_values {
            value.write_le(&mut out);
        }
        out
    }

    /// Sets the header's list counts from the lengths of the lists.
    ///
    /// Lists longer than `i16::MAX` saturate.
    pub fn sync_counts(&mut self) {
        let count = |len: usize| i16::try_from(len).unwrap_or(i16::MAX);
        self.header.tile_count = count(self.tile_filenames.len());
        self.header.layer_count = count(self.layer_filenames.len());
        self.header.minimap_file_count = count(self.minimap_filenames.len());
    }
}
