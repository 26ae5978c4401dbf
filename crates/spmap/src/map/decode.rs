use alloc::vec::Vec;

use bstr::BString;
use tracing::{debug, trace, warn};

use super::{FILENAME_LEN, MapArea, MapHeader, PlacedLayer, PlacedTile, TileMap};
use crate::{
    cursor::{BinaryCursor, Primitive},
    error::{DecodeError, DecodeErrorKind},
    options::DecoderOptions,
};

/// Decodes a whole map file.
///
/// # Errors
///
/// See [`MapDecoder::decode`].
pub fn decode(bytes: &[u8], options: &DecoderOptions) -> Result<TileMap, DecodeError> {
    MapDecoder::new(bytes, options).decode()
}

/// Reads the map layout field by field from a [`BinaryCursor`].
///
/// Errors name the field that failed and the offset it started at.
#[derive(Debug)]
pub struct MapDecoder<'a> {
    cursor: BinaryCursor<'a>,
    options: &'a DecoderOptions,
}

impl<'a> MapDecoder<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8], options: &'a DecoderOptions) -> Self {
        Self {
            cursor: BinaryCursor::new(bytes),
            options,
        }
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    /// Reads and validates the fixed header.
    ///
    /// # Errors
    ///
    /// - [`DecodeErrorKind::Cursor`] if the buffer is shorter than the header.
    /// - [`DecodeErrorKind::UnexpectedSentinel`] if the first word is not one
    ///   of [`DecoderOptions::accepted_sentinels`].
    pub fn read_header(&mut self) -> Result<MapHeader, DecodeError> {
        let offset = self.offset();
        let sentinel = self.read("sentinel")?;
        if !self.options.accepts(sentinel) {
            return Err(DecodeError::new(
                DecodeErrorKind::UnexpectedSentinel { found: sentinel },
                "sentinel",
                offset,
            ));
        }

        let header = MapHeader {
            sentinel,
            tile_width: self.read("tile_width")?,
            tile_height: self.read("tile_height")?,
            map_width: self.read("map_width")?,
            map_height: self.read("map_height")?,
            unknown_width: self.read("unknown_width")?,
            unknown_height: self.read("unknown_height")?,
            tile_count: self.read("tile_count")?,
            layer_count: self.read("layer_count")?,
            unknown_flag_0: self.read("unknown_flag_0")?,
            minimap_file_count: self.read("minimap_file_count")?,
            unknown_flag_1: self.read("unknown_flag_1")?,
            unknown_flag_2: self.read("unknown_flag_2")?,
        };
        debug!(
            sentinel = header.sentinel,
            tile_count = header.tile_count,
            layer_count = header.layer_count,
            minimap_file_count = header.minimap_file_count,
            "decoded map header"
        );
        Ok(header)
    }

    /// Decodes the header and every section after it.
    ///
    /// Trailing words are read until fewer than four bytes are left; a
    /// shorter remainder is ignored.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`]: a section runs past the end of the buffer, a
    /// count is negative, or the sentinel is not accepted.
    pub fn decode(mut self) -> Result<TileMap, DecodeError> {
        let header = self.read_header()?;

        let tile_filenames = self.read_filenames("tile_filenames", header.tile_count)?;
        let layer_filenames = self.read_filenames("layer_filenames", header.layer_count)?;
        let layer_color_keys = self.read_list("layer_colorkeys", header.layer_count.into(), 4, |d| {
            d.read("layer_colorkeys")
        })?;
        let minimap_filenames =
            self.read_filenames("minimap_filenames", header.minimap_file_count)?;

        let count = self.read("map_area_count")?;
        let map_areas = self.read_list("map_areas", count, MapArea::SIZE, Self::read_map_area)?;
        let count = self.read("placed_tile_count")?;
        let placed_tiles =
            self.read_list("placed_tiles", count, PlacedTile::SIZE, Self::read_placed_tile)?;
        let count = self.read("placed_layer_count")?;
        let placed_layers =
            self.read_list("placed_layers", count, PlacedLayer::SIZE, Self::read_placed_layer)?;

        let mut unknown_values = Vec::with_capacity(self.cursor.remaining() / i32::SIZE);
        while self.cursor.can_read(i32::SIZE) {
            unknown_values.push(self.read("unknown_values")?);
        }
        if !self.cursor.is_empty() {
            warn!(
                offset = self.offset(),
                bytes = self.cursor.remaining(),
                "ignoring partial trailing word"
            );
        }
        trace!(count = unknown_values.len(), "read unknown_values");

        Ok(TileMap {
            header,
            tile_filenames,
            layer_filenames,
            layer_color_keys,
            minimap_filenames,
            map_areas,
            placed_tiles,
            placed_layers,
            unknown_values,
        })
    }

    fn read<T: Primitive>(&mut self, field: &'static str) -> Result<T, DecodeError> {
        let offset = self.offset();
        self.cursor
            .read_scalar()
            .map_err(|e| DecodeError::new(e.into(), field, offset))
    }

    fn read_filenames(
        &mut self,
        field: &'static str,
        count: i16,
    ) -> Result<Vec<BString>, DecodeError> {
        self.read_list(field, count.into(), FILENAME_LEN, |d| {
            let offset = d.offset();
            d.cursor
                .read_fixed_str(FILENAME_LEN)
                .map_err(|e| DecodeError::new(e.into(), field, offset))
        })
    }

    /// Reads `count` records of `record_size` bytes each with `read_one`.
    fn read_list<T>(
        &mut self,
        field: &'static str,
        count: i32,
        record_size: usize,
        mut read_one: impl FnMut(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Vec<T>, DecodeError> {
        let Ok(count) = usize::try_from(count) else {
            return Err(DecodeError::new(
                DecodeErrorKind::NegativeCount { count },
                field,
                self.offset(),
            ));
        };
        // The count comes from the file; never reserve more than could fit.
        let mut records = Vec::with_capacity(count.min(self.cursor.remaining() / record_size));
        for _ in 0..count {
            records.push(read_one(self)?);
        }
        trace!(field, count, "read section");
        Ok(records)
    }

    fn read_map_area(&mut self) -> Result<MapArea, DecodeError> {
        Ok(MapArea {
            area_type: self.read("map_areas.area_type")?,
            x0: self.read("map_areas.x0")?,
            y0: self.read("map_areas.y0")?,
            x1: self.read("map_areas.x1")?,
            y1: self.read("map_areas.y1")?,
        })
    }

    fn read_placed_tile(&mut self) -> Result<PlacedTile, DecodeError> {
        Ok(PlacedTile {
            x: self.read("placed_tiles.x")?,
            y: self.read("placed_tiles.y")?,
            tile_index: self.read("placed_tiles.tile_index")?,
        })
    }

    fn read_placed_layer(&mut self) -> Result<PlacedLayer, DecodeError> {
        let x = self.read("placed_layers.x")?;
        let y = self.read("placed_layers.y")?;
        let mut unknown_shorts = [0i16; 4];
        for v in &mut unknown_shorts {
            *v = self.read("placed_layers.unknown")?;
        }
        let unknown_word = self.read("placed_layers.unknown")?;
        let layer_index = self.read("placed_layers.layer_index")?;
        let mut unknown_bytes = [0u8; 2];
        for v in &mut unknown_bytes {
            *v = self.read("placed_layers.unknown")?;
        }
        let mut unknown_words = [0i32; 5];
        for v in &mut unknown_words {
            *v = self.read("placed_layers.unknown")?;
        }
        Ok(PlacedLayer {
            x,
            y,
            unknown_shorts,
            unknown_word,
            layer_index,
            unknown_bytes,
            unknown_words,
        })
    }
}
