use bstr::{BStr, BString, ByteSlice};

use super::{MapArea, MapHeader, PlacedLayer, PlacedTile, TileMap};
use crate::{
    document::{Document, NodeId, NodeKind, Scalar},
    error::DocumentError,
    options::DocumentOptions,
};

const PLACED_LAYER_SHORTS: [&str; 4] = ["unknown_0", "unknown_1", "unknown_2", "unknown_3"];
const PLACED_LAYER_BYTES: [&str; 2] = ["unknown_5", "unknown_6"];
const PLACED_LAYER_WORDS: [&str; 5] = [
    "unknown_7",
    "unknown_8",
    "unknown_9",
    "unknown_10",
    "unknown_11",
];

impl TileMap {
    /// Builds the output document, one top-level key per section in file
    /// order.
    ///
    /// # Errors
    ///
    /// [`DocumentError::DuplicateName`] when `options` asks for
    /// [`NamePolicy::Document`](crate::NamePolicy::Document) and the map has
    /// more than one record (record fields repeat by nature).
    pub fn to_document(&self, options: DocumentOptions) -> Result<Document, DocumentError> {
        let mut doc = Document::with_options(options);
        let root = doc.root();

        let meta = doc.create_node(root, Some("meta_data"), NodeKind::Object)?;
        self.header.push_fields(&mut doc, meta)?;

        push_values(&mut doc, "tile_filenames", self.tile_filenames.iter().map(as_text))?;
        push_values(&mut doc, "layer_filenames", self.layer_filenames.iter().map(as_text))?;
        let keys = doc.create_node(root, Some("layer_colorkeys"), NodeKind::Array)?;
        for &key in &self.layer_color_keys {
            doc.push_name_value_pair_as_object(keys, "color_key", key)?;
        }
        push_values(&mut doc, "minimap_filenames", self.minimap_filenames.iter().map(as_text))?;

        push_records(&mut doc, "map_areas", &self.map_areas, MapArea::push_fields)?;
        push_records(&mut doc, "placed_tiles", &self.placed_tiles, PlacedTile::push_fields)?;
        push_records(&mut doc, "placed_layers", &self.placed_layers, PlacedLayer::push_fields)?;
        push_values(&mut doc, "unknown_values", self.unknown_values.iter().copied())?;

        Ok(doc)
    }
}

fn as_text(name: &BString) -> &BStr {
    name.as_bstr()
}

fn push_values<S: Into<Scalar>>(
    doc: &mut Document,
    name: &str,
    values: impl IntoIterator<Item = S>,
) -> Result<(), DocumentError> {
    let array = doc.create_node(doc.root(), Some(name), NodeKind::Array)?;
    for value in values {
        doc.push_value(array, value)?;
    }
    Ok(())
}

fn push_records<T>(
    doc: &mut Document,
    name: &str,
    records: &[T],
    push_fields: fn(&T, &mut Document, NodeId) -> Result<(), DocumentError>,
) -> Result<(), DocumentError> {
    let array = doc.create_node(doc.root(), Some(name), NodeKind::Array)?;
    for record in records {
        let object = doc.create_node(array, None, NodeKind::Object)?;
        push_fields(record, doc, object)?;
    }
    Ok(())
}

impl MapHeader {
    fn push_fields(&self, doc: &mut Document, object: NodeId) -> Result<(), DocumentError> {
        doc.push_name_value_pair(object, "map_type", self.sentinel)?;
        doc.push_name_value_pair(object, "tile_width", self.tile_width)?;
        doc.push_name_value_pair(object, "tile_height", self.tile_height)?;
        doc.push_name_value_pair(object, "map_width", self.map_width)?;
        doc.push_name_value_pair(object, "map_height", self.map_height)?;
        doc.push_name_value_pair(object, "unknown_width", self.unknown_width)?;
        doc.push_name_value_pair(object, "unknown_height", self.unknown_height)?;
        doc.push_name_value_pair(object, "tile_count", self.tile_count)?;
        doc.push_name_value_pair(object, "layer_count", self.layer_count)?;
        doc.push_name_value_pair(object, "unknown_flag_0", self.unknown_flag_0)?;
        doc.push_name_value_pair(object, "minimap_file_count", self.minimap_file_count)?;
        doc.push_name_value_pair(object, "unknown_flag_1", self.unknown_flag_1)?;
        doc.push_name_value_pair(object, "unknown_flag_2", self.unknown_flag_2)?;
        Ok(())
    }
}

impl MapArea {
    fn push_fields(&self, doc: &mut Document, object: NodeId) -> Result<(), DocumentError> {
        doc.push_name_value_pair(object, "area_type", self.area_type)?;
        doc.push_name_value_pair(object, "x0", self.x0)?;
        doc.push_name_value_pair(object, "y0", self.y0)?;
        doc.push_name_value_pair(object, "x1", self.x1)?;
        doc.push_name_value_pair(object, "y1", self.y1)?;
        Ok(())
    }
}

impl PlacedTile {
    fn push_fields(&self, doc: &mut Document, object: NodeId) -> Result<(), DocumentError> {
        doc.push_name_value_pair(object, "x", self.x)?;
        doc.push_name_value_pair(object, "y", self.y)?;
        doc.push_name_value_pair(object, "tile_index", self.tile_index)?;
        Ok(())
    }
}

impl PlacedLayer {
    fn push_fields(&self, doc: &mut Document, object: NodeId) -> Result<(), DocumentError> {
        doc.push_name_value_pair(object, "x", self.x)?;
        doc.push_name_value_pair(object, "y", self.y)?;
        for (name, &v) in PLACED_LAYER_SHORTS.iter().zip(&self.unknown_shorts) {
            doc.push_name_value_pair(object, name, v)?;
        }
        doc.push_name_value_pair(object, "unknown_4", self.unknown_word)?;
        doc.push_name_value_pair(object, "layer_index", self.layer_index)?;
        for (name, &v) in PLACED_LAYER_BYTES.iter().zip(&self.unknown_bytes) {
            doc.push_name_value_pair(object, name, v)?;
        }
        for (name, &v) in PLACED_LAYER_WORDS.iter().zip(&self.unknown_words) {
            doc.push_name_value_pair(object, name, v)?;
        }
        Ok(())
    }
}
