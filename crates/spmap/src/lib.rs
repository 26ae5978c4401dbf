//! Decoder for SurvivalProject tile-map binaries and a writer for the
//! JSON-like text the map tools consume.
//!
//! The pipeline is: bytes → [`BinaryCursor`] → [`MapDecoder`] → [`TileMap`]
//! → [`Document`] → [`DocumentWriter`].
//!
//! ```rust
//! use spmap::{DecoderOptions, MapHeader, TileMap};
//!
//! let mut map = TileMap {
//!     header: MapHeader { sentinel: MapHeader::SENTINEL, ..Default::default() },
//!     tile_filenames: vec!["T.bmp".into()],
//!     ..Default::default()
//! };
//! map.sync_counts();
//!
//! let doc = spmap::map_to_document(&map.encode(), &DecoderOptions::default()).unwrap();
//! assert!(doc.to_string().contains("\"tile_filenames\": [\n\t\t\"T.bmp\"\n\t]"));
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod cursor;
mod document;
mod error;
mod map;
mod options;
mod writer;

#[cfg(test)]
mod tests;

pub use buffer::ByteBuffer;
pub use cursor::{BinaryCursor, Primitive};
pub use document::{Document, Node, NodeId, NodeKind, Scalar};
pub use error::{CursorError, DecodeError, DecodeErrorKind, DocumentError, Error};
pub use map::{
    FILENAME_LEN, MapArea, MapDecoder, MapHeader, PlacedLayer, PlacedTile, TileMap, decode,
};
pub use options::{DecoderOptions, DocumentOptions, NamePolicy};
pub use writer::DocumentWriter;

/// Decodes a map file and builds its output document in one step.
///
/// # Errors
///
/// [`Error::Decode`] if the bytes are not a well-formed map, or
/// [`Error::Document`] if the document cannot be built under the configured
/// [`NamePolicy`].
pub fn map_to_document(bytes: &[u8], options: &DecoderOptions) -> Result<Document, Error> {
    let map = decode(bytes, options)?;
    Ok(map.to_document(options.document_options())?)
}
