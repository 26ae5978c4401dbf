#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use spmap::{
    DecoderOptions, MapArea, MapHeader, NamePolicy, PlacedLayer, PlacedTile, TileMap,
    map_to_document,
};

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Shape of a well-formed map; the mutator encodes these so the decoder sees
/// inputs that get past the header.
#[derive(Debug, Arbitrary)]
struct MapSeed {
    legacy: bool,
    dims: [i32; 6],
    flags: [i16; 3],
    tiles: Vec<Vec<u8>>,
    layers: Vec<(Vec<u8>, i32)>,
    minimaps: Vec<Vec<u8>>,
    areas: Vec<[i32; 5]>,
    placed_tiles: Vec<[i32; 3]>,
    placed_layers: Vec<([i32; 3], [i16; 5], [u8; 2], [i32; 5])>,
    trailing: Vec<i32>,
}

impl MapSeed {
    fn into_map(self) -> TileMap {
        let [tile_width, tile_height, map_width, map_height, unknown_width, unknown_height] =
            self.dims;
        let [unknown_flag_0, unknown_flag_1, unknown_flag_2] = self.flags;
        let (layer_filenames, layer_color_keys): (Vec<Vec<u8>>, _) =
            self.layers.into_iter().unzip();
        let sentinel = if self.legacy {
            MapHeader::LEGACY_SENTINEL
        } else {
            MapHeader::SENTINEL
        };
        let mut map = TileMap {
            header: MapHeader {
                sentinel,
                tile_width,
                tile_height,
                map_width,
                map_height,
                unknown_width,
                unknown_height,
                unknown_flag_0,
                unknown_flag_1,
                unknown_flag_2,
                ..MapHeader::default()
            },
            tile_filenames: self.tiles.into_iter().map(Into::into).collect(),
            layer_filenames: layer_filenames.into_iter().map(Into::into).collect(),
            layer_color_keys,
            minimap_filenames: self.minimaps.into_iter().map(Into::into).collect(),
            map_areas: self
                .areas
                .into_iter()
                .map(|[area_type, x0, y0, x1, y1]| MapArea { area_type, x0, y0, x1, y1 })
                .collect(),
            placed_tiles: self
                .placed_tiles
                .into_iter()
                .map(|[x, y, tile_index]| PlacedTile { x, y, tile_index })
                .collect(),
            placed_layers: self
                .placed_layers
                .into_iter()
                .map(|(words, shorts, unknown_bytes, unknown_words)| {
                    let [x, y, unknown_word] = words;
                    let [s0, s1, s2, s3, layer_index] = shorts;
                    PlacedLayer {
                        x,
                        y,
                        unknown_shorts: [s0, s1, s2, s3],
                        unknown_word,
                        layer_index,
                        unknown_bytes,
                        unknown_words,
                    }
                })
                .collect(),
            unknown_values: self.trailing,
        };
        map.sync_counts();
        map
    }
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size > 1 && !seed.is_multiple_of(8) {
        return fuzzer_mutate(data, size, max_size);
    }

    let raw: Vec<u8> = with_rng(|rng| {
        let len = rng.random_range(0..=max_size.clamp(1, 4096));
        (0..len).map(|_| rng.random::<u8>()).collect()
    });
    let Ok(seed_map) = MapSeed::arbitrary(&mut Unstructured::new(&raw)) else {
        return fuzzer_mutate(data, size, max_size);
    };

    let encoded = seed_map.into_map().encode();
    let mut len = (encoded.len() + 1).min(max_size).min(data.len());
    // Sometimes cut the file short to reach the truncation paths.
    if len > 1 && with_rng(|rng| rng.random_ratio(1, 4)) {
        len = with_rng(|rng| rng.random_range(1..len));
    }
    if len == 0 {
        return 0;
    }
    data[0] = with_rng(|rng| rng.random::<u8>() & 0b11);
    data[1..len].copy_from_slice(&encoded[..len - 1]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

fn decoder(data: &[u8]) {
    let Some((&flags, bytes)) = data.split_first() else {
        return;
    };

    let mut options = DecoderOptions::default();
    if flags & 1 != 0 {
        options.name_policy = NamePolicy::Document;
    }
    if flags & 2 != 0 {
        options.accepted_sentinels.clear();
    }

    let Ok(doc) = map_to_document(bytes, &options) else {
        return;
    };
    doc.assert_invariants();

    let text = doc.to_bytes();
    assert_eq!(text.first(), Some(&b'{'));
    assert_eq!(text.last(), Some(&b'}'));
}

fuzz_target!(|data: &[u8]| decoder(data));
