// CLI integration tests: argument and prompt flows, failure exit codes.
use std::{
    fs,
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
};

use spmap::{MapArea, MapHeader, PlacedTile, TileMap};

fn cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_spmap"))
}

fn sample_map(sentinel: i32) -> Vec<u8> {
    let mut map = TileMap {
        header: MapHeader {
            sentinel,
            tile_width: 32,
            tile_height: 32,
            map_width: 4,
            map_height: 3,
            ..MapHeader::default()
        },
        tile_filenames: vec!["grass.bmp".into(), r"tiles\rock.bmp".into()],
        map_areas: vec![MapArea {
            area_type: 2,
            x0: 0,
            y0: 0,
            x1: 3,
            y1: 2,
        }],
        placed_tiles: vec![PlacedTile {
            x: 1,
            y: 2,
            tile_index: 1,
        }],
        unknown_values: vec![9],
        ..TileMap::default()
    };
    map.sync_counts();
    map.encode()
}

fn run_with_stdin(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = cmd()
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait")
}

#[test]
fn converts_the_named_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = temp.path().join("forest1_2.map");
    let output = temp.path().join("out.json");
    fs::write(&input, sample_map(MapHeader::SENTINEL)).expect("write map");

    let run = cmd()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .expect("run");
    assert!(run.status.success(), "stderr: {}", String::from_utf8_lossy(&run.stderr));

    let text = fs::read_to_string(&output).expect("output written");
    assert!(text.starts_with("{\n\t\"meta_data\": {\n\t\t\"map_type\": -1,\n"));
    assert!(text.contains(
        "\t\"tile_filenames\": [\n\t\t\"grass.bmp\",\n\t\t\"tiles\\\\rock.bmp\"\n\t],\n"
    ));
    assert!(text.contains("\t\t\t\"tile_index\": 1\n"));
    assert!(text.ends_with("\t\"unknown_values\": [\n\t\t9\n\t]\n}"));
}

#[test]
fn code_page_filenames_are_written_byte_for_byte() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = temp.path().join("korean.map");
    let output = temp.path().join("korean.json");
    let mut map = TileMap {
        header: MapHeader {
            sentinel: MapHeader::SENTINEL,
            ..MapHeader::default()
        },
        tile_filenames: vec![b"\xB8\xCA.bmp".as_slice().into()],
        ..TileMap::default()
    };
    map.sync_counts();
    fs::write(&input, map.encode()).expect("write map");

    let run = cmd().arg(&input).arg("-o").arg(&output).output().expect("run");
    assert!(run.status.success(), "stderr: {}", String::from_utf8_lossy(&run.stderr));

    let written = fs::read(&output).expect("output written");
    let needle = b"\t\t\"\xB8\xCA.bmp\"\n";
    assert!(written.windows(needle.len()).any(|w| w == needle));
}

#[test]
fn prompts_until_the_map_exists_and_writes_map_json() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("forest1_2.map"), sample_map(MapHeader::LEGACY_SENTINEL))
        .expect("write map");

    let run = run_with_stdin(temp.path(), &[], "missing.map\nforest1_2.map\n");
    assert!(run.status.success(), "stderr: {}", String::from_utf8_lossy(&run.stderr));

    let stdout = String::from_utf8_lossy(&run.stdout);
    assert_eq!(stdout.matches("> Type map file name (e.g. forest1_2.map)").count(), 2);
    assert!(stdout.contains("> Couldn't find the map named \"missing.map\""));

    let text = fs::read_to_string(temp.path().join("map.json")).expect("map.json written");
    assert!(text.contains("\"map_type\": -11,"));
}

#[test]
fn end_of_input_without_a_map_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    let run = run_with_stdin(temp.path(), &[], "");
    assert_eq!(run.status.code(), Some(1));
    assert!(!temp.path().join("map.json").exists());
}

#[test]
fn unexpected_sentinel_fails_without_writing_output() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = temp.path().join("odd.map");
    let output = temp.path().join("odd.json");
    fs::write(&input, sample_map(7)).expect("write map");

    let run = cmd()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .expect("run");
    assert_eq!(run.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&run.stderr).contains("sentinel"));
    assert!(!output.exists());

    let run = cmd()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--sentinel", "7"])
        .output()
        .expect("run");
    assert!(run.status.success());
    assert!(output.exists());
}

#[test]
fn truncated_file_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = temp.path().join("short.map");
    let mut bytes = sample_map(MapHeader::SENTINEL);
    bytes.truncate(MapHeader::SIZE + 10);
    fs::write(&input, bytes).expect("write map");

    let run = cmd()
        .arg(&input)
        .arg("-o")
        .arg(temp.path().join("short.json"))
        .output()
        .expect("run");
    assert_eq!(run.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&run.stderr).contains("tile_filenames"));
}

#[test]
fn missing_input_file_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    let run = cmd()
        .arg(temp.path().join("nope.map"))
        .arg("-o")
        .arg(temp.path().join("nope.json"))
        .output()
        .expect("run");
    assert_eq!(run.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&run.stderr).contains("failed to read"));
}
