//! CLI smoke tests
//!
//! Each test builds a scratch glyph tree and runs the real binary on it.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pixfont_bitmap::{MonoBitmap, Rgb};
use tempfile::TempDir;

fn pixfont(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pixfont"))
        .args(args)
        .env_remove("PIXFONT_FLAVORS")
        .output()
        .expect("Failed to run pixfont")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn bitmap(rows: &[&str]) -> MonoBitmap {
    let rows: Vec<Vec<u8>> = rows
        .iter()
        .map(|row| row.bytes().map(|cell| u8::from(cell == b'#')).collect())
        .collect();
    MonoBitmap::from_rows(&rows).unwrap()
}

fn write_glyph(root: &Path, relative: &str, glyph: &MonoBitmap) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    glyph.save_png(&path, Rgb::BLACK).unwrap();
}

fn small_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let dot = bitmap(&["#.", ".#"]);
    write_glyph(dir.path(), "notdef.png", &bitmap(&["##", "##"]));
    write_glyph(dir.path(), "0041.png", &dot);
    write_glyph(dir.path(), "0041 ja.png", &bitmap(&["##", ".."]));
    write_glyph(dir.path(), "latin/0042.png", &dot);
    dir
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_help() {
    let output = pixfont(&["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("canonicalize"));
    assert!(text.contains("mapping-format"));
}

#[test]
fn test_sequence() {
    let tree = small_tree();
    let output = pixfont(&["sequence", path_arg(tree.path())]);
    assert!(output.status.success());
    let names: Vec<String> = stdout(&output)
        .lines()
        .map(|line| line.split('\t').next().unwrap().to_string())
        .collect();
    assert_eq!(names, [".notdef", "u0041", "u0042"]);

    let output = pixfont(&["sequence", path_arg(tree.path()), "--flavors", "ja"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 4);
    assert!(text.lines().last().unwrap().starts_with("u0041-JA\t"));
}

#[test]
fn test_cmap() {
    let tree = small_tree();
    let output = pixfont(&["cmap", path_arg(tree.path()), "--flavor", "ja"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0x0041\tu0041-JA\n0x0042\tu0042\n");

    let output = pixfont(&["cmap", path_arg(tree.path()), "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["0x0041"], "u0041");
    assert_eq!(json["0x0042"], "u0042");
}

#[test]
fn test_cmap_fails_without_default() {
    let tree = TempDir::new().unwrap();
    write_glyph(tree.path(), "0041 ja.png", &bitmap(&["#"]));
    write_glyph(tree.path(), "0042.png", &bitmap(&["#"]));

    let output = pixfont(&["cmap", path_arg(tree.path())]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("0x0041"));

    let output = pixfont(&["sequence", path_arg(tree.path())]);
    assert!(!output.status.success());

    let output = pixfont(&["cmap", path_arg(tree.path()), "--flavor", "ja"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0x0041\tu0041-JA\n0x0042\tu0042\n");
}

#[test]
fn test_cmap_with_mapping() {
    let tree = small_tree();
    let mapping = tree.path().join("mapping.yaml");
    fs::write(&mapping, "0x0391: {~: 0x41, ja: 0x41 ja}\n").unwrap();
    let output = pixfont(&[
        "cmap",
        path_arg(tree.path()),
        "--flavor",
        "ja",
        "--mapping",
        path_arg(&mapping),
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("0x0391\tu0041-JA\n"));
}

#[test]
fn test_canonicalize() {
    let tree = small_tree();
    let output = pixfont(&["canonicalize", path_arg(tree.path())]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let latin = tree.path().join("0000-007F Basic Latin");
    assert!(latin.join("0041.png").is_file());
    assert!(latin.join("0041 ja.png").is_file());
    assert!(latin.join("0042.png").is_file());
    assert!(tree.path().join("notdef.png").is_file());
    assert!(!tree.path().join("latin").exists());

    let output = pixfont(&["canonicalize", path_arg(tree.path())]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("0 moved"));
}

#[test]
fn test_mapping_format() {
    let dir = TempDir::new().unwrap();
    let mapping = dir.path().join("mapping.yaml");
    fs::write(&mapping, "0x43: {~: 0x41}\n").unwrap();

    let output = pixfont(&["mapping-format", path_arg(&mapping), "--check"]);
    assert!(!output.status.success());

    let output = pixfont(&["mapping-format", path_arg(&mapping)]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(&mapping).unwrap(),
        "\n# C\n0x0043:\n  # A\n  ~: 0x0041\n"
    );

    let output = pixfont(&["mapping-format", path_arg(&mapping), "--check"]);
    assert!(output.status.success());
}

#[test]
fn test_kerning() {
    let tree = TempDir::new().unwrap();
    write_glyph(
        tree.path(),
        "0054.png",
        &bitmap(&[
            ".#####.", "...#...", "...#...", "...#...", "...#...", "...#...", ".......",
        ]),
    );
    write_glyph(
        tree.path(),
        "006F.png",
        &bitmap(&[
            ".......", ".#####.", ".#...#.", ".#...#.", ".#...#.", ".#####.", ".......",
        ]),
    );
    let config = tree.path().join("kerning.yaml");
    fs::write(&config, "groups:\n  l: T\n  r: o\ntemplates:\n  l,r: -3\n").unwrap();

    let output = pixfont(&["kerning", path_arg(tree.path()), path_arg(&config)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output), "u0054\tu006F\t-1\n");

    let output = pixfont(&["kerning", path_arg(tree.path()), path_arg(&config), "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json[0]["left"], "u0054");
    assert_eq!(json[0]["value"], -1);
}

#[test]
fn test_draw_and_bold() {
    let dir = TempDir::new().unwrap();
    write_glyph(dir.path(), "in.png", &bitmap(&["#..", "...", "..#"]));
    let input = dir.path().join("in.png");

    let output = pixfont(&["draw", path_arg(&input), "--ink", "#", "--background", "."]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "#..|\n...|\n..#|\n");

    let bold = dir.path().join("bold.png");
    let output = pixfont(&[
        "bold",
        path_arg(&input),
        "--output",
        path_arg(&bold),
        "--method",
        "move-right",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(MonoBitmap::load_png(&bold).unwrap().has_ink());

    let output = pixfont(&["bold", path_arg(&input), "-o", path_arg(&bold), "-m", "heavy"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_tree_fails() {
    let output = pixfont(&["sequence", "/nonexistent/pixfont/tree"]);
    assert!(!output.status.success());
}
