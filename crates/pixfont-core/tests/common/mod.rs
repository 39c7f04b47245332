//! Scratch glyph trees for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use pixfont_bitmap::{MonoBitmap, Rgb};

/// A 3x3 glyph whose ink pattern is derived from `seed`
pub fn glyph(seed: u8) -> MonoBitmap {
    let rows: Vec<Vec<u8>> = (0..3)
        .map(|y| (0..3).map(|x| (seed >> ((y * 3 + x) % 8)) & 1).collect())
        .collect();
    MonoBitmap::from_rows(&rows).unwrap()
}

/// Writes `bitmap` to `root/relative`, creating parent directories
pub fn write_glyph(root: &Path, relative: &str, bitmap: &MonoBitmap) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    bitmap.save_png(&path, Rgb::BLACK).unwrap();
    path
}

/// The tree used by most context tests
pub fn context_tree(root: &Path) {
    write_glyph(root, "notdef.png", &glyph(0xFF));
    write_glyph(root, "4E11.png", &glyph(1));
    write_glyph(root, "4E11 zh_cn.png", &glyph(2));
    write_glyph(root, "6AA4.png", &glyph(3));
    write_glyph(root, "6AA4 zh_hk,zh_tw.png", &glyph(4));
    write_glyph(root, "nested/6AA4 ko,zh_tr.png", &glyph(5));
    fs::write(root.join("README.md"), "not a glyph").unwrap();
}

/// Every file below `root`, relative and sorted
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}
