#![allow(dead_code)]

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Builds a zip archive in memory from `(name, content)` pairs
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Builds a deflated single-file archive whose compressed payload is damaged
///
/// The central directory stays intact, so the archive opens and fails only
/// when the entry is read.
pub fn damaged_zip_bytes(name: &str, content: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    writer.start_file(name, options).unwrap();
    writer.write_all(content.repeat(20).as_bytes()).unwrap();
    let mut bytes = writer.finish().unwrap().into_inner();

    let name_len = u16::from_le_bytes([bytes[26], bytes[27]]) as usize;
    let extra_len = u16::from_le_bytes([bytes[28], bytes[29]]) as usize;
    bytes[30 + name_len + extra_len + 2] ^= 0xFF;
    bytes
}

/// Writes a gradebook archive holding the given entries into `root`
pub fn write_gradebook(root: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = root.join("gradebook.zip");
    let mut file = File::create(&path).unwrap();
    file.write_all(&zip_bytes(entries)).unwrap();
    path
}
