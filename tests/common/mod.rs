//! Font binaries small enough to build inline: one `name` table holding a
//! single Windows English full-name record.

#![allow(dead_code)]

use std::io::Write;

pub fn name_table(full_name: &str) -> Vec<u8> {
    let encoded: Vec<u8> = full_name.encode_utf16().flat_map(u16::to_be_bytes).collect();
    let mut data = Vec::new();
    // format, count, stringOffset
    for value in [0u16, 1, 18] {
        data.extend_from_slice(&value.to_be_bytes());
    }
    // platform, encoding, language, nameID, length, offset
    for value in [3u16, 1, 0x0409, 4, encoded.len() as u16, 0] {
        data.extend_from_slice(&value.to_be_bytes());
    }
    data.extend_from_slice(&encoded);
    data
}

pub fn ttf(full_name: &str) -> Vec<u8> {
    let table = name_table(full_name);
    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&[0; 6]);
    out.extend_from_slice(b"name");
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&28u32.to_be_bytes());
    out.extend_from_slice(&(table.len() as u32).to_be_bytes());
    out.extend_from_slice(&table);
    out
}

pub fn woff(full_name: &str) -> Vec<u8> {
    let table = name_table(full_name);
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&table, 6);
    let stored = if compressed.len() < table.len() { compressed } else { table.clone() };

    let mut out = Vec::new();
    out.extend_from_slice(b"wOFF");
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&((64 + stored.len()) as u32).to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&[0; 30]);
    out.extend_from_slice(b"name");
    out.extend_from_slice(&64u32.to_be_bytes());
    out.extend_from_slice(&(stored.len() as u32).to_be_bytes());
    out.extend_from_slice(&(table.len() as u32).to_be_bytes());
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&stored);
    out
}

pub fn woff2(full_name: &str) -> Vec<u8> {
    let table = name_table(full_name);
    let mut writer = brotli::CompressorWriter::new(Vec::new(), 4096, 5, 22);
    writer.write_all(&table).unwrap();
    let compressed = writer.into_inner();

    // known-tag index 5 is `name`; the length fits in one UIntBase128 byte
    assert!(table.len() < 128);
    let directory = [5u8, table.len() as u8];

    let mut out = Vec::new();
    out.extend_from_slice(b"wOF2");
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&((48 + directory.len() + compressed.len()) as u32).to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&((28 + table.len()) as u32).to_be_bytes());
    out.extend_from_slice(&(compressed.len() as u32).to_be_bytes());
    out.extend_from_slice(&[0; 24]);
    out.extend_from_slice(&directory);
    out.extend_from_slice(&compressed);
    out
}
