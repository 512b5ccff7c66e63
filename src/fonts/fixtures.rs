//! Minimal font binaries for decoder tests.

use crate::fonts::woff2::KNOWN_TAGS;
use std::io::Write;

pub struct NameEntry {
    platform_id: u16,
    encoding_id: u16,
    language_id: u16,
    name_id: u16,
    text: String,
}

impl NameEntry {
    pub fn windows(name_id: u16, language_id: u16, text: &str) -> Self {
        Self {
            platform_id: 3,
            encoding_id: 1,
            language_id,
            name_id,
            text: text.to_string(),
        }
    }

    pub fn mac(name_id: u16, text: &str) -> Self {
        Self {
            platform_id: 1,
            encoding_id: 0,
            language_id: 0,
            name_id,
            text: text.to_string(),
        }
    }

    fn encoded(&self) -> Vec<u8> {
        if self.platform_id == 1 {
            self.text.bytes().collect()
        } else {
            self.text.encode_utf16().flat_map(u16::to_be_bytes).collect()
        }
    }
}

pub fn name_table(entries: &[NameEntry]) -> Vec<u8> {
    let mut data = Vec::new();
    let mut strings = Vec::new();
    data.extend_from_slice(&0u16.to_be_bytes());
    data.extend_from_slice(&(entries.len() as u16).to_be_bytes());
    data.extend_from_slice(&((6 + 12 * entries.len()) as u16).to_be_bytes());

    for entry in entries {
        let encoded = entry.encoded();
        for value in [
            entry.platform_id,
            entry.encoding_id,
            entry.language_id,
            entry.name_id,
            encoded.len() as u16,
            strings.len() as u16,
        ] {
            data.extend_from_slice(&value.to_be_bytes());
        }
        strings.extend_from_slice(&encoded);
    }

    data.extend_from_slice(&strings);
    data
}

fn pad4(data: &mut Vec<u8>) {
    while data.len() % 4 != 0 {
        data.push(0);
    }
}

pub fn sfnt(tables: &[([u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut header = Vec::new();
    header.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    header.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    header.extend_from_slice(&[0; 6]);

    let mut body = Vec::new();
    let data_start = 12 + 16 * tables.len();
    for (tag, table) in tables {
        header.extend_from_slice(tag);
        header.extend_from_slice(&0u32.to_be_bytes());
        header.extend_from_slice(&((data_start + body.len()) as u32).to_be_bytes());
        header.extend_from_slice(&(table.len() as u32).to_be_bytes());
        body.extend_from_slice(table);
        pad4(&mut body);
    }

    header.extend_from_slice(&body);
    header
}

/// A `ttcf` collection; each member must be a single-table font from `sfnt`.
pub fn ttc(fonts: &[Vec<u8>]) -> Vec<u8> {
    let header_len = 12 + 4 * fonts.len();
    let mut out = Vec::new();
    out.extend_from_slice(b"ttcf");
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&(fonts.len() as u32).to_be_bytes());

    let mut offsets = Vec::new();
    let mut cursor = header_len;
    for font in fonts {
        offsets.push(cursor as u32);
        cursor += font.len();
    }
    for offset in &offsets {
        out.extend_from_slice(&offset.to_be_bytes());
    }

    // 表格位移是相對整個檔案，所以要依各字型的起點重寫
    for (font, base) in fonts.iter().zip(offsets) {
        let mut font = font.clone();
        let num_tables = u16::from_be_bytes([font[4], font[5]]) as usize;
        for index in 0..num_tables {
            let at = 12 + 16 * index + 8;
            let offset = u32::from_be_bytes([font[at], font[at + 1], font[at + 2], font[at + 3]]);
            font[at..at + 4].copy_from_slice(&(offset + base).to_be_bytes());
        }
        out.extend_from_slice(&font);
    }
    out
}

pub fn woff(tables: &[([u8; 4], Vec<u8>)], compress: bool) -> Vec<u8> {
    let directory_end = 44 + 20 * tables.len();
    let mut directory = Vec::new();
    let mut body = Vec::new();

    for (tag, table) in tables {
        let stored = if compress {
            miniz_oxide::deflate::compress_to_vec_zlib(table, 6)
        } else {
            table.clone()
        };
        let stored = if stored.len() < table.len() { stored } else { table.clone() };

        directory.extend_from_slice(tag);
        directory.extend_from_slice(&((directory_end + body.len()) as u32).to_be_bytes());
        directory.extend_from_slice(&(stored.len() as u32).to_be_bytes());
        directory.extend_from_slice(&(table.len() as u32).to_be_bytes());
        directory.extend_from_slice(&0u32.to_be_bytes());
        body.extend_from_slice(&stored);
        pad4(&mut body);
    }

    let total = directory_end + body.len();
    let mut out = Vec::new();
    out.extend_from_slice(b"wOFF");
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&(total as u32).to_be_bytes());
    out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&[0; 20]);
    out.extend_from_slice(&directory);
    out.extend_from_slice(&body);
    out
}

pub fn base128(mut value: u32) -> Vec<u8> {
    let mut bytes = vec![(value & 0x7f) as u8];
    value >>= 7;
    while value > 0 {
        bytes.push((value & 0x7f) as u8 | 0x80);
        value >>= 7;
    }
    bytes.reverse();
    bytes
}

/// One WOFF2 directory entry. `data` is what lands in the brotli stream.
pub struct Woff2Table {
    pub tag: [u8; 4],
    pub orig_length: u32,
    pub data: Vec<u8>,
    pub transformed: bool,
}

impl Woff2Table {
    pub fn plain(tag: [u8; 4], data: Vec<u8>) -> Self {
        Self {
            tag,
            orig_length: data.len() as u32,
            data,
            transformed: false,
        }
    }

    /// `data.len()` is written as the transformLength.
    pub fn transformed(tag: [u8; 4], orig_length: u32, data: Vec<u8>) -> Self {
        Self {
            tag,
            orig_length,
            data,
            transformed: true,
        }
    }

    fn transform_version(&self) -> u8 {
        let glyf_or_loca = &self.tag == b"glyf" || &self.tag == b"loca";
        match (glyf_or_loca, self.transformed) {
            (true, true) => 0,
            (true, false) => 3,
            (false, true) => 1,
            (false, false) => 0,
        }
    }
}

/// Tables are stored untransformed.
pub fn woff2(tables: &[([u8; 4], Vec<u8>)]) -> Vec<u8> {
    let tables: Vec<Woff2Table> = tables
        .iter()
        .map(|(tag, data)| Woff2Table::plain(*tag, data.clone()))
        .collect();
    woff2_tables(&tables)
}

pub fn woff2_tables(tables: &[Woff2Table]) -> Vec<u8> {
    let mut directory = Vec::new();
    let mut stream = Vec::new();

    for table in tables {
        let version = table.transform_version() << 6;
        match KNOWN_TAGS.iter().position(|known| **known == table.tag) {
            Some(index) => directory.push(index as u8 | version),
            None => {
                directory.push(0x3f | version);
                directory.extend_from_slice(&table.tag);
            }
        }
        directory.extend_from_slice(&base128(table.orig_length));
        if table.transformed {
            directory.extend_from_slice(&base128(table.data.len() as u32));
        }
        stream.extend_from_slice(&table.data);
    }

    let mut writer = brotli::CompressorWriter::new(Vec::new(), 4096, 5, 22);
    writer.write_all(&stream).unwrap();
    let compressed = writer.into_inner();

    let orig_total: u32 = tables.iter().map(|table| table.orig_length).sum();
    let mut body = directory;
    body.extend_from_slice(&compressed);
    pad4(&mut body);

    let mut out = Vec::new();
    out.extend_from_slice(b"wOF2");
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&((48 + body.len()) as u32).to_be_bytes());
    out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&(12 + 16 * tables.len() as u32 + orig_total).to_be_bytes());
    out.extend_from_slice(&(compressed.len() as u32).to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&[0; 20]);
    out.extend_from_slice(&body);
    out
}
