//! WOFF 2.0: a variable-length table directory followed by one brotli stream
//! holding every table back to back.
//!
//! The `name` table is never transformed, so its bytes can be sliced straight
//! out of the decompressed stream, which is inflated only up to the end of it.

use crate::domain::model::FileType;
use crate::domain::ports::FontDecoder;
use crate::fonts::{name, Cursor, NAME_TAG};
use crate::utils::error::FontDecodeError;
use std::io::Read;

const WOFF2_SIGNATURE: u32 = u32::from_be_bytes(*b"wOF2");
const TTC_FLAVOR: u32 = u32::from_be_bytes(*b"ttcf");
const HEADER_LEN: usize = 48;
const CUSTOM_TAG_FLAG: u8 = 0x3f;
const GLYF_TAG: u32 = u32::from_be_bytes(*b"glyf");
const LOCA_TAG: u32 = u32::from_be_bytes(*b"loca");
const MAX_STREAM_LEN: u64 = 64 * 1024 * 1024;

/// Tags addressed by the low six flag bits of a directory entry.
pub(crate) const KNOWN_TAGS: [&[u8; 4]; 63] = [
    b"cmap", b"head", b"hhea", b"hmtx", b"maxp", b"name", b"OS/2", b"post", b"cvt ", b"fpgm",
    b"glyf", b"loca", b"prep", b"CFF ", b"VORG", b"EBDT", b"EBLC", b"gasp", b"hdmx", b"kern",
    b"LTSH", b"PCLT", b"VDMX", b"vhea", b"vmtx", b"BASE", b"GDEF", b"GPOS", b"GSUB", b"EBSC",
    b"JSTF", b"MATH", b"CBDT", b"CBLC", b"COLR", b"CPAL", b"SVG ", b"sbix", b"acnt", b"avar",
    b"bdat", b"bloc", b"bsln", b"cvar", b"fdsc", b"feat", b"fmtx", b"fvar", b"gvar", b"hsty",
    b"just", b"lcar", b"mort", b"morx", b"opbd", b"prop", b"trak", b"Zapf", b"Silf", b"Glat",
    b"Gloc", b"Feat", b"Sill",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Woff2Decoder;

impl FontDecoder for Woff2Decoder {
    fn label(&self) -> &'static str {
        "woff2"
    }

    fn handles(&self, file_type: FileType) -> bool {
        file_type == FileType::Woff2
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, FontDecodeError> {
        let table = name_table(bytes)?;
        name::full_name_from_table(&table)
    }
}

struct TableEntry {
    tag: u32,
    stored_length: usize,
}

fn name_table(bytes: &[u8]) -> Result<Vec<u8>, FontDecodeError> {
    let mut cursor = Cursor::new(bytes, 0);
    if cursor.u32_at(0)? != WOFF2_SIGNATURE {
        return Err(FontDecodeError::Format("missing wOF2 signature".to_string()));
    }
    let flavor = cursor.u32_at(4)?;
    let num_tables = cursor.u16_at(12)? as usize;
    let total_compressed = cursor.u32_at(20)? as usize;

    cursor.pos = HEADER_LEN;
    let mut entries = Vec::with_capacity(num_tables);
    for _ in 0..num_tables {
        entries.push(read_entry(&mut cursor)?);
    }

    let mut name_index = entries.iter().position(|entry| entry.tag == NAME_TAG);
    if flavor == TTC_FLAVOR {
        if let Some(index) = first_font_name_index(&mut cursor, &entries)? {
            name_index = Some(index);
        }
    }
    let name_index = name_index.ok_or(FontDecodeError::MissingName)?;

    let offset = entries[..name_index]
        .iter()
        .try_fold(0u64, |sum, entry| sum.checked_add(entry.stored_length as u64))
        .ok_or(FontDecodeError::Truncated)?;
    let end = offset + entries[name_index].stored_length as u64;
    if end > MAX_STREAM_LEN {
        return Err(FontDecodeError::Format(format!(
            "name table ends at byte {} of the table stream",
            end
        )));
    }

    let start = cursor.pos;
    let compressed = start
        .checked_add(total_compressed)
        .and_then(|stop| bytes.get(start..stop))
        .ok_or(FontDecodeError::Truncated)?;

    // 只解壓到 name 表結尾
    let mut stream = Vec::with_capacity(end as usize);
    brotli::Decompressor::new(compressed, 4096)
        .take(end)
        .read_to_end(&mut stream)
        .map_err(|e| FontDecodeError::Decompress(e.to_string()))?;

    stream
        .get(offset as usize..end as usize)
        .map(<[u8]>::to_vec)
        .ok_or(FontDecodeError::Truncated)
}

fn read_entry(cursor: &mut Cursor<'_>) -> Result<TableEntry, FontDecodeError> {
    let flags = cursor.u8()?;
    let tag = match flags & CUSTOM_TAG_FLAG {
        CUSTOM_TAG_FLAG => cursor.u32()?,
        known => u32::from_be_bytes(*KNOWN_TAGS[known as usize]),
    };
    let orig_length = read_base128(cursor)?;

    // glyf/loca 的 version 0 代表有轉換，其他表則相反
    let transform_version = flags >> 6;
    let transformed = if tag == GLYF_TAG || tag == LOCA_TAG {
        transform_version == 0
    } else {
        transform_version != 0
    };
    let stored_length = if transformed {
        read_base128(cursor)?
    } else {
        orig_length
    };

    Ok(TableEntry {
        tag,
        stored_length: stored_length as usize,
    })
}

/// Walks the collection directory and returns the `name` table index of font 0.
fn first_font_name_index(
    cursor: &mut Cursor<'_>,
    entries: &[TableEntry],
) -> Result<Option<usize>, FontDecodeError> {
    let _version = cursor.u32()?;
    let num_fonts = read_255_u16(cursor)?;
    let mut found = None;

    for font in 0..num_fonts {
        let font_tables = read_255_u16(cursor)?;
        let _flavor = cursor.u32()?;
        for _ in 0..font_tables {
            let index = read_255_u16(cursor)? as usize;
            let is_name = entries.get(index).is_some_and(|entry| entry.tag == NAME_TAG);
            if font == 0 && is_name && found.is_none() {
                found = Some(index);
            }
        }
    }

    Ok(found)
}

fn read_base128(cursor: &mut Cursor<'_>) -> Result<u32, FontDecodeError> {
    let mut accum: u32 = 0;
    for i in 0..5 {
        let byte = cursor.u8()?;
        if i == 0 && byte == 0x80 {
            return Err(FontDecodeError::Format("UIntBase128 with leading zeros".to_string()));
        }
        if accum & 0xFE00_0000 != 0 {
            return Err(FontDecodeError::Format("UIntBase128 overflow".to_string()));
        }
        accum = (accum << 7) | u32::from(byte & 0x7f);
        if byte & 0x80 == 0 {
            return Ok(accum);
        }
    }
    Err(FontDecodeError::Format("UIntBase128 longer than 5 bytes".to_string()))
}

fn read_255_u16(cursor: &mut Cursor<'_>) -> Result<u16, FontDecodeError> {
    const ONE_MORE_BYTE_CODE_1: u8 = 255;
    const ONE_MORE_BYTE_CODE_2: u8 = 254;
    const WORD_CODE: u8 = 253;
    const LOWEST_U_CODE: u16 = 253;

    let code = cursor.u8()?;
    let value = match code {
        WORD_CODE => cursor.u16()?,
        ONE_MORE_BYTE_CODE_1 => u16::from(cursor.u8()?) + LOWEST_U_CODE,
        ONE_MORE_BYTE_CODE_2 => u16::from(cursor.u8()?) + LOWEST_U_CODE * 2,
        _ => u16::from(code),
    };
    Ok(value)
}
