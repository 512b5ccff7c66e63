//! WOFF 1.0: an sfnt whose tables are individually zlib-compressed.

use crate::domain::model::FileType;
use crate::domain::ports::FontDecoder;
use crate::fonts::{name, Cursor, NAME_TAG};
use crate::utils::error::FontDecodeError;
use std::cmp::Ordering;

const WOFF_SIGNATURE: u32 = u32::from_be_bytes(*b"wOFF");
const HEADER_LEN: usize = 44;
const DIRECTORY_ENTRY_LEN: usize = 20;

#[derive(Debug, Clone, Copy, Default)]
pub struct WoffDecoder;

impl FontDecoder for WoffDecoder {
    fn label(&self) -> &'static str {
        "woff"
    }

    fn handles(&self, file_type: FileType) -> bool {
        file_type == FileType::Woff
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, FontDecodeError> {
        let table = name_table(bytes)?;
        name::full_name_from_table(&table)
    }
}

fn name_table(bytes: &[u8]) -> Result<Vec<u8>, FontDecodeError> {
    let cursor = Cursor::new(bytes, 0);
    if cursor.u32_at(0)? != WOFF_SIGNATURE {
        return Err(FontDecodeError::Format("missing wOFF signature".to_string()));
    }

    let num_tables = cursor.u16_at(12)? as usize;
    for index in 0..num_tables {
        let entry = HEADER_LEN + index * DIRECTORY_ENTRY_LEN;
        if cursor.u32_at(entry)? != NAME_TAG {
            continue;
        }

        let offset = cursor.u32_at(entry + 4)? as usize;
        let comp_length = cursor.u32_at(entry + 8)? as usize;
        let orig_length = cursor.u32_at(entry + 12)? as usize;
        let stored = offset
            .checked_add(comp_length)
            .and_then(|end| bytes.get(offset..end))
            .ok_or(FontDecodeError::Truncated)?;

        return match comp_length.cmp(&orig_length) {
            Ordering::Less => miniz_oxide::inflate::decompress_to_vec_zlib(stored)
                .map_err(|e| FontDecodeError::Decompress(format!("{:?}", e))),
            Ordering::Equal => Ok(stored.to_vec()),
            Ordering::Greater => Err(FontDecodeError::Format(
                "compressed table is larger than the original".to_string(),
            )),
        };
    }

    Err(FontDecodeError::MissingName)
}
