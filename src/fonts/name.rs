//! Full-name lookup in an OpenType `name` table.

use crate::utils::error::FontDecodeError;
use read_fonts::tables::name::Name;
use read_fonts::types::NameId;
use read_fonts::{FontData, FontRead};

const PLATFORM_UNICODE: u16 = 0;
const PLATFORM_WINDOWS: u16 = 3;
const WINDOWS_UNICODE_BMP: u16 = 1;
const LANGUAGE_EN_US: u16 = 0x0409;

/// Picks name ID 4, preferring Windows English, then any Unicode record, then anything decodable.
pub fn full_name(name: &Name<'_>) -> Result<String, FontDecodeError> {
    let mut best: Option<(u8, String)> = None;

    for record in name.name_record() {
        if record.name_id() != NameId::FULL_NAME {
            continue;
        }
        let Ok(name_string) = record.string(name.string_data()) else {
            continue;
        };
        let text: String = name_string.chars().collect();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        let rank = match (record.platform_id(), record.encoding_id(), record.language_id()) {
            (PLATFORM_WINDOWS, WINDOWS_UNICODE_BMP, LANGUAGE_EN_US) => 0,
            (PLATFORM_WINDOWS, _, _) | (PLATFORM_UNICODE, _, _) => 1,
            _ => 2,
        };
        if best.as_ref().map_or(true, |(current, _)| rank < *current) {
            best = Some((rank, text.to_string()));
        }
    }

    best.map(|(_, text)| text).ok_or(FontDecodeError::MissingName)
}

/// Parses a standalone `name` table (as unpacked from a WOFF or WOFF2 container).
pub fn full_name_from_table(table: &[u8]) -> Result<String, FontDecodeError> {
    let name = Name::read(FontData::new(table))
        .map_err(|e| FontDecodeError::Format(format!("bad name table: {}", e)))?;
    full_name(&name)
}
