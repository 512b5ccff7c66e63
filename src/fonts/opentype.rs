use crate::domain::model::FileType;
use crate::domain::ports::FontDecoder;
use crate::fonts::{name, Cursor};
use crate::utils::error::FontDecodeError;
use read_fonts::{FileRef, TableProvider};

const SFNT_SIGNATURES: [u32; 4] = [
    0x0001_0000,
    u32::from_be_bytes(*b"OTTO"),
    u32::from_be_bytes(*b"true"),
    u32::from_be_bytes(*b"ttcf"),
];

/// Plain sfnt files (TrueType, CFF-flavoured OpenType) and collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenTypeDecoder;

impl FontDecoder for OpenTypeDecoder {
    fn label(&self) -> &'static str {
        "opentype"
    }

    fn handles(&self, file_type: FileType) -> bool {
        matches!(file_type, FileType::Otf | FileType::Ttf)
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, FontDecodeError> {
        let signature = Cursor::new(bytes, 0).u32_at(0)?;
        if !SFNT_SIGNATURES.contains(&signature) {
            return Err(FontDecodeError::Format(format!(
                "not an sfnt (signature {:#010x})",
                signature
            )));
        }

        let file = FileRef::new(bytes).map_err(|e| FontDecodeError::Format(e.to_string()))?;
        // 字型集合只取第一個字型
        let font = match file {
            FileRef::Font(font) => font,
            FileRef::Collection(collection) => collection
                .get(0)
                .map_err(|e| FontDecodeError::Format(e.to_string()))?,
        };

        let name_table = font.name().map_err(|_| FontDecodeError::MissingName)?;
        name::full_name(&name_table)
    }
}
