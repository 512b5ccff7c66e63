use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

/// Writes one JSON document followed by a newline, then flushes.
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(writer, "{}", json)?;
    writer.flush()?;
    Ok(())
}
