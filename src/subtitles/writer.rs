use super::types::CaptionEntry;
use super::utils::format_timestamp;
use crate::errors::{IoError, SubsyncResult};
use log::info;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Render entries as SRT text: index, timing line, text, blank separator
pub fn render_srt(entries: &[CaptionEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        // Writing into a String cannot fail
        let _ = write!(
            out,
            "{}\n{} --> {}\n{}\n\n",
            entry.id,
            format_timestamp(entry.start_ms),
            format_timestamp(entry.end_ms),
            entry.text
        );
    }
    out
}

/// Write entries to `path`, replacing any existing file.
///
/// The text is rendered up front so the destination is only touched once
/// there is a complete document to put in it.
pub fn write_srt_file(path: impl AsRef<Path>, entries: &[CaptionEntry]) -> SubsyncResult<()> {
    let path = path.as_ref();
    let rendered = render_srt(entries);
    fs::write(path, rendered).map_err(|e| IoError::new(path, e))?;
    info!("Wrote {} caption entries to {}", entries.len(), path.display());
    Ok(())
}
