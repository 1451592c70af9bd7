use super::types::{CaptionEntry, ParseOptions};
use super::utils::parse_timestamp;
use crate::errors::{IoError, ParseError, SubsyncResult};
use log::{debug, info, warn};
use std::fs;
use std::iter::Peekable;
use std::path::Path;

const TIMING_SEPARATOR: &str = "-->";

/// Read and parse an SRT file, dropping filler captions.
///
/// The file must be UTF-8; other encodings fail with a [`ParseError`] on the
/// line holding the first undecodable byte.
pub fn parse_srt_file(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> SubsyncResult<Vec<CaptionEntry>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| IoError::new(path, e))?;
    let content = decode_utf8(&bytes).map_err(|e| e.with_path(path))?;
    let entries = parse_srt(content, options).map_err(|e| e.with_path(path))?;
    info!("Parsed {} caption entries from {}", entries.len(), path.display());
    Ok(entries)
}

fn decode_utf8(bytes: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        ParseError::new(
            line,
            format!(
                "invalid UTF-8 at byte {}; re-encode the file as UTF-8",
                e.valid_up_to()
            ),
        )
    })
}

/// Parse SRT text into caption entries in file order.
///
/// Blocks whose text matches one of the filler markers are left out
/// entirely. Parsing stops at the first malformed block.
pub fn parse_srt(input: &str, options: &ParseOptions) -> Result<Vec<CaptionEntry>, ParseError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .peekable();

    let mut entries = Vec::new();
    let mut dropped = 0usize;

    while let Some(entry) = next_block(&mut lines)? {
        if options.is_filler(&entry.text) {
            warn!("Dropping filler caption #{}: {:?}", entry.id, entry.text);
            dropped += 1;
            continue;
        }
        entries.push(entry);
    }

    debug!("Kept {} caption blocks, dropped {}", entries.len(), dropped);
    Ok(entries)
}

fn next_block<'a, I>(lines: &mut Peekable<I>) -> Result<Option<CaptionEntry>, ParseError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    // Skip separators between blocks
    while lines.next_if(|(_, line)| line.is_empty()).is_some() {}

    let Some((id_line, id)) = lines.next() else {
        return Ok(None);
    };
    if id.contains(TIMING_SEPARATOR) {
        return Err(ParseError::new(
            id_line,
            "expected caption index, found timing line",
        ));
    }

    let (timing_line, timing) = match lines.next() {
        Some((no, line)) if !line.is_empty() => (no, line),
        Some((no, _)) => {
            return Err(ParseError::new(
                no,
                format!("truncated block: caption {} has no timing line", id),
            ))
        }
        None => {
            return Err(ParseError::new(
                id_line + 1,
                format!("truncated block: caption {} ends before its timing line", id),
            ))
        }
    };
    let (start_ms, end_ms) =
        parse_timing_line(timing).map_err(|message| ParseError::new(timing_line, message))?;
    if end_ms < start_ms {
        return Err(ParseError::new(
            timing_line,
            format!("caption {} ends before it starts", id),
        ));
    }

    let mut text = Vec::new();
    while let Some((_, line)) = lines.next_if(|(_, line)| !line.is_empty()) {
        text.push(line);
    }

    Ok(Some(CaptionEntry {
        id: id.to_string(),
        start_ms,
        end_ms,
        text: text.join("\n"),
    }))
}

/// Parse a `start --> end` line, ignoring any trailing position coordinates
fn parse_timing_line(line: &str) -> Result<(u64, u64), String> {
    let (start, rest) = line
        .split_once(TIMING_SEPARATOR)
        .ok_or_else(|| format!("missing '{}' separator in {:?}", TIMING_SEPARATOR, line))?;
    let end = rest.split_whitespace().next().unwrap_or("");

    let start_ms = parse_timestamp(start)
        .ok_or_else(|| format!("malformed start timestamp {:?}", start.trim()))?;
    let end_ms = parse_timestamp(end).ok_or_else(|| format!("malformed end timestamp {:?}", end))?;
    Ok((start_ms, end_ms))
}
