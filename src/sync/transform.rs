use super::types::AffineTransform;
use crate::subtitles::CaptionEntry;
use log::warn;

/// Map a timestamp through `transform`, rounded to the nearest ms and clamped at zero
pub fn map_timestamp(transform: &AffineTransform, ms: u64) -> u64 {
    let mapped = transform.apply(ms as f64).round();
    if mapped < 0.0 {
        warn!("Timestamp {} ms maps before zero ({} ms), clamping", ms, mapped);
        return 0;
    }
    mapped as u64
}

/// Re-time every entry; ids and text are carried over unchanged
pub fn apply_transform(entries: &[CaptionEntry], transform: &AffineTransform) -> Vec<CaptionEntry> {
    entries
        .iter()
        .map(|entry| {
            let start_ms = map_timestamp(transform, entry.start_ms);
            // Keeps start <= end even if the scale came out negative
            let end_ms = map_timestamp(transform, entry.end_ms).max(start_ms);
            CaptionEntry {
                id: entry.id.clone(),
                start_ms,
                end_ms,
                text: entry.text.clone(),
            }
        })
        .collect()
}
