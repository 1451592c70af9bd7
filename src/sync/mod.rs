mod fingerprint;
mod report;
mod search;
mod transform;
mod types;

pub use fingerprint::{extract_fingerprint, fingerprint_entries, GapBuffer, GapExtractor};
pub use report::{AlignmentReport, Anchors, Landmark};
pub use search::{find_best_alignment, score_hypothesis, SearchParams};
pub use transform::{apply_transform, map_timestamp};
pub use types::{AffineTransform, AlignmentResult, Correspondence, FingerprintSet, TimeGap};

use crate::config::SyncConfig;
use crate::errors::{AlignmentError, SubsyncResult};
use crate::subtitles::{format_timestamp, parse_srt_file, write_srt_file, CaptionEntry};
use log::{debug, info};
use std::path::Path;

fn log_fingerprint(label: &str, extractor: &GapExtractor) {
    for gap in extractor.buffer().gaps() {
        debug!(
            "  {} gap {} ms before {}",
            label,
            gap.delta_ms,
            format_timestamp(gap.at_ms)
        );
    }
}

fn fingerprint_with_log(label: &str, entries: &[CaptionEntry], capacity: usize) -> FingerprintSet {
    let mut extractor = GapExtractor::new(capacity);
    for entry in entries {
        extractor.observe(entry.start_ms);
    }
    log_fingerprint(label, &extractor);
    let fingerprint = extractor.finish();
    info!("Extracted {} {} landmarks", fingerprint.len(), label);
    fingerprint
}

/// Find the transform that maps `target` onto `synced`
pub fn align_tracks(
    synced: &[CaptionEntry],
    target: &[CaptionEntry],
    config: &SyncConfig,
) -> Result<AlignmentReport, AlignmentError> {
    config.validate()?;

    let synced_fp = fingerprint_with_log("reference", synced, config.max_landmarks);
    let target_fp = fingerprint_with_log("target", target, config.max_landmarks);

    let alignment = find_best_alignment(
        &synced_fp,
        &target_fp,
        &SearchParams::from(config),
        config.parallel,
    )?;
    let report = AlignmentReport::new(&synced_fp, &target_fp, alignment);

    info!(
        "Anchors: reference {} / {} <- target {} / {}",
        report.anchors.synced[0].timestamp,
        report.anchors.synced[1].timestamp,
        report.anchors.target[0].timestamp,
        report.anchors.target[1].timestamp
    );
    info!(
        "Transform: scale {:.6}, offset {:+.0} ms (score {:.1} ms over {} landmarks)",
        alignment.transform.scale,
        alignment.transform.offset_ms(),
        alignment.score,
        alignment.matched
    );
    Ok(report)
}

/// Re-time `target_path` against `synced_path` and write the result to `output_path`.
///
/// Nothing is written unless parsing and alignment both succeed.
pub fn sync_files(
    synced_path: impl AsRef<Path>,
    target_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &SyncConfig,
) -> SubsyncResult<AlignmentReport> {
    sync_files_with_report(synced_path, target_path, output_path, None::<&Path>, config)
}

/// Like [`sync_files`], also writing the alignment report as JSON.
///
/// The report goes out before the re-timed track, so a report destination
/// that cannot be written fails the run with no output SRT on disk.
pub fn sync_files_with_report(
    synced_path: impl AsRef<Path>,
    target_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    report_path: Option<impl AsRef<Path>>,
    config: &SyncConfig,
) -> SubsyncResult<AlignmentReport> {
    config.validate()?;
    let options = config.parse_options();

    let synced = parse_srt_file(synced_path, &options)?;
    let target = parse_srt_file(target_path, &options)?;

    let report = align_tracks(&synced, &target, config)?;
    let retimed = apply_transform(&target, &report.alignment.transform);
    if let Some(path) = report_path {
        report.write_json(&path)?;
        info!("Alignment report written to {}", path.as_ref().display());
    }
    write_srt_file(output_path, &retimed)?;
    Ok(report)
}
