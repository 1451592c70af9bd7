use crate::errors::SubsyncError;
use crate::subtitles::{
    format_timestamp, parse_srt, parse_srt_file, parse_timestamp, render_srt, CaptionEntry,
    ParseOptions,
};
use proptest::prelude::*;
use std::fs;

#[cfg(test)]
mod test_helpers {
    pub const SAMPLE_SRT: &str = "1\n\
00:00:01,000 --> 00:00:02,500\n\
Hello there.\n\
\n\
2\n\
00:00:04,000 --> 00:00:06,000\n\
Two lines\n\
of text\n\
\n\
3\n\
00:01:10,250 --> 00:01:12,000\n\
Last one.\n";

    pub const FILLER_SRT: &str = "1\n\
00:00:01,000 --> 00:00:02,000\n\
First\n\
\n\
2\n\
00:00:05,000 --> 00:00:07,000\n\
Subtitles downloaded from www.OpenSubtitles.org\n\
\n\
3\n\
00:00:20,000 --> 00:00:21,000\n\
Third\n\
\n";
}

#[test]
fn test_format_timestamp() {
    assert_eq!(format_timestamp(0), "00:00:00,000");
    assert_eq!(format_timestamp(4_693), "00:00:04,693");
    assert_eq!(format_timestamp(3_723_004), "01:02:03,004");
    assert_eq!(format_timestamp(100 * 3_600_000), "100:00:00,000");
}

#[test]
fn test_parse_timestamp() {
    assert_eq!(parse_timestamp("00:00:04,693"), Some(4_693));
    assert_eq!(parse_timestamp("01:02:03,004"), Some(3_723_004));
    assert_eq!(parse_timestamp("01:02:03.004"), Some(3_723_004));
    assert_eq!(parse_timestamp(" 00:00:01,5 "), Some(1_500));
    assert_eq!(parse_timestamp("00:00:01"), Some(1_000));
    assert_eq!(parse_timestamp("00:61:00,000"), None);
    assert_eq!(parse_timestamp("00:00,000"), None);
    assert_eq!(parse_timestamp("aa:00:00,000"), None);
    assert_eq!(parse_timestamp("00:00:00,"), None);
}

#[test]
fn test_parse_srt_blocks() {
    use test_helpers::*;
    let entries = parse_srt(SAMPLE_SRT, &ParseOptions::default()).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(
        entries[0],
        CaptionEntry {
            id: "1".to_string(),
            start_ms: 1_000,
            end_ms: 2_500,
            text: "Hello there.".to_string(),
        }
    );
    assert_eq!(entries[1].text, "Two lines\nof text");
    assert_eq!(entries[2].start_ms, 70_250);
}

#[test]
fn test_parse_srt_tolerates_bom_crlf_and_coordinates() {
    let input = "\u{feff}7\r\n00:00:01,000 --> 00:00:02,000 X1:10 X2:20\r\nHi\r\n";
    let entries = parse_srt(input, &ParseOptions::default()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "7");
    assert_eq!(entries[0].end_ms, 2_000);
    assert_eq!(entries[0].text, "Hi");
}

#[test]
fn test_filler_entries_are_dropped() {
    use test_helpers::*;
    let entries = parse_srt(FILLER_SRT, &ParseOptions::default()).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| !e.text.to_lowercase().contains("opensubtitles")));
    assert_eq!(entries[1].id, "3");

    let keep_all = ParseOptions::new(Vec::<String>::new());
    assert_eq!(parse_srt(FILLER_SRT, &keep_all).unwrap().len(), 3);
}

#[test]
fn test_missing_separator_reports_line() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\nok\n\n2\n00:00:03,000 00:00:04,000\nbad\n";
    let err = parse_srt(input, &ParseOptions::default()).unwrap_err();
    assert_eq!(err.line, 6);
    assert!(err.message.contains("-->"));
}

#[test]
fn test_truncated_block_reports_line() {
    let err = parse_srt("1\n00:00:01,000 --> 00:00:02,000\nok\n\n2\n", &ParseOptions::default())
        .unwrap_err();
    assert_eq!(err.line, 6);
    assert!(err.message.contains("truncated"));

    let err = parse_srt("1\n\n00:00:01,000 --> 00:00:02,000\n", &ParseOptions::default())
        .unwrap_err();
    assert_eq!(err.line, 2);
}

#[test]
fn test_malformed_timestamp_and_reversed_times() {
    let err = parse_srt("1\n00:0x:01,000 --> 00:00:02,000\nt\n", &ParseOptions::default())
        .unwrap_err();
    assert_eq!(err.line, 2);
    assert!(err.message.contains("start"));

    let err = parse_srt("1\n00:00:05,000 --> 00:00:02,000\nt\n", &ParseOptions::default())
        .unwrap_err();
    assert!(err.message.contains("ends before"));
}

#[test]
fn test_oversized_hour_field_is_a_parse_error() {
    assert_eq!(parse_timestamp("99999999999999:00:00,000"), None);
    assert_eq!(parse_timestamp("99999999999999999999999:00:00,000"), None);
    assert_eq!(parse_timestamp("5124095:00:00,000"), Some(5_124_095u64 * 3_600_000));

    let input = "1\n99999999999999:00:00,000 --> 99999999999999:00:01,000\nx\n";
    let err = parse_srt(input, &ParseOptions::default()).unwrap_err();
    assert_eq!(err.line, 2);
    assert!(err.message.contains("start"));
}

#[test]
fn test_non_utf8_file_reports_encoding_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.srt");
    // "Caf\xe9" is Windows-1252 for "Café"
    let mut bytes = b"1\n00:00:01,000 --> 00:00:02,000\nCaf".to_vec();
    bytes.extend_from_slice(&[0xe9, b'\n']);
    fs::write(&path, bytes).unwrap();

    match parse_srt_file(&path, &ParseOptions::default()) {
        Err(SubsyncError::Parse(e)) => {
            assert_eq!(e.line, 3);
            assert!(e.message.contains("UTF-8"));
            assert_eq!(e.path.as_deref(), Some(path.as_path()));
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_render_srt_reparses() {
    use test_helpers::*;
    let entries = parse_srt(SAMPLE_SRT, &ParseOptions::default()).unwrap();
    let rendered = render_srt(&entries);
    assert!(rendered.starts_with("1\n00:00:01,000 --> 00:00:02,500\nHello there.\n\n2\n"));
    assert_eq!(parse_srt(&rendered, &ParseOptions::default()).unwrap(), entries);
}

proptest! {
    #[test]
    fn prop_timestamp_round_trip(ms in 0u64..24 * 3_600_000) {
        prop_assert_eq!(parse_timestamp(&format_timestamp(ms)), Some(ms));
    }
}
