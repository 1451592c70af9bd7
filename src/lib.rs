pub mod config;
pub use config::SyncConfig;

pub mod subtitles;
pub use subtitles::{CaptionEntry, ParseOptions};

pub mod sync;
pub use sync::{AffineTransform, AlignmentReport, AlignmentResult, FingerprintSet};

pub mod errors;
pub use errors::{AlignmentError, IoError, ParseError, SubsyncError, SubsyncResult};

pub use sync::{align_tracks, sync_files, sync_files_with_report};
