mod parser;
mod types;
mod utils;
mod writer;

pub use parser::{parse_srt, parse_srt_file};
pub use types::{CaptionEntry, ParseOptions};
pub use utils::{format_timestamp, parse_timestamp};
pub use writer::{render_srt, write_srt_file};

#[cfg(test)]
pub mod unit_test;
