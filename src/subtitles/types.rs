use serde::Serialize;

/// One caption block of an SRT track, times in milliseconds
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CaptionEntry {
    pub id: String,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

/// Options controlling which blocks the parser keeps
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Lowercased substrings marking filler captions (site credits and the like)
    pub filler_markers: Vec<String>,
}

impl ParseOptions {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            filler_markers: markers
                .into_iter()
                .map(|m| m.as_ref().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// True when `text` contains any filler marker, ignoring case
    pub fn is_filler(&self, text: &str) -> bool {
        if self.filler_markers.is_empty() {
            return false;
        }
        let lowered = text.to_lowercase();
        self.filler_markers.iter().any(|m| lowered.contains(m.as_str()))
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new([crate::config::SyncConfig::DEFAULT_FILLER_MARKER])
    }
}
