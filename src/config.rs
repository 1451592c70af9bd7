use crate::errors::AlignmentError;
use crate::subtitles::ParseOptions;

/// Tunables for fingerprinting and the correspondence search
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    /// Number of largest gaps kept as landmarks per track
    pub max_landmarks: usize,
    /// Minimum distance between the two target anchors of a hypothesis
    pub min_anchor_span_ms: f64,
    /// Largest residual accepted as a landmark match
    pub match_tolerance_ms: f64,
    /// Distinct reference landmarks a hypothesis must match to be scored
    pub min_matches: usize,
    /// Case-insensitive markers identifying filler captions to drop
    pub filler_markers: Vec<String>,
    /// Spread the correspondence search over the rayon thread pool
    pub parallel: bool,
}

impl SyncConfig {
    pub const DEFAULT_MAX_LANDMARKS: usize = 30;
    pub const DEFAULT_MIN_ANCHOR_SPAN_MS: f64 = 5.0 * 60.0 * 1000.0;
    pub const DEFAULT_MATCH_TOLERANCE_MS: f64 = 1000.0;
    pub const DEFAULT_MIN_MATCHES: usize = 20;
    pub const DEFAULT_FILLER_MARKER: &'static str = "opensubtitles";

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::new(&self.filler_markers)
    }

    /// Reject settings under which no hypothesis could ever be scored.
    pub fn validate(&self) -> Result<(), AlignmentError> {
        if self.max_landmarks < 2 {
            return Err(AlignmentError::new(format!(
                "at least 2 landmarks are required, got {}",
                self.max_landmarks
            )));
        }
        if self.min_matches == 0 {
            return Err(AlignmentError::new("minimum match count must be positive"));
        }
        if self.min_matches > self.max_landmarks {
            return Err(AlignmentError::new(format!(
                "minimum match count {} exceeds landmark capacity {}",
                self.min_matches, self.max_landmarks
            )));
        }
        if !(self.match_tolerance_ms >= 0.0) || !(self.min_anchor_span_ms >= 0.0) {
            return Err(AlignmentError::new(
                "tolerance and anchor span must be non-negative",
            ));
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_landmarks: Self::DEFAULT_MAX_LANDMARKS,
            min_anchor_span_ms: Self::DEFAULT_MIN_ANCHOR_SPAN_MS,
            match_tolerance_ms: Self::DEFAULT_MATCH_TOLERANCE_MS,
            min_matches: Self::DEFAULT_MIN_MATCHES,
            filler_markers: vec![Self::DEFAULT_FILLER_MARKER.to_string()],
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_config_default() {
        let config = SyncConfig::default();
        assert_eq!(config.max_landmarks, 30);
        assert_eq!(config.min_anchor_span_ms, 300_000.0);
        assert_eq!(config.match_tolerance_ms, 1000.0);
        assert_eq!(config.min_matches, 20);
        assert_eq!(config.filler_markers, vec!["opensubtitles".to_string()]);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unreachable_match_count() {
        let config = SyncConfig {
            max_landmarks: 10,
            ..SyncConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SyncConfig {
            match_tolerance_ms: f64::NAN,
            ..SyncConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
