use serde::Serialize;

/// Gap between two consecutive caption starts and the start that ends it
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGap {
    pub delta_ms: i64,
    pub at_ms: u64,
}

/// Landmark times of a track, ascending
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct FingerprintSet {
    landmarks: Vec<u64>,
}

impl FingerprintSet {
    /// Build a set from arbitrary landmark times; they are sorted here.
    pub fn new(mut landmarks: Vec<u64>) -> Self {
        landmarks.sort_unstable();
        Self { landmarks }
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.landmarks
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u64> {
        self.landmarks.get(index).copied()
    }

    pub(crate) fn to_f64(&self) -> Vec<f64> {
        self.landmarks.iter().map(|&ms| ms as f64).collect()
    }
}

/// Affine map from target-track time onto the reference timeline:
/// `ref_time + (t - target_time) * scale`
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub scale: f64,
    pub ref_time: f64,
    pub target_time: f64,
}

impl AffineTransform {
    pub fn new(scale: f64, ref_time: f64, target_time: f64) -> Self {
        Self {
            scale,
            ref_time,
            target_time,
        }
    }

    /// A pure shift by `offset_ms`
    pub fn shift(offset_ms: f64) -> Self {
        Self::new(1.0, offset_ms, 0.0)
    }

    pub fn apply(&self, t: f64) -> f64 {
        self.ref_time + (t - self.target_time) * self.scale
    }

    /// Where target time zero lands on the reference timeline
    pub fn offset_ms(&self) -> f64 {
        self.apply(0.0)
    }
}

/// Landmark indices a hypothesis pairs up: `target.0 ↔ synced.0`, `target.1 ↔ synced.1`
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Correspondence {
    pub synced: (usize, usize),
    pub target: (usize, usize),
}

/// A scored hypothesis
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct AlignmentResult {
    pub transform: AffineTransform,
    /// Mean residual over matched landmarks, in ms
    pub score: f64,
    pub correspondence: Correspondence,
    /// Distinct reference landmarks matched
    pub matched: usize,
}
