use super::types::{AffineTransform, AlignmentResult, Correspondence, FingerprintSet};
use crate::config::SyncConfig;
use crate::errors::AlignmentError;
use log::debug;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Thresholds a hypothesis is held to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    pub min_anchor_span_ms: f64,
    pub match_tolerance_ms: f64,
    pub min_matches: usize,
}

impl From<&SyncConfig> for SearchParams {
    fn from(config: &SyncConfig) -> Self {
        Self {
            min_anchor_span_ms: config.min_anchor_span_ms,
            match_tolerance_ms: config.match_tolerance_ms,
            min_matches: config.min_matches,
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::from(&SyncConfig::default())
    }
}

/// Score the hypothesis that `target[n] ↔ synced[i]` and `target[m] ↔ synced[j]`.
///
/// Returns `None` when the hypothesis is rejected: target anchors closer than
/// the minimum span, or fewer than `min_matches` reference landmarks within
/// tolerance of a mapped target landmark. Indices outside either slice also
/// reject the hypothesis.
pub fn score_hypothesis(
    synced: &[f64],
    target: &[f64],
    correspondence: Correspondence,
    params: &SearchParams,
) -> Option<AlignmentResult> {
    let (i, j) = correspondence.synced;
    let (n, m) = correspondence.target;
    let (x0, x1) = (*target.get(n)?, *target.get(m)?);
    let span = x1 - x0;
    if span < params.min_anchor_span_ms || span <= 0.0 {
        return None;
    }

    let (y0, y1) = (*synced.get(i)?, *synced.get(j)?);
    let transform = AffineTransform::new((y1 - y0) / span, y0, x0);

    // Closest residual per reference landmark
    let mut best_per_ref: Vec<Option<f64>> = vec![None; synced.len()];
    for &x in target {
        let y = transform.apply(x);
        let mut nearest: Option<(usize, f64)> = None;
        for (l, &s) in synced.iter().enumerate() {
            let dist = (y - s).abs();
            if dist > params.match_tolerance_ms {
                continue;
            }
            if nearest.map_or(true, |(_, d)| dist < d) {
                nearest = Some((l, dist));
            }
        }
        if let Some((l, dist)) = nearest {
            let slot = &mut best_per_ref[l];
            *slot = Some(slot.map_or(dist, |d| d.min(dist)));
        }
    }

    let matched = best_per_ref.iter().flatten().count();
    if matched < params.min_matches {
        return None;
    }
    let score = best_per_ref.iter().flatten().sum::<f64>() / matched as f64;

    Some(AlignmentResult {
        transform,
        score,
        correspondence,
        matched,
    })
}

fn index_pairs(len: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..len).flat_map(move |a| (a + 1..len).map(move |b| (a, b)))
}

/// Best hypothesis for one reference anchor pair, first minimum wins
fn best_for_synced_pair(
    synced: &[f64],
    target: &[f64],
    pair: (usize, usize),
    params: &SearchParams,
) -> Option<AlignmentResult> {
    let mut best: Option<AlignmentResult> = None;
    for target_pair in index_pairs(target.len()) {
        let correspondence = Correspondence {
            synced: pair,
            target: target_pair,
        };
        if let Some(result) = score_hypothesis(synced, target, correspondence, params) {
            if best.map_or(true, |b| result.score < b.score) {
                best = Some(result);
            }
        }
    }
    best
}

fn by_score_then_order(a: &(usize, AlignmentResult), b: &(usize, AlignmentResult)) -> Ordering {
    a.1.score.total_cmp(&b.1.score).then(a.0.cmp(&b.0))
}

/// Exhaustive correspondence search between two fingerprints.
///
/// Every pair of reference landmarks is tried against every pair of target
/// landmarks and the lowest-scoring hypothesis is returned. Ties go to the
/// hypothesis enumerated first, so the parallel and sequential scans agree.
pub fn find_best_alignment(
    synced: &FingerprintSet,
    target: &FingerprintSet,
    params: &SearchParams,
    parallel: bool,
) -> Result<AlignmentResult, AlignmentError> {
    if synced.len() < 2 || target.len() < 2 {
        return Err(AlignmentError::new(format!(
            "not enough landmarks to align: reference has {}, target has {}",
            synced.len(),
            target.len()
        )));
    }

    let synced_ms = synced.to_f64();
    let target_ms = target.to_f64();
    let synced_pairs: Vec<(usize, usize)> = index_pairs(synced_ms.len()).collect();
    debug!(
        "Searching {} x {} anchor pairs",
        synced_pairs.len(),
        target_ms.len() * (target_ms.len() - 1) / 2
    );

    let best = if parallel {
        synced_pairs
            .par_iter()
            .enumerate()
            .filter_map(|(ord, &pair)| {
                best_for_synced_pair(&synced_ms, &target_ms, pair, params).map(|r| (ord, r))
            })
            .min_by(by_score_then_order)
    } else {
        synced_pairs
            .iter()
            .enumerate()
            .filter_map(|(ord, &pair)| {
                best_for_synced_pair(&synced_ms, &target_ms, pair, params).map(|r| (ord, r))
            })
            .min_by(by_score_then_order)
    };

    let (_, result) = best.ok_or_else(|| {
        AlignmentError::new(format!(
            "no supported correspondence found: no hypothesis matched {} landmarks within {} ms",
            params.min_matches, params.match_tolerance_ms
        ))
    })?;

    debug!(
        "Winning correspondence {:?} with score {:.3} ms over {} landmarks",
        result.correspondence, result.score, result.matched
    );
    Ok(result)
}
