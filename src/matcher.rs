use tracing::debug;

use crate::angle::Angle;
use crate::edge::{EdgeShape, NeighborEdge};
use crate::error::RidgeMatchError;
use crate::minutia::MinutiaPair;

/// Validated, immutable tolerance configuration for the edge matcher.
///
/// Both tolerances are checked once at construction; an out-of-range value
/// is a [`RidgeMatchError::Configuration`], never a silent clamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatcherConfig {
    max_distance_error: u16,
    max_angle_error: Angle,
}

/// Valid range of `max_distance_error`, in the same pixel units as edge
/// lengths.
pub const DISTANCE_ERROR_RANGE: std::ops::RangeInclusive<u16> = 1..=50;

/// Valid range of `max_angle_error`, in 256-step angle units.
pub const ANGLE_ERROR_RANGE: std::ops::RangeInclusive<u8> = 1..=63;

impl MatcherConfig {
    pub fn new(max_distance_error: u16, max_angle_error: Angle) -> Result<Self, RidgeMatchError> {
        if !DISTANCE_ERROR_RANGE.contains(&max_distance_error) {
            return Err(RidgeMatchError::Configuration(format!(
                "max_distance_error {} outside {}..={}",
                max_distance_error,
                DISTANCE_ERROR_RANGE.start(),
                DISTANCE_ERROR_RANGE.end()
            )));
        }
        if !ANGLE_ERROR_RANGE.contains(&max_angle_error.0) {
            return Err(RidgeMatchError::Configuration(format!(
                "max_angle_error {} outside {}..={}",
                max_angle_error.0,
                ANGLE_ERROR_RANGE.start(),
                ANGLE_ERROR_RANGE.end()
            )));
        }
        Ok(Self {
            max_distance_error,
            max_angle_error,
        })
    }

    pub fn max_distance_error(&self) -> u16 {
        self.max_distance_error
    }

    pub fn max_angle_error(&self) -> Angle {
        self.max_angle_error
    }
}

impl Default for MatcherConfig {
    /// The tuned defaults: 13 pixels and 10 degrees.
    fn default() -> Self {
        Self {
            max_distance_error: 13,
            max_angle_error: Angle::from_degrees(10.0),
        }
    }
}

/// One correspondence hypothesis produced by [`EdgeMatcher::find_matching_pairs`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeMatch {
    pub pair: MinutiaPair,
    /// Length of the candidate edge that produced the hypothesis.
    pub distance: u16,
}

/// Tolerance-based pairwise and indexed edge comparison.
///
/// Stateless apart from its configuration; all methods are pure functions
/// over their inputs and safe to call concurrently.
#[derive(Clone, Copy, Debug)]
pub struct EdgeMatcher {
    config: MatcherConfig,
}

impl EdgeMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        debug!(
            max_distance_error = config.max_distance_error,
            max_angle_error = config.max_angle_error.0,
            "edge matcher configured"
        );
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Whether two edges agree within the configured tolerances.
    ///
    /// Length delta, reference-angle delta and neighbor-angle delta are
    /// independent conditions; they are tested in that order only to
    /// short-circuit cheaply.
    pub fn matching_edges(&self, probe: &EdgeShape, candidate: &EdgeShape) -> bool {
        let length_delta = i32::from(probe.length) - i32::from(candidate.length);
        let max_distance_error = i32::from(self.config.max_distance_error);
        if length_delta < -max_distance_error || length_delta > max_distance_error {
            return false;
        }
        let tolerance = self.config.max_angle_error;
        probe
            .reference_angle
            .is_within(candidate.reference_angle, tolerance)
            && probe
                .neighbor_angle
                .is_within(candidate.neighbor_angle, tolerance)
    }

    /// Discovers all locally plausible minutia correspondences between two
    /// stars.
    ///
    /// Both stars must be sorted ascending by edge length (see
    /// [`crate::edge::verify_star`]); the sort makes the probe-side window
    /// a contiguous range that only slides forward, so the whole scan is
    /// amortized O(P+C) instead of O(P×C).
    ///
    /// Hypotheses come out grouped by candidate edge, in probe order within
    /// each group, carrying the candidate edge's length as the distance.
    /// Duplicate and mutually conflicting pairs are emitted as-is; resolving
    /// them is the job of the downstream pairing stage.
    pub fn find_matching_pairs(
        &self,
        probe_star: &[NeighborEdge],
        candidate_star: &[NeighborEdge],
    ) -> Vec<EdgeMatch> {
        let tolerance = self.config.max_angle_error;
        let max_distance_error = i32::from(self.config.max_distance_error);
        let mut matches = Vec::new();
        let mut begin = 0usize;
        let mut end = 0usize;
        for candidate_edge in candidate_star {
            let window_low = i32::from(candidate_edge.edge.length) - max_distance_error;
            let window_high = i32::from(candidate_edge.edge.length) + max_distance_error;

            while begin < probe_star.len()
                && i32::from(probe_star[begin].edge.length) < window_low
            {
                begin += 1;
            }
            if end < begin {
                end = begin;
            }
            while end < probe_star.len() && i32::from(probe_star[end].edge.length) <= window_high {
                end += 1;
            }

            // the window already guarantees the length condition
            for probe_edge in &probe_star[begin..end] {
                if probe_edge
                    .edge
                    .reference_angle
                    .is_within(candidate_edge.edge.reference_angle, tolerance)
                    && probe_edge
                        .edge
                        .neighbor_angle
                        .is_within(candidate_edge.edge.neighbor_angle, tolerance)
                {
                    matches.push(EdgeMatch {
                        pair: MinutiaPair {
                            probe: probe_edge.neighbor,
                            candidate: candidate_edge.neighbor,
                        },
                        distance: candidate_edge.edge.length,
                    });
                }
            }
        }
        matches
    }

    /// Quantizes an edge into its exact 32-bit hash bucket.
    ///
    /// Edges within tolerance of each other can still straddle a bin
    /// boundary and hash differently; [`EdgeMatcher::hash_coverage`] exists
    /// to close that gap on the index side.
    pub fn compute_hash(&self, edge: &EdgeShape) -> u32 {
        let angle_error = u32::from(self.config.max_angle_error.0);
        let distance_error = u32::from(self.config.max_distance_error);
        ((u32::from(edge.reference_angle.0) / angle_error) << 24)
            + ((u32::from(edge.neighbor_angle.0) / angle_error) << 16)
            + u32::from(edge.length) / distance_error
    }

    /// Enumerates every bucket a perturbation of `edge` within the
    /// configured tolerances could hash to.
    ///
    /// For any edge obtainable from `edge` by shifting its length by at most
    /// `max_distance_error` and either angle by at most `max_angle_error`,
    /// the perturbed edge's [`EdgeMatcher::compute_hash`] is contained in
    /// this sequence. The iterator is lazy, finite and restartable (Clone).
    pub fn hash_coverage(&self, edge: &EdgeShape) -> HashCoverage {
        HashCoverage::new(&self.config, edge)
    }
}

/// Lazy enumeration of the hash buckets covering an edge's tolerance
/// neighborhood. Created by [`EdgeMatcher::hash_coverage`].
#[derive(Clone, Debug)]
pub struct HashCoverage {
    angle_bins: u32,
    length_bin: i32,
    max_length_bin: i32,
    min_reference_bin: u32,
    end_reference_bin: u32,
    reference_bin: u32,
    min_neighbor_bin: u32,
    end_neighbor_bin: u32,
    neighbor_bin: u32,
    exhausted: bool,
}

impl HashCoverage {
    fn new(config: &MatcherConfig, edge: &EdgeShape) -> Self {
        let distance_error = i32::from(config.max_distance_error);
        let angle_error = config.max_angle_error;
        // truncating division, so a length below tolerance yields bin -1
        let min_length_bin = (i32::from(edge.length) - distance_error) / distance_error;
        let max_length_bin = (i32::from(edge.length) + distance_error) / distance_error;
        // ring size kept as in the reference arithmetic
        let angle_bins = 255 / u32::from(angle_error.0) + 1;
        let min_reference_bin =
            u32::from(edge.reference_angle.difference(angle_error).0) / u32::from(angle_error.0);
        let max_reference_bin =
            u32::from(edge.reference_angle.add(angle_error).0) / u32::from(angle_error.0);
        let end_reference_bin = (max_reference_bin + 1) % angle_bins;
        let min_neighbor_bin =
            u32::from(edge.neighbor_angle.difference(angle_error).0) / u32::from(angle_error.0);
        let max_neighbor_bin =
            u32::from(edge.neighbor_angle.add(angle_error).0) / u32::from(angle_error.0);
        let end_neighbor_bin = (max_neighbor_bin + 1) % angle_bins;
        let exhausted = min_reference_bin == end_reference_bin
            || min_neighbor_bin == end_neighbor_bin
            || min_length_bin > max_length_bin;
        HashCoverage {
            angle_bins,
            length_bin: min_length_bin,
            max_length_bin,
            min_reference_bin,
            end_reference_bin,
            reference_bin: min_reference_bin,
            min_neighbor_bin,
            end_neighbor_bin,
            neighbor_bin: min_neighbor_bin,
            exhausted,
        }
    }
}

impl Iterator for HashCoverage {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.exhausted {
            return None;
        }
        let key = (self.reference_bin << 24)
            .wrapping_add(self.neighbor_bin << 16)
            .wrapping_add(self.length_bin as u32);

        self.neighbor_bin = (self.neighbor_bin + 1) % self.angle_bins;
        if self.neighbor_bin == self.end_neighbor_bin {
            self.neighbor_bin = self.min_neighbor_bin;
            self.reference_bin = (self.reference_bin + 1) % self.angle_bins;
            if self.reference_bin == self.end_reference_bin {
                self.reference_bin = self.min_reference_bin;
                self.length_bin += 1;
                if self.length_bin > self.max_length_bin {
                    self.exhausted = true;
                }
            }
        }
        Some(key)
    }
}
