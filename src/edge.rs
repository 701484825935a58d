use tracing::trace;

use crate::angle::Angle;
use crate::error::RidgeMatchError;
use crate::minutia::Minutia;
use crate::template::Template;

/// Rotation/translation-invariant descriptor of the geometric relationship
/// between two minutiae.
///
/// `length` is the rounded Euclidean distance between the two positions.
/// `reference_angle` is the origin minutia's ridge direction relative to the
/// vector pointing at the neighbor; `neighbor_angle` is the neighbor's ridge
/// direction relative to the vector pointing back at the origin. Because all
/// three quantities are relative, the descriptor survives rotating or
/// translating the whole fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeShape {
    pub length: u16,
    pub reference_angle: Angle,
    pub neighbor_angle: Angle,
}

impl EdgeShape {
    /// Builds the descriptor for the edge from `reference` to `neighbor`.
    pub fn new(reference: &Minutia, neighbor: &Minutia) -> Self {
        let dx = f64::from(neighbor.x) - f64::from(reference.x);
        let dy = f64::from(neighbor.y) - f64::from(reference.y);
        let length = dx.hypot(dy).round().min(f64::from(u16::MAX)) as u16;
        let edge_angle = Angle::atan(dx, dy);
        EdgeShape {
            length,
            reference_angle: reference.direction.difference(edge_angle),
            neighbor_angle: neighbor.direction.difference(edge_angle.opposite()),
        }
    }
}

/// An [`EdgeShape`] together with the identity of the neighbor minutia it
/// leads to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborEdge {
    pub edge: EdgeShape,
    /// Index of the neighbor minutia within its template.
    pub neighbor: usize,
}

impl NeighborEdge {
    /// Builds the star of `reference`: edges to every other minutia of the
    /// template, sorted ascending by length.
    ///
    /// The sort is stable, so edges of equal length keep minutia-index
    /// order. The matcher relies on the ascending order as a precondition.
    pub fn build_star(template: &Template, reference: usize) -> Vec<NeighborEdge> {
        let origin = &template.minutiae[reference];
        let mut star: Vec<NeighborEdge> = template
            .minutiae
            .iter()
            .enumerate()
            .filter(|(neighbor, _)| *neighbor != reference)
            .map(|(neighbor, minutia)| NeighborEdge {
                edge: EdgeShape::new(origin, minutia),
                neighbor,
            })
            .collect();
        star.sort_by_key(|neighbor_edge| neighbor_edge.edge.length);
        trace!(
            reference,
            edges = star.len(),
            "built neighbor star for minutia"
        );
        star
    }
}

/// Checks the matcher's sort precondition on a star.
///
/// [`crate::EdgeMatcher::find_matching_pairs`] does not verify the order
/// itself; callers that receive stars from untrusted builders can run this
/// check first instead of risking silently wrong results.
pub fn verify_star(star: &[NeighborEdge]) -> Result<(), RidgeMatchError> {
    for (index, window) in star.windows(2).enumerate() {
        if window[1].edge.length < window[0].edge.length {
            return Err(RidgeMatchError::UnsortedStar(index + 1));
        }
    }
    Ok(())
}
