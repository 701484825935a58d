//! Fingerprint minutia matching core.
//!
//! The crate covers the two lowest layers of a minutia-based fingerprint
//! matcher: the tolerance-based geometric edge matcher that discovers
//! plausible minutia correspondences between two templates, and the compact
//! binary codec defining the persisted template format. Feature extraction,
//! global pairing/scoring and verify/identify orchestration live upstream
//! and downstream of this crate.
//!
//! ```
//! use ridgematch::{codec, EdgeMatcher, MatcherConfig, NeighborEdge};
//!
//! # fn main() -> Result<(), ridgematch::RidgeMatchError> {
//! # use ridgematch::{Angle, Minutia, MinutiaType, Template};
//! # let probe = Template::new(vec![
//! #     Minutia::new(10, 10, Angle(0), MinutiaType::Ending),
//! #     Minutia::new(60, 40, Angle(32), MinutiaType::Bifurcation),
//! #     Minutia::new(20, 90, Angle(96), MinutiaType::Ending),
//! # ]);
//! let record = codec::encode(&probe)?;
//! let candidate = codec::decode(&record)?;
//!
//! let matcher = EdgeMatcher::new(MatcherConfig::default());
//! let probe_star = NeighborEdge::build_star(&probe, 0);
//! let candidate_star = NeighborEdge::build_star(&candidate, 0);
//! let hypotheses = matcher.find_matching_pairs(&probe_star, &candidate_star);
//! assert_eq!(hypotheses.len(), probe_star.len());
//! # Ok(())
//! # }
//! ```

pub mod angle;
pub mod codec;
pub mod edge;
mod error;
pub mod matcher;
mod minutia;
mod template;

pub use crate::angle::Angle;
pub use crate::edge::{verify_star, EdgeShape, NeighborEdge};
pub use crate::error::RidgeMatchError;
pub use crate::matcher::{EdgeMatch, EdgeMatcher, HashCoverage, MatcherConfig};
pub use crate::minutia::{Minutia, MinutiaPair, MinutiaType};
pub use crate::template::Template;
