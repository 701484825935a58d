//! End-to-end walk through the crate: encode a template, read it back from
//! a byte stream, and list edge correspondence hypotheses between two
//! impressions of the same synthetic finger.
//!
//! Run with `cargo run --example match_demo`.

use std::io::Cursor;

use tracing_subscriber::EnvFilter;

use ridgematch::{
    codec, Angle, EdgeMatcher, MatcherConfig, Minutia, MinutiaType, NeighborEdge, Template,
};

fn main() -> Result<(), ridgematch::RidgeMatchError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let probe = Template::with_metadata(
        vec![
            Minutia::new(120, 90, Angle(10), MinutiaType::Ending),
            Minutia::new(180, 140, Angle(70), MinutiaType::Bifurcation),
            Minutia::new(95, 200, Angle(130), MinutiaType::Ending),
            Minutia::new(210, 230, Angle(40), MinutiaType::Bifurcation),
        ],
        500,
        300,
        400,
    );

    // the same finger captured again: shifted a few pixels, slightly rotated
    let candidate = Template::with_metadata(
        vec![
            Minutia::new(126, 95, Angle(12), MinutiaType::Ending),
            Minutia::new(187, 147, Angle(72), MinutiaType::Bifurcation),
            Minutia::new(99, 204, Angle(133), MinutiaType::Ending),
            Minutia::new(215, 233, Angle(43), MinutiaType::Bifurcation),
        ],
        500,
        300,
        400,
    );

    // persist the probe and pull it back through the stream framing
    let mut stream = Vec::new();
    codec::write_record(&mut stream, &codec::encode(&probe)?)?;
    let mut cursor = Cursor::new(stream);
    let probe = codec::decode(&codec::read_record(&mut cursor)?)?;

    let matcher = EdgeMatcher::new(MatcherConfig::default());
    for reference in 0..probe.minutiae.len() {
        let probe_star = NeighborEdge::build_star(&probe, reference);
        let candidate_star = NeighborEdge::build_star(&candidate, reference);
        let hypotheses = matcher.find_matching_pairs(&probe_star, &candidate_star);
        println!(
            "minutia {reference}: {} edge correspondence hypotheses",
            hypotheses.len()
        );
        for hypothesis in hypotheses {
            println!(
                "  probe {} <-> candidate {} (distance {})",
                hypothesis.pair.probe, hypothesis.pair.candidate, hypothesis.distance
            );
        }
    }

    Ok(())
}
