use crate::minutia::Minutia;

/// An ordered set of minutiae plus capture metadata.
///
/// Templates are produced by feature extraction, which is outside this
/// crate; the matcher and the codec consume them read-only. Metadata fields
/// are 0 when unknown, which is also what version-1 records decode to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Template {
    pub minutiae: Vec<Minutia>,
    /// Capture resolution in dots per inch, 0 if unknown.
    pub original_dpi: u16,
    /// Width of the source image in pixels, 0 if unknown.
    pub original_width: u16,
    /// Height of the source image in pixels, 0 if unknown.
    pub original_height: u16,
}

impl Template {
    pub fn new(minutiae: Vec<Minutia>) -> Self {
        Self {
            minutiae,
            ..Default::default()
        }
    }

    pub fn with_metadata(
        minutiae: Vec<Minutia>,
        original_dpi: u16,
        original_width: u16,
        original_height: u16,
    ) -> Self {
        Self {
            minutiae,
            original_dpi,
            original_width,
            original_height,
        }
    }
}
