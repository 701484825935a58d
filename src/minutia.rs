use crate::angle::Angle;
use crate::error::RidgeMatchError;

/// Kind of ridge-pattern landmark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MinutiaType {
    /// A ridge that terminates.
    Ending,
    /// A ridge that splits in two.
    Bifurcation,
}

impl MinutiaType {
    pub(crate) fn to_byte(self) -> u8 {
        match self {
            MinutiaType::Ending => 0,
            MinutiaType::Bifurcation => 1,
        }
    }

    pub(crate) fn from_byte(value: u8) -> Result<Self, RidgeMatchError> {
        match value {
            0 => Ok(MinutiaType::Ending),
            1 => Ok(MinutiaType::Bifurcation),
            other => Err(RidgeMatchError::Format(format!(
                "invalid minutia type byte: {other}"
            ))),
        }
    }
}

/// A single fingerprint landmark: pixel position, ridge direction and type.
///
/// Immutable once placed in a [`crate::Template`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Minutia {
    pub x: u16,
    pub y: u16,
    pub direction: Angle,
    pub minutia_type: MinutiaType,
}

impl Minutia {
    pub fn new(x: u16, y: u16, direction: Angle, minutia_type: MinutiaType) -> Self {
        Self {
            x,
            y,
            direction,
            minutia_type,
        }
    }
}

/// Correspondence hypothesis between a probe minutia and a candidate minutia.
///
/// Indices refer to the minutia order of the respective templates. The pair
/// is a raw hypothesis; consistency across hypotheses is resolved downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MinutiaPair {
    pub probe: usize,
    pub candidate: usize,
}
