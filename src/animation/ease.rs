use crate::foundation::error::{FlipbookError, FlipbookResult};

/// Interpolation method used between two adjacent keyframes.
///
/// Every method maps the segment fraction `f` in `[0, 1]` to an eased fraction with
/// `apply(0) == 0` and `apply(1) == 1`, except `Hold`, which stays on the left keyframe
/// until the next one is reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    #[default]
    Linear,
    Cosine,
    Hold,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
}

impl Interpolation {
    pub const ALL: [Interpolation; 9] = [
        Self::Linear,
        Self::Cosine,
        Self::Hold,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
    ];

    pub fn apply(self, f: f64) -> f64 {
        let f = f.clamp(0.0, 1.0);
        match self {
            Self::Linear => f,
            // (1 - cos(f*pi)) / 2, phase-shifted so f = 0, 0.5, 1 evaluate exactly.
            Self::Cosine => 0.5 + 0.5 * ((f - 0.5) * std::f64::consts::PI).sin(),
            Self::Hold => {
                if f >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::InQuad => f * f,
            Self::OutQuad => 1.0 - (1.0 - f) * (1.0 - f),
            Self::InOutQuad => {
                if f < 0.5 {
                    2.0 * f * f
                } else {
                    1.0 - ((-2.0 * f + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => f * f * f,
            Self::OutCubic => 1.0 - (1.0 - f).powi(3),
            Self::InOutCubic => {
                if f < 0.5 {
                    4.0 * f * f * f
                } else {
                    1.0 - ((-2.0 * f + 2.0).powi(3) / 2.0)
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Cosine => "cosine",
            Self::Hold => "hold",
            Self::InQuad => "in_quad",
            Self::OutQuad => "out_quad",
            Self::InOutQuad => "in_out_quad",
            Self::InCubic => "in_cubic",
            Self::OutCubic => "out_cubic",
            Self::InOutCubic => "in_out_cubic",
        }
    }
}

impl std::str::FromStr for Interpolation {
    type Err = FlipbookError;

    fn from_str(s: &str) -> FlipbookResult<Self> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|m| m.name() == norm)
            .ok_or_else(|| FlipbookError::UnsupportedInterpolationMethod(s.to_string()))
    }
}

impl std::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
