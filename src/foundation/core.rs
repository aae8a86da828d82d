use crate::foundation::error::{FlipbookError, FlipbookResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// 1-based frame number within a flipbook (frame 0 is "before the first frame").
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Frame number as a real-valued time for tween lookups.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> FlipbookResult<Self> {
        if start.0 > end.0 {
            return Err(FlipbookError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Inclusive range `[first, last]`.
    pub fn inclusive(first: FrameIndex, last: FrameIndex) -> FlipbookResult<Self> {
        Self::new(first, FrameIndex(last.0.saturating_add(1)))
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    pub fn iter(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> FlipbookResult<Self> {
        if den == 0 {
            return Err(FlipbookError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(FlipbookError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }

    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }
}

/// Pixel (or canvas-unit) dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> FlipbookResult<Self> {
        if width == 0 || height == 0 {
            return Err(FlipbookError::validation(format!(
                "size must be non-zero, got {width}x{height}"
            )));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(FlipbookError::validation(format!(
                "size {width}x{height} exceeds {} pixels per side",
                u16::MAX
            )));
        }
        Ok(Self { width, height })
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Display aspect ratio, e.g. 4:3 or 16:9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Aspect {
    pub num: u32,
    pub den: u32,
}

impl Aspect {
    pub const STANDARD: Aspect = Aspect { num: 4, den: 3 };
    pub const WIDESCREEN: Aspect = Aspect { num: 16, den: 9 };

    pub fn new(num: u32, den: u32) -> FlipbookResult<Self> {
        if num == 0 || den == 0 {
            return Err(FlipbookError::validation("aspect terms must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Aspect implied by square pixels on a canvas of `size`.
    pub fn of(size: Size) -> Self {
        fn gcd(a: u32, b: u32) -> u32 {
            if b == 0 { a } else { gcd(b, a % b) }
        }
        let g = gcd(size.width, size.height).max(1);
        Self {
            num: size.width / g,
            den: size.height / g,
        }
    }

    pub fn ratio(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

impl std::str::FromStr for Aspect {
    type Err = FlipbookError;

    fn from_str(s: &str) -> FlipbookResult<Self> {
        let (num, den) = s
            .split_once(':')
            .ok_or_else(|| FlipbookError::validation(format!("aspect '{s}' must be N:D")))?;
        let parse = |t: &str| {
            t.trim()
                .parse::<u32>()
                .map_err(|_| FlipbookError::validation(format!("aspect '{s}' must be N:D")))
        };
        Self::new(parse(num)?, parse(den)?)
    }
}

impl std::fmt::Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.num, self.den)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
