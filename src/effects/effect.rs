use crate::{
    animation::{ease::Interpolation, tween::Tween},
    draw::{
        color::{Color, IntoColor},
        drawing::Drawing,
    },
    effects::key_function::KeyFunction,
    foundation::{
        core::FrameIndex,
        error::{FlipbookError, FlipbookResult},
    },
};

/// Time-bounded, keyframed modification applied around a layer's draw call.
///
/// `draw_on` only appends state changes; the owning layer's `save`/`restore` pair undoes them.
/// Before `start` every effect holds its start value, after `end` its end value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Movement(Movement),
    Fade(Fade),
    Colorfade(Colorfade),
    Spectrum(Spectrum),
    Scale(Scale),
    Whirl(Whirl),
    KeyFunction(KeyFunction),
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Movement(_) => "movement",
            Self::Fade(_) => "fade",
            Self::Colorfade(_) => "colorfade",
            Self::Spectrum(_) => "spectrum",
            Self::Scale(_) => "scale",
            Self::Whirl(_) => "whirl",
            Self::KeyFunction(_) => "key_function",
        }
    }

    /// Frames over which the effect changes, `(start, end)`.
    pub fn span(&self) -> (f64, f64) {
        match self {
            Self::Movement(e) => e.interval.as_f64(),
            Self::Fade(e) => e.interval.as_f64(),
            Self::Colorfade(e) => e.interval.as_f64(),
            Self::Spectrum(e) => e.interval.as_f64(),
            Self::Scale(e) => e.interval.as_f64(),
            Self::Whirl(e) => e.interval.as_f64(),
            Self::KeyFunction(e) => e.span(),
        }
    }

    pub fn draw_on(&self, drawing: &mut Drawing, frame: FrameIndex) -> FlipbookResult<()> {
        match self {
            Self::Movement(e) => {
                let (dx, dy) = e.offset_at(frame);
                drawing.translate(dx, dy);
            }
            Self::Fade(e) => {
                drawing.opacity(e.alpha_at(frame))?;
            }
            Self::Colorfade(e) => {
                drawing.set_source(e.color_at(frame))?;
            }
            Self::Spectrum(e) => {
                drawing.set_source(e.color_at(frame))?;
            }
            Self::Scale(e) => {
                let (sx, sy) = e.factor_at(frame);
                drawing.scale(sx, sy);
            }
            Self::Whirl(e) => {
                let (cx, cy) = e.center;
                drawing
                    .translate(cx, cy)
                    .rotate_deg(e.angle_at(frame))
                    .translate(-cx, -cy);
            }
            Self::KeyFunction(e) => e.draw_on(drawing, frame)?,
        }
        Ok(())
    }
}

/// Inclusive frame interval `[start, end]` an effect animates over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Interval {
    pub start: FrameIndex,
    pub end: FrameIndex,
}

impl Interval {
    pub fn new(start: u64, end: u64) -> FlipbookResult<Self> {
        if start > end {
            return Err(FlipbookError::validation(format!(
                "effect start frame {start} is after end frame {end}"
            )));
        }
        Ok(Self {
            start: FrameIndex(start),
            end: FrameIndex(end),
        })
    }

    fn as_f64(self) -> (f64, f64) {
        (self.start.as_f64(), self.end.as_f64())
    }

    fn tween<T>(self, from: T, to: T) -> FlipbookResult<Tween<T>>
    where
        T: crate::animation::tween::Lerp + Clone,
    {
        let (t0, t1) = self.as_f64();
        Tween::between(t0, from, t1, to, Interpolation::Linear)
    }
}

/// Translation tweened between two offsets.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Movement {
    interval: Interval,
    offset: Tween<(f64, f64)>,
}

impl Movement {
    pub fn new(start: u64, end: u64, from: (f64, f64), to: (f64, f64)) -> FlipbookResult<Self> {
        let interval = Interval::new(start, end)?;
        Ok(Self {
            interval,
            offset: interval.tween(from, to)?,
        })
    }

    pub fn with_interpolation(mut self, method: Interpolation) -> Self {
        self.offset = self.offset.with_interpolation(method);
        self
    }

    pub fn offset_at(&self, frame: FrameIndex) -> (f64, f64) {
        self.offset.value_at(frame.as_f64())
    }
}

/// Opacity tweened between two alphas.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fade {
    interval: Interval,
    alpha: Tween<f64>,
}

impl Fade {
    pub fn new(start: u64, end: u64, from: f64, to: f64) -> FlipbookResult<Self> {
        check_alpha(from)?;
        check_alpha(to)?;
        let interval = Interval::new(start, end)?;
        Ok(Self {
            interval,
            alpha: interval.tween(from, to)?,
        })
    }

    /// Fade in over `fade_length` frames from `start`, hold, then fade out to `end`.
    pub fn in_out(start: u64, end: u64, fade_length: u64) -> FlipbookResult<Self> {
        let interval = Interval::new(start, end)?;
        if fade_length.saturating_mul(2) > end - start {
            return Err(FlipbookError::validation(format!(
                "fade length {fade_length} does not fit twice into frames {start}..={end}"
            )));
        }
        let (s, e) = interval.as_f64();
        let len = fade_length as f64;
        let alpha = Tween::new(
            [(s, 0.0), (s + len, 1.0), (e - len, 1.0), (e, 0.0)],
            Interpolation::Linear,
        )?;
        Ok(Self { interval, alpha })
    }

    pub fn with_interpolation(mut self, method: Interpolation) -> Self {
        self.alpha = self.alpha.with_interpolation(method);
        self
    }

    pub fn alpha_at(&self, frame: FrameIndex) -> f64 {
        self.alpha.value_at(frame.as_f64())
    }
}

fn check_alpha(alpha: f64) -> FlipbookResult<()> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(FlipbookError::validation(format!(
            "fade opacity must be within [0, 1], got {alpha}"
        )));
    }
    Ok(())
}

/// Source color tweened between two colors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Colorfade {
    interval: Interval,
    color: Tween<Color>,
}

impl Colorfade {
    pub fn new(
        start: u64,
        end: u64,
        from: impl IntoColor,
        to: impl IntoColor,
    ) -> FlipbookResult<Self> {
        let interval = Interval::new(start, end)?;
        Ok(Self {
            interval,
            color: interval.tween(from.into_color()?, to.into_color()?)?,
        })
    }

    pub fn with_interpolation(mut self, method: Interpolation) -> Self {
        self.color = self.color.with_interpolation(method);
        self
    }

    pub fn color_at(&self, frame: FrameIndex) -> Color {
        self.color.value_at(frame.as_f64())
    }
}

/// Source color cycling once through the hue wheel at full saturation.
///
/// `hue = 360 * clamp((frame - start) / (end - start), 0, 1)`, color `hsl(hue, 100%, 50%)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Spectrum {
    interval: Interval,
}

impl Spectrum {
    pub fn new(start: u64, end: u64) -> FlipbookResult<Self> {
        Ok(Self {
            interval: Interval::new(start, end)?,
        })
    }

    pub fn progress_at(&self, frame: FrameIndex) -> f64 {
        let (s, e) = self.interval.as_f64();
        let f = frame.as_f64();
        if e == s {
            return if f <= s { 0.0 } else { 1.0 };
        }
        ((f - s) / (e - s)).clamp(0.0, 1.0)
    }

    pub fn color_at(&self, frame: FrameIndex) -> Color {
        Color::from_hsl(360.0 * self.progress_at(frame), 1.0, 0.5)
    }
}

/// Scale factors tweened between two `(sx, sy)` pairs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scale {
    interval: Interval,
    factor: Tween<(f64, f64)>,
}

impl Scale {
    pub fn new(start: u64, end: u64, from: (f64, f64), to: (f64, f64)) -> FlipbookResult<Self> {
        for v in [from.0, from.1, to.0, to.1] {
            if !v.is_finite() {
                return Err(FlipbookError::validation(format!(
                    "scale factor must be finite, got {v}"
                )));
            }
        }
        let interval = Interval::new(start, end)?;
        Ok(Self {
            interval,
            factor: interval.tween(from, to)?,
        })
    }

    pub fn uniform(start: u64, end: u64, from: f64, to: f64) -> FlipbookResult<Self> {
        Self::new(start, end, (from, from), (to, to))
    }

    pub fn with_interpolation(mut self, method: Interpolation) -> Self {
        self.factor = self.factor.with_interpolation(method);
        self
    }

    pub fn factor_at(&self, frame: FrameIndex) -> (f64, f64) {
        self.factor.value_at(frame.as_f64())
    }
}

/// Rotation in degrees about a fixed center, tweened between two angles.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Whirl {
    interval: Interval,
    center: (f64, f64),
    angle: Tween<f64>,
}

impl Whirl {
    pub fn new(
        start: u64,
        end: u64,
        center: (f64, f64),
        from_deg: f64,
        to_deg: f64,
    ) -> FlipbookResult<Self> {
        let interval = Interval::new(start, end)?;
        Ok(Self {
            interval,
            center,
            angle: interval.tween(from_deg, to_deg)?,
        })
    }

    pub fn with_interpolation(mut self, method: Interpolation) -> Self {
        self.angle = self.angle.with_interpolation(method);
        self
    }

    pub fn angle_at(&self, frame: FrameIndex) -> f64 {
        self.angle.value_at(frame.as_f64())
    }
}

impl From<Movement> for Effect {
    fn from(e: Movement) -> Self {
        Self::Movement(e)
    }
}

impl From<Fade> for Effect {
    fn from(e: Fade) -> Self {
        Self::Fade(e)
    }
}

impl From<Colorfade> for Effect {
    fn from(e: Colorfade) -> Self {
        Self::Colorfade(e)
    }
}

impl From<Spectrum> for Effect {
    fn from(e: Spectrum) -> Self {
        Self::Spectrum(e)
    }
}

impl From<Scale> for Effect {
    fn from(e: Scale) -> Self {
        Self::Scale(e)
    }
}

impl From<Whirl> for Effect {
    fn from(e: Whirl) -> Self {
        Self::Whirl(e)
    }
}

impl From<KeyFunction> for Effect {
    fn from(e: KeyFunction) -> Self {
        Self::KeyFunction(e)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/effect.rs"]
mod tests;
