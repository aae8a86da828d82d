use crate::{
    animation::ease::Interpolation,
    foundation::core::Vec2,
    foundation::error::{FlipbookError, FlipbookResult},
};

/// Component-wise blend between two values of the same kind.
pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for (f64, f64) {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
    }
}

/// A fixed `(time, value)` control point.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    time: f64,
    value: T,
}

impl<T> Keyframe<T> {
    pub fn new(time: f64, value: T) -> Self {
        Self { time, value }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_parts(self) -> (f64, T) {
        (self.time, self.value)
    }
}

impl<T> From<(f64, T)> for Keyframe<T> {
    fn from((time, value): (f64, T)) -> Self {
        Self::new(time, value)
    }
}

/// Time-to-value function interpolated between sorted keyframes.
///
/// Keyframes are sorted once at construction (stably, so coincident times keep their insertion
/// order). Outside the keyframe span the boundary values are held:
/// `value_at(t) == first` for `t <= first.time` and `== last` for `t >= last.time`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween<T> {
    keys: Vec<Keyframe<T>>, // sorted by time, never empty
    method: Interpolation,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    pub fn new<I, K>(keys: I, method: Interpolation) -> FlipbookResult<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<Keyframe<T>>,
    {
        let mut keys: Vec<Keyframe<T>> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Err(FlipbookError::EmptyKeyframeSet);
        }
        if let Some(bad) = keys.iter().find(|k| !k.time.is_finite()) {
            return Err(FlipbookError::validation(format!(
                "keyframe time must be finite, got {}",
                bad.time
            )));
        }
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self { keys, method })
    }

    /// Build a tween with the method given by name (`"linear"`, `"cosine"`, ...).
    pub fn with_method_name<I, K>(keys: I, method: &str) -> FlipbookResult<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<Keyframe<T>>,
    {
        Self::new(keys, method.parse()?)
    }

    pub fn constant(value: T) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value)],
            method: Interpolation::Linear,
        }
    }

    /// Two-keyframe tween, the common case for effects.
    pub fn between(t0: f64, v0: T, t1: f64, v1: T, method: Interpolation) -> FlipbookResult<Self> {
        Self::new([Keyframe::new(t0, v0), Keyframe::new(t1, v1)], method)
    }

    /// Same keyframes, different interpolation method.
    pub fn with_interpolation(mut self, method: Interpolation) -> Self {
        self.method = method;
        self
    }

    pub fn value_at(&self, t: f64) -> T {
        let first = &self.keys[0];
        let last = &self.keys[self.keys.len() - 1];
        if t <= first.time {
            return first.value.clone();
        }
        if t >= last.time {
            return last.value.clone();
        }

        let idx = self.keys.partition_point(|k| k.time <= t);
        if idx == 0 {
            // Only reachable for NaN `t`.
            return first.value.clone();
        }
        if idx >= self.keys.len() {
            return last.value.clone();
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.time - a.time;
        if denom <= 0.0 {
            return b.value.clone();
        }
        let f = (t - a.time) / denom;
        T::lerp(&a.value, &b.value, self.method.apply(f))
    }

    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keys
    }

    pub fn method(&self) -> Interpolation {
        self.method
    }

    /// `(first.time, last.time)`.
    pub fn span(&self) -> (f64, f64) {
        (self.keys[0].time, self.keys[self.keys.len() - 1].time)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
