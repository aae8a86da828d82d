use crate::{
    animation::{ease::Interpolation, tween::Tween},
    draw::{
        color::{Color, IntoColor},
        drawing::Drawing,
    },
    foundation::{
        core::FrameIndex,
        error::{FlipbookError, FlipbookResult},
    },
};

/// Drawing attribute a [`KeyFunction`] can animate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Opacity,
    FillOpacity,
    StrokeOpacity,
    StrokeWidth,
    FontSize,
    /// Degrees, clockwise in screen space.
    Rotation,
    Source,
    FillColor,
    StrokeColor,
    Translate,
    Scale,
}

impl Attribute {
    pub const ALL: [Attribute; 11] = [
        Attribute::Opacity,
        Attribute::FillOpacity,
        Attribute::StrokeOpacity,
        Attribute::StrokeWidth,
        Attribute::FontSize,
        Attribute::Rotation,
        Attribute::Source,
        Attribute::FillColor,
        Attribute::StrokeColor,
        Attribute::Translate,
        Attribute::Scale,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::FillOpacity => "fill_opacity",
            Self::StrokeOpacity => "stroke_opacity",
            Self::StrokeWidth => "stroke_width",
            Self::FontSize => "font_size",
            Self::Rotation => "rotation",
            Self::Source => "source",
            Self::FillColor => "fill_color",
            Self::StrokeColor => "stroke_color",
            Self::Translate => "translate",
            Self::Scale => "scale",
        }
    }

    /// Kind of [`Value`] this attribute is animated with.
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Opacity
            | Self::FillOpacity
            | Self::StrokeOpacity
            | Self::StrokeWidth
            | Self::FontSize
            | Self::Rotation => ValueKind::Scalar,
            Self::Source | Self::FillColor | Self::StrokeColor => ValueKind::Color,
            Self::Translate | Self::Scale => ValueKind::Pair,
        }
    }

    /// Rejects a keyframe value outside the attribute's domain.
    ///
    /// Interpolated values stay between their keys, so checking the keys covers every frame.
    pub fn check(self, value: &Value) -> FlipbookResult<()> {
        let ok = match (self, value) {
            (Self::Opacity | Self::FillOpacity | Self::StrokeOpacity, Value::Scalar(v)) => {
                (0.0..=1.0).contains(v)
            }
            (Self::StrokeWidth, Value::Scalar(v)) => v.is_finite() && *v >= 0.0,
            (Self::FontSize, Value::Scalar(v)) => v.is_finite() && *v > 0.0,
            (Self::Rotation, Value::Scalar(v)) => v.is_finite(),
            (Self::Translate | Self::Scale, Value::Pair(x, y)) => x.is_finite() && y.is_finite(),
            (Self::Source | Self::FillColor | Self::StrokeColor, Value::Color(_)) => true,
            (attr, value) => {
                return Err(FlipbookError::TypeMismatch {
                    expected: attr.kind().name(),
                    found: value.kind().name(),
                });
            }
        };
        if !ok {
            return Err(FlipbookError::validation(format!(
                "{} keyframe value {value:?} is out of range",
                self.name()
            )));
        }
        Ok(())
    }
}

impl std::str::FromStr for Attribute {
    type Err = FlipbookError;

    fn from_str(s: &str) -> FlipbookResult<Self> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|a| a.name() == norm)
            .ok_or_else(|| FlipbookError::validation(format!("unknown attribute '{s}'")))
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    Pair,
    Color,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Pair => "pair",
            Self::Color => "color",
        }
    }
}

/// Dynamically typed keyframe value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(f64),
    Pair(f64, f64),
    Color(Color),
}

impl Value {
    pub fn color(color: impl IntoColor) -> FlipbookResult<Self> {
        Ok(Self::Color(color.into_color()?))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Pair(..) => ValueKind::Pair,
            Self::Color(_) => ValueKind::Color,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<(f64, f64)> for Value {
    fn from((x, y): (f64, f64)) -> Self {
        Self::Pair(x, y)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "tween", rename_all = "snake_case")]
enum KeyTween {
    Scalar(Tween<f64>),
    Pair(Tween<(f64, f64)>),
    Color(Tween<Color>),
}

/// Binds one drawing attribute to a tween over frame numbers.
///
/// Covers attributes without a dedicated effect, e.g. fill opacity keyed over a few frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyFunction {
    attribute: Attribute,
    tween: KeyTween,
}

impl KeyFunction {
    /// `keys` are `(frame, value)` pairs; every value must match `attribute.kind()` and lie in
    /// the attribute's domain.
    pub fn new<I, V>(attribute: Attribute, keys: I, method: &str) -> FlipbookResult<Self>
    where
        I: IntoIterator<Item = (f64, V)>,
        V: Into<Value>,
    {
        let method: Interpolation = method.parse()?;
        let keys: Vec<(f64, Value)> = keys.into_iter().map(|(t, v)| (t, v.into())).collect();

        let expected = attribute.kind();
        if let Some((_, bad)) = keys.iter().find(|(_, v)| v.kind() != expected) {
            return Err(FlipbookError::TypeMismatch {
                expected: expected.name(),
                found: bad.kind().name(),
            });
        }
        for (_, value) in &keys {
            attribute.check(value)?;
        }

        let tween = match expected {
            ValueKind::Scalar => KeyTween::Scalar(Tween::new(
                keys.into_iter().filter_map(|(t, v)| match v {
                    Value::Scalar(x) => Some((t, x)),
                    _ => None,
                }),
                method,
            )?),
            ValueKind::Pair => KeyTween::Pair(Tween::new(
                keys.into_iter().filter_map(|(t, v)| match v {
                    Value::Pair(x, y) => Some((t, (x, y))),
                    _ => None,
                }),
                method,
            )?),
            ValueKind::Color => KeyTween::Color(Tween::new(
                keys.into_iter().filter_map(|(t, v)| match v {
                    Value::Color(c) => Some((t, c)),
                    _ => None,
                }),
                method,
            )?),
        };

        Ok(Self { attribute, tween })
    }

    /// Like [`KeyFunction::new`], with the attribute given by setter name (`"fill_opacity"`).
    pub fn named<I, V>(attribute: &str, keys: I, method: &str) -> FlipbookResult<Self>
    where
        I: IntoIterator<Item = (f64, V)>,
        V: Into<Value>,
    {
        Self::new(attribute.parse()?, keys, method)
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// First and last keyed frame.
    pub fn span(&self) -> (f64, f64) {
        match &self.tween {
            KeyTween::Scalar(t) => t.span(),
            KeyTween::Pair(t) => t.span(),
            KeyTween::Color(t) => t.span(),
        }
    }

    pub fn value_at(&self, frame: FrameIndex) -> Value {
        let t = frame.as_f64();
        match &self.tween {
            KeyTween::Scalar(tw) => Value::Scalar(tw.value_at(t)),
            KeyTween::Pair(tw) => tw.value_at(t).into(),
            KeyTween::Color(tw) => Value::Color(tw.value_at(t)),
        }
    }

    pub fn draw_on(&self, drawing: &mut Drawing, frame: FrameIndex) -> FlipbookResult<()> {
        match (self.attribute, self.value_at(frame)) {
            (Attribute::Opacity, Value::Scalar(v)) => {
                drawing.opacity(v.clamp(0.0, 1.0))?;
            }
            (Attribute::FillOpacity, Value::Scalar(v)) => {
                drawing.fill_opacity(v.clamp(0.0, 1.0))?;
            }
            (Attribute::StrokeOpacity, Value::Scalar(v)) => {
                drawing.stroke_opacity(v.clamp(0.0, 1.0))?;
            }
            (Attribute::StrokeWidth, Value::Scalar(v)) => {
                drawing.stroke_width(v)?;
            }
            (Attribute::FontSize, Value::Scalar(v)) => {
                drawing.font_size(v)?;
            }
            (Attribute::Rotation, Value::Scalar(v)) => {
                drawing.rotate_deg(v);
            }
            (Attribute::Source, Value::Color(c)) => {
                drawing.set_source(c)?;
            }
            (Attribute::FillColor, Value::Color(c)) => {
                drawing.fill_color(c)?;
            }
            (Attribute::StrokeColor, Value::Color(c)) => {
                drawing.stroke_color(c)?;
            }
            (Attribute::Translate, Value::Pair(x, y)) => {
                drawing.translate(x, y);
            }
            (Attribute::Scale, Value::Pair(x, y)) => {
                drawing.scale(x, y);
            }
            (attr, value) => {
                return Err(FlipbookError::TypeMismatch {
                    expected: attr.kind().name(),
                    found: value.kind().name(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/key_function.rs"]
mod tests;
