use crate::{
    draw::color::Color,
    draw::image::ImageData,
    draw::text::FontFace,
    foundation::error::{FlipbookError, FlipbookResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Horizontal anchoring of a text run relative to its `x` coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// One deferred drawing operation. Coordinates are in canvas units.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Save,
    Restore,
    Translate {
        dx: f64,
        dy: f64,
    },
    Scale {
        sx: f64,
        sy: f64,
    },
    Rotate {
        radians: f64,
    },
    Transform {
        coeffs: [f64; 6],
    },

    /// Sets both fill and stroke color.
    SetSource {
        color: Color,
    },
    FillColor {
        color: Color,
    },
    StrokeColor {
        color: Color,
    },
    /// Multiplies the alpha of everything painted until the matching restore.
    Opacity {
        alpha: f64,
    },
    FillOpacity {
        alpha: f64,
    },
    StrokeOpacity {
        alpha: f64,
    },
    StrokeWidth {
        width: f64,
    },
    StrokeCap {
        cap: LineCap,
    },
    StrokeJoin {
        join: LineJoin,
    },
    StrokeDash {
        offset: f64,
        pattern: Vec<f64>,
    },
    Font {
        font: FontFace,
    },
    FontSize {
        size: f64,
    },

    NewPath,
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CurveTo {
        c1: (f64, f64),
        c2: (f64, f64),
        to: (f64, f64),
    },
    ClosePath,
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    RoundedRectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    /// Circular arc as a new subpath; angles in radians, clockwise in screen space.
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        sweep: f64,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        closed: bool,
    },
    Bezier {
        from: (f64, f64),
        c1: (f64, f64),
        c2: (f64, f64),
        to: (f64, f64),
    },

    Fill {
        preserve: bool,
    },
    Stroke {
        preserve: bool,
    },
    /// Fills the whole surface with the fill color.
    Paint,
    Text {
        text: String,
        x: f64,
        y: f64,
        align: TextAlign,
    },
    Image {
        image: ImageData,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Restore => "restore",
            Self::Translate { .. } => "translate",
            Self::Scale { .. } => "scale",
            Self::Rotate { .. } => "rotate",
            Self::Transform { .. } => "transform",
            Self::SetSource { .. } => "set_source",
            Self::FillColor { .. } => "fill_color",
            Self::StrokeColor { .. } => "stroke_color",
            Self::Opacity { .. } => "opacity",
            Self::FillOpacity { .. } => "fill_opacity",
            Self::StrokeOpacity { .. } => "stroke_opacity",
            Self::StrokeWidth { .. } => "stroke_width",
            Self::StrokeCap { .. } => "stroke_cap",
            Self::StrokeJoin { .. } => "stroke_join",
            Self::StrokeDash { .. } => "stroke_dash",
            Self::Font { .. } => "font",
            Self::FontSize { .. } => "font_size",
            Self::NewPath => "new_path",
            Self::MoveTo { .. } => "move_to",
            Self::LineTo { .. } => "line_to",
            Self::CurveTo { .. } => "curve_to",
            Self::ClosePath => "close_path",
            Self::Rectangle { .. } => "rectangle",
            Self::RoundedRectangle { .. } => "rounded_rectangle",
            Self::Ellipse { .. } => "ellipse",
            Self::Arc { .. } => "arc",
            Self::Polyline { .. } => "polyline",
            Self::Bezier { .. } => "bezier",
            Self::Fill { .. } => "fill",
            Self::Stroke { .. } => "stroke",
            Self::Paint => "paint",
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
        }
    }
}

/// Check that every `Restore` has a preceding `Save` and no `Save` is left open.
pub fn check_balance(commands: &[Command]) -> FlipbookResult<()> {
    let mut depth = 0usize;
    for (idx, cmd) in commands.iter().enumerate() {
        match cmd {
            Command::Save => depth += 1,
            Command::Restore => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    FlipbookError::unbalanced(format!(
                        "restore at command #{idx} has no matching save"
                    ))
                })?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(FlipbookError::unbalanced(format!(
            "{depth} save(s) left without a matching restore"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/draw/command.rs"]
mod tests;
