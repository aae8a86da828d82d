//! Stock layer contents for menu-style scenes.

use crate::{
    draw::{
        color::{Color, IntoColor},
        command::TextAlign,
        drawing::Drawing,
        image::ImageData,
        text::{FontFace, TextExtents},
    },
    foundation::{
        core::FrameIndex,
        error::{FlipbookError, FlipbookResult},
    },
    layer::layer::LayerContent,
};

#[derive(Clone, Debug, PartialEq)]
enum Fill {
    Color(Color),
    Image(ImageData),
}

/// Covers the whole canvas with a color or a stretched image.
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    fill: Fill,
}

impl Background {
    pub fn color(color: impl IntoColor) -> FlipbookResult<Self> {
        Ok(Self {
            fill: Fill::Color(color.into_color()?),
        })
    }

    pub fn image(image: ImageData) -> Self {
        Self {
            fill: Fill::Image(image),
        }
    }
}

impl LayerContent for Background {
    fn draw(&self, drawing: &mut Drawing, _frame: FrameIndex) -> FlipbookResult<()> {
        let canvas = drawing.canvas();
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        match &self.fill {
            Fill::Color(c) => {
                drawing.save();
                drawing.fill_color(*c)?.rectangle(0.0, 0.0, w, h).fill();
                drawing.restore()?;
            }
            Fill::Image(img) => {
                drawing.image(img, 0.0, 0.0, w, h);
            }
        }
        Ok(())
    }
}

/// A single run of text anchored at the layer origin's first baseline.
///
/// Without an explicit color the text uses the current source, so color effects reach it.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    text: String,
    font: FontFace,
    size: f64,
    color: Option<Color>,
    align: TextAlign,
}

impl Text {
    pub fn new(text: impl Into<String>, font: FontFace) -> Self {
        Self {
            text: text.into(),
            font,
            size: 20.0,
            color: None,
            align: TextAlign::Left,
        }
    }

    pub fn with_size(mut self, size: f64) -> FlipbookResult<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(FlipbookError::validation(format!(
                "text size must be finite and > 0, got {size}"
            )));
        }
        self.size = size;
        Ok(self)
    }

    pub fn with_color(mut self, color: impl IntoColor) -> FlipbookResult<Self> {
        self.color = Some(color.into_color()?);
        Ok(self)
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl LayerContent for Text {
    fn draw(&self, drawing: &mut Drawing, _frame: FrameIndex) -> FlipbookResult<()> {
        drawing.font(&self.font).font_size(self.size)?;
        if let Some(c) = self.color {
            drawing.fill_color(c)?;
        }
        drawing.text_aligned(self.text.clone(), 0.0, 0.0, self.align);
        Ok(())
    }
}

/// Text on a rounded box, as used for menu buttons.
///
/// The box is sized from the text extents measured once at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    text: Text,
    extents: TextExtents,
    fill: Color,
    padding: f64,
    radius: f64,
}

impl Label {
    pub fn new(text: Text) -> FlipbookResult<Self> {
        let extents = TextExtents::measure(&text.text, &text.font, text.size)?;
        Ok(Self {
            padding: text.size * 0.4,
            radius: text.size * 0.3,
            text,
            extents,
            fill: Color::rgba(0.0, 0.0, 0.0, 0.6),
        })
    }

    pub fn with_fill(mut self, color: impl IntoColor) -> FlipbookResult<Self> {
        self.fill = color.into_color()?;
        Ok(self)
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    pub fn extents(&self) -> TextExtents {
        self.extents
    }
}

impl LayerContent for Label {
    fn draw(&self, drawing: &mut Drawing, frame: FrameIndex) -> FlipbookResult<()> {
        let TextExtents {
            width,
            height,
            baseline,
        } = self.extents;
        let left = match self.text.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        };
        let p = self.padding;

        drawing.save();
        drawing.fill_color(self.fill)?;
        drawing
            .rounded_rectangle(
                left - p,
                -baseline - p,
                width + 2.0 * p,
                height + 2.0 * p,
                self.radius,
            )
            .fill();
        drawing.restore()?;
        self.text.draw(drawing, frame)
    }
}

/// A raster image at the layer origin, at its natural size unless resized.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageLayer {
    image: ImageData,
    size: (f64, f64),
}

impl ImageLayer {
    pub fn new(image: ImageData) -> Self {
        let size = (f64::from(image.width()), f64::from(image.height()));
        Self { image, size }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> FlipbookResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(FlipbookError::validation(format!(
                "image size must be positive, got {width}x{height}"
            )));
        }
        self.size = (width, height);
        Ok(self)
    }
}

impl LayerContent for ImageLayer {
    fn draw(&self, drawing: &mut Drawing, _frame: FrameIndex) -> FlipbookResult<()> {
        drawing.image(&self.image, 0.0, 0.0, self.size.0, self.size.1);
        Ok(())
    }
}

/// Outline of the TV-safe area covering `percent` of the canvas, centered.
#[derive(Clone, Debug, PartialEq)]
pub struct SafeArea {
    percent: f64,
    color: Color,
    width: f64,
}

impl SafeArea {
    pub fn new(percent: f64) -> FlipbookResult<Self> {
        if !(percent > 0.0 && percent <= 100.0) {
            return Err(FlipbookError::validation(format!(
                "safe area percent must be within (0, 100], got {percent}"
            )));
        }
        Ok(Self {
            percent,
            color: Color::rgb(1.0, 1.0, 0.0),
            width: 2.0,
        })
    }

    pub fn with_color(mut self, color: impl IntoColor) -> FlipbookResult<Self> {
        self.color = color.into_color()?;
        Ok(self)
    }

    /// `(x, y, width, height)` of the outline on a `canvas_w`x`canvas_h` canvas.
    pub fn rect(&self, canvas_w: f64, canvas_h: f64) -> (f64, f64, f64, f64) {
        let f = self.percent / 100.0;
        let (w, h) = (canvas_w * f, canvas_h * f);
        ((canvas_w - w) / 2.0, (canvas_h - h) / 2.0, w, h)
    }
}

impl LayerContent for SafeArea {
    fn draw(&self, drawing: &mut Drawing, _frame: FrameIndex) -> FlipbookResult<()> {
        let canvas = drawing.canvas();
        let (x, y, w, h) = self.rect(f64::from(canvas.width), f64::from(canvas.height));
        drawing.save();
        drawing.stroke_color(self.color)?.stroke_width(self.width)?;
        drawing.rectangle(x, y, w, h).stroke();
        drawing.restore()?;
        Ok(())
    }
}

/// Seven vertical 75% test bars: gray, yellow, cyan, green, magenta, red, blue.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorBars;

impl ColorBars {
    pub const BARS: [Color; 7] = [
        Color::rgb(0.75, 0.75, 0.75),
        Color::rgb(0.75, 0.75, 0.0),
        Color::rgb(0.0, 0.75, 0.75),
        Color::rgb(0.0, 0.75, 0.0),
        Color::rgb(0.75, 0.0, 0.75),
        Color::rgb(0.75, 0.0, 0.0),
        Color::rgb(0.0, 0.0, 0.75),
    ];
}

impl LayerContent for ColorBars {
    fn draw(&self, drawing: &mut Drawing, _frame: FrameIndex) -> FlipbookResult<()> {
        let canvas = drawing.canvas();
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        let bar = w / Self::BARS.len() as f64;
        drawing.save();
        for (i, color) in Self::BARS.iter().enumerate() {
            drawing
                .fill_color(*color)?
                .rectangle(bar * i as f64, 0.0, bar, h)
                .fill();
        }
        drawing.restore()?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    /// Rectangle with its top-left corner at the layer origin.
    Rectangle { width: f64, height: f64, radius: f64 },
    /// Circle centered on the layer origin.
    Circle { radius: f64 },
    Polygon(Vec<(f64, f64)>),
}

/// A filled and/or stroked geometric shape.
///
/// With neither fill nor stroke set it fills with the current source.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    fill: Option<Color>,
    stroke: Option<(Color, f64)>,
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            fill: None,
            stroke: None,
        }
    }

    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::new(ShapeKind::Rectangle {
            width,
            height,
            radius: 0.0,
        })
    }

    pub fn circle(radius: f64) -> Self {
        Self::new(ShapeKind::Circle { radius })
    }

    pub fn polygon(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::new(ShapeKind::Polygon(points.into_iter().collect()))
    }

    pub fn with_fill(mut self, color: impl IntoColor) -> FlipbookResult<Self> {
        self.fill = Some(color.into_color()?);
        Ok(self)
    }

    pub fn with_stroke(mut self, color: impl IntoColor, width: f64) -> FlipbookResult<Self> {
        if !width.is_finite() || width < 0.0 {
            return Err(FlipbookError::validation(format!(
                "stroke width must be finite and >= 0, got {width}"
            )));
        }
        self.stroke = Some((color.into_color()?, width));
        Ok(self)
    }
}

impl LayerContent for Shape {
    fn draw(&self, drawing: &mut Drawing, _frame: FrameIndex) -> FlipbookResult<()> {
        match &self.kind {
            ShapeKind::Rectangle {
                width,
                height,
                radius,
            } if *radius > 0.0 => drawing.rounded_rectangle(0.0, 0.0, *width, *height, *radius),
            ShapeKind::Rectangle { width, height, .. } => {
                drawing.rectangle(0.0, 0.0, *width, *height)
            }
            ShapeKind::Circle { radius } => drawing.circle(0.0, 0.0, *radius),
            ShapeKind::Polygon(points) => drawing.polygon(points.iter().copied()),
        };

        match (self.fill, self.stroke) {
            (None, None) => {
                drawing.fill();
            }
            (Some(fill), None) => {
                drawing.save();
                drawing.fill_color(fill)?.fill();
                drawing.restore()?;
            }
            (fill, Some((stroke, width))) => {
                drawing.save();
                if let Some(fill) = fill {
                    drawing.fill_color(fill)?.fill_preserve();
                }
                drawing.stroke_color(stroke)?.stroke_width(width)?.stroke();
                drawing.restore()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/content.rs"]
mod tests;
