use crate::{
    draw::{
        color::{Color, IntoColor},
        command::{Command, LineCap, LineJoin, TextAlign, check_balance},
        image::ImageData,
        raster::{Raster, ScaleMode, replay},
        text::FontFace,
    },
    foundation::{
        core::{Affine, Aspect, Size},
        error::{FlipbookError, FlipbookResult},
    },
};

/// Deferred-command 2D canvas.
///
/// Every primitive, style setter and transform appends one [`Command`]; nothing is rasterized
/// until [`Drawing::render`]. The same buffer can be replayed at any output size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Drawing {
    canvas: Size,
    aspect: Aspect,
    commands: Vec<Command>,
    #[serde(skip)]
    depth: usize,
}

impl Drawing {
    /// Empty drawing whose display aspect equals its pixel aspect.
    pub fn new(canvas: Size) -> Self {
        Self::with_aspect(canvas, Aspect::of(canvas))
    }

    /// Empty drawing displayed at `aspect` (e.g. 720x480 shown as 4:3).
    pub fn with_aspect(canvas: Size, aspect: Aspect) -> Self {
        Self {
            canvas,
            aspect,
            commands: Vec::new(),
            depth: 0,
        }
    }

    /// Wrap an externally built command buffer.
    ///
    /// The buffer is not checked here; [`Drawing::validate`] or replay reports imbalance.
    pub fn from_commands(canvas: Size, commands: Vec<Command>) -> Self {
        let mut depth = 0usize;
        for cmd in &commands {
            match cmd {
                Command::Save => depth += 1,
                Command::Restore => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        Self {
            canvas,
            aspect: Aspect::of(canvas),
            commands,
            depth,
        }
    }

    pub fn from_json(json: &str) -> FlipbookResult<Self> {
        let parsed: Drawing = serde_json::from_str(json)
            .map_err(|e| FlipbookError::validation(format!("drawing json: {e}")))?;
        let canvas = Size::new(parsed.canvas.width, parsed.canvas.height)?;
        let aspect = Aspect::new(parsed.aspect.num, parsed.aspect.den)?;
        Ok(Self::from_commands(canvas, parsed.commands).aspect_as(aspect))
    }

    pub fn to_json(&self) -> FlipbookResult<String> {
        Ok(serde_json::to_string_pretty(self).map_err(anyhow::Error::from)?)
    }

    fn aspect_as(mut self, aspect: Aspect) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of `save`s currently without a matching `restore`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn validate(&self) -> FlipbookResult<()> {
        check_balance(&self.commands)
    }

    fn push(&mut self, cmd: Command) -> &mut Self {
        self.commands.push(cmd);
        self
    }

    // Graphics state stack and transforms.

    pub fn save(&mut self) -> &mut Self {
        self.depth += 1;
        self.push(Command::Save)
    }

    pub fn restore(&mut self) -> FlipbookResult<&mut Self> {
        self.depth = self.depth.checked_sub(1).ok_or_else(|| {
            FlipbookError::unbalanced(format!(
                "restore at command #{} has no matching save",
                self.commands.len()
            ))
        })?;
        Ok(self.push(Command::Restore))
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.push(Command::Translate { dx, dy })
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.push(Command::Scale { sx, sy })
    }

    pub fn rotate(&mut self, radians: f64) -> &mut Self {
        self.push(Command::Rotate { radians })
    }

    pub fn rotate_deg(&mut self, degrees: f64) -> &mut Self {
        self.rotate(degrees.to_radians())
    }

    pub fn transform(&mut self, affine: Affine) -> &mut Self {
        self.push(Command::Transform {
            coeffs: affine.as_coeffs(),
        })
    }

    // Style.

    /// Sets both fill and stroke color.
    pub fn set_source(&mut self, color: impl IntoColor) -> FlipbookResult<&mut Self> {
        let color = color.into_color()?;
        Ok(self.push(Command::SetSource { color }))
    }

    pub fn fill_color(&mut self, color: impl IntoColor) -> FlipbookResult<&mut Self> {
        let color = color.into_color()?;
        Ok(self.push(Command::FillColor { color }))
    }

    pub fn stroke_color(&mut self, color: impl IntoColor) -> FlipbookResult<&mut Self> {
        let color = color.into_color()?;
        Ok(self.push(Command::StrokeColor { color }))
    }

    /// Multiply the alpha of everything painted until the enclosing `restore`.
    pub fn opacity(&mut self, alpha: f64) -> FlipbookResult<&mut Self> {
        let alpha = unit_interval("opacity", alpha)?;
        Ok(self.push(Command::Opacity { alpha }))
    }

    pub fn fill_opacity(&mut self, alpha: f64) -> FlipbookResult<&mut Self> {
        let alpha = unit_interval("fill opacity", alpha)?;
        Ok(self.push(Command::FillOpacity { alpha }))
    }

    pub fn stroke_opacity(&mut self, alpha: f64) -> FlipbookResult<&mut Self> {
        let alpha = unit_interval("stroke opacity", alpha)?;
        Ok(self.push(Command::StrokeOpacity { alpha }))
    }

    pub fn stroke_width(&mut self, width: f64) -> FlipbookResult<&mut Self> {
        if !width.is_finite() || width < 0.0 {
            return Err(FlipbookError::validation(format!(
                "stroke width must be finite and >= 0, got {width}"
            )));
        }
        Ok(self.push(Command::StrokeWidth { width }))
    }

    pub fn stroke_cap(&mut self, cap: LineCap) -> &mut Self {
        self.push(Command::StrokeCap { cap })
    }

    pub fn stroke_join(&mut self, join: LineJoin) -> &mut Self {
        self.push(Command::StrokeJoin { join })
    }

    /// Dash pattern of alternating on/off lengths; an empty pattern turns dashing off.
    pub fn stroke_dash(
        &mut self,
        offset: f64,
        pattern: impl IntoIterator<Item = f64>,
    ) -> FlipbookResult<&mut Self> {
        let pattern: Vec<f64> = pattern.into_iter().collect();
        if !offset.is_finite() || pattern.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(FlipbookError::validation(
                "dash offset and lengths must be finite, lengths >= 0",
            ));
        }
        if !pattern.is_empty() && pattern.iter().all(|d| *d == 0.0) {
            return Err(FlipbookError::validation(
                "dash pattern must contain a non-zero length",
            ));
        }
        Ok(self.push(Command::StrokeDash { offset, pattern }))
    }

    pub fn font(&mut self, font: &FontFace) -> &mut Self {
        self.push(Command::Font { font: font.clone() })
    }

    pub fn font_size(&mut self, size: f64) -> FlipbookResult<&mut Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(FlipbookError::validation(format!(
                "font size must be finite and > 0, got {size}"
            )));
        }
        Ok(self.push(Command::FontSize { size }))
    }

    // Path construction.

    pub fn new_path(&mut self) -> &mut Self {
        self.push(Command::NewPath)
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push(Command::MoveTo { x, y })
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push(Command::LineTo { x, y })
    }

    pub fn curve_to(&mut self, c1: (f64, f64), c2: (f64, f64), to: (f64, f64)) -> &mut Self {
        self.push(Command::CurveTo { c1, c2, to })
    }

    pub fn close_path(&mut self) -> &mut Self {
        self.push(Command::ClosePath)
    }

    pub fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.push(Command::Rectangle {
            x,
            y,
            width,
            height,
        })
    }

    pub fn rounded_rectangle(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> &mut Self {
        self.push(Command::RoundedRectangle {
            x,
            y,
            width,
            height,
            radius,
        })
    }

    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64) -> &mut Self {
        self.ellipse(cx, cy, radius, radius)
    }

    pub fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) -> &mut Self {
        self.push(Command::Ellipse { cx, cy, rx, ry })
    }

    /// Circular arc starting at angle `start`, sweeping `sweep` radians.
    pub fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, sweep: f64) -> &mut Self {
        self.push(Command::Arc {
            cx,
            cy,
            radius,
            start,
            sweep,
        })
    }

    pub fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> &mut Self {
        self.push(Command::Polyline {
            points: vec![(x0, y0), (x1, y1)],
            closed: false,
        })
    }

    pub fn polyline(&mut self, points: impl IntoIterator<Item = (f64, f64)>) -> &mut Self {
        self.push(Command::Polyline {
            points: points.into_iter().collect(),
            closed: false,
        })
    }

    pub fn polygon(&mut self, points: impl IntoIterator<Item = (f64, f64)>) -> &mut Self {
        self.push(Command::Polyline {
            points: points.into_iter().collect(),
            closed: true,
        })
    }

    pub fn bezier(
        &mut self,
        from: (f64, f64),
        c1: (f64, f64),
        c2: (f64, f64),
        to: (f64, f64),
    ) -> &mut Self {
        self.push(Command::Bezier { from, c1, c2, to })
    }

    // Painting.

    pub fn fill(&mut self) -> &mut Self {
        self.push(Command::Fill { preserve: false })
    }

    pub fn fill_preserve(&mut self) -> &mut Self {
        self.push(Command::Fill { preserve: true })
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.push(Command::Stroke { preserve: false })
    }

    pub fn stroke_preserve(&mut self) -> &mut Self {
        self.push(Command::Stroke { preserve: true })
    }

    /// Fill the whole surface with the fill color.
    pub fn paint(&mut self) -> &mut Self {
        self.push(Command::Paint)
    }

    /// Left-aligned text with its first baseline starting at `(x, y)`.
    pub fn text(&mut self, text: impl Into<String>, x: f64, y: f64) -> &mut Self {
        self.text_aligned(text, x, y, TextAlign::Left)
    }

    pub fn text_aligned(
        &mut self,
        text: impl Into<String>,
        x: f64,
        y: f64,
        align: TextAlign,
    ) -> &mut Self {
        self.push(Command::Text {
            text: text.into(),
            x,
            y,
            align,
        })
    }

    /// Draw `image` scaled into the box `(x, y, width, height)`.
    pub fn image(
        &mut self,
        image: &ImageData,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> &mut Self {
        self.push(Command::Image {
            image: image.clone(),
            x,
            y,
            width,
            height,
        })
    }

    // Rasterization.

    /// Rasterize at `width`x`height`, fitting the canvas uniformly and centered.
    pub fn render(&self, width: u32, height: u32) -> FlipbookResult<Raster> {
        self.render_with(width, height, ScaleMode::Fit, None)
    }

    #[tracing::instrument(skip(self), fields(commands = self.commands.len()))]
    pub fn render_with(
        &self,
        width: u32,
        height: u32,
        mode: ScaleMode,
        clear: Option<Color>,
    ) -> FlipbookResult<Raster> {
        let target = Size::new(width, height)?;
        replay(&self.commands, self.canvas, target, mode, clear)
    }

    /// Rasterize `height` rows tall at the drawing's display aspect (square output pixels).
    pub fn render_display(&self, height: u32) -> FlipbookResult<Raster> {
        let width = (f64::from(height) * self.aspect.ratio()).round() as u32;
        self.render_with(width, height, ScaleMode::Stretch, None)
    }
}

fn unit_interval(what: &str, v: f64) -> FlipbookResult<f64> {
    if !(0.0..=1.0).contains(&v) {
        return Err(FlipbookError::validation(format!(
            "{what} must be within [0, 1], got {v}"
        )));
    }
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/draw/drawing.rs"]
mod tests;
