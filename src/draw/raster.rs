use std::path::Path;

use anyhow::Context as _;
use kurbo::Shape as _;

use crate::{
    draw::{
        color::Color,
        command::{Command, LineCap, LineJoin, TextAlign},
        image::ImageData,
        text::{FontFace, TextBrush, TextEngine, TextExtents},
    },
    foundation::{
        core::{Affine, BezPath, Point, Rect, Size, Vec2},
        error::{FlipbookError, FlipbookResult},
        math::{flatten_over_rgba8, unpremultiply_rgba8_in_place},
    },
};

const PATH_TOLERANCE: f64 = 0.1;

/// How a drawing's canvas maps onto a differently sized raster target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// One uniform factor `min(w/cw, h/ch)`, canvas centered in the target.
    #[default]
    Fit,
    /// Independent x/y factors, for anamorphic output.
    Stretch,
}

impl ScaleMode {
    pub fn base_transform(self, canvas: Size, target: Size) -> Affine {
        let sx = f64::from(target.width) / f64::from(canvas.width);
        let sy = f64::from(target.height) / f64::from(canvas.height);
        match self {
            Self::Fit => {
                let s = sx.min(sy);
                let offset = Vec2::new(
                    (f64::from(target.width) - f64::from(canvas.width) * s) / 2.0,
                    (f64::from(target.height) - f64::from(canvas.height) * s) / 2.0,
                );
                Affine::translate(offset) * Affine::scale(s)
            }
            Self::Stretch => Affine::scale_non_uniform(sx, sy),
        }
    }
}

/// Image file format accepted by [`Raster::save`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    /// Lossless, alpha preserved.
    #[default]
    Png,
    /// Lossy, alpha flattened over black.
    Jpeg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// A rasterized frame: tightly packed, row-major, **premultiplied** RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Raster {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    pub fn save(&self, path: &Path, format: ImageFormat) -> FlipbookResult<()> {
        let written = match format {
            ImageFormat::Png => image::save_buffer_with_format(
                path,
                &self.to_straight_rgba8(),
                self.width,
                self.height,
                image::ColorType::Rgba8,
                image::ImageFormat::Png,
            ),
            ImageFormat::Jpeg => {
                let mut flat = vec![0u8; self.data.len()];
                flatten_over_rgba8(&mut flat, &self.data, [0, 0, 0]);
                let rgb: Vec<u8> = flat
                    .chunks_exact(4)
                    .flat_map(|px| [px[0], px[1], px[2]])
                    .collect();
                image::save_buffer_with_format(
                    path,
                    &rgb,
                    self.width,
                    self.height,
                    image::ColorType::Rgb8,
                    image::ImageFormat::Jpeg,
                )
            }
        };
        written.with_context(|| format!("write {:?} '{}'", format, path.display()))?;
        Ok(())
    }
}

#[derive(Clone)]
struct GraphicsState {
    ctm: Affine,
    fill: Color,
    stroke: Color,
    opacity: f64,
    fill_opacity: f64,
    stroke_opacity: f64,
    stroke_width: f64,
    cap: LineCap,
    join: LineJoin,
    dash: Option<(f64, Vec<f64>)>,
    font: Option<FontFace>,
    font_size: f64,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: Affine::IDENTITY,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            opacity: 1.0,
            fill_opacity: 1.0,
            stroke_opacity: 1.0,
            stroke_width: 1.0,
            cap: LineCap::default(),
            join: LineJoin::default(),
            dash: None,
            font: None,
            font_size: 20.0,
        }
    }
}

impl GraphicsState {
    fn fill_paint(&self) -> Color {
        self.fill.with_alpha_mul(self.fill_opacity * self.opacity)
    }

    fn stroke_paint(&self) -> Color {
        self.stroke.with_alpha_mul(self.stroke_opacity * self.opacity)
    }

    fn cpu_stroke(&self) -> vello_cpu::kurbo::Stroke {
        let cap = match self.cap {
            LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
            LineCap::Round => vello_cpu::kurbo::Cap::Round,
            LineCap::Square => vello_cpu::kurbo::Cap::Square,
        };
        let join = match self.join {
            LineJoin::Miter => vello_cpu::kurbo::Join::Miter,
            LineJoin::Round => vello_cpu::kurbo::Join::Round,
            LineJoin::Bevel => vello_cpu::kurbo::Join::Bevel,
        };
        let stroke = vello_cpu::kurbo::Stroke::new(self.stroke_width)
            .with_caps(cap)
            .with_join(join);
        match &self.dash {
            Some((offset, pattern)) => stroke.with_dashes(*offset, pattern.iter().copied()),
            None => stroke,
        }
    }
}

/// Replay `commands` recorded against `canvas` onto a fresh `target`-sized surface.
pub(crate) fn replay(
    commands: &[Command],
    canvas: Size,
    target: Size,
    mode: ScaleMode,
    clear: Option<Color>,
) -> FlipbookResult<Raster> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(FlipbookError::validation(format!(
            "drawing canvas must be non-zero, got {}x{}",
            canvas.width, canvas.height
        )));
    }
    let width: u16 = target
        .width
        .try_into()
        .map_err(|_| FlipbookError::render("target width exceeds u16"))?;
    let height: u16 = target
        .height
        .try_into()
        .map_err(|_| FlipbookError::render("target height exceeds u16"))?;

    let mut replayer = Replayer {
        ctx: vello_cpu::RenderContext::new(width, height),
        base: mode.base_transform(canvas, target),
        target,
        state: GraphicsState::default(),
        stack: Vec::new(),
        path: BezPath::new(),
        text: None,
    };

    if let Some(color) = clear {
        replayer.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        replayer.ctx.set_paint(cpu_color(color));
        replayer.ctx.fill_rect(&replayer.device_rect());
    }

    // Letterbox margins stay clear of anything drawn outside the canvas.
    let offset = replayer.base.translation();
    let letterboxed = offset.x > 0.0 || offset.y > 0.0;
    if letterboxed {
        let bounds = Rect::new(0.0, 0.0, f64::from(canvas.width), f64::from(canvas.height));
        replayer.ctx.set_transform(affine_to_cpu(replayer.base));
        replayer
            .ctx
            .push_clip_layer(&bezpath_to_cpu(&bounds.to_path(PATH_TOLERANCE)));
    }

    for (idx, cmd) in commands.iter().enumerate() {
        replayer
            .exec(cmd, idx)
            .map_err(|e| e.context(format!("command #{idx} ({})", cmd.name())))?;
    }
    if !replayer.stack.is_empty() {
        return Err(FlipbookError::unbalanced(format!(
            "{} save(s) left without a matching restore",
            replayer.stack.len()
        )));
    }

    if letterboxed {
        replayer.ctx.pop_layer();
    }

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    replayer.ctx.flush();
    replayer.ctx.render_to_pixmap(&mut pixmap);

    Ok(Raster {
        width: target.width,
        height: target.height,
        data: pixmap.data_as_u8_slice().to_vec(),
    })
}

struct Replayer {
    ctx: vello_cpu::RenderContext,
    base: Affine,
    target: Size,
    state: GraphicsState,
    stack: Vec<GraphicsState>,
    path: BezPath,
    text: Option<TextEngine>,
}

impl Replayer {
    fn device_rect(&self) -> vello_cpu::kurbo::Rect {
        vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.target.width),
            f64::from(self.target.height),
        )
    }

    fn device_transform(&self) -> vello_cpu::kurbo::Affine {
        affine_to_cpu(self.base * self.state.ctm)
    }

    fn exec(&mut self, cmd: &Command, idx: usize) -> FlipbookResult<()> {
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match cmd {
            Command::Save => self.stack.push(self.state.clone()),
            Command::Restore => {
                self.state = self.stack.pop().ok_or_else(|| {
                    FlipbookError::unbalanced(format!(
                        "restore at command #{idx} has no matching save"
                    ))
                })?;
            }
            Command::Translate { dx, dy } => {
                self.state.ctm = self.state.ctm * Affine::translate(Vec2::new(*dx, *dy));
            }
            Command::Scale { sx, sy } => {
                self.state.ctm = self.state.ctm * Affine::scale_non_uniform(*sx, *sy);
            }
            Command::Rotate { radians } => {
                self.state.ctm = self.state.ctm * Affine::rotate(*radians);
            }
            Command::Transform { coeffs } => {
                self.state.ctm = self.state.ctm * Affine::new(*coeffs);
            }

            Command::SetSource { color } => {
                self.state.fill = *color;
                self.state.stroke = *color;
            }
            Command::FillColor { color } => self.state.fill = *color,
            Command::StrokeColor { color } => self.state.stroke = *color,
            Command::Opacity { alpha } => self.state.opacity *= alpha,
            Command::FillOpacity { alpha } => self.state.fill_opacity = *alpha,
            Command::StrokeOpacity { alpha } => self.state.stroke_opacity = *alpha,
            Command::StrokeWidth { width } => self.state.stroke_width = *width,
            Command::StrokeCap { cap } => self.state.cap = *cap,
            Command::StrokeJoin { join } => self.state.join = *join,
            Command::StrokeDash { offset, pattern } => {
                self.state.dash = if pattern.is_empty() {
                    None
                } else {
                    Some((*offset, pattern.clone()))
                };
            }
            Command::Font { font } => self.state.font = Some(font.clone()),
            Command::FontSize { size } => self.state.font_size = *size,

            Command::NewPath => self.path = BezPath::new(),
            Command::MoveTo { x, y } => self.path.move_to((*x, *y)),
            Command::LineTo { x, y } => self.line_to(Point::new(*x, *y)),
            Command::CurveTo { c1, c2, to } => {
                if self.path.elements().is_empty() {
                    self.path.move_to(*c1);
                }
                self.path.curve_to(*c1, *c2, *to);
            }
            Command::ClosePath => {
                if !self.path.elements().is_empty() {
                    self.path.close_path();
                }
            }
            Command::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                let rect = Rect::new(*x, *y, x + width, y + height);
                self.path.extend(rect.path_elements(PATH_TOLERANCE));
            }
            Command::RoundedRectangle {
                x,
                y,
                width,
                height,
                radius,
            } => {
                let rect = kurbo::RoundedRect::new(*x, *y, x + width, y + height, *radius);
                self.path.extend(rect.path_elements(PATH_TOLERANCE));
            }
            Command::Ellipse { cx, cy, rx, ry } => {
                let ellipse = kurbo::Ellipse::new((*cx, *cy), (*rx, *ry), 0.0);
                self.path.extend(ellipse.path_elements(PATH_TOLERANCE));
            }
            Command::Arc {
                cx,
                cy,
                radius,
                start,
                sweep,
            } => {
                let arc = kurbo::Arc::new((*cx, *cy), (*radius, *radius), *start, *sweep, 0.0);
                self.path.extend(arc.path_elements(PATH_TOLERANCE));
            }
            Command::Polyline { points, closed } => {
                let mut it = points.iter();
                if let Some(first) = it.next() {
                    self.path.move_to(*first);
                    for p in it {
                        self.path.line_to(*p);
                    }
                    if *closed {
                        self.path.close_path();
                    }
                }
            }
            Command::Bezier { from, c1, c2, to } => {
                self.path.move_to(*from);
                self.path.curve_to(*c1, *c2, *to);
            }

            Command::Fill { preserve } => {
                self.ctx.set_transform(self.device_transform());
                self.ctx.set_paint(cpu_color(self.state.fill_paint()));
                self.ctx.fill_path(&bezpath_to_cpu(&self.path));
                if !preserve {
                    self.path = BezPath::new();
                }
            }
            Command::Stroke { preserve } => {
                self.ctx.set_transform(self.device_transform());
                self.ctx.set_paint(cpu_color(self.state.stroke_paint()));
                self.ctx.set_stroke(self.state.cpu_stroke());
                self.ctx.stroke_path(&bezpath_to_cpu(&self.path));
                if !preserve {
                    self.path = BezPath::new();
                }
            }
            Command::Paint => {
                self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                self.ctx.set_paint(cpu_color(self.state.fill_paint()));
                self.ctx.fill_rect(&self.device_rect());
            }
            Command::Text { text, x, y, align } => self.draw_text(text, *x, *y, *align)?,
            Command::Image {
                image,
                x,
                y,
                width,
                height,
            } => self.draw_image(image, *x, *y, *width, *height)?,
        }
        Ok(())
    }

    fn line_to(&mut self, p: Point) {
        if self.path.elements().is_empty() {
            self.path.move_to(p);
        } else {
            self.path.line_to(p);
        }
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, align: TextAlign) -> FlipbookResult<()> {
        let face = self
            .state
            .font
            .clone()
            .ok_or_else(|| FlipbookError::validation("text drawn before any font was set"))?;
        let [r, g, b, a] = self.state.fill_paint().to_rgba8();
        let engine = self.text.get_or_insert_with(TextEngine::new);
        let layout = engine.layout_plain(
            text,
            &face,
            self.state.font_size as f32,
            TextBrush { r, g, b, a },
        )?;
        let font = engine.font_data(&face);

        // (x, y) names the left/center/right end of the first baseline.
        let extents = TextExtents::of(&layout);
        let dx = match align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -extents.width / 2.0,
            TextAlign::Right => -extents.width,
        };
        let origin = Affine::translate(Vec2::new(x + dx, y - extents.baseline));
        self.ctx
            .set_transform(affine_to_cpu(self.base * self.state.ctm * origin));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: &ImageData,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> FlipbookResult<()> {
        let pixmap = image_premul_bytes_to_pixmap(image)?;
        let (iw, ih) = (f64::from(image.width()), f64::from(image.height()));
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        let placement = Affine::translate(Vec2::new(x, y))
            * Affine::scale_non_uniform(width / iw, height / ih);
        self.ctx
            .set_transform(affine_to_cpu(self.base * self.state.ctm * placement));
        self.ctx.set_paint(paint);

        let opacity = (self.state.opacity * self.state.fill_opacity).clamp(0.0, 1.0) as f32;
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
        Ok(())
    }
}

fn cpu_color(c: Color) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.to_rgba8();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(image: &ImageData) -> FlipbookResult<vello_cpu::Pixmap> {
    let w: u16 = image
        .width()
        .try_into()
        .map_err(|_| FlipbookError::render("image width exceeds u16"))?;
    let h: u16 = image
        .height()
        .try_into()
        .map_err(|_| FlipbookError::render("image height exceeds u16"))?;

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(image.width() as usize * image.height() as usize);
    for px in image.premul_rgba8().chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/draw/raster.rs"]
mod tests;
