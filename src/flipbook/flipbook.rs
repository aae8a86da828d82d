use std::path::{Path, PathBuf};

use crate::{
    draw::{drawing::Drawing, raster::Raster},
    encode::{
        encoder::{EncodeJob, VideoEncoder},
        sink::{ImageDirSink, RasterSink},
    },
    flipbook::{
        pipeline::{self, RenderOpts, RenderStats},
        standard::VideoStandard,
    },
    foundation::{
        core::{Aspect, Fps, FrameIndex, FrameRange, Size, Vec2},
        error::{FlipbookError, FlipbookResult},
    },
    layer::layer::Layer,
};

/// Turns a tree of layers into a numbered sequence of rasterized frames.
///
/// Frames are numbered `1..=frame_count`. Every frame is computed independently from the
/// (immutable) layer tree, so any subset can be rendered in any order or in parallel.
#[derive(Debug)]
pub struct Flipbook {
    frame_count: u64,
    fps: Fps,
    canvas: Size,
    output: Size,
    aspect: Aspect,
    standard: Option<VideoStandard>,
    layers: Vec<(Layer, Vec2)>,
}

impl Flipbook {
    /// Free-form flipbook rendered at its canvas size.
    pub fn new(frame_count: u64, fps: Fps, canvas: Size) -> FlipbookResult<Self> {
        if frame_count == 0 {
            return Err(FlipbookError::validation("flipbook needs at least one frame"));
        }
        Ok(Self {
            frame_count,
            fps,
            canvas,
            output: canvas,
            aspect: Aspect::of(canvas),
            standard: None,
            layers: Vec::new(),
        })
    }

    /// `seconds` of video sized and timed for a disc standard, displayed at `aspect`.
    pub fn for_standard(
        seconds: f64,
        standard: VideoStandard,
        aspect: Aspect,
    ) -> FlipbookResult<Self> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(FlipbookError::validation(format!(
                "flipbook length must be finite and > 0 seconds, got {seconds}"
            )));
        }
        let fps = standard.fps();
        let mut book = Self::new(fps.secs_to_frames_round(seconds).max(1), fps, standard.size())?;
        book.aspect = aspect;
        book.standard = Some(standard);
        Ok(book)
    }

    /// Rasterize at `output` instead of the canvas size.
    pub fn with_output_size(mut self, output: Size) -> Self {
        self.output = output;
        self
    }

    pub fn with_aspect(mut self, aspect: Aspect) -> Self {
        self.aspect = aspect;
        self
    }

    /// Register a top-level layer drawn at `position`, in insertion order.
    pub fn add(&mut self, layer: Layer, position: impl Into<Vec2>) -> &mut Self {
        self.layers.push((layer, position.into()));
        self
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn output_size(&self) -> Size {
        self.output
    }

    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    pub fn standard(&self) -> Option<VideoStandard> {
        self.standard
    }

    pub fn layers(&self) -> &[(Layer, Vec2)] {
        &self.layers
    }

    /// All frames, `[1, frame_count]`.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(1),
            end: FrameIndex(self.frame_count + 1),
        }
    }

    /// Record one frame as a fresh drawing.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn get_frame(&self, frame: FrameIndex) -> FlipbookResult<Drawing> {
        let mut drawing = Drawing::with_aspect(self.canvas, self.aspect);
        for (idx, (layer, position)) in self.layers.iter().enumerate() {
            drawing.save();
            drawing.translate(position.x, position.y);
            layer.draw_with_effects(&mut drawing, frame).map_err(|e| {
                e.context(match layer.name() {
                    Some(name) => format!("top-level layer #{idx} '{name}'"),
                    None => format!("top-level layer #{idx}"),
                })
            })?;
            drawing.restore()?;
        }
        Ok(drawing)
    }

    /// Record and rasterize one frame.
    pub fn render_frame(&self, frame: FrameIndex, opts: &RenderOpts) -> FlipbookResult<Raster> {
        pipeline::render_one(self, frame, opts)
    }

    /// Render `range` into `sink`, in increasing frame order.
    pub fn render_frames(
        &self,
        range: FrameRange,
        sink: &mut dyn RasterSink,
        opts: &RenderOpts,
    ) -> FlipbookResult<RenderStats> {
        pipeline::render_frames(self, range, sink, opts)
    }

    /// Render every frame as `00000001.png`, `00000002.png`, ... into `dir`.
    pub fn render_all(&self, dir: impl AsRef<Path>) -> FlipbookResult<RenderStats> {
        self.render_all_with(dir, &RenderOpts::default())
    }

    pub fn render_all_with(
        &self,
        dir: impl AsRef<Path>,
        opts: &RenderOpts,
    ) -> FlipbookResult<RenderStats> {
        let mut sink = ImageDirSink::new(dir.as_ref(), opts.format);
        self.render_frames(self.range(), &mut sink, opts)
    }

    /// Describe the frames written by [`Flipbook::render_all_with`] for an encoder.
    pub fn encode_job(
        &self,
        frames_dir: impl Into<PathBuf>,
        opts: &RenderOpts,
    ) -> FlipbookResult<EncodeJob> {
        let standard = self.standard.ok_or_else(|| {
            FlipbookError::validation("encoding needs a flipbook built for a video standard")
        })?;
        Ok(EncodeJob {
            frames_dir: frames_dir.into(),
            frames: self.range(),
            image_format: opts.format,
            fps: self.fps,
            format: standard.format,
            tv_system: standard.tv_system,
            aspect: self.aspect,
        })
    }

    /// Hand the rendered frame directory to an external encoder.
    pub fn encode(
        &self,
        encoder: &dyn VideoEncoder,
        frames_dir: impl Into<PathBuf>,
        opts: &RenderOpts,
    ) -> FlipbookResult<PathBuf> {
        let job = self.encode_job(frames_dir, opts)?;
        tracing::info!(dir = %job.frames_dir.display(), standard = ?self.standard, "encoding frames");
        encoder.encode(&job)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flipbook/flipbook.rs"]
mod tests;
