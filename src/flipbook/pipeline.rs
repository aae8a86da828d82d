use rayon::prelude::*;

use crate::{
    draw::{
        color::Color,
        raster::{ImageFormat, Raster, ScaleMode},
    },
    encode::sink::{RasterSink, SinkConfig},
    flipbook::flipbook::Flipbook,
    foundation::{
        core::{FrameIndex, FrameRange, Size},
        error::{FlipbookError, FlipbookResult},
    },
};

/// Environment variable consulted when [`RenderThreading::threads`] is unset.
pub const THREADS_ENV: &str = "FLIPBOOK_RENDER_THREADS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderThreading {
    pub parallel: bool,
    /// Frames rendered per parallel batch before they are pushed to the sink.
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

impl RenderThreading {
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }

    /// Worker count: `threads`, else `FLIPBOOK_RENDER_THREADS`, else rayon's default.
    pub fn resolved_threads(&self) -> FlipbookResult<Option<usize>> {
        if self.threads.is_some() {
            return Ok(self.threads);
        }
        match std::env::var(THREADS_ENV) {
            Ok(raw) => raw.trim().parse::<usize>().map(Some).map_err(|_| {
                FlipbookError::validation(format!(
                    "{THREADS_ENV} must be a positive integer, got '{raw}'"
                ))
            }),
            Err(_) => Ok(None),
        }
    }
}

/// How frames are rasterized and written.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOpts {
    pub format: ImageFormat,
    /// Painted under every frame; `None` keeps transparent pixels.
    pub clear: Option<Color>,
    pub scale_mode: ScaleMode,
    /// Overrides the flipbook's output size.
    pub size: Option<Size>,
    pub threading: RenderThreading,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            clear: None,
            scale_mode: ScaleMode::Fit,
            size: None,
            threading: RenderThreading::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
}

pub(crate) fn render_one(
    book: &Flipbook,
    frame: FrameIndex,
    opts: &RenderOpts,
) -> FlipbookResult<Raster> {
    let target = opts.size.unwrap_or(book.output_size());
    book.get_frame(frame)
        .and_then(|drawing| {
            drawing.render_with(target.width, target.height, opts.scale_mode, opts.clear)
        })
        .map_err(|e| e.in_frame(frame.0))
}

#[tracing::instrument(skip(book, sink, opts), fields(start = range.start.0, end = range.end.0))]
pub(crate) fn render_frames(
    book: &Flipbook,
    range: FrameRange,
    sink: &mut dyn RasterSink,
    opts: &RenderOpts,
) -> FlipbookResult<RenderStats> {
    if range.is_empty() {
        return Err(FlipbookError::validation("render range must be non-empty"));
    }
    let target = opts.size.unwrap_or(book.output_size());
    let pool = if opts.threading.parallel {
        Some(build_thread_pool(opts.threading.resolved_threads()?)?)
    } else {
        None
    };

    sink.begin(&SinkConfig {
        width: target.width,
        height: target.height,
        fps: book.fps(),
        range,
    })?;

    let mut stats = RenderStats::default();
    match &pool {
        None => {
            for frame in range.iter() {
                let raster = render_one(book, frame, opts)?;
                sink.push_frame(frame, &raster)?;
                stats.frames_total += 1;
                stats.frames_rendered += 1;
                tracing::debug!(frame = frame.0, "frame written");
            }
        }
        Some(pool) => {
            let chunk_size = normalized_chunk_size(opts.threading.chunk_size);
            let mut chunk_start = range.start.0;
            while chunk_start < range.end.0 {
                let chunk_end = (chunk_start + chunk_size).min(range.end.0);
                let frames: Vec<FrameIndex> = (chunk_start..chunk_end).map(FrameIndex).collect();
                let rendered = pool.install(|| {
                    frames
                        .par_iter()
                        .map(|&frame| render_one(book, frame, opts))
                        .collect::<Vec<_>>()
                });

                // Push in order; frames before a failure stay written.
                for (frame, raster) in frames.iter().zip(rendered) {
                    sink.push_frame(*frame, &raster?)?;
                    stats.frames_total += 1;
                    stats.frames_rendered += 1;
                }
                tracing::debug!(chunk_start, chunk_end, "chunk written");
                chunk_start = chunk_end;
            }
        }
    }

    sink.end()?;
    tracing::info!(
        frames = stats.frames_rendered,
        parallel = opts.threading.parallel,
        "render finished"
    );
    Ok(stats)
}

fn build_thread_pool(threads: Option<usize>) -> FlipbookResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FlipbookError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FlipbookError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flipbook/pipeline.rs"]
mod tests;
