use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    draw::raster::{ImageFormat, Raster},
    foundation::{
        core::{Fps, FrameIndex, FrameRange},
        error::{FlipbookError, FlipbookResult},
    },
};

/// What a sink is told before the first frame arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
    pub range: FrameRange,
}

/// Receives rasterized frames in increasing frame order.
pub trait RasterSink {
    fn begin(&mut self, cfg: &SinkConfig) -> FlipbookResult<()>;
    fn push_frame(&mut self, frame: FrameIndex, raster: &Raster) -> FlipbookResult<()>;
    fn end(&mut self) -> FlipbookResult<()>;
}

/// `00000001.png` style file name for `frame`.
pub fn frame_file_name(frame: FrameIndex, format: ImageFormat) -> String {
    format!("{:08}.{}", frame.0, format.extension())
}

/// Writes each frame as a sequentially numbered image file into a directory.
#[derive(Debug)]
pub struct ImageDirSink {
    dir: PathBuf,
    format: ImageFormat,
    written: Vec<PathBuf>,
}

impl ImageDirSink {
    pub fn new(dir: impl Into<PathBuf>, format: ImageFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn frame_path(&self, frame: FrameIndex) -> PathBuf {
        self.dir.join(frame_file_name(frame, self.format))
    }

    /// Files written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl RasterSink for ImageDirSink {
    fn begin(&mut self, _cfg: &SinkConfig) -> FlipbookResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame directory '{}'", self.dir.display()))?;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, frame: FrameIndex, raster: &Raster) -> FlipbookResult<()> {
        let path = self.frame_path(frame);
        raster.save(&path, self.format)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> FlipbookResult<()> {
        Ok(())
    }
}

/// Keeps every frame in memory; for previews and tests.
#[derive(Debug, Default)]
pub struct InMemorySink {
    config: Option<SinkConfig>,
    frames: Vec<(FrameIndex, Raster)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SinkConfig> {
        self.config.as_ref()
    }

    pub fn frames(&self) -> &[(FrameIndex, Raster)] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<(FrameIndex, Raster)> {
        self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl RasterSink for InMemorySink {
    fn begin(&mut self, cfg: &SinkConfig) -> FlipbookResult<()> {
        self.config = Some(*cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: FrameIndex, raster: &Raster) -> FlipbookResult<()> {
        if self.config.is_none() {
            return Err(FlipbookError::validation("push_frame called before begin"));
        }
        self.frames.push((frame, raster.clone()));
        Ok(())
    }

    fn end(&mut self) -> FlipbookResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
