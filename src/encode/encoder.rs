use std::path::PathBuf;

use crate::{
    draw::raster::ImageFormat,
    encode::sink::frame_file_name,
    flipbook::standard::{DiscFormat, TvSystem},
    foundation::{
        core::{Aspect, Fps, FrameRange},
        error::FlipbookResult,
    },
};

/// Everything an external encoder needs to turn a frame directory into a video stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeJob {
    pub frames_dir: PathBuf,
    pub frames: FrameRange,
    pub image_format: ImageFormat,
    pub fps: Fps,
    pub format: DiscFormat,
    pub tv_system: TvSystem,
    pub aspect: Aspect,
}

impl EncodeJob {
    /// Path of the image written for each frame, in frame order.
    pub fn frame_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.frames
            .iter()
            .map(|f| self.frames_dir.join(frame_file_name(f, self.image_format)))
    }
}

/// Turns a directory of numbered frame images into a compressed video stream.
///
/// Implementations live outside this crate; failures are returned as-is and never retried.
pub trait VideoEncoder {
    fn encode(&self, job: &EncodeJob) -> FlipbookResult<PathBuf>;
}

impl<F> VideoEncoder for F
where
    F: Fn(&EncodeJob) -> FlipbookResult<PathBuf>,
{
    fn encode(&self, job: &EncodeJob) -> FlipbookResult<PathBuf> {
        self(job)
    }
}
