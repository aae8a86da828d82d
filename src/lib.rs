//! Flipbook is a keyframe animation and layer-compositing rendering engine.
//!
//! A scene is a tree of [`Layer`]s, each carrying time-bounded [`Effect`]s and positioned
//! sublayers. A [`Flipbook`] turns that tree into a deterministic sequence of rasterized frames,
//! ready to be handed to an external video encoder.
//!
//! # Pipeline overview
//!
//! 1. **Record**: `Flipbook + FrameIndex -> Drawing` (a deferred command buffer)
//! 2. **Rasterize**: `Drawing -> Raster` at any output size (CPU, premultiplied RGBA8)
//! 3. **Write**: `Raster -> RasterSink` (numbered image files, or memory)
//! 4. **Encode** (external): a [`VideoEncoder`] consumes the frame directory
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure frames**: recording frame `n` never depends on any other frame; layers and effects
//!   are read-only while rendering, so frames may render in parallel.
//! - **No IO while drawing**: fonts and images are loaded when the scene is built.
#![forbid(unsafe_code)]

mod animation;
mod draw;
mod effects;
mod encode;
mod flipbook;
mod foundation;
mod layer;

pub use animation::ease::Interpolation;
pub use animation::tween::{Keyframe, Lerp, Tween};
pub use draw::color::{Color, IntoColor};
pub use draw::command::{Command, LineCap, LineJoin, TextAlign, check_balance};
pub use draw::drawing::Drawing;
pub use draw::image::ImageData;
pub use draw::raster::{ImageFormat, Raster, ScaleMode};
pub use draw::text::{FontFace, TextExtents};
pub use effects::effect::{
    Colorfade, Effect, Fade, Interval, Movement, Scale, Spectrum, Whirl,
};
pub use effects::key_function::{Attribute, KeyFunction, Value, ValueKind};
pub use encode::encoder::{EncodeJob, VideoEncoder};
pub use encode::sink::{ImageDirSink, InMemorySink, RasterSink, SinkConfig, frame_file_name};
pub use flipbook::flipbook::Flipbook;
pub use flipbook::pipeline::{RenderOpts, RenderStats, RenderThreading, THREADS_ENV};
pub use flipbook::standard::{DiscFormat, TvSystem, VideoStandard};
pub use foundation::core::{
    Affine, Aspect, BezPath, Fps, FrameIndex, FrameRange, Point, Rect, Size, Vec2,
};
pub use foundation::error::{FlipbookError, FlipbookResult};
pub use layer::content::{
    Background, ColorBars, ImageLayer, Label, SafeArea, Shape, ShapeKind, Text,
};
pub use layer::layer::{Layer, LayerContent};
