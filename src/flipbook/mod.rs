#[allow(clippy::module_inception)]
pub(crate) mod flipbook;
pub(crate) mod pipeline;
pub(crate) mod standard;
