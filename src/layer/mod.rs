pub(crate) mod content;
#[allow(clippy::module_inception)]
pub(crate) mod layer;
