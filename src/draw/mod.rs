pub(crate) mod color;
pub(crate) mod command;
pub(crate) mod drawing;
pub(crate) mod image;
pub(crate) mod raster;
pub(crate) mod text;
