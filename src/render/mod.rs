pub mod compositor;
pub mod encode;
pub mod raster;
pub mod scene;
