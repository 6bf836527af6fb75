pub mod colormap;
pub mod interpolator;

pub use colormap::Colormap;
