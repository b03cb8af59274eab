//! Rendering for diamond-square height-maps.
//!
//! Finished [`Grid`](diamond_square::grid::Grid)s are read through their
//! dense row-major value buffer and mapped through a colour [`Gradient`] into
//! an RGB image, which can be written out as a PNG.

pub mod config;
pub mod error;
pub mod gradient;
pub mod raster;

pub use config::load_config_file;
pub use error::{RenderError, Result};
pub use gradient::Gradient;
pub use raster::{render, save_png};
