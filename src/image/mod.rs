pub mod draw;
pub mod f32;
pub mod io;
pub mod orient;
pub mod raster;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::orient::{Orientation, Rotation};
pub use self::raster::RasterU8;
pub use self::traits::{ImageView, ImageViewMut, Rows};
