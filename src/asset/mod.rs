//! Slideshow assets: candidate catalogs, image formats and the resolved set.

mod catalog;
mod format;
mod set;

pub use catalog::{Catalog, CatalogError};
pub use format::{ImageFormat, SNIFF_LEN};
pub use set::{Asset, AssetSet};
