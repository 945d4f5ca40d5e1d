//! Configuration section definitions.
//!
//! | Section          | Purpose                                   |
//! |------------------|-------------------------------------------|
//! | `[slideshow]`    | Photo discovery and slide timing          |
//! | `[music]`        | Background music flag and track           |
//! | `[celebration]`  | Cake candles                              |

mod celebration;
mod music;
mod slideshow;

pub use celebration::CelebrationConfig;
pub use music::MusicConfig;
pub use slideshow::{CatalogSource, SlideshowConfig};
