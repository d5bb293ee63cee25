//! A slide carousel whose slides each carry a decorative, rotating point
//! cloud, compiled to WebAssembly.
//!
//! The DOM-free pieces (slide index, sample data, projection math) build on
//! any target so they can be tested on the host.

pub mod carousel;
pub mod config;
pub mod motion;
pub mod projection;
pub mod sample;

// Only compile browser bindings when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{Carousel, RenderCapability, Visualization};

pub use carousel::{Direction, SlideState};
pub use config::CarouselConfig;
pub use sample::{generate_sample_data, Point};
