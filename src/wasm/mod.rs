use wasm_bindgen::prelude::*;

mod controller;
mod frame_loop;
mod listener;
mod viz;

pub use controller::Carousel;
pub use viz::{RenderCapability, Visualization};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::debug!("scatter carousel module loaded");
}
