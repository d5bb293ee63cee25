//! Per-slide decorative point clouds.
//!
//! [`mount`] picks a renderer from an injected [`RenderCapability`] and
//! returns a [`Visualization`] owning the canvas, its frame loop and every
//! listener it registered.

mod canvas2d;
mod webgl;

use super::frame_loop::FrameLoop;
use super::listener::Listener;
use crate::config::CarouselConfig;
use crate::sample::sample_data_for_slide;
use std::fmt;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Document, HtmlCanvasElement, HtmlElement};

/// Rendering strategy available in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderCapability {
    WebGl2,
    Canvas2d,
}

impl RenderCapability {
    /// Probes for WebGL2 on a scratch canvas that is never attached.
    pub fn detect(document: &Document) -> Self {
        let webgl = document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|canvas| canvas.get_context("webgl2").ok().flatten());
        match webgl {
            Some(_) => Self::WebGl2,
            None => Self::Canvas2d,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WebGl2 => "webgl2",
            Self::Canvas2d => "canvas2d",
        }
    }
}

impl fmt::Display for RenderCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to one running visualization.
pub struct Visualization {
    ordinal: u32,
    strategy: RenderCapability,
    point_count: usize,
    frame: Option<FrameLoop>,
    resize: Option<Listener>,
    pointer: Vec<Listener>,
}

impl Visualization {
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn strategy(&self) -> RenderCapability {
        self.strategy
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn is_running(&self) -> bool {
        self.frame.as_ref().is_some_and(FrameLoop::is_running)
    }

    /// Listeners still registered by this visualization.
    pub fn listener_count(&self) -> usize {
        usize::from(self.resize.is_some()) + self.pointer.len()
    }

    pub fn cancel_animation(&mut self) {
        if let Some(frame) = self.frame.take() {
            frame.cancel();
        }
    }

    /// Drops the window resize listener along with the drag handlers.
    pub fn remove_resize_listener(&mut self) {
        self.resize = None;
        self.pointer.clear();
    }
}

/// What a renderer hands back after wiring itself into the container.
struct Mounted {
    frame: FrameLoop,
    resize: Listener,
    pointer: Vec<Listener>,
}

/// Creates the canvas inside `container` and starts rendering slide `ordinal`.
pub fn mount(
    document: &Document,
    container: &HtmlElement,
    ordinal: u32,
    capability: RenderCapability,
    config: &CarouselConfig,
) -> Result<Visualization, JsValue> {
    let points = sample_data_for_slide(ordinal);
    let point_count = points.len();

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    if let Some((width, height)) = container_size(container) {
        canvas.set_width(width);
        canvas.set_height(height);
    }
    container.append_child(&canvas)?;
    container.set_attribute("data-strategy", capability.as_str())?;

    let surface = canvas.clone();
    let mounted = match capability {
        RenderCapability::WebGl2 => webgl::mount(container, canvas, points, config),
        RenderCapability::Canvas2d => canvas2d::mount(container, canvas, points, config),
    };
    let mounted = mounted.map_err(|err| {
        surface.remove();
        container.remove_attribute("data-strategy").ok();
        err
    })?;
    log::debug!("slide {ordinal}: {point_count} points via {capability}");

    Ok(Visualization {
        ordinal,
        strategy: capability,
        point_count,
        frame: Some(mounted.frame),
        resize: Some(mounted.resize),
        pointer: mounted.pointer,
    })
}

/// Client size of the container, `None` when either side is zero.
fn container_size(container: &HtmlElement) -> Option<(u32, u32)> {
    let width = u32::try_from(container.client_width()).ok()?;
    let height = u32::try_from(container.client_height()).ok()?;
    crate::projection::aspect(width, height).map(|_| (width, height))
}

/// Registers `on_resize` against window resize events.
fn bind_resize<F>(mut on_resize: F) -> Result<Listener, JsValue>
where
    F: FnMut() + 'static,
{
    let window = window().ok_or("no window")?;
    Listener::bind(&window, "resize", move |_| on_resize())
}
