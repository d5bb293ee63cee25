use super::listener::Listener;
use super::viz::{self, RenderCapability, Visualization};
use crate::carousel::{Direction, SlideState};
use crate::config::CarouselConfig;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlElement, KeyboardEvent};

/// Slide elements plus the index they render, shared with input handlers.
struct Deck {
    slides: Vec<Element>,
    state: RefCell<SlideState>,
    active_class: String,
}

impl Deck {
    fn advance(&self, direction: Direction) {
        self.state.borrow_mut().advance(direction);
        self.render();
    }

    fn go_to(&self, index: isize) {
        self.state.borrow_mut().go_to(index);
        self.render();
    }

    fn render(&self) {
        let state = self.state.borrow();
        for (slide, active) in self.slides.iter().zip(state.flags()) {
            if let Err(err) = slide.class_list().toggle_with_force(&self.active_class, active) {
                log::warn!("failed to toggle slide class: {err:?}");
            }
        }
    }
}

/// Slide carousel bound to the host page.
///
/// Construction finds the slides, binds the previous/next controls and the
/// arrow keys, and mounts one point-cloud visualization per configured slide
/// container. Nothing is released until [`Carousel::teardown`] runs.
#[wasm_bindgen]
pub struct Carousel {
    deck: Rc<Deck>,
    listeners: Vec<Listener>,
    visualizations: BTreeMap<u32, Visualization>,
}

#[wasm_bindgen]
impl Carousel {
    /// Binds to the current document, using WebGL2 when the browser has it.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Carousel, JsValue> {
        let document = document()?;
        let capability = RenderCapability::detect(&document);
        Self::mount(&document, CarouselConfig::default(), capability)
    }

    /// Binds with an explicit renderer choice instead of probing.
    #[wasm_bindgen(js_name = withCapability)]
    pub fn with_capability(webgl: bool) -> Result<Carousel, JsValue> {
        let capability = if webgl {
            RenderCapability::WebGl2
        } else {
            RenderCapability::Canvas2d
        };
        Self::with_config(CarouselConfig::default(), capability)
    }

    /// Moves one slide; negative goes back, positive forward, zero re-renders.
    pub fn advance(&self, direction: i32) {
        match Direction::from_delta(direction) {
            Some(direction) => self.deck.advance(direction),
            None => self.deck.render(),
        }
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&self, index: i32) {
        self.deck.go_to(index as isize);
    }

    #[wasm_bindgen(js_name = activeIndex)]
    pub fn active_index(&self) -> usize {
        self.deck.state.borrow().index()
    }

    #[wasm_bindgen(js_name = slideCount)]
    pub fn slide_count(&self) -> usize {
        self.deck.slides.len()
    }

    #[wasm_bindgen(js_name = visualizationCount)]
    pub fn visualization_count(&self) -> usize {
        self.visualizations.len()
    }

    #[wasm_bindgen(js_name = hasVisualization)]
    pub fn has_visualization(&self, ordinal: u32) -> bool {
        self.visualizations.contains_key(&ordinal)
    }

    #[wasm_bindgen(js_name = runningAnimations)]
    pub fn running_animations(&self) -> usize {
        self.visualizations
            .values()
            .filter(|viz| viz.is_running())
            .count()
    }

    /// Listeners still registered by the controller and its visualizations.
    #[wasm_bindgen(js_name = boundListeners)]
    pub fn bound_listeners(&self) -> usize {
        self.listeners.len()
            + self
                .visualizations
                .values()
                .map(Visualization::listener_count)
                .sum::<usize>()
    }

    /// Unbinds every input handler and stops every visualization.
    pub fn teardown(&mut self) {
        let inputs = self.listeners.len();
        self.listeners.clear();
        for viz in self.visualizations.values_mut() {
            viz.cancel_animation();
            viz.remove_resize_listener();
        }
        log::info!(
            "carousel torn down: {inputs} input listeners, {} visualizations",
            self.visualizations.len()
        );
    }
}

impl Carousel {
    pub fn with_config(config: CarouselConfig, capability: RenderCapability) -> Result<Self, JsValue> {
        Self::mount(&document()?, config, capability)
    }

    fn mount(
        document: &Document,
        config: CarouselConfig,
        capability: RenderCapability,
    ) -> Result<Self, JsValue> {
        let slides = collect_slides(document, &config.slide_selector)?;
        let deck = Rc::new(Deck {
            state: RefCell::new(SlideState::new(slides.len())),
            slides,
            active_class: config.active_class.clone(),
        });
        deck.render();

        let mut listeners = Vec::new();
        let controls = [
            (&config.prev_selector, Direction::Previous),
            (&config.next_selector, Direction::Next),
        ];
        for (selector, direction) in controls {
            match document.query_selector(selector)? {
                Some(control) => {
                    let deck = Rc::clone(&deck);
                    listeners.push(Listener::bind(&control, "click", move |_| {
                        deck.advance(direction)
                    })?);
                }
                None => log::debug!("no control matches {selector}"),
            }
        }

        let keys = {
            let deck = Rc::clone(&deck);
            Listener::bind(document, "keydown", move |event| {
                let direction = event
                    .dyn_ref::<KeyboardEvent>()
                    .and_then(|key| Direction::from_key(&key.key()));
                if let Some(direction) = direction {
                    deck.advance(direction);
                }
            })?
        };
        listeners.push(keys);

        let mut visualizations = BTreeMap::new();
        for ordinal in config.ordinals.clone() {
            let id = config.container_id(ordinal);
            let Some(container) = document
                .get_element_by_id(&id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                log::debug!("no container #{id}, slide {ordinal} has no visualization");
                continue;
            };
            match viz::mount(document, &container, ordinal, capability, &config) {
                Ok(viz) => {
                    visualizations.insert(ordinal, viz);
                }
                Err(err) => log::warn!("slide {ordinal} visualization failed: {err:?}"),
            }
        }
        log::info!(
            "carousel ready: {} slides, {} visualizations via {capability}",
            deck.slides.len(),
            visualizations.len()
        );

        Ok(Self {
            deck,
            listeners,
            visualizations,
        })
    }

    pub fn visualization(&self, ordinal: u32) -> Option<&Visualization> {
        self.visualizations.get(&ordinal)
    }
}

fn document() -> Result<Document, JsValue> {
    Ok(window()
        .ok_or("no window")?
        .document()
        .ok_or("no document")?)
}

fn collect_slides(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}
