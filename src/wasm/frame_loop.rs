use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::window;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Self-rescheduling `requestAnimationFrame` chain that can be cancelled.
///
/// The closure lives in a shared slot so it can hand a reference to itself
/// back to `request_animation_frame` every frame. Cancelling empties the slot,
/// which breaks that reference cycle and frees the captured state.
pub struct FrameLoop {
    slot: FrameSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start<F>(mut frame: F) -> Result<Self, JsValue>
    where
        F: FnMut() + 'static,
    {
        let slot: FrameSlot = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let next = Rc::clone(&slot);
        let next_pending = Rc::clone(&pending);
        *slot.borrow_mut() = Some(Closure::new(move || {
            frame();

            // schedule next, unless cancel() emptied the slot
            let scheduled = next.borrow().as_ref().map(request);
            match scheduled {
                Some(Ok(id)) => next_pending.set(Some(id)),
                Some(Err(err)) => {
                    log::warn!("animation frame request failed: {err:?}");
                    next_pending.set(None);
                }
                None => next_pending.set(None),
            }
        }));

        let id = request(slot.borrow().as_ref().ok_or("frame callback missing")?)?;
        pending.set(Some(id));

        Ok(Self { slot, pending })
    }

    pub fn is_running(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(window) = window() {
                window.cancel_animation_frame(id).ok();
            }
        }
        self.slot.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window()
        .ok_or("no window")?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}
