use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

type FrameClosure = Closure<dyn FnMut(f64)>;

/// Sleeps once the frame callback returns false, until the next `wake`.
pub struct Ticker {
    running: Rc<Cell<bool>>,
    frame_id: Rc<Cell<Option<i32>>>,
    closure: Rc<RefCell<Option<FrameClosure>>>,
}

fn request(closure: &Rc<RefCell<Option<FrameClosure>>>) -> Option<i32> {
    let window = web_sys::window()?;
    let closure = closure.borrow();
    let callback = closure.as_ref()?;
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}

impl Ticker {
    pub fn new(mut on_frame: impl FnMut(f64) -> bool + 'static) -> Self {
        let running = Rc::new(Cell::new(false));
        let frame_id = Rc::new(Cell::new(None));
        let closure: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));

        let frame = {
            let running = running.clone();
            let frame_id = frame_id.clone();
            let closure = closure.clone();
            Closure::wrap(Box::new(move |timestamp: f64| {
                frame_id.set(None);
                if on_frame(timestamp) {
                    let id = request(&closure);
                    running.set(id.is_some());
                    frame_id.set(id);
                } else {
                    running.set(false);
                }
            }) as Box<dyn FnMut(f64)>)
        };
        *closure.borrow_mut() = Some(frame);

        Self { running, frame_id, closure }
    }

    pub fn wake(&self) {
        if self.running.get() {
            return;
        }
        let id = request(&self.closure);
        self.running.set(id.is_some());
        self.frame_id.set(id);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        // Breaks the closure's reference cycle back to itself.
        self.closure.borrow_mut().take();
    }
}
