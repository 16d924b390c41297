use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlElement};

use crate::scroll::{LayoutBox, Viewport};

pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<E, F>(target: &EventTarget, event: &'static str, mut handler: F) -> Self
    where
        E: JsCast,
        F: FnMut(E) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |e: Event| {
            handler(e.unchecked_into::<E>());
        }) as Box<dyn FnMut(Event)>);

        let function = callback.as_ref().unchecked_ref();
        if let Err(e) = target.add_event_listener_with_callback(event, function) {
            warn!("Failed to listen for {}: {:?}", event, e);
        }

        Self { target: target.clone(), event, callback }
    }

    pub fn on_window<E, F>(event: &'static str, handler: F) -> Option<Self>
    where
        E: JsCast,
        F: FnMut(E) + 'static,
    {
        let window = web_sys::window()?;
        Some(Self::new(window.as_ref(), event, handler))
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let function = self.callback.as_ref().unchecked_ref();
        let _ = self.target.remove_event_listener_with_callback(self.event, function);
    }
}

pub fn query_all(root: &Element, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        warn!("Invalid selector {}", selector);
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Document-relative box of `el`, measured from layout offsets so transforms
/// applied by animations do not move it.
pub fn layout_box(el: &HtmlElement) -> LayoutBox {
    let mut top = 0.0;
    let mut node = Some(el.clone());
    while let Some(current) = node {
        top += f64::from(current.offset_top());
        node = current.offset_parent().and_then(|parent| parent.dyn_into::<HtmlElement>().ok());
    }
    LayoutBox { top, height: f64::from(el.offset_height()) }
}

pub fn viewport() -> Option<Viewport> {
    let window = web_sys::window()?;
    Some(Viewport {
        scroll_y: window.scroll_y().ok()?,
        height: window.inner_height().ok()?.as_f64()?,
    })
}

pub fn now_ms() -> f64 {
    web_sys::js_sys::Date::now()
}
