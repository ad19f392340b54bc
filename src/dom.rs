use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::core::game::Rect;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Bounding client rect as plain geometry for hit-testing.
#[inline]
pub fn element_rect(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(
        r.left() as f32,
        r.top() as f32,
        r.width() as f32,
        r.height() as f32,
    )
}

#[inline]
pub fn set_css_property(el: &web::HtmlElement, name: &str, value: &str) {
    _ = el.style().set_property(name, value);
}

#[inline]
pub fn remove_css_property(el: &web::HtmlElement, name: &str) {
    _ = el.style().remove_property(name);
}

/// Set a custom property on the document root (`:root` in CSS terms).
pub fn set_root_property(name: &str, value: &str) {
    if let Some(root) = window_document().and_then(|d| d.document_element()) {
        if let Ok(html) = root.dyn_into::<web::HtmlElement>() {
            _ = html.style().set_property(name, value);
        }
    }
}

/// One-shot timer; the closure leaks if the timer never fires, which only
/// happens at page teardown.
pub fn set_timeout(handler: impl FnOnce() + 'static, delay_ms: i32) {
    if let Some(window) = web::window() {
        let closure = Closure::once(handler);
        _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms,
        );
        closure.forget();
    }
}

/// Computed `background-image` value for an element, if any.
pub fn computed_background_image(el: &web::Element) -> Option<String> {
    let window = web::window()?;
    let style = window.get_computed_style(el).ok()??;
    style.get_property_value("background-image").ok()
}
