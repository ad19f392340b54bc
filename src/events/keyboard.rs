//! Arrow-key panning for whichever panel holds focus.

use wasm_bindgen::JsCast;
use web_sys as web;

use crate::core::pan::PanConfig;
use crate::frame::{self, Panels};

/// Document-level keydown handler. Panels carry `tabindex="0"`, so the
/// active element (or an ancestor of it) identifies the panel to pan.
pub fn wire_arrow_keys(document: &web::Document, panels: Panels, cfg: PanConfig) {
    let doc = document.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        let key = ev.key();
        let delta = match key.as_str() {
            "ArrowRight" => cfg.keyboard_step,
            "ArrowLeft" => -cfg.keyboard_step,
            _ => return,
        };

        let Some(focused) = doc.active_element() else {
            return;
        };
        let Ok(Some(panel_el)) = focused.closest(".panel") else {
            return;
        };

        let mut entries = panels.borrow_mut();
        let Some(entry) = entries
            .iter_mut()
            .find(|e| e.panel.is_same_node(Some(panel_el.as_ref())))
        else {
            return;
        };

        ev.prevent_default();
        if entry.state.pan_by(delta, &cfg) {
            _ = entry.panel.class_list().add_1("panned");
        }
        frame::reconcile_overlay(entry, &cfg, false);
        frame::reconcile_caption(entry, &cfg);
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
