//! Edge overlays, captions and the end-of-game card.

use web_sys as web;

use crate::constants::SUCCESS_OVERLAY_DELAY_MS;
use crate::core::game::{end_copy, Outcome};
use crate::dom;

/// Immediate show/hide of a panel's edge overlay, used on discrete input.
pub fn set_edge_overlay(panel: &web::Element, show: bool) {
    if let Ok(Some(el)) = panel.query_selector(".overlay") {
        _ = el.class_list().toggle_with_force("show", show);
    }
}

/// Debounced variant for the per-frame path: the class list is only touched
/// when the visibility actually changes, so the overlay never flickers.
pub fn set_edge_overlay_throttled(panel: &web::Element, show: bool) {
    if let Ok(Some(el)) = panel.query_selector(".overlay") {
        let cl = el.class_list();
        let shown = cl.contains("show");
        if show && !shown {
            _ = cl.add_1("show");
        } else if !show && shown {
            _ = cl.remove_1("show");
        }
    }
}

/// Caption root + text nodes for one panel. Panels without a caption skip
/// the feature entirely.
pub struct CaptionRefs {
    pub root: web::HtmlElement,
    pub text: web::Element,
}

impl CaptionRefs {
    pub fn query(panel: &web::Element) -> Option<Self> {
        use wasm_bindgen::JsCast;
        let root = panel.query_selector(".caption").ok()??;
        let text = root.query_selector(".caption__text").ok()??;
        let root = root.dyn_into::<web::HtmlElement>().ok()?;
        Some(Self { root, text })
    }

    pub fn set_text(&self, text: &str) {
        self.text.set_text_content(Some(text));
    }

    pub fn show(&self, center_x: f32) {
        dom::set_css_property(&self.root, "--caption-center", &format!("{}px", center_x));
        _ = self.root.class_list().add_1("is-active");
        _ = self.root.set_attribute("aria-hidden", "false");
    }

    pub fn hide(&self) {
        _ = self.root.class_list().remove_1("is-active");
        _ = self.root.set_attribute("aria-hidden", "true");
        self.text.set_text_content(Some(""));
        dom::remove_css_property(&self.root, "--caption-center");
    }
}

/// Fill in and reveal the end-of-game card. The success card appears after a
/// short beat; the crisis card immediately. Missing card children are
/// tolerated.
pub fn show_game_overlay(overlay: &web::Element, outcome: Outcome) {
    let (title, body) = end_copy(outcome);
    if let Ok(Some(el)) = overlay.query_selector(".card h2") {
        el.set_text_content(Some(title));
    }
    if let Ok(Some(el)) = overlay.query_selector(".card p") {
        el.set_text_content(Some(body));
    }
    match outcome {
        Outcome::Crisis => {
            _ = overlay.class_list().remove_1("hidden");
        }
        Outcome::Success => {
            let overlay = overlay.clone();
            dom::set_timeout(
                move || {
                    _ = overlay.class_list().remove_1("hidden");
                },
                SUCCESS_OVERLAY_DELAY_MS,
            );
        }
    }
}

pub fn hide_game_overlay(overlay: &web::Element) {
    _ = overlay.class_list().add_1("hidden");
}
