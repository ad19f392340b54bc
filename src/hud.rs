//! HUD counters, clock and the stress meter.

use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{STRESS_HUE_BASE, STRESS_HUE_SLOPE};
use crate::core::game::GameSession;
use crate::dom;

/// HUD nodes, all optional: a page without a stress meter or counters just
/// skips those updates.
#[derive(Clone, Default)]
pub struct HudRefs {
    pub houses_left: Option<web::Element>,
    pub waiting: Option<web::Element>,
    pub time: Option<web::Element>,
    pub stress_bar: Option<web::HtmlElement>,
    pub stress_label: Option<web::Element>,
}

impl HudRefs {
    pub fn query(document: &web::Document) -> Self {
        Self {
            houses_left: document.get_element_by_id("housesLeft"),
            waiting: document.get_element_by_id("waiting"),
            time: document.get_element_by_id("time"),
            stress_bar: document
                .get_element_by_id("stressBar")
                .and_then(|el| el.dyn_into::<web::HtmlElement>().ok()),
            stress_label: document.get_element_by_id("stressLabel"),
        }
    }

    pub fn sync_counters(&self, session: &GameSession) {
        if let Some(el) = &self.houses_left {
            el.set_text_content(Some(&session.houses_remaining().to_string()));
        }
        if let Some(el) = &self.waiting {
            el.set_text_content(Some(&session.waiting().to_string()));
        }
    }

    pub fn sync_clock(&self, session: &GameSession) {
        if let Some(el) = &self.time {
            el.set_text_content(Some(&format!("{}s", session.elapsed_sec().floor() as u64)));
        }
    }

    /// Meter fill, label and the global hue variable CSS themes against.
    pub fn sync_stress(&self, session: &GameSession) {
        let pct = session.stress_fraction() * 100.0;
        if let Some(bar) = &self.stress_bar {
            dom::set_css_property(bar, "width", &format!("{}%", pct));
        }
        if let Some(label) = &self.stress_label {
            label.set_text_content(Some(&format!("Stress: {}%", pct.round() as i64)));
        }
        let hue = STRESS_HUE_BASE - (pct * STRESS_HUE_SLOPE).round();
        dom::set_root_property("--stress-hue", &hue.to_string());
    }
}
