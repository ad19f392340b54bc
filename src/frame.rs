//! Per-widget animation-frame contexts and the rAF loop driver.

use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::core::pan::{pick_caption, CaptionDescriptor, PanConfig, PanState};
use crate::dom;
use crate::events::pointer::{self, GameWiring};
use crate::overlay::{self, CaptionRefs};

/// Everything the pan loop and the panel event handlers share for one panel.
pub struct PanelEntry {
    pub panel: web::HtmlElement,
    pub caption: Option<CaptionRefs>,
    pub descriptors: &'static [CaptionDescriptor],
    pub state: PanState,
    pub active_caption: Option<usize>,
}

pub type Panels = Rc<RefCell<Vec<PanelEntry>>>;

pub struct PanFrameContext {
    pub panels: Panels,
    pub cfg: PanConfig,
}

impl PanFrameContext {
    pub fn frame(&mut self) {
        let mut entries = self.panels.borrow_mut();
        for entry in entries.iter_mut() {
            entry.state.step(&self.cfg);
            dom::set_css_property(
                &entry.panel,
                "background-position-x",
                &format!("{}px", -entry.state.x),
            );
            reconcile_overlay(entry, &self.cfg, true);
            reconcile_caption(entry, &self.cfg);
        }
    }
}

/// Sync the edge overlay with the panel state. The per-frame path throttles
/// (class list only touched on change); discrete inputs toggle immediately.
pub fn reconcile_overlay(entry: &PanelEntry, cfg: &PanConfig, throttle: bool) {
    let show = entry.state.at_right_edge(cfg);
    if throttle {
        overlay::set_edge_overlay_throttled(&entry.panel, show);
    } else {
        overlay::set_edge_overlay(&entry.panel, show);
    }
}

/// Sync the caption with the current pick. Text is only rewritten when the
/// active descriptor changes; show/hide are idempotent.
pub fn reconcile_caption(entry: &mut PanelEntry, cfg: &PanConfig) {
    let Some(refs) = &entry.caption else { return };
    match pick_caption(&entry.state, entry.descriptors, cfg) {
        Some(pick) => {
            if entry.active_caption != Some(pick.index) {
                refs.set_text(entry.descriptors[pick.index].text);
                entry.active_caption = Some(pick.index);
            }
            refs.show(pick.center_x);
        }
        None => {
            refs.hide();
            entry.active_caption = None;
        }
    }
}

pub struct GameFrameContext {
    pub wiring: GameWiring,
    pub last_instant: Instant,
}

impl GameFrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f64();
        self.last_instant = now;

        let lane_height = self.wiring.spawn_lane.client_height() as f32;
        let update = self.wiring.session.borrow_mut().advance(dt, lane_height);

        if let Some(person) = &update.spawned {
            pointer::spawn_person_element(&self.wiring, person);
            self.wiring.hud.sync_counters(&self.wiring.session.borrow());
        }

        // After the session ends the loop keeps running for the clock, but
        // stress (and everything else the session guards) is frozen.
        let running = self.wiring.session.borrow().is_running();
        if running || update.outcome.is_some() {
            self.wiring.hud.sync_stress(&self.wiring.session.borrow());
        }

        if let Some(outcome) = update.outcome {
            log::info!("[game] session ended: {:?}", outcome);
            overlay::show_game_overlay(&self.wiring.overlay, outcome);
        }

        self.wiring.hud.sync_clock(&self.wiring.session.borrow());
    }
}

/// Drive `frame_fn` from requestAnimationFrame for the life of the page.
pub fn start_loop(mut frame_fn: impl FnMut() + 'static) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_fn();
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
