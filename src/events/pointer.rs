//! Pointer, wheel and touch wiring for both widgets.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{
    DRAG_Z_INDEX, REST_Z_INDEX, SNAP_BACK_MS, SNAP_BACK_OFFSET_PX,
};
use crate::core::game::{GameSession, Person, Phase, PlaceResult, Rect};
use crate::core::pan::{dominant_wheel_delta, nudge_for, PanConfig};
use crate::dom;
use crate::frame::{self, Panels};
use crate::hud::HudRefs;
use crate::overlay;

// ---------------- Landing panels ----------------

/// Hover tracking: `hovered` class, hover flag and the vertical nudge
/// exposed as `--nudgeY`.
pub fn wire_panel_hover(panels: Panels, index: usize, cfg: PanConfig) {
    let panel = panels.borrow()[index].panel.clone();

    {
        let panels = panels.clone();
        let enter = wasm_bindgen::closure::Closure::wrap(Box::new(move |_: web::MouseEvent| {
            let mut entries = panels.borrow_mut();
            let entry = &mut entries[index];
            _ = entry.panel.class_list().add_1("hovered");
            entry.state.hovering = true;
        }) as Box<dyn FnMut(_)>);
        _ = panel.add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref());
        enter.forget();
    }

    {
        let panels = panels.clone();
        let leave = wasm_bindgen::closure::Closure::wrap(Box::new(move |_: web::MouseEvent| {
            let mut entries = panels.borrow_mut();
            let entry = &mut entries[index];
            _ = entry.panel.class_list().remove_1("hovered");
            entry.state.hovering = false;
            entry.state.nudge_y = 0.0;
            dom::set_css_property(&entry.panel, "--nudgeY", "0px");
        }) as Box<dyn FnMut(_)>);
        _ = panel.add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref());
        leave.forget();
    }

    {
        let panels = panels.clone();
        let mv = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let mut entries = panels.borrow_mut();
            let entry = &mut entries[index];
            let rect = dom::element_rect(&entry.panel);
            let rel_y = (ev.client_y() as f32 - rect.y) / rect.h;
            let nudge = nudge_for(rel_y, &cfg);
            entry.state.nudge_y = nudge;
            dom::set_css_property(&entry.panel, "--nudgeY", &format!("{:.2}px", nudge));
        }) as Box<dyn FnMut(_)>);
        _ = panel.add_event_listener_with_callback("mousemove", mv.as_ref().unchecked_ref());
        mv.forget();
    }
}

/// Wheel pan along the dominant axis. Registered non-passive so the page
/// never scrolls underneath the panel.
pub fn wire_panel_wheel(panels: Panels, index: usize, cfg: PanConfig) {
    let panel = panels.borrow()[index].panel.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        let dominant = dominant_wheel_delta(ev.delta_x() as f32, ev.delta_y() as f32);
        if dominant == 0.0 {
            return;
        }
        let mut entries = panels.borrow_mut();
        let entry = &mut entries[index];
        if entry.state.pan_by(dominant * cfg.wheel_speed, &cfg) {
            _ = entry.panel.class_list().add_1("panned");
        }
        frame::reconcile_overlay(entry, &cfg, false);
        frame::reconcile_caption(entry, &cfg);
    }) as Box<dyn FnMut(_)>);

    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = panel.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

// ---------------- Mini-game ----------------

/// One house slot's DOM handles, in grid construction order.
pub struct HouseRefs {
    pub el: web::HtmlElement,
    pub bar: Option<web::HtmlElement>,
}

/// Shared handles for the mini-game, cloned into every listener and the
/// frame context.
#[derive(Clone)]
pub struct GameWiring {
    pub document: web::Document,
    pub session: Rc<RefCell<GameSession>>,
    pub game_root: web::Element,
    pub spawn_lane: web::HtmlElement,
    pub houses_grid: web::Element,
    pub houses: Rc<RefCell<Vec<HouseRefs>>>,
    pub overlay: web::Element,
    pub hud: HudRefs,
}

/// Materialize a freshly spawned person in the lane and make it draggable.
pub fn spawn_person_element(w: &GameWiring, person: &Person) {
    let Ok(el) = w.document.create_element("div") else {
        return;
    };
    el.set_class_name(if person.small { "person small" } else { "person" });
    el.set_inner_html(&format!("<span class=\"emoji\">{}</span>", person.emoji));
    let Ok(el) = el.dyn_into::<web::HtmlElement>() else {
        return;
    };
    dom::set_css_property(&el, "left", &format!("{:.0}px", person.x));
    dom::set_css_property(&el, "top", &format!("{:.0}px", person.y));
    _ = w.spawn_lane.append_child(&el);
    make_draggable(w.clone(), el);
}

#[derive(Default)]
struct DragGrab {
    active: bool,
    /// Pointer offset inside the token at grab time.
    offset: Vec2,
}

#[inline]
fn mouse_point(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

#[inline]
fn touch_point(ev: &web::TouchEvent) -> Option<Vec2> {
    ev.touches()
        .get(0)
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
}

fn drag_down(w: &GameWiring, node: &web::HtmlElement, grab: &Rc<RefCell<DragGrab>>, p: Vec2) {
    if !w.session.borrow().is_running() {
        return;
    }
    let rect = dom::element_rect(node);
    let mut g = grab.borrow_mut();
    g.active = true;
    g.offset = p - Vec2::new(rect.x, rect.y);
    dom::set_css_property(node, "transition", "none");
    dom::set_css_property(node, "z-index", DRAG_Z_INDEX);
}

fn drag_move(w: &GameWiring, node: &web::HtmlElement, grab: &Rc<RefCell<DragGrab>>, p: Vec2) {
    let g = grab.borrow();
    if !g.active {
        return;
    }
    let game = dom::element_rect(&w.game_root);
    dom::set_css_property(node, "left", &format!("{}px", p.x - g.offset.x - game.x));
    dom::set_css_property(node, "top", &format!("{}px", p.y - g.offset.y - game.y));
}

fn drag_up(w: &GameWiring, node: &web::HtmlElement, grab: &Rc<RefCell<DragGrab>>) {
    {
        let mut g = grab.borrow_mut();
        if !g.active {
            return;
        }
        g.active = false;
    }
    dom::set_css_property(node, "z-index", REST_Z_INDEX);
    try_place(w, node);
}

/// Drag wiring for one person token: mouse and touch, with move/up handlers
/// on the window so a fast drag never escapes the token.
pub fn make_draggable(w: GameWiring, node: web::HtmlElement) {
    let grab = Rc::new(RefCell::new(DragGrab::default()));

    {
        let w = w.clone();
        let node = node.clone();
        let grab = grab.clone();
        let down = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            drag_down(&w, &node, &grab, mouse_point(&ev));
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        _ = node.add_event_listener_with_callback("mousedown", down.as_ref().unchecked_ref());
        down.forget();
    }
    {
        let w = w.clone();
        let target = node.clone();
        let grab = grab.clone();
        let down = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            if let Some(p) = touch_point(&ev) {
                drag_down(&w, &target, &grab, p);
                ev.prevent_default();
            }
        }) as Box<dyn FnMut(_)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(false);
        _ = node.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            down.as_ref().unchecked_ref(),
            &opts,
        );
        down.forget();
    }

    let Some(window) = web::window() else {
        return;
    };

    {
        let w = w.clone();
        let node = node.clone();
        let grab = grab.clone();
        let mv = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            drag_move(&w, &node, &grab, mouse_point(&ev));
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("mousemove", mv.as_ref().unchecked_ref());
        mv.forget();
    }
    {
        let w = w.clone();
        let node = node.clone();
        let grab = grab.clone();
        let mv = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            if let Some(p) = touch_point(&ev) {
                drag_move(&w, &node, &grab, p);
                ev.prevent_default();
            }
        }) as Box<dyn FnMut(_)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(false);
        _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            mv.as_ref().unchecked_ref(),
            &opts,
        );
        mv.forget();
    }
    {
        let w = w.clone();
        let node = node.clone();
        let grab = grab.clone();
        let up = wasm_bindgen::closure::Closure::wrap(Box::new(move |_: web::MouseEvent| {
            drag_up(&w, &node, &grab);
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("mouseup", up.as_ref().unchecked_ref());
        up.forget();
    }
    {
        let up = wasm_bindgen::closure::Closure::wrap(Box::new(move |_: web::TouchEvent| {
            drag_up(&w, &node, &grab);
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("touchend", up.as_ref().unchecked_ref());
        up.forget();
    }
}

/// Hit-test a released token against the house slots and commit the result.
fn try_place(w: &GameWiring, node: &web::HtmlElement) {
    let person_rect = dom::element_rect(node);
    let house_rects: Vec<Rect> = w
        .houses
        .borrow()
        .iter()
        .map(|h| dom::element_rect(&h.el))
        .collect();

    let result = w.session.borrow_mut().place(person_rect, &house_rects);
    match result {
        PlaceResult::Placed { house } => {
            {
                let houses = w.houses.borrow();
                if let Some(h) = houses.get(house) {
                    _ = h.el.class_list().add_1("filled");
                    if let Some(bar) = &h.bar {
                        dom::set_css_property(bar, "width", "100%");
                    }
                }
            }
            node.remove();
            let session = w.session.borrow();
            w.hud.sync_counters(&session);
            w.hud.sync_stress(&session);
            if let Phase::Ended(outcome) = session.phase() {
                log::info!("[game] session ended: {:?}", outcome);
                overlay::show_game_overlay(&w.overlay, outcome);
            }
        }
        PlaceResult::Missed => {
            // Feedback nudge, then settle back where it was dropped.
            dom::set_css_property(node, "transition", "transform .25s ease");
            dom::set_css_property(
                node,
                "transform",
                &format!("translateX({}px)", SNAP_BACK_OFFSET_PX),
            );
            let node = node.clone();
            dom::set_timeout(
                move || dom::remove_css_property(&node, "transform"),
                SNAP_BACK_MS,
            );
        }
    }
}
