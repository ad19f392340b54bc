#![cfg(target_arch = "wasm32")]
//! Two DOM-driven widgets compiled to WASM: the split-image landing view and
//! the drag-to-house mini-game. `init` wires whichever widget roots the page
//! actually contains; a page may carry either or both.

use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod captions;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod hud;
mod images;
mod overlay;

use crate::core::game::{GameConfig, GameSession};
use crate::core::pan::{self, PanConfig, PanState};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("waitlist-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let mut wired = false;
    if init_landing(&document)? {
        wired = true;
    }
    if init_game(&document)? {
        wired = true;
    }
    if !wired {
        log::warn!("no panels and no #game root found; nothing to wire");
    }
    Ok(())
}

// ---------------- Landing view ----------------

fn init_landing(document: &web::Document) -> anyhow::Result<bool> {
    let nodes = document
        .query_selector_all(".panel")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if nodes.length() == 0 {
        return Ok(false);
    }

    let mut entries = Vec::new();
    for i in 0..nodes.length() {
        let Some(node) = nodes.get(i) else { continue };
        let Ok(panel) = node.dyn_into::<web::HtmlElement>() else {
            continue;
        };
        // Keyboard panning needs focusable panels.
        _ = panel.set_attribute("tabindex", "0");
        let caption = overlay::CaptionRefs::query(&panel);
        let descriptors = captions::captions_for_panel(&panel);
        entries.push(frame::PanelEntry {
            panel,
            caption,
            descriptors,
            state: PanState::new(),
            active_caption: None,
        });
    }

    let panel_count = entries.len();
    let panels: frame::Panels = Rc::new(RefCell::new(entries));
    let cfg = PanConfig::default();
    let cache = images::MetricsCache::new();

    for i in 0..panel_count {
        events::pointer::wire_panel_hover(panels.clone(), i, cfg.clone());
        events::pointer::wire_panel_wheel(panels.clone(), i, cfg.clone());
        {
            let mut entries = panels.borrow_mut();
            frame::reconcile_overlay(&entries[i], &cfg, false);
            frame::reconcile_caption(&mut entries[i], &cfg);
        }
        calculate_pan_limit(panels.clone(), i, cache.clone(), cfg.clone());
    }
    events::keyboard::wire_arrow_keys(document, panels.clone(), cfg.clone());
    wire_window_resize(panels.clone(), cache, cfg.clone());

    let mut ctx = frame::PanFrameContext { panels, cfg };
    frame::start_loop(move || ctx.frame());
    log::info!("[landing] wired {} panels", panel_count);
    Ok(true)
}

/// Recompute one panel's pan limit from its background image, hitting the
/// metrics cache and falling back to a zero-pan viewport-only metric when
/// there is no image or it fails to load.
fn calculate_pan_limit(panels: frame::Panels, index: usize, cache: images::MetricsCache, cfg: PanConfig) {
    let (panel, url) = {
        let entries = panels.borrow();
        let entry = &entries[index];
        let url = dom::computed_background_image(&entry.panel)
            .and_then(|v| pan::extract_image_url(&v).map(str::to_string));
        (entry.panel.clone(), url)
    };

    let cfg_for_compute = cfg.clone();
    let apply = move |metrics: pan::PanMetrics| {
        let mut entries = panels.borrow_mut();
        let entry = &mut entries[index];
        entry.state.apply_metrics(&metrics);
        if metrics.width_percent > 0.0 {
            dom::set_css_property(
                &entry.panel,
                "background-size",
                &format!("{}% 100%", metrics.width_percent),
            );
        }
        frame::reconcile_overlay(entry, &cfg, true);
        frame::reconcile_caption(entry, &cfg);
    };

    match url {
        None => {
            let rect = dom::element_rect(&panel);
            apply(pan::fallback_metrics(rect.w));
        }
        Some(url) => {
            cache.get_or_fetch(&url, move |dims| {
                // Measure at completion time; the panel may have resized
                // while the image was in flight.
                let rect = dom::element_rect(&panel);
                let metrics = match dims {
                    Some(dims) => pan::compute_metrics(rect.w, rect.h, dims, &cfg_for_compute),
                    None => pan::fallback_metrics(rect.w),
                };
                apply(metrics);
            });
        }
    }
}

fn wire_window_resize(panels: frame::Panels, cache: images::MetricsCache, cfg: PanConfig) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        let n = panels.borrow().len();
        for i in 0..n {
            calculate_pan_limit(panels.clone(), i, cache.clone(), cfg.clone());
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

// ---------------- Mini-game ----------------

fn init_game(document: &web::Document) -> anyhow::Result<bool> {
    let Some(game_root) = document.get_element_by_id("game") else {
        return Ok(false);
    };
    let spawn_lane = document
        .get_element_by_id("spawnLane")
        .ok_or_else(|| anyhow::anyhow!("missing #spawnLane"))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let houses_grid = document
        .get_element_by_id("houses")
        .ok_or_else(|| anyhow::anyhow!("missing #houses"))?;
    let overlay_el = document
        .get_element_by_id("overlay")
        .ok_or_else(|| anyhow::anyhow!("missing #overlay"))?;

    let seed = js_sys::Date::now() as u64;
    let session = Rc::new(RefCell::new(GameSession::new(GameConfig::default(), seed)));

    let wiring = events::pointer::GameWiring {
        document: document.clone(),
        session,
        game_root,
        spawn_lane,
        houses_grid,
        houses: Rc::new(RefCell::new(Vec::new())),
        overlay: overlay_el,
        hud: hud::HudRefs::query(document),
    };

    reset_game(&wiring);
    {
        let w = wiring.clone();
        dom::add_click_listener(document, "restartBtn", move || reset_game(&w));
    }

    let mut ctx = frame::GameFrameContext {
        wiring,
        last_instant: Instant::now(),
    };
    frame::start_loop(move || ctx.frame());
    log::info!("[game] wired");
    Ok(true)
}

/// (Re)build the Setup state: fresh house grid, empty lane, zeroed session,
/// hidden overlay, HUD in sync.
fn reset_game(w: &events::pointer::GameWiring) {
    w.session.borrow_mut().reset();

    w.houses_grid.set_inner_html("");
    let mut houses = w.houses.borrow_mut();
    houses.clear();
    for _ in 0..w.session.borrow().house_count() {
        let Ok(house) = w.document.create_element("div") else {
            continue;
        };
        house.set_class_name("house");
        let bar = build_progress_slot(&w.document, &house);
        _ = w.houses_grid.append_child(&house);
        if let Ok(el) = house.dyn_into::<web::HtmlElement>() {
            houses.push(events::pointer::HouseRefs { el, bar });
        }
    }
    drop(houses);

    w.spawn_lane.set_inner_html("");

    overlay::hide_game_overlay(&w.overlay);
    let session = w.session.borrow();
    w.hud.sync_counters(&session);
    w.hud.sync_clock(&session);
    w.hud.sync_stress(&session);
}

fn build_progress_slot(document: &web::Document, house: &web::Element) -> Option<web::HtmlElement> {
    let slot = document.create_element("div").ok()?;
    slot.set_class_name("slot");
    let bar = document.create_element("div").ok()?;
    bar.set_class_name("bar");
    _ = slot.append_child(&bar);
    _ = house.append_child(&slot);
    bar.dyn_into::<web::HtmlElement>().ok()
}
