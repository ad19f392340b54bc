// Host-side tests for the default tuning values and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod pan {
    include!("../src/core/pan.rs");
}
mod game {
    include!("../src/core/game.rs");
}

#[test]
fn pan_defaults_are_within_reasonable_bounds() {
    let cfg = pan::PanConfig::default();

    // Damping must converge without oscillation.
    assert!(cfg.damping > 0.0 && cfg.damping < 1.0);

    assert!(cfg.wheel_speed > 0.0);
    assert!(cfg.keyboard_step > 0.0);
    assert!(cfg.edge_tolerance > 0.0);
    assert!(cfg.nudge_max > 0.0);

    // Overshoot below 1 would shrink images narrower than the viewport.
    assert!(cfg.overshoot >= 1.0);
}

#[test]
fn caption_thresholds_are_consistent() {
    let cfg = pan::PanConfig::default();
    assert!(cfg.caption_floor_px > 0.0);
    assert!(cfg.caption_viewport_frac > 0.0 && cfg.caption_viewport_frac < 1.0);
    assert!(cfg.caption_min_intensity > 0.0 && cfg.caption_min_intensity < 1.0);

    // The panned flag must be reachable by a single keyboard step.
    assert!(cfg.panned_threshold < cfg.keyboard_step);
}

#[test]
fn game_defaults_are_within_reasonable_bounds() {
    let cfg = game::GameConfig::default();

    assert!(cfg.house_count > 0);
    assert!(cfg.spawn_interval_floor_ms > 0.0);
    assert!(cfg.spawn_interval_floor_ms <= cfg.spawn_interval_ms);
    assert!(cfg.spawn_interval_step_ms > 0.0);

    assert!(cfg.stress_max > 0.0);
    assert!(cfg.stress_relief > 0.0 && cfg.stress_relief < cfg.stress_max);
    assert!(cfg.max_frame_dt > 0.0);
    assert!((0.0..=1.0).contains(&cfg.small_person_chance));
}

#[test]
fn stress_model_has_a_break_even_point() {
    let cfg = game::GameConfig::default();
    assert!(cfg.stress_gain_per_waiting > 0.0);
    assert!(cfg.stress_decay_per_sec > 0.0);

    // A few waiting people must be survivable; a crowd must not be.
    let break_even = cfg.stress_decay_per_sec / cfg.stress_gain_per_waiting;
    assert!(break_even >= 1.0);
    assert!((break_even as usize) < cfg.house_count);
}

#[test]
fn emoji_pool_is_nonempty() {
    assert!(!game::PERSON_EMOJIS.is_empty());
}
