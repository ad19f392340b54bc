// Host-side tests for the mini-game session state machine.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod game {
    include!("../src/core/game.rs");
}

use game::*;

const FRAME: f64 = 0.033;
const LANE_H: f32 = 240.0;

fn session() -> GameSession {
    GameSession::new(GameConfig::default(), 7)
}

/// Twelve well-separated house rects matching the default grid size.
fn house_rects() -> Vec<Rect> {
    (0..12)
        .map(|i| Rect::new(100.0 * i as f32, 500.0, 80.0, 80.0))
        .collect()
}

/// A person rect dropped squarely onto house `i`.
fn person_on(i: usize) -> Rect {
    Rect::new(100.0 * i as f32 + 20.0, 520.0, 40.0, 40.0)
}

/// Run frames until the next spawn fires, returning the spawned person.
fn spawn_one(s: &mut GameSession) -> Person {
    for _ in 0..100_000 {
        if let Some(p) = s.advance(FRAME, LANE_H).spawned {
            return p;
        }
        assert!(s.is_running(), "ended before spawning");
    }
    panic!("no spawn");
}

#[test]
fn new_session_is_zeroed() {
    let s = session();
    assert_eq!(s.phase(), Phase::Running);
    assert_eq!(s.elapsed_sec(), 0.0);
    assert_eq!(s.stress(), 0.0);
    assert_eq!(s.waiting(), 0);
    assert_eq!(s.house_count(), 12);
    assert_eq!(s.houses_remaining(), 12);
    assert_eq!(s.spawn_interval_ms(), 1300.0);
}

#[test]
fn advance_clamps_runaway_frames() {
    let mut s = session();
    s.advance(10.0, LANE_H); // tab was backgrounded
    assert!(s.elapsed_sec() <= 0.033 + 1e-9);
}

#[test]
fn spawn_increments_waiting_and_ramps_interval() {
    let mut s = session();
    let p = spawn_one(&mut s);
    assert_eq!(s.waiting(), 1);
    assert_eq!(s.spawn_interval_ms(), 1280.0);
    assert!(p.x >= 8.0 && p.x <= 68.0);
    assert!(p.y >= 20.0 && p.y <= 20.0 + (LANE_H - 60.0));
    assert!(PERSON_EMOJIS.contains(&p.emoji));

    let q = spawn_one(&mut s);
    assert_eq!(s.waiting(), 2);
    assert_eq!(q.id, p.id + 1);
}

#[test]
fn spawn_interval_is_floor_clamped_and_monotone() {
    // Disable stress gain so the session survives sixty unhoused arrivals.
    let cfg = GameConfig {
        stress_gain_per_waiting: 0.0,
        ..GameConfig::default()
    };
    let mut s = GameSession::new(cfg, 7);
    let mut prev = s.spawn_interval_ms();
    for _ in 0..60 {
        spawn_one(&mut s);
        let next = s.spawn_interval_ms();
        assert!(next <= prev, "interval never re-increases");
        assert!(next >= 500.0);
        prev = next;
    }
    assert_eq!(prev, 500.0);
}

#[test]
fn stress_decays_to_zero_with_nobody_waiting() {
    let mut s = session();
    for _ in 0..30 {
        // below the first spawn; waiting stays 0
        s.advance(FRAME, LANE_H);
    }
    assert_eq!(s.stress(), 0.0);
}

#[test]
fn stress_rises_past_break_even_and_stays_bounded() {
    let mut s = session();
    // four waiting people beat the 3-person break-even (0.5 gain vs 1.5 decay)
    for _ in 0..4 {
        spawn_one(&mut s);
    }
    let before = s.stress();
    let mut prev = before;
    for _ in 0..20 {
        s.advance(FRAME, LANE_H);
        if !s.is_running() {
            break;
        }
        assert!(s.stress() >= prev, "non-decreasing above break-even");
        assert!(s.stress() <= 100.0);
        prev = s.stress();
    }
    assert!(s.stress() > before);
}

#[test]
fn maxed_stress_ends_in_crisis_and_freezes() {
    let mut s = session();
    let mut outcome = None;
    for _ in 0..10_000 {
        let update = s.advance(FRAME, LANE_H);
        if update.outcome.is_some() {
            outcome = update.outcome;
            break;
        }
    }
    assert_eq!(outcome, Some(Outcome::Crisis));
    assert_eq!(s.phase(), Phase::Ended(Outcome::Crisis));
    assert_eq!(s.stress(), 100.0);

    // Frozen: clock, spawns and stress stop; placements are rejected.
    let elapsed = s.elapsed_sec();
    let waiting = s.waiting();
    let update = s.advance(FRAME, LANE_H);
    assert!(update.spawned.is_none());
    assert_eq!(s.elapsed_sec(), elapsed);
    assert_eq!(s.waiting(), waiting);
    assert_eq!(s.place(person_on(0), &house_rects()), PlaceResult::Missed);
}

#[test]
fn placement_fills_first_overlapping_slot_in_order() {
    let mut s = session();
    spawn_one(&mut s);
    let rects = house_rects();

    // Spans houses 2 and 3; construction order commits to 2.
    let wide = Rect::new(260.0, 520.0, 140.0, 40.0);
    assert_eq!(s.place(wide, &rects), PlaceResult::Placed { house: 2 });
    assert_eq!(s.filled_count(), 1);
    assert_eq!(s.waiting(), 0);

    // Same drop again: 2 is filled now, so 3 takes it.
    spawn_one(&mut s);
    assert_eq!(s.place(wide, &rects), PlaceResult::Placed { house: 3 });
}

#[test]
fn placement_updates_counters_and_relieves_stress() {
    let mut s = session();
    for _ in 0..4 {
        spawn_one(&mut s);
    }
    for _ in 0..400 {
        s.advance(FRAME, LANE_H);
    }
    assert!(s.is_running());
    let stress_before = s.stress();
    assert!(stress_before > 8.0, "need headroom, got {}", stress_before);
    let waiting_before = s.waiting();

    assert_eq!(s.place(person_on(0), &house_rects()), PlaceResult::Placed { house: 0 });
    assert_eq!(s.waiting(), waiting_before - 1);
    assert_eq!(s.filled_count(), 1);
    assert_eq!(s.houses_remaining(), 11);
    assert!((s.stress() - (stress_before - 8.0)).abs() < 1e-4);
}

#[test]
fn stress_relief_clamps_at_zero() {
    let mut s = session();
    spawn_one(&mut s);
    assert!(s.stress() < 8.0);
    s.place(person_on(0), &house_rects());
    assert_eq!(s.stress(), 0.0);
}

#[test]
fn missed_drop_changes_nothing() {
    let mut s = session();
    spawn_one(&mut s);
    let waiting = s.waiting();
    let nowhere = Rect::new(5000.0, 5000.0, 40.0, 40.0);
    assert_eq!(s.place(nowhere, &house_rects()), PlaceResult::Missed);
    assert_eq!(s.waiting(), waiting);
    assert_eq!(s.filled_count(), 0);
}

#[test]
fn filling_last_house_is_success_regardless_of_stress() {
    let mut s = session();
    let rects = house_rects();
    for i in 0..12 {
        assert!(s.is_running());
        spawn_one(&mut s);
        assert_eq!(s.place(person_on(i), &rects), PlaceResult::Placed { house: i });
    }
    assert_eq!(s.phase(), Phase::Ended(Outcome::Success));
    assert_eq!(s.houses_remaining(), 0);
}

#[test]
fn full_session_walkthrough() {
    // End-to-end: spawn, house, repeat twelve times.
    let mut s = session();
    let rects = house_rects();
    assert_eq!(s.waiting(), 0);

    let first = spawn_one(&mut s);
    assert_eq!(s.waiting(), 1);
    let stress_at_drop = s.stress();
    assert_eq!(
        s.place(person_on(0), &rects),
        PlaceResult::Placed { house: 0 }
    );
    assert_eq!(s.filled_count(), 1);
    assert_eq!(s.waiting(), 0);
    assert_eq!(s.houses_remaining(), 11);
    assert!((s.stress() - (stress_at_drop - 8.0).max(0.0)).abs() < 1e-4);
    assert!(first.id < 12);

    for i in 1..12 {
        spawn_one(&mut s);
        s.place(person_on(i), &rects);
    }
    assert_eq!(s.phase(), Phase::Ended(Outcome::Success));
    let (title, body) = end_copy(Outcome::Success);
    assert_eq!(title, "Housing Supply Exhausted");
    assert!(body.starts_with("Demand kept rising"));
}

#[test]
fn crisis_copy_is_fixed() {
    let (title, body) = end_copy(Outcome::Crisis);
    assert_eq!(title, "Crisis Point Reached");
    assert!(body.contains("supply lagged"));
}

#[test]
fn reset_restores_setup() {
    let mut s = session();
    for _ in 0..3 {
        spawn_one(&mut s);
    }
    s.place(person_on(0), &house_rects());
    s.reset();
    assert_eq!(s.phase(), Phase::Running);
    assert_eq!(s.elapsed_sec(), 0.0);
    assert_eq!(s.waiting(), 0);
    assert_eq!(s.stress(), 0.0);
    assert_eq!(s.filled_count(), 0);
    assert_eq!(s.spawn_interval_ms(), 1300.0);
}

#[test]
fn rect_overlap_edges() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
    assert!(a.overlaps(&Rect::new(10.0, 10.0, 5.0, 5.0)), "touching counts");
    assert!(!a.overlaps(&Rect::new(11.0, 0.0, 5.0, 5.0)));
    assert!(!a.overlaps(&Rect::new(0.0, 11.0, 5.0, 5.0)));
}
