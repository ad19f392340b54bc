// Pure state machine for the drag-to-house mini-game.
//
// The session owns the clock, spawn cadence, stress accumulator and house
// slots. The web frontend calls `advance` once per animation frame and
// `place` on drag release, handing in geometry it measured from the DOM, so
// the whole game is testable with literal coordinates.

use rand::prelude::*;

/// Game tuning. Values are configuration, tuned for feel; the defaults are
/// the canonical ones.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub house_count: usize,
    /// Initial interval between spawns, ms.
    pub spawn_interval_ms: f64,
    /// The interval never ramps below this, ms.
    pub spawn_interval_floor_ms: f64,
    /// How much the interval shrinks after each spawn, ms.
    pub spawn_interval_step_ms: f64,
    /// Stress gained per waiting person per second.
    pub stress_gain_per_waiting: f32,
    /// Natural calming, stress lost per second.
    pub stress_decay_per_sec: f32,
    /// Stress relieved by housing one person.
    pub stress_relief: f32,
    pub stress_max: f32,
    /// Frame dt clamp, seconds. Tab-switch pauses must not fast-forward.
    pub max_frame_dt: f64,
    /// Chance a spawned person uses the small visual variant.
    pub small_person_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            house_count: 12,
            spawn_interval_ms: 1300.0,
            spawn_interval_floor_ms: 500.0,
            spawn_interval_step_ms: 20.0,
            stress_gain_per_waiting: 0.5,
            stress_decay_per_sec: 1.5,
            stress_relief: 8.0,
            stress_max: 100.0,
            max_frame_dt: 0.033,
            small_person_chance: 0.3,
        }
    }
}

pub const PERSON_EMOJIS: &[&str] = &[
    "👩", "👨", "🧑", "👩‍🦱", "👨‍🦱", "👩‍👧", "👨‍👧", "👨‍👦", "👩‍👦", "👨‍👩‍👧", "👩‍👩‍👧", "👨‍👨‍👧",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Crisis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Ended(Outcome),
}

/// Title and body shown on the end-of-game card.
pub fn end_copy(outcome: Outcome) -> (&'static str, &'static str) {
    match outcome {
        Outcome::Success => (
            "Housing Supply Exhausted",
            "Demand kept rising, but the number of homes didn’t. This is what an affordability crisis feels like.",
        ),
        Outcome::Crisis => (
            "Crisis Point Reached",
            "Too many households waited too long while supply lagged. This is what an affordability crisis feels like.",
        ),
    }
}

/// Axis-aligned box in page coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }
}

/// Spawn descriptor for one person token. The DOM node itself lives on the
/// web side; the session only counts waiting people.
#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    pub id: u64,
    /// Initial lane position, px from the lane's top-left.
    pub x: f32,
    pub y: f32,
    pub small: bool,
    pub emoji: &'static str,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HouseSlot {
    pub filled: bool,
}

/// What one `advance` call produced.
#[derive(Clone, Debug, Default)]
pub struct FrameUpdate {
    pub spawned: Option<Person>,
    /// Set on the frame the session ends in crisis.
    pub outcome: Option<Outcome>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceResult {
    Placed { house: usize },
    Missed,
}

pub struct GameSession {
    cfg: GameConfig,
    rng: StdRng,
    phase: Phase,
    elapsed: f64,
    spawn_timer_ms: f64,
    spawn_interval_ms: f64,
    houses: Vec<HouseSlot>,
    waiting: usize,
    stress: f32,
    next_person_id: u64,
}

impl GameSession {
    pub fn new(cfg: GameConfig, seed: u64) -> Self {
        let mut session = Self {
            rng: StdRng::seed_from_u64(seed),
            phase: Phase::Running,
            elapsed: 0.0,
            spawn_timer_ms: 0.0,
            spawn_interval_ms: cfg.spawn_interval_ms,
            houses: Vec::new(),
            waiting: 0,
            stress: 0.0,
            next_person_id: 0,
            cfg,
        };
        session.reset();
        session
    }

    /// Back to Setup: empty slots, zeroed counters, running again.
    pub fn reset(&mut self) {
        self.phase = Phase::Running;
        self.elapsed = 0.0;
        self.spawn_timer_ms = 0.0;
        self.spawn_interval_ms = self.cfg.spawn_interval_ms;
        self.houses = vec![HouseSlot::default(); self.cfg.house_count];
        self.waiting = 0;
        self.stress = 0.0;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn elapsed_sec(&self) -> f64 {
        self.elapsed
    }

    pub fn stress(&self) -> f32 {
        self.stress
    }

    /// Stress as a 0..1 fraction of the maximum.
    pub fn stress_fraction(&self) -> f32 {
        if self.cfg.stress_max <= 0.0 {
            return 0.0;
        }
        self.stress / self.cfg.stress_max
    }

    pub fn waiting(&self) -> usize {
        self.waiting
    }

    pub fn house_count(&self) -> usize {
        self.houses.len()
    }

    pub fn filled_count(&self) -> usize {
        self.houses.iter().filter(|h| h.filled).count()
    }

    pub fn houses_remaining(&self) -> usize {
        self.houses.len() - self.filled_count()
    }

    pub fn spawn_interval_ms(&self) -> f64 {
        self.spawn_interval_ms
    }

    /// Advance the game clock by one frame. `lane_height` is the current
    /// pixel height of the spawn lane, used to place new arrivals.
    ///
    /// Once the session has ended this is a no-op; the host loop may keep
    /// calling it.
    pub fn advance(&mut self, dt_sec: f64, lane_height: f32) -> FrameUpdate {
        let mut update = FrameUpdate::default();
        if self.phase != Phase::Running {
            return update;
        }

        let dt = clamp_f64(dt_sec, 0.0, self.cfg.max_frame_dt);
        self.elapsed += dt;

        self.spawn_timer_ms += dt * 1000.0;
        if self.spawn_timer_ms >= self.spawn_interval_ms {
            self.spawn_timer_ms = 0.0;
            update.spawned = Some(self.spawn_person(lane_height));
            // Arrival pressure accelerates, floor-clamped, never re-increasing.
            self.spawn_interval_ms = (self.spawn_interval_ms - self.cfg.spawn_interval_step_ms)
                .max(self.cfg.spawn_interval_floor_ms);
        }

        let gain = self.waiting as f32 * dt as f32 * self.cfg.stress_gain_per_waiting;
        let decay = dt as f32 * self.cfg.stress_decay_per_sec;
        self.stress = clamp_f32(self.stress + gain - decay, 0.0, self.cfg.stress_max);
        if self.stress >= self.cfg.stress_max {
            self.phase = Phase::Ended(Outcome::Crisis);
            update.outcome = Some(Outcome::Crisis);
        }

        update
    }

    fn spawn_person(&mut self, lane_height: f32) -> Person {
        let y_range = (lane_height - 60.0).max(0.0);
        let person = Person {
            id: self.next_person_id,
            x: 8.0 + self.rng.gen::<f32>() * 60.0,
            y: 20.0 + self.rng.gen::<f32>() * y_range,
            small: self.rng.gen::<f64>() < self.cfg.small_person_chance,
            emoji: PERSON_EMOJIS[self.rng.gen_range(0..PERSON_EMOJIS.len())],
        };
        self.next_person_id += 1;
        self.waiting += 1;
        person
    }

    /// Try to house a released person. Slots are checked in construction
    /// order and the first overlapping unfilled slot wins; there is no
    /// best-fit logic. `house_rects` must be in the same order as the slots.
    pub fn place(&mut self, person: Rect, house_rects: &[Rect]) -> PlaceResult {
        if self.phase != Phase::Running {
            return PlaceResult::Missed;
        }
        let n = self.houses.len().min(house_rects.len());
        for (index, rect) in house_rects.iter().enumerate().take(n) {
            if self.houses[index].filled {
                continue;
            }
            if person.overlaps(rect) {
                self.houses[index].filled = true;
                self.waiting = self.waiting.saturating_sub(1);
                self.stress = clamp_f32(
                    self.stress - self.cfg.stress_relief,
                    0.0,
                    self.cfg.stress_max,
                );
                if self.houses_remaining() == 0 {
                    self.phase = Phase::Ended(Outcome::Success);
                }
                return PlaceResult::Placed { house: index };
            }
        }
        PlaceResult::Missed
    }
}

#[inline]
fn clamp_f32(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

#[inline]
fn clamp_f64(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}
