//! Scene state and lifecycle
//!
//! Everything the frame loop mutates lives in `SceneState`; there are no
//! globals. Hosts create it once, forward input to it, call `tick` every
//! simulation step and drain `events` for sound.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::fruit::{Fruit, FruitKind};
use super::layout::{self, Crown, LayoutParams};
use super::particle::Particle;
use super::schedule::{DeferredTask, TaskId};
use crate::audio::SoundCue;
use crate::tuning::Tuning;

/// Drawable area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Y coordinate fruit comes to rest on
    #[inline]
    pub fn ground_level(&self, tuning: &Tuning) -> f32 {
        self.height * tuning.ground_ratio
    }
}

/// Things that happened during input handling or a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    /// A fruit was knocked off the branch
    FruitKnocked { index: usize },
    /// A falling fruit hit the ground hard enough to hear
    Bounce { index: usize, impact: f32 },
    /// The last hanging fruit fell; a reset is armed
    TreeCleared { reset: TaskId },
    /// A fresh batch was grown
    Reset { kind: FruitKind, count: usize },
}

impl SceneEvent {
    /// Sound to play for this event, if any
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            SceneEvent::FruitKnocked { .. } => Some(SoundCue::Tap),
            SceneEvent::Bounce { .. } => Some(SoundCue::Bounce),
            SceneEvent::TreeCleared { .. } | SceneEvent::Reset { .. } => None,
        }
    }
}

/// Complete scene state
#[derive(Debug, Clone)]
pub struct SceneState {
    pub viewport: Viewport,
    pub tuning: Tuning,
    /// Fruit per batch
    pub fruit_count: usize,
    /// Kind shared by the whole current batch
    pub fruit_kind: FruitKind,
    /// Creation order; later entries draw on top
    pub fruits: Vec<Fruit>,
    pub particles: Vec<Particle>,
    /// Wall-clock seconds of the most recent tick
    pub time: f64,
    /// Outgoing events, drained by the host
    pub events: Vec<SceneEvent>,
    pub(crate) rng: Pcg32,
    pub(crate) reset_task: DeferredTask,
}

impl SceneState {
    /// Create a scene and grow the first batch
    pub fn new(viewport: Viewport, fruit_count: usize, tuning: Tuning, seed: u64) -> Self {
        let mut state = Self {
            viewport,
            tuning,
            fruit_count,
            fruit_kind: FruitKind::Apple,
            fruits: Vec::with_capacity(fruit_count),
            particles: Vec::new(),
            time: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            reset_task: DeferredTask::new(),
        };
        state.reset();
        state
    }

    /// Crown geometry for the current viewport
    pub fn crown(&self) -> Crown {
        Crown::for_viewport(self.viewport, &self.tuning)
    }

    /// Ground level for the current viewport
    pub fn ground_level(&self) -> f32 {
        self.viewport.ground_level(&self.tuning)
    }

    /// Throw away the current batch and grow a new one
    pub fn reset(&mut self) {
        self.cancel_pending_reset();
        self.fruits.clear();
        self.particles.clear();

        self.fruit_kind = FruitKind::random(&mut self.rng);
        let params = LayoutParams::new(self.crown(), &self.tuning);
        let placements = layout::generate(&mut self.rng, &params, self.fruit_count);

        for placement in placements {
            let sway_phase = self.rng.random_range(0.0..std::f32::consts::TAU);
            self.fruits.push(Fruit::new(
                placement.pos,
                self.fruit_kind,
                sway_phase,
                &self.tuning,
            ));
        }

        log::info!(
            "Grew {} {}s on a {}x{} tree",
            self.fruits.len(),
            self.fruit_kind.name(),
            self.viewport.width,
            self.viewport.height
        );
        self.events.push(SceneEvent::Reset {
            kind: self.fruit_kind,
            count: self.fruits.len(),
        });
    }

    /// Viewport changed: every position depends on it, so start over
    pub fn resize(&mut self, viewport: Viewport) {
        log::info!(
            "Resize {}x{} -> {}x{}",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
        self.reset();
    }

    /// Drop everything; the scene stays usable and `reset` regrows it
    pub fn teardown(&mut self) {
        self.cancel_pending_reset();
        self.fruits.clear();
        self.particles.clear();
        self.events.clear();
    }

    /// Schedule a reset `delay` seconds after the last tick, replacing any pending one
    pub fn arm_reset(&mut self, delay: f64) -> TaskId {
        let due_at = self.time + delay;
        let id = self.reset_task.arm(due_at);
        log::debug!("Reset armed for t={:.2}s", due_at);
        id
    }

    /// Cancel the pending reset, if any
    pub fn cancel_pending_reset(&mut self) -> Option<TaskId> {
        self.reset_task.cancel()
    }

    /// Cancel the reset armed as `id`; a stale id leaves a newer one alone
    pub fn cancel_reset(&mut self, id: TaskId) -> bool {
        let cancelled = self.reset_task.cancel_if(id);
        if cancelled {
            log::debug!("Reset {:?} cancelled", id);
        }
        cancelled
    }

    /// True while a reset is waiting to fire
    pub fn reset_armed(&self) -> bool {
        self.reset_task.is_armed()
    }

    /// Wall-clock time the pending reset fires at
    pub fn pending_reset_at(&self) -> Option<f64> {
        self.reset_task.pending().map(|task| task.due_at)
    }

    /// True once every fruit in the batch is on its way down
    pub fn all_fallen(&self) -> bool {
        self.fruits.iter().all(Fruit::is_falling)
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SceneEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FruitState;

    fn scene(count: usize) -> SceneState {
        SceneState::new(Viewport::new(800.0, 600.0), count, Tuning::default(), 12345)
    }

    #[test]
    fn test_new_grows_one_kind() {
        let state = scene(8);
        assert_eq!(state.fruits.len(), 8);
        assert!(state.fruits.iter().all(|f| f.kind == state.fruit_kind));
        assert!(state.fruits.iter().all(|f| f.state == FruitState::Hanging));
        assert!(state.particles.is_empty());
        assert!(matches!(
            state.events.last(),
            Some(SceneEvent::Reset { count: 8, .. })
        ));
    }

    #[test]
    fn test_ground_level() {
        let state = scene(1);
        assert_eq!(state.ground_level(), 480.0);
    }

    #[test]
    fn test_reset_cancels_pending() {
        let mut state = scene(3);
        state.arm_reset(10.0);
        assert!(state.pending_reset_at().is_some());
        state.reset();
        assert!(state.pending_reset_at().is_none());
    }

    #[test]
    fn test_cancel_reset_by_id() {
        let mut state = scene(3);
        let stale = state.arm_reset(5.0);
        let live = state.arm_reset(10.0);

        assert!(!state.cancel_reset(stale));
        assert!(state.reset_armed());
        assert!(state.cancel_reset(live));
        assert!(!state.reset_armed());
        assert!(!state.cancel_reset(live));
    }

    #[test]
    fn test_resize_regrows_inside_new_crown() {
        let mut state = scene(8);
        state.resize(Viewport::new(400.0, 400.0));

        assert_eq!(state.viewport, Viewport::new(400.0, 400.0));
        assert_eq!(state.fruits.len(), 8);
        let crown = state.crown();
        let limit = crown.sampling_radius(state.tuning.crown_margin) + 1e-3;
        assert!(state.fruits.iter().all(|f| f.pos.distance(crown.center) <= limit));
    }

    #[test]
    fn test_teardown_empties_scene() {
        let mut state = scene(4);
        state.arm_reset(1.0);
        state.teardown();
        assert!(state.fruits.is_empty());
        assert!(state.events.is_empty());
        assert!(state.pending_reset_at().is_none());
    }

    #[test]
    fn test_event_sound_cues() {
        assert_eq!(
            SceneEvent::FruitKnocked { index: 0 }.sound_cue(),
            Some(SoundCue::Tap)
        );
        assert_eq!(
            SceneEvent::Bounce {
                index: 0,
                impact: 5.0
            }
            .sound_cue(),
            Some(SoundCue::Bounce)
        );
        assert_eq!(
            SceneEvent::Reset {
                kind: FruitKind::Apple,
                count: 1
            }
            .sound_cue(),
            None
        );
    }

    #[test]
    fn test_same_seed_same_orchard() {
        let a = scene(8);
        let b = scene(8);
        assert_eq!(a.fruit_kind, b.fruit_kind);
        for (fa, fb) in a.fruits.iter().zip(&b.fruits) {
            assert_eq!(fa.pos, fb.pos);
            assert_eq!(fa.sway_phase, fb.sway_phase);
        }
    }
}
