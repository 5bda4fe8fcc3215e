//! Per-step simulation update
//!
//! Core loop body the host calls at a fixed cadence.

use super::particle;
use super::state::{SceneEvent, SceneState};

/// Advance the scene by one step. `now` is elapsed wall-clock seconds, used
/// for the hanging sway and the deferred reset; physics moves one unit step.
pub fn tick(state: &mut SceneState, now: f64) {
    state.time = now;

    for (index, fruit) in state.fruits.iter_mut().enumerate() {
        let outcome = fruit.update(now, state.viewport, &state.tuning);
        if let Some(impact) = outcome.audible_bounce {
            state.events.push(SceneEvent::Bounce { index, impact });
        }
    }

    particle::update_all(&mut state.particles, &state.tuning);

    if state.reset_task.poll(now).is_some() {
        log::info!("Deferred reset fired at t={:.2}s", now);
        state.reset();
    }
}
