//! Pointer input: hit testing and knocking fruit down

use glam::Vec2;

use super::fruit::Fruit;
use super::particle;
use super::state::{SceneEvent, SceneState};

/// Index of the topmost hanging fruit under `point`.
///
/// Later fruit are drawn over earlier ones, so scan from the back.
pub fn pick_fruit(fruits: &[Fruit], point: Vec2) -> Option<usize> {
    fruits
        .iter()
        .rposition(|fruit| !fruit.is_falling() && fruit.hit_test(point))
}

impl SceneState {
    /// Handle a pointer-down at `point`. Returns the index of the fruit knocked
    /// loose; a miss changes nothing.
    pub fn pointer_down(&mut self, point: Vec2) -> Option<usize> {
        let index = pick_fruit(&self.fruits, point)?;

        let fruit = &mut self.fruits[index];
        fruit.knock(&mut self.rng, &self.tuning);
        let origin = fruit.pos - Vec2::new(0.0, self.tuning.particle_spawn_lift);
        self.events.push(SceneEvent::FruitKnocked { index });

        let burst = particle::spawn_burst(
            &mut self.rng,
            origin,
            self.tuning.particles_per_tap,
            self.tuning.leaf_color,
            &self.tuning,
        );
        self.particles.extend(burst);

        if self.all_fallen() {
            let reset = self.arm_reset(self.tuning.reset_delay);
            log::info!(
                "Tree cleared, regrowing in {:.0}s",
                self.tuning.reset_delay
            );
            self.events.push(SceneEvent::TreeCleared { reset });
        }

        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FruitKind, FruitState, Viewport};
    use crate::tuning::Tuning;

    fn fruit_at(x: f32, y: f32) -> Fruit {
        Fruit::new(Vec2::new(x, y), FruitKind::Apple, 0.0, &Tuning::default())
    }

    fn scene_with(fruits: Vec<Fruit>) -> SceneState {
        let mut state = SceneState::new(Viewport::new(800.0, 600.0), 0, Tuning::default(), 5);
        state.fruit_count = fruits.len();
        state.fruits = fruits;
        state.events.clear();
        state
    }

    #[test]
    fn test_pick_prefers_topmost() {
        let fruits = vec![fruit_at(100.0, 100.0), fruit_at(120.0, 100.0)];
        assert_eq!(pick_fruit(&fruits, Vec2::new(110.0, 100.0)), Some(1));
    }

    #[test]
    fn test_pick_skips_falling() {
        let mut fruits = vec![fruit_at(100.0, 100.0), fruit_at(120.0, 100.0)];
        fruits[1].state = FruitState::Falling;
        assert_eq!(pick_fruit(&fruits, Vec2::new(110.0, 100.0)), Some(0));
    }

    #[test]
    fn test_pick_uses_hit_radius() {
        let fruits = vec![fruit_at(100.0, 100.0)];
        // Outside the visual radius (40) but inside the hit radius (52)
        assert_eq!(pick_fruit(&fruits, Vec2::new(150.0, 100.0)), Some(0));
        assert_eq!(pick_fruit(&fruits, Vec2::new(153.0, 100.0)), None);
    }

    #[test]
    fn test_one_fruit_per_event() {
        let mut state = scene_with(vec![fruit_at(100.0, 100.0), fruit_at(110.0, 100.0)]);
        assert_eq!(state.pointer_down(Vec2::new(105.0, 100.0)), Some(1));
        assert_eq!(state.fruits[0].state, FruitState::Hanging);
        assert_eq!(state.fruits[1].state, FruitState::Falling);
        assert_eq!(state.particles.len(), 5);
    }

    #[test]
    fn test_miss_is_noop() {
        let mut state = scene_with(vec![fruit_at(100.0, 100.0)]);
        assert_eq!(state.pointer_down(Vec2::new(700.0, 500.0)), None);
        assert!(state.particles.is_empty());
        assert!(state.events.is_empty());
        assert!(state.pending_reset_at().is_none());
    }

    #[test]
    fn test_tap_with_negative_leaf_speed_still_knocks() {
        let tuning = Tuning {
            particle_speed_x: -1.0,
            ..Default::default()
        };
        let mut state = SceneState::new(Viewport::new(800.0, 600.0), 1, tuning, 1);
        let pos = state.fruits[0].pos;

        assert_eq!(state.pointer_down(pos), Some(0));
        assert_eq!(state.particles.len(), 5);
    }

    #[test]
    fn test_last_fruit_arms_reset() {
        let mut state = scene_with(vec![fruit_at(100.0, 100.0), fruit_at(300.0, 100.0)]);
        state.pointer_down(Vec2::new(100.0, 100.0));
        assert!(state.pending_reset_at().is_none());

        state.pointer_down(Vec2::new(300.0, 100.0));
        assert_eq!(state.pending_reset_at(), Some(state.time + 10.0));
        assert!(matches!(
            state.events.last(),
            Some(SceneEvent::TreeCleared { .. })
        ));
    }
}
