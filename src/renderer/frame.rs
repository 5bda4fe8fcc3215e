//! Whole-frame composition: sky, ground, tree, fruit, leaves

use glam::Vec2;

use super::display_list::{Draw, DisplayList, Rgba};
use crate::sim::SceneState;

const SKY: Rgba = [0.53, 0.81, 0.92, 1.0];
const GRASS: Rgba = [0.49, 0.70, 0.26, 1.0];
const TRUNK: Rgba = [0.47, 0.33, 0.28, 1.0];
const FOLIAGE_DARK: Rgba = [0.18, 0.49, 0.20, 1.0];
const FOLIAGE: Rgba = [0.22, 0.56, 0.24, 1.0];

/// Static backdrop: sky, ground band, trunk and a clump of foliage circles
pub fn draw_backdrop(scene: &SceneState, list: &mut DisplayList) {
    let w = scene.viewport.width;
    let h = scene.viewport.height;
    let ground = scene.ground_level();
    let crown = scene.crown();

    list.fill_rect(Vec2::ZERO, Vec2::new(w, h), SKY);
    list.fill_rect(Vec2::new(0.0, ground), Vec2::new(w, h - ground), GRASS);

    // Trunk from the ground up into the crown
    let trunk_width = crown.radius * 0.25;
    list.fill_rect(
        Vec2::new(crown.center.x - trunk_width / 2.0, crown.center.y),
        Vec2::new(trunk_width, (ground - crown.center.y).max(0.0)),
        TRUNK,
    );

    // Foliage: a big disc ringed with smaller ones for a bumpy outline
    list.fill_circle(crown.center, crown.radius, FOLIAGE_DARK);
    let lobes = 7;
    for i in 0..lobes {
        let theta = i as f32 / lobes as f32 * std::f32::consts::TAU;
        let offset = crate::polar_to_cartesian(crown.radius * 0.55, theta);
        list.fill_circle(crown.center + offset, crown.radius * 0.5, FOLIAGE);
    }
}

/// Build the display list for one frame (read-only)
pub fn build_frame(scene: &SceneState, list: &mut DisplayList) {
    list.clear();
    draw_backdrop(scene, list);
    for fruit in &scene.fruits {
        fruit.draw(list);
    }
    for particle in &scene.particles {
        particle.draw(list);
    }
}
