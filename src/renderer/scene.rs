//! Blaster scene geometry
//!
//! Flattens the simulation into one triangle list, drawn back to front
//! (stars, then cards far to near, then debris) since there is no depth
//! buffer.

use glam::{Mat4, Vec3};

use super::vertex::{Vertex, colors};
use crate::hex_to_rgba;
use crate::sim::{BlasterGame, FlyingCard, fog_factor};
use crate::sim::blaster::{CARD_HEIGHT, CARD_WIDTH, EXPLOSION_POINTS};

/// Edge length of a star sprite (world units)
pub const STAR_SIZE: f32 = 0.1;
/// Edge length of a debris sprite (world units)
pub const DEBRIS_SIZE: f32 = 0.2;
/// Width of the coloured card border (world units)
pub const CARD_BORDER: f32 = 0.05;

struct Projector {
    view: Mat4,
    proj: Mat4,
    eye: Vec3,
    near: f32,
}

impl Projector {
    fn clip(&self, world: Vec3) -> [f32; 4] {
        (self.proj * self.view * world.extend(1.0)).to_array()
    }

    /// Camera-facing square centred on `world`
    fn sprite(&self, out: &mut Vec<Vertex>, world: Vec3, size: f32, color: [f32; 4]) {
        let center = self.view.transform_point3(world);
        if center.z > -self.near {
            return;
        }
        let h = size / 2.0;
        let corners = [
            Vec3::new(-h, -h, 0.0),
            Vec3::new(h, -h, 0.0),
            Vec3::new(h, h, 0.0),
            Vec3::new(-h, h, 0.0),
        ]
        .map(|offset| (self.proj * (center + offset).extend(1.0)).to_array());
        push_quad(out, corners, color);
    }
}

fn push_quad(out: &mut Vec<Vertex>, corners: [[f32; 4]; 4], color: [f32; 4]) {
    for i in [0, 1, 2, 0, 2, 3] {
        out.push(Vertex::new(corners[i], color));
    }
}

/// Blend toward the fog colour by distance from the camera
fn fogged(color: [f32; 4], distance: f32) -> [f32; 4] {
    let f = fog_factor(distance);
    [
        color[0] + (colors::FOG[0] - color[0]) * f,
        color[1] + (colors::FOG[1] - color[1]) * f,
        color[2] + (colors::FOG[2] - color[2]) * f,
        color[3],
    ]
}

fn card_quad(p: &Projector, model: &Mat4, half_w: f32, half_h: f32) -> [[f32; 4]; 4] {
    [
        Vec3::new(-half_w, -half_h, 0.0),
        Vec3::new(half_w, -half_h, 0.0),
        Vec3::new(half_w, half_h, 0.0),
        Vec3::new(-half_w, half_h, 0.0),
    ]
    .map(|local| p.clip(model.transform_point3(local)))
}

fn push_card(out: &mut Vec<Vertex>, p: &Projector, card: &FlyingCard, accent: [f32; 4]) {
    let model = card.model();
    let distance = card.pos.distance(p.eye);
    let (hw, hh) = (CARD_WIDTH / 2.0, CARD_HEIGHT / 2.0);

    push_quad(out, card_quad(p, &model, hw, hh), fogged(accent, distance));
    push_quad(
        out,
        card_quad(p, &model, hw - CARD_BORDER, hh - CARD_BORDER),
        fogged(colors::CARD_FILL, distance),
    );
}

/// Build the full frame
pub fn build_scene(game: &BlasterGame) -> Vec<Vertex> {
    let camera = &game.camera;
    let p = Projector {
        view: camera.view(),
        proj: camera.projection(),
        eye: camera.position,
        near: camera.near,
    };

    let mut out = Vec::with_capacity(
        (game.stars.len() + game.cards.len() * 2 + game.explosions.len() * EXPLOSION_POINTS) * 6,
    );

    for &star in &game.stars {
        let color = fogged(colors::STAR, star.distance(p.eye));
        p.sprite(&mut out, star, STAR_SIZE, color);
    }

    let mut cards: Vec<&FlyingCard> = game.cards.iter().collect();
    cards.sort_by(|a, b| a.pos.z.total_cmp(&b.pos.z));
    for card in cards {
        let accent = game
            .labels
            .get(card.label)
            .map(|l| hex_to_rgba(&l.color))
            .unwrap_or([1.0; 4]);
        push_card(&mut out, &p, card, accent);
    }

    for explosion in &game.explosions {
        let mut color = colors::DEBRIS;
        color[3] = explosion.life.clamp(0.0, 1.0);
        for &point in &explosion.points {
            p.sprite(&mut out, point, DEBRIS_SIZE, fogged(color, point.distance(p.eye)));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::default_labels;
    use glam::Vec2;

    fn empty_game() -> BlasterGame {
        let mut game = BlasterGame::new(1, default_labels());
        game.stars.clear();
        game.cards.clear();
        game
    }

    #[test]
    fn test_empty_scene() {
        assert!(build_scene(&empty_game()).is_empty());
    }

    #[test]
    fn test_card_is_two_quads() {
        let mut game = BlasterGame::new(1, default_labels());
        game.stars.clear();
        game.cards.truncate(1);
        let vertices = build_scene(&game);
        assert_eq!(vertices.len(), 12);
        // Border first, in the card's accent colour (fogged toward black)
        assert!(vertices[0].color[1] > vertices[0].color[2]);
        assert_eq!(vertices[6].color[3], colors::CARD_FILL[3]);
    }

    #[test]
    fn test_stars_behind_camera_are_skipped() {
        let mut game = empty_game();
        game.stars.push(Vec3::new(0.0, 0.0, -10.0));
        game.stars.push(Vec3::new(0.0, 0.0, 20.0));
        assert_eq!(build_scene(&game).len(), 6);
    }

    #[test]
    fn test_centred_star_projects_to_screen_centre() {
        let mut game = empty_game();
        game.stars.push(Vec3::new(0.0, 0.0, -10.0));
        let vertices = build_scene(&game);
        let (mut cx, mut cy) = (0.0, 0.0);
        for v in &vertices[..3] {
            cx += v.position[0] / v.position[3];
            cy += v.position[1] / v.position[3];
        }
        // Triangle (0, 1, 2) straddles the centre
        assert!(cx.abs() < 0.05 && cy.abs() < 0.05);
    }

    #[test]
    fn test_debris_fades_with_life() {
        let mut game = empty_game();
        game.cards = BlasterGame::new(1, default_labels()).cards;
        game.cards.truncate(1);
        game.cards[0].pos = Vec3::new(0.0, 0.0, -10.0);
        game.cards[0].rotation = Vec2::ZERO;
        game.shoot(Vec2::ZERO).unwrap();
        game.explosions[0].life = 0.25;

        let vertices = build_scene(&game);
        assert_eq!(vertices.len(), EXPLOSION_POINTS * 6);
        assert!(vertices.iter().all(|v| v.color[3] == 0.25));
    }

    #[test]
    fn test_fog_darkens_far_cards() {
        let near = fogged([1.0, 1.0, 1.0, 1.0], 5.0);
        let far = fogged([1.0, 1.0, 1.0, 1.0], 60.0);
        assert!(far[0] < near[0]);
        assert_eq!(far[3], 1.0);
    }
}
