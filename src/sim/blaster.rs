//! Blaster mini-game
//!
//! Labelled cards fly toward the camera through a starfield; clicking one
//! blows it up for points. When the board is cleared a fresh wave of cards
//! arrives after a short delay.
//!
//! World units, right-handed, camera on +z looking down -z. Motion constants
//! are per fixed step (`BLASTER_DT`).

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{BLASTER_DT, MAX_SUBSTEPS};

/// Card plane size
pub const CARD_WIDTH: f32 = 3.0;
pub const CARD_HEIGHT: f32 = 1.5;
/// Forward speed of every card (units/step)
pub const CARD_SPEED: f32 = 0.15;
/// Spawn depth of the first card and spacing between cards
pub const SPAWN_Z: f32 = -20.0;
pub const SPAWN_SPACING: f32 = 10.0;
/// Cards past this depth have flown by the camera
pub const WRAP_Z: f32 = 5.0;
/// Where wrapped cards re-enter
pub const RESET_Z: f32 = -50.0;
/// Spawn area half extents
pub const SPAWN_HALF_X: f32 = 5.0;
pub const SPAWN_HALF_Y: f32 = 3.0;
/// Max tumble speed per axis (rad/step)
pub const MAX_SPIN: f32 = 0.005;

pub const STAR_COUNT: usize = 1000;
/// Stars fill a cube of this edge length around the origin
pub const STAR_FIELD_SIZE: f32 = 100.0;

pub const EXPLOSION_POINTS: usize = 50;
/// Per-axis debris speed is drawn from [-0.5, 0.5) and scaled by this each step
pub const DEBRIS_SCALE: f32 = 0.1;
/// Life lost per step (explosions last 50 steps)
pub const EXPLOSION_DECAY: f32 = 0.02;

/// Exponential-squared fog density
pub const FOG_DENSITY: f32 = 0.02;

/// Text and accent colour of a card
#[derive(Debug, Clone, PartialEq)]
pub struct CardLabel {
    pub text: String,
    pub color: String,
}

impl CardLabel {
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
        }
    }
}

/// The cards shown on the portfolio page
pub fn default_labels() -> Vec<CardLabel> {
    [
        ("Kevin Rushing", "#8dc63f"),
        ("Senior DB Engineer", "#00aeff"),
        ("Architecture", "#b21dac"),
        ("NielsenIQ", "#8dc63f"),
        ("100M+ Records", "#00aeff"),
        ("Snowflake", "#ffffff"),
        ("Python & ML", "#b21dac"),
        ("UAMS", "#8dc63f"),
        ("Systems Design", "#00aeff"),
        ("Hire Me!", "#ffffff"),
    ]
    .into_iter()
    .map(|(text, color)| CardLabel::new(text, color))
    .collect()
}

/// Perspective camera
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            fov_y: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    /// Projection with a [0, 1] depth range (wgpu convention)
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// World-space ray through a point in normalized device coordinates
    pub fn ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        (near, (far - near).normalize())
    }
}

/// Convert a pointer position (CSS px) to normalized device coordinates
pub fn screen_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

/// Fraction of fog colour mixed in at `distance` from the camera
pub fn fog_factor(distance: f32) -> f32 {
    let d = FOG_DENSITY * distance;
    (1.0 - (-(d * d)).exp()).clamp(0.0, 1.0)
}

/// A card flying toward the camera
#[derive(Debug, Clone)]
pub struct FlyingCard {
    pub id: u32,
    /// Index into the game's labels
    pub label: usize,
    pub pos: Vec3,
    /// Euler angles (x, y) in radians
    pub rotation: Vec2,
    pub spin: Vec2,
}

impl FlyingCard {
    pub fn model(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0);
        Mat4::from_rotation_translation(rotation, self.pos)
    }

    /// World-space corners, counter-clockwise from bottom-left
    pub fn corners(&self) -> [Vec3; 4] {
        let model = self.model();
        let (hw, hh) = (CARD_WIDTH / 2.0, CARD_HEIGHT / 2.0);
        [
            Vec3::new(-hw, -hh, 0.0),
            Vec3::new(hw, -hh, 0.0),
            Vec3::new(hw, hh, 0.0),
            Vec3::new(-hw, hh, 0.0),
        ]
        .map(|c| model.transform_point3(c))
    }

    /// Distance along the ray to where it crosses this card, if it does.
    /// Both faces are hittable.
    pub fn intersect(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let inv = self.model().inverse();
        let local_origin = inv.transform_point3(origin);
        let local_dir = inv.transform_vector3(dir);

        if local_dir.z.abs() < 1e-6 {
            return None;
        }
        let t = -local_origin.z / local_dir.z;
        if t < 0.0 {
            return None;
        }
        let hit = local_origin + local_dir * t;
        (hit.x.abs() <= CARD_WIDTH / 2.0 && hit.y.abs() <= CARD_HEIGHT / 2.0).then_some(t)
    }
}

/// A burst of debris where a card was destroyed
#[derive(Debug, Clone)]
pub struct Explosion {
    pub points: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    /// 1.0 at birth, removed at 0; doubles as opacity
    pub life: f32,
}

/// Result of a shot that hit something
#[derive(Debug, Clone, PartialEq)]
pub struct ShotHit {
    pub card_id: u32,
    pub label: String,
    pub score: u64,
}

/// Complete mini-game state
#[derive(Debug, Clone)]
pub struct BlasterGame {
    pub camera: Camera,
    pub labels: Vec<CardLabel>,
    pub cards: Vec<FlyingCard>,
    pub stars: Vec<Vec3>,
    pub explosions: Vec<Explosion>,
    pub score: u64,
    pub points_per_hit: u64,
    /// Delay before an empty board refills (ms)
    pub respawn_delay_ms: f64,
    /// Countdown until the next wave, when the board is empty
    respawn_in_ms: Option<f64>,
    accumulator: f32,
    next_id: u32,
    rng: Pcg32,
}

impl BlasterGame {
    pub fn new(seed: u64, labels: Vec<CardLabel>) -> Self {
        let mut game = Self {
            camera: Camera::default(),
            labels,
            cards: Vec::new(),
            stars: Vec::with_capacity(STAR_COUNT),
            explosions: Vec::new(),
            score: 0,
            points_per_hit: 100,
            respawn_delay_ms: 1000.0,
            respawn_in_ms: None,
            accumulator: 0.0,
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        };
        game.create_starfield();
        game.spawn_cards();
        game
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.camera.aspect = width / height;
        }
    }

    pub fn is_respawning(&self) -> bool {
        self.respawn_in_ms.is_some()
    }

    fn create_starfield(&mut self) {
        let half = STAR_FIELD_SIZE / 2.0;
        self.stars.clear();
        for _ in 0..STAR_COUNT {
            self.stars.push(Vec3::new(
                self.rng.random_range(-half..half),
                self.rng.random_range(-half..half),
                self.rng.random_range(-half..half),
            ));
        }
    }

    fn random_xy(&mut self) -> (f32, f32) {
        (
            self.rng.random_range(-SPAWN_HALF_X..SPAWN_HALF_X),
            self.rng.random_range(-SPAWN_HALF_Y..SPAWN_HALF_Y),
        )
    }

    /// Replace the board with one card per label, staggered in depth
    pub fn spawn_cards(&mut self) {
        self.cards.clear();
        self.respawn_in_ms = None;
        for index in 0..self.labels.len() {
            let (x, y) = self.random_xy();
            let spin = Vec2::new(
                self.rng.random_range(-MAX_SPIN..MAX_SPIN),
                self.rng.random_range(-MAX_SPIN..MAX_SPIN),
            );
            let id = self.next_id;
            self.next_id += 1;
            self.cards.push(FlyingCard {
                id,
                label: index,
                pos: Vec3::new(x, y, SPAWN_Z - index as f32 * SPAWN_SPACING),
                rotation: Vec2::ZERO,
                spin,
            });
        }
    }

    /// Advance by a frame's worth of wall time. Returns the steps taken.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, 0.1);
        let mut substeps = 0;
        while self.accumulator >= BLASTER_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= BLASTER_DT;
            substeps += 1;
        }
        // Stalled frame: drop the backlog instead of catching up later
        if self.accumulator >= BLASTER_DT {
            self.accumulator = 0.0;
        }
        substeps
    }

    /// One fixed step
    pub fn step(&mut self) {
        for i in 0..self.cards.len() {
            let card = &mut self.cards[i];
            card.pos.z += CARD_SPEED;
            card.rotation += card.spin;
            if card.pos.z > WRAP_Z {
                let (x, y) = self.random_xy();
                self.cards[i].pos = Vec3::new(x, y, RESET_Z);
            }
        }

        for explosion in &mut self.explosions {
            for (point, vel) in explosion.points.iter_mut().zip(&explosion.velocities) {
                *point += *vel * DEBRIS_SCALE;
            }
            explosion.life -= EXPLOSION_DECAY;
        }
        self.explosions.retain(|e| e.life > 0.0);

        if let Some(remaining) = self.respawn_in_ms.as_mut() {
            *remaining -= (BLASTER_DT * 1000.0) as f64;
            if *remaining <= 0.0 {
                log::debug!("blaster: board refilled");
                self.spawn_cards();
            }
        }
    }

    /// Fire through a point in normalized device coordinates
    pub fn shoot(&mut self, ndc: Vec2) -> Option<ShotHit> {
        let (origin, dir) = self.camera.ray(ndc);

        let (index, _) = self
            .cards
            .iter()
            .enumerate()
            .filter_map(|(i, card)| card.intersect(origin, dir).map(|t| (i, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        let card = self.cards.remove(index);
        self.spawn_explosion(card.pos);
        self.score += self.points_per_hit;

        if self.cards.is_empty() {
            self.respawn_in_ms = Some(self.respawn_delay_ms);
        }

        let label = self
            .labels
            .get(card.label)
            .map(|l| l.text.clone())
            .unwrap_or_default();
        log::debug!("blaster: hit '{}' (score {})", label, self.score);

        Some(ShotHit {
            card_id: card.id,
            label,
            score: self.score,
        })
    }

    fn spawn_explosion(&mut self, at: Vec3) {
        let velocities = (0..EXPLOSION_POINTS)
            .map(|_| {
                Vec3::new(
                    self.rng.random_range(-0.5..0.5),
                    self.rng.random_range(-0.5..0.5),
                    self.rng.random_range(-0.5..0.5),
                )
            })
            .collect();
        self.explosions.push(Explosion {
            points: vec![at; EXPLOSION_POINTS],
            velocities,
            life: 1.0,
        });
    }

    /// Back to an untouched board with zero score
    pub fn reset(&mut self) {
        self.score = 0;
        self.explosions.clear();
        self.accumulator = 0.0;
        self.spawn_cards();
    }
}
