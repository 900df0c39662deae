//! Folio Deck - interactive layer of a single-page portfolio
//!
//! Core modules:
//! - `nav`: Swipe/keyboard deck navigation (gesture classifier, state machine, controller)
//! - `view`: Pure projection of navigation state onto what the page shows
//! - `sim`: Deterministic simulations (particle background, blaster mini-game)
//! - `renderer`: WebGPU pipeline for the blaster scene
//! - `platform`: Browser bindings (DOM renderer, canvas painter, event wiring)

pub mod nav;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod view;

pub use nav::{Deck, DeckLayout, Direction, NavigationState, classify};
pub use settings::Settings;
pub use view::{CardClass, DeckView, ViewRenderer};

/// Page-wide constants
pub mod consts {
    /// Minimum gesture travel (px) before a pointer interaction counts as a swipe
    pub const TAP_THRESHOLD: f32 = 50.0;

    /// Viewports narrower than this get the reduced particle count
    pub const MOBILE_BREAKPOINT: f32 = 768.0;
    pub const PARTICLES_MOBILE: usize = 25;
    pub const PARTICLES_DESKTOP: usize = 50;
    /// Particles closer than this are linked by a line
    pub const LINK_DISTANCE: f32 = 100.0;
    /// Peak alpha of a link line (at zero distance)
    pub const LINK_ALPHA: f32 = 0.1;

    /// Particle/accent palette
    pub const PALETTE: [&str; 3] = ["#8dc63f", "#00aeff", "#b21dac"];

    /// Blaster fixed timestep (the scene was tuned per 60 Hz frame)
    pub const BLASTER_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
}

/// Parse a `#rrggbb` colour into RGBA floats for the GPU.
///
/// Returns opaque white for anything that isn't a 6-digit hex colour.
pub fn hex_to_rgba(hex: &str) -> [f32; 4] {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return [1.0; 4];
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .unwrap_or(1.0)
    };
    [channel(0), channel(2), channel(4), 1.0]
}
