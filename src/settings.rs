//! Page settings
//!
//! Supplied by the page as JSON in `<body data-settings="...">`. Every field
//! is optional; missing fields take their defaults. Never persisted.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Page settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Deck ===
    /// Minimum gesture travel (px) before a swipe registers
    pub tap_threshold: f32,

    // === Background ===
    /// Viewport width (px) below which the mobile particle count applies
    pub mobile_breakpoint: f32,
    pub particles_mobile: usize,
    pub particles_desktop: usize,
    /// Max distance (px) at which two particles are linked
    pub link_distance: f32,
    /// Paint the background once and skip the animation loop
    pub reduced_motion: bool,

    // === Blaster ===
    /// Delay before a cleared board refills (ms)
    pub respawn_delay_ms: f64,
    /// Score per card hit
    pub points_per_hit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tap_threshold: TAP_THRESHOLD,

            mobile_breakpoint: MOBILE_BREAKPOINT,
            particles_mobile: PARTICLES_MOBILE,
            particles_desktop: PARTICLES_DESKTOP,
            link_distance: LINK_DISTANCE,
            reduced_motion: false,

            respawn_delay_ms: 1000.0,
            points_per_hit: 100,
        }
    }
}

impl Settings {
    /// Parse settings JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring malformed settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Particle count for a viewport width
    pub fn particle_count(&self, viewport_width: f32) -> usize {
        if viewport_width < self.mobile_breakpoint {
            self.particles_mobile
        } else {
            self.particles_desktop
        }
    }

    /// Replace out-of-range values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.tap_threshold.is_finite() && self.tap_threshold > 0.0) {
            self.tap_threshold = defaults.tap_threshold;
        }
        if !(self.link_distance.is_finite() && self.link_distance > 0.0) {
            self.link_distance = defaults.link_distance;
        }
        if !(self.respawn_delay_ms.is_finite() && self.respawn_delay_ms >= 0.0) {
            self.respawn_delay_ms = defaults.respawn_delay_ms;
        }
        self
    }

    /// Read settings from the page body (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .and_then(|b| b.get_attribute("data-settings"));

        match json {
            Some(json) => {
                log::info!("Loaded settings from page");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
