//! # Compiler settings
//!
//! Tunables for every stage of the compile. Each group has a serde default, so
//! a settings file only needs to name what it changes.
//!
//! ```toml
//! seed = 7
//! wall_thickness = 0.4
//!
//! [door]
//! clearance = 0.1
//! ```

use serde::{Deserialize, Serialize};

use super::Config;

/// Sealed corridor tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorSettings {
    /// Width of the glowing strip along each wall
    pub strip_width: f32,
    /// Strip emission strength
    pub strip_strength: f32,
}

impl Default for CorridorSettings {
    fn default() -> Self {
        Self {
            strip_width: 0.12,
            strip_strength: 12.0,
        }
    }
}

/// Open bridge tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSettings {
    /// Deck height above the port floor
    pub deck_lift: f32,
    /// Extra lateral offset of the edge strips beyond half the width
    pub edge_offset: f32,
    /// Edge strip height above the port floor
    pub edge_lift: f32,
    /// Edge strip width
    pub edge_width: f32,
    /// Edge strip emission strength
    pub edge_strength: f32,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            deck_lift: 0.08,
            edge_offset: 0.15,
            edge_lift: 0.12,
            edge_width: 0.22,
            edge_strength: 15.0,
        }
    }
}

/// Sliding door tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorSettings {
    /// Slide distance beyond the panel width
    pub clearance: f32,
    /// Closed, open and closed-again frames
    pub timing: [f32; 3],
    /// Frame post and lintel thickness
    pub frame_thickness: f32,
    /// Panel thickness
    pub panel_thickness: f32,
}

impl Default for DoorSettings {
    fn default() -> Self {
        Self {
            clearance: 0.05,
            timing: [1.0, 36.0, 120.0],
            frame_thickness: 0.35,
            panel_thickness: 0.12,
        }
    }
}

/// Portal ring rotation timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalSettings {
    /// Frame the loop starts at
    pub start: f32,
    /// Frame one full turn completes at
    pub end: f32,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            start: 1.0,
            end: 180.0,
        }
    }
}

/// Emission pulse timing and strengths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseSettings {
    /// First frame (low)
    pub start: f32,
    /// Last frame (low again); the peak sits halfway
    pub end: f32,
    /// Resting strength
    pub low: f32,
    /// Peak strength
    pub high: f32,
}

impl Default for PulseSettings {
    fn default() -> Self {
        Self {
            start: 1.0,
            end: 120.0,
            low: 8.0,
            high: 24.0,
        }
    }
}

/// Bridge flow particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSettings {
    /// Particles per bridge; zero disables them
    pub particles: u32,
    /// Frame the first particle leaves
    pub start: f32,
    /// Particle radius
    pub radius: f32,
    /// Frames for one traversal
    pub duration: f32,
    /// Frames between consecutive particle starts
    pub stagger: f32,
    /// Particle emission strength
    pub strength: f32,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            particles: 6,
            start: 1.0,
            radius: 0.18,
            duration: 90.0,
            stagger: 15.0,
            strength: 18.0,
        }
    }
}

/// Level-of-detail defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodSettings {
    /// Camera distances at which the next coarser level takes over
    pub switch_distances: Vec<f32>,
}

impl Default for LodSettings {
    fn default() -> Self {
        Self {
            switch_distances: vec![25.0, 60.0],
        }
    }
}

/// # Compiler Settings
///
/// Everything the compile needs besides the layout itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerSettings {
    /// Seed for decorative scatter
    pub seed: u64,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Thickness of room and corridor walls
    pub wall_thickness: f32,
    /// Sealed corridor options
    pub corridor: CorridorSettings,
    /// Open bridge options
    pub bridge: BridgeSettings,
    /// Door options
    pub door: DoorSettings,
    /// Portal ring options
    pub portal: PortalSettings,
    /// Emission pulse options
    pub pulse: PulseSettings,
    /// Bridge flow particle options
    pub flow: FlowSettings,
    /// LOD options
    pub lod: LodSettings,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            log_level: "info".to_string(),
            wall_thickness: 0.5,
            corridor: CorridorSettings::default(),
            bridge: BridgeSettings::default(),
            door: DoorSettings::default(),
            portal: PortalSettings::default(),
            pulse: PulseSettings::default(),
            flow: FlowSettings::default(),
            lod: LodSettings::default(),
        }
    }
}

impl CompilerSettings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set scatter seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set wall thickness
    pub fn with_wall_thickness(mut self, thickness: f32) -> Self {
        self.wall_thickness = thickness;
        self
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), String> {
        const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(format!("Unknown log level '{}'", self.log_level));
        }

        positive("wall_thickness", self.wall_thickness)?;
        positive("corridor.strip_width", self.corridor.strip_width)?;
        non_negative("corridor.strip_strength", self.corridor.strip_strength)?;

        non_negative("bridge.deck_lift", self.bridge.deck_lift)?;
        non_negative("bridge.edge_offset", self.bridge.edge_offset)?;
        non_negative("bridge.edge_lift", self.bridge.edge_lift)?;
        positive("bridge.edge_width", self.bridge.edge_width)?;
        non_negative("bridge.edge_strength", self.bridge.edge_strength)?;

        non_negative("door.clearance", self.door.clearance)?;
        increasing("door.timing", &self.door.timing)?;
        positive("door.frame_thickness", self.door.frame_thickness)?;
        positive("door.panel_thickness", self.door.panel_thickness)?;

        increasing("portal", &[self.portal.start, self.portal.end])?;

        increasing("pulse", &[self.pulse.start, self.pulse.end])?;
        non_negative("pulse.low", self.pulse.low)?;
        non_negative("pulse.high", self.pulse.high)?;
        if self.pulse.high < self.pulse.low {
            return Err("pulse.high must not be below pulse.low".to_string());
        }

        non_negative("flow.start", self.flow.start)?;
        positive("flow.radius", self.flow.radius)?;
        positive("flow.duration", self.flow.duration)?;
        non_negative("flow.stagger", self.flow.stagger)?;
        non_negative("flow.strength", self.flow.strength)?;

        if self.lod.switch_distances.is_empty() {
            return Err("lod.switch_distances cannot be empty".to_string());
        }
        for distance in &self.lod.switch_distances {
            positive("lod.switch_distances", *distance)?;
        }
        increasing("lod.switch_distances", &self.lod.switch_distances)?;

        Ok(())
    }
}

impl Config for CompilerSettings {}

fn positive(name: &str, value: f32) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be positive, got {value}"))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be zero or positive, got {value}"))
    }
}

fn increasing(name: &str, values: &[f32]) -> Result<(), String> {
    if values.iter().all(|v| v.is_finite()) && values.windows(2).all(|w| w[0] < w[1]) {
        Ok(())
    } else {
        Err(format!("{name} must be strictly increasing, got {values:?}"))
    }
}
