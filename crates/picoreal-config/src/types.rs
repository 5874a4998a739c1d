use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Orientation filter tuning.
    pub fusion: FusionConfig,
    /// Static panel geometry, for host projection setup.
    pub display: DisplayProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionConfig {
    /// Madgwick filter beta (convergence speed). Higher = more responsive,
    /// less smooth.
    pub beta: f32,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self { beta: 0.1 }
    }
}

/// Display geometry of the Pico Real Plus panel.
///
/// These are fixed hardware properties; they live in the config file so a
/// host can override them if a different panel revision shows up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayProperties {
    /// Horizontal panel size in meters.
    pub hsize_m: f32,
    /// Vertical panel size in meters.
    pub vsize_m: f32,
    /// Horizontal resolution across both eyes.
    pub hres: u32,
    /// Vertical resolution.
    pub vres: u32,
    /// Lens center separation in meters.
    pub lens_separation_m: f32,
    /// Lens vertical center position in meters.
    pub lens_vpos_m: f32,
    /// Field of view in degrees.
    pub fov_deg: f32,
}

impl Default for DisplayProperties {
    fn default() -> Self {
        Self {
            hsize_m: 0.119232,
            vsize_m: 0.067068,
            hres: 3840,
            vres: 2160,
            lens_separation_m: 0.062,
            lens_vpos_m: 0.040326,
            fov_deg: 101.0,
        }
    }
}

impl DisplayProperties {
    /// Per-eye aspect ratio (the panel spans both eyes horizontally).
    pub fn eye_aspect(&self) -> f32 {
        (self.hres as f32 / self.vres as f32) / 2.0
    }
}
