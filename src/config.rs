//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::error::{Result, ViewerError};
use crate::geometry::{BandParams, Shading};
use crate::input::ParameterChange;

#[derive(Parser, Debug, Clone)]
#[command(name = "viewer")]
#[command(about = "Interactive viewer for a crushable can")]
pub struct ViewerConfig {
    /// Angular segments around the can
    #[arg(long, default_value = "32")]
    pub segments: u32,

    /// Rings stacked along the side wall
    #[arg(long, default_value = "16")]
    pub height_segments: u32,

    /// Height of the can
    #[arg(long, default_value = "2.0")]
    pub can_height: f32,

    /// Radius of the can
    #[arg(long, default_value = "1.0")]
    pub radius: f32,

    /// Side wall normals
    #[arg(long, value_enum, default_value_t = Shading::Smooth)]
    pub shading: Shading,

    /// Distance from the camera to the origin
    #[arg(long, default_value = "4.0")]
    pub camera_distance: f32,

    /// Orbit degrees per dragged pixel
    #[arg(long, default_value = "1.0")]
    pub drag_sensitivity: f32,

    /// Horizontal light orbit in degrees, -180..180
    #[arg(long, default_value = "-22.5", allow_hyphen_values = true)]
    pub light_orbit_x: f32,

    /// Vertical light orbit in degrees, -90..90
    #[arg(long, default_value = "45.0", allow_hyphen_values = true)]
    pub light_orbit_y: f32,

    /// Directional light intensity, 0..2
    #[arg(long, default_value = "1.0")]
    pub light_intensity: f32,

    /// Distance from the light to the origin
    #[arg(long, default_value = "10.0")]
    pub light_distance: f32,

    /// Ambient light intensity
    #[arg(long, default_value = "0.3")]
    pub ambient: f32,

    /// Initial crush amount, 0..1
    #[arg(long, default_value = "0.0")]
    pub crush: f32,

    #[arg(long, default_value = "1280")]
    pub window_width: u32,

    #[arg(long, default_value = "720")]
    pub window_height: u32,

    /// Render a single frame to this PNG file and exit
    #[arg(long)]
    pub screenshot: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            segments: 32,
            height_segments: 16,
            can_height: 2.0,
            radius: 1.0,
            shading: Shading::Smooth,
            camera_distance: 4.0,
            drag_sensitivity: 1.0,
            light_orbit_x: -22.5,
            light_orbit_y: 45.0,
            light_intensity: 1.0,
            light_distance: 10.0,
            ambient: 0.3,
            crush: 0.0,
            window_width: 1280,
            window_height: 720,
            screenshot: None,
        }
    }
}

impl ViewerConfig {
    pub fn band_params(&self) -> BandParams {
        BandParams {
            segments: self.segments,
            height_segments: self.height_segments,
            height: self.can_height,
            radius: self.radius,
            shading: self.shading,
        }
    }

    /// Checks every value the viewer would otherwise reject at startup.
    pub fn validate(&self) -> Result<()> {
        self.band_params().validate()?;
        for change in [
            ParameterChange::LightOrbitX(self.light_orbit_x),
            ParameterChange::LightOrbitY(self.light_orbit_y),
            ParameterChange::LightIntensity(self.light_intensity),
            ParameterChange::CrushAlpha(self.crush),
        ] {
            change.validate()?;
        }
        validate_distance("camera distance", self.camera_distance)?;
        validate_distance("light distance", self.light_distance)?;
        if !(self.ambient.is_finite() && self.ambient >= 0.0) {
            return Err(ViewerError::InvalidAmbient(self.ambient));
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

fn validate_distance(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ViewerError::InvalidDistance { name, value })
    }
}
