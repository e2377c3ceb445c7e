use std::path::Path;

use cgmath::Vector3;

use serde::Deserialize;

use thiserror::Error;

use crate::animation::{AnimationState, MotionSettings};

pub const WINDOW_TITLE: &str = "OpenGL Triangle Example";

/// Settings read from an optional JSON5 file. Missing keys fall back to the
/// built-in defaults, so an empty object is a valid config.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub window: WindowConfig,
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Degrees per second.
    pub angular_speed: f32,
    pub velocity: [f32; 2],
    pub scale: f32,
    pub scale_velocity: f32,
    pub scale_limits: [f32; 2],
    pub animate_scale: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let settings = MotionSettings::default();
        let state = AnimationState::default();

        Self {
            angular_speed: settings.angular_speed,
            velocity: [state.velocity_x, state.velocity_y],
            scale: state.scale,
            scale_velocity: state.scale_velocity,
            scale_limits: [settings.scale_min, settings.scale_max],
            animate_scale: settings.animate_scale,
        }
    }
}

impl AnimationConfig {
    pub fn into_parts(self) -> (MotionSettings, AnimationState) {
        let settings = MotionSettings {
            angular_speed: self.angular_speed,
            scale_min: self.scale_limits[0],
            scale_max: self.scale_limits[1],
            animate_scale: self.animate_scale,
        };

        let state = AnimationState {
            angle: 0.0,
            position: Vector3::new(0.0, 0.0, 0.0),
            velocity_x: self.velocity[0],
            velocity_y: self.velocity[1],
            scale: self.scale,
            scale_velocity: self.scale_velocity,
        };

        (settings, state)
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_str = std::fs::read_to_string(path).map_err(ConfigError::Input)?;

        Self::from_str(&config_str)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(config_str: &str) -> Result<Self, ConfigError> {
        let config: Config = json5::from_str(config_str).map_err(ConfigError::Format)?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} has a zero dimension",
                self.window.width, self.window.height
            )));
        }

        let anim = &self.animation;

        let finite = [
            ("angular_speed", anim.angular_speed),
            ("velocity[0]", anim.velocity[0]),
            ("velocity[1]", anim.velocity[1]),
            ("scale", anim.scale),
            ("scale_velocity", anim.scale_velocity),
            ("scale_limits[0]", anim.scale_limits[0]),
            ("scale_limits[1]", anim.scale_limits[1]),
        ];

        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} is not finite: {value}")));
        }

        if anim.scale_limits[0] >= anim.scale_limits[1] {
            return Err(ConfigError::Invalid(format!(
                "scale_limits must be increasing, got {:?}",
                anim.scale_limits
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Input(#[source] std::io::Error),
    #[error("invalid config syntax: {0}")]
    Format(#[source] json5::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
