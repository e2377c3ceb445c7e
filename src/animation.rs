use cgmath::{Vector3, Zero};

/// Fixed parameters of the motion, shared by every frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MotionSettings {
    /// Degrees per second around the view-plane normal.
    pub angular_speed: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    /// Scale pulsing is off unless explicitly enabled.
    pub animate_scale: bool,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            angular_speed: 1.0,
            scale_min: 0.1,
            scale_max: 0.8,
            animate_scale: false,
        }
    }
}

///
/// Pose of the triangle plus the velocities driving it.
///
/// `angle` is in degrees and stays in `[0, 360)`. The x and y components of
/// `position` bounce between -1 and 1 and may overshoot the bound by one
/// step before the matching velocity flips.
///
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationState {
    pub angle: f32,
    pub position: Vector3<f32>,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub scale: f32,
    pub scale_velocity: f32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            angle: 0.0,
            position: Vector3::zero(),
            velocity_x: 0.3,
            velocity_y: 0.5,
            scale: 0.5,
            scale_velocity: 0.1,
        }
    }
}

impl AnimationState {
    pub fn advance(&self, settings: &MotionSettings, delta_time: f32) -> Self {
        if delta_time.is_nan() || delta_time <= 0.0 {
            return *self;
        }

        let mut next = *self;

        next.angle = (next.angle + settings.angular_speed * delta_time).rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if next.angle >= 360.0 {
            next.angle = 0.0;
        }

        next.position.x += next.velocity_x * delta_time;
        next.position.y += next.velocity_y * delta_time;

        // position is written before the check, so the flip lands one step late
        if heading_out(next.position.x, next.velocity_x, -1.0, 1.0) {
            next.velocity_x = -next.velocity_x;
        }
        if heading_out(next.position.y, next.velocity_y, -1.0, 1.0) {
            next.velocity_y = -next.velocity_y;
        }

        if settings.animate_scale {
            next.scale += next.scale_velocity * delta_time;
            if heading_out(next.scale, next.scale_velocity, settings.scale_min, settings.scale_max)
            {
                next.scale_velocity = -next.scale_velocity;
            }
        }

        next
    }
}

/// At or past a bound while still moving away from `[min, max]`. A value
/// already turned around is left alone, so a long step cannot trap it outside.
fn heading_out(value: f32, velocity: f32, min: f32, max: f32) -> bool {
    (value >= max && velocity > 0.0) || (value <= min && velocity < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn zero_step_is_identity() {
        let settings = MotionSettings {
            animate_scale: true,
            ..Default::default()
        };

        let states = [
            AnimationState::default(),
            AnimationState {
                angle: 359.9,
                position: Vector3::new(1.0, -1.0, 0.0),
                velocity_x: -0.3,
                velocity_y: 0.5,
                scale: 0.8,
                scale_velocity: 0.1,
            },
            AnimationState {
                position: Vector3::new(1.25, 0.4, 0.0),
                ..Default::default()
            },
        ];

        for state in states {
            assert_eq!(state.advance(&settings, 0.0), state);
        }
    }

    #[test]
    fn negative_and_nan_steps_are_ignored() {
        let state = AnimationState::default();
        let settings = MotionSettings::default();

        assert_eq!(state.advance(&settings, -0.5), state);
        assert_eq!(state.advance(&settings, f32::NAN), state);
    }

    #[test]
    fn angle_wraps_below_360() {
        let state = AnimationState {
            angle: 359.5,
            ..Default::default()
        };

        let next = state.advance(&MotionSettings::default(), 1.0);

        assert!((next.angle - 0.5).abs() < EPS, "angle was {}", next.angle);
        assert!(next.angle < 360.0);
    }

    #[test]
    fn large_step_wraps_fully() {
        let settings = MotionSettings {
            angular_speed: 90.0,
            ..Default::default()
        };
        let state = AnimationState {
            angle: 10.0,
            velocity_x: 0.0,
            velocity_y: 0.0,
            ..Default::default()
        };

        // 10 + 90 * 9 = 820 = 2 * 360 + 100
        let next = state.advance(&settings, 9.0);

        assert!((next.angle - 100.0).abs() < 1e-3, "angle was {}", next.angle);
    }

    #[test]
    fn bounce_flips_velocity_without_clamping() {
        let state = AnimationState {
            position: Vector3::new(0.95, 0.0, 0.0),
            velocity_x: 0.3,
            velocity_y: 0.0,
            ..Default::default()
        };

        let next = state.advance(&MotionSettings::default(), 1.0);

        assert!((next.position.x - 1.25).abs() < EPS);
        assert_eq!(next.velocity_x, -0.3);
        assert_eq!(next.velocity_y, 0.0);
    }

    #[test]
    fn bounce_on_negative_bound() {
        let state = AnimationState {
            position: Vector3::new(0.0, -0.95, 0.0),
            velocity_x: 0.0,
            velocity_y: -0.5,
            ..Default::default()
        };

        let next = state.advance(&MotionSettings::default(), 0.2);

        assert!((next.position.y + 1.05).abs() < EPS);
        assert_eq!(next.velocity_y, 0.5);

        let after = next.advance(&MotionSettings::default(), 0.2);
        assert!((after.position.y + 0.95).abs() < EPS);
        assert_eq!(after.velocity_y, 0.5);
    }

    #[test]
    fn recovers_after_long_frame() {
        let settings = MotionSettings::default();
        let state = AnimationState {
            position: Vector3::new(0.0, 0.9, 0.0),
            velocity_x: 0.0,
            velocity_y: 0.5,
            ..Default::default()
        };

        let mut state = state.advance(&settings, 3.0);
        assert!((state.position.y - 2.4).abs() < EPS);
        assert_eq!(state.velocity_y, -0.5);

        // keeps heading down the whole way back across the screen
        for _ in 0..400 {
            state = state.advance(&settings, 1.0 / 60.0);
            assert_eq!(state.velocity_y, -0.5, "turned back at y={}", state.position.y);
        }

        assert!(state.position.y.abs() < 1.0, "stuck at y={}", state.position.y);

        for _ in 0..600 {
            state = state.advance(&settings, 1.0 / 60.0);
        }
        assert!(state.position.y.abs() < 1.0 + 0.5 / 60.0 + EPS);
    }

    #[test]
    fn velocity_magnitude_is_preserved() {
        let settings = MotionSettings::default();
        let mut state = AnimationState::default();

        for _ in 0..10_000 {
            state = state.advance(&settings, 1.0 / 60.0);
        }

        assert_eq!(state.velocity_x.abs(), 0.3);
        assert_eq!(state.velocity_y.abs(), 0.5);
        assert!(state.position.x.abs() < 1.0 + 0.3 / 60.0 + EPS);
        assert!(state.position.y.abs() < 1.0 + 0.5 / 60.0 + EPS);
        assert_eq!(state.position.z, 0.0);
    }

    #[test]
    fn scale_is_inert_while_disabled() {
        let settings = MotionSettings::default();
        let mut state = AnimationState::default();

        for _ in 0..1000 {
            state = state.advance(&settings, 0.1);
        }

        assert_eq!(state.scale, 0.5);
        assert_eq!(state.scale_velocity, 0.1);
    }

    #[test]
    fn scale_bounces_when_enabled() {
        let settings = MotionSettings {
            animate_scale: true,
            ..Default::default()
        };
        let state = AnimationState {
            scale: 0.75,
            scale_velocity: 0.1,
            ..Default::default()
        };

        let next = state.advance(&settings, 1.0);

        assert!((next.scale - 0.85).abs() < EPS);
        assert_eq!(next.scale_velocity, -0.1);
    }

    #[test]
    fn scale_outside_limits_heads_back_in() {
        let settings = MotionSettings {
            animate_scale: true,
            ..Default::default()
        };
        let mut state = AnimationState {
            scale: 2.0,
            scale_velocity: -0.1,
            ..Default::default()
        };

        for _ in 0..60 {
            state = state.advance(&settings, 1.0 / 6.0);
            assert_eq!(state.scale_velocity, -0.1);
        }

        assert!((state.scale - 1.0).abs() < 1e-4, "scale was {}", state.scale);
    }
}
