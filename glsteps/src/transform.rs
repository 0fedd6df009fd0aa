//! Per-frame animation state.
//!
//! Both rules advance by a fixed amount per call, so animation speed follows
//! the display rate. Neither corrects its overshoot: the offset may pass
//! `max_offset` by up to one increment before it turns around, and the angle
//! may pass 360 by up to one step before it wraps.

use glam::{Mat4, Vec3};

/// Horizontal offset bouncing between `-max_offset` and `max_offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    pub offset: f32,
    pub increment: f32,
    pub max_offset: f32,
    pub direction: f32,
}

impl Oscillation {
    pub fn new(increment: f32, max_offset: f32) -> Self {
        Oscillation {
            offset: 0.0,
            increment,
            max_offset,
            direction: 1.0,
        }
    }

    /// Returns `true` if the direction flipped on this step.
    pub fn step(&mut self) -> bool {
        self.offset += self.direction * self.increment;
        if self.offset.abs() >= self.max_offset {
            self.direction = -self.direction;
            true
        } else {
            false
        }
    }
}

impl Default for Oscillation {
    fn default() -> Self {
        Oscillation::new(0.005, 0.7)
    }
}

/// Angle in degrees that resets to zero once it reaches a full turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub angle: f32,
    pub step: f32,
    pub direction: f32,
}

impl Rotation {
    pub const FULL_TURN: f32 = 360.0;

    pub fn new(step: f32) -> Self {
        Rotation {
            angle: 0.0,
            step,
            direction: 1.0,
        }
    }

    /// Returns `true` if the angle wrapped to zero on this step.
    pub fn advance(&mut self) -> bool {
        self.angle += self.direction * self.step;
        if self.angle.abs() >= Self::FULL_TURN {
            self.angle = 0.0;
            true
        } else {
            false
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::new(0.01)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisToggles {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl AxisToggles {
    /// Normalized rotation axis. Falls back to Z when every toggle is off.
    pub fn axis(&self) -> Vec3 {
        let axis = Vec3::new(
            self.x as u8 as f32,
            self.y as u8 as f32,
            self.z as u8 as f32,
        );
        axis.try_normalize().unwrap_or(Vec3::Z)
    }
}

impl Default for AxisToggles {
    fn default() -> Self {
        AxisToggles {
            x: true,
            y: true,
            z: true,
        }
    }
}

/// Translate along x by `offset`, then rotate by `angle` degrees about `axis`.
pub fn model_matrix(offset: f32, angle: f32, axis: Vec3) -> Mat4 {
    Mat4::from_translation(Vec3::new(offset, 0.0, 0.0))
        * Mat4::from_axis_angle(axis, angle.to_radians())
}

/// Slider state of the debug overlay. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeControls {
    pub angles: [f32; 3],
    pub enabled: AxisToggles,
    pub scale: f32,
    pub translation: [f32; 3],
}

impl CubeControls {
    pub fn model_matrix(&self) -> Mat4 {
        let angle = |i: usize, on: bool| {
            if on {
                self.angles[i].to_radians()
            } else {
                0.0
            }
        };
        Mat4::from_translation(Vec3::from(self.translation))
            * Mat4::from_rotation_x(angle(0, self.enabled.x))
            * Mat4::from_rotation_y(angle(1, self.enabled.y))
            * Mat4::from_rotation_z(angle(2, self.enabled.z))
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

impl Default for CubeControls {
    fn default() -> Self {
        CubeControls {
            angles: [0.0; 3],
            enabled: AxisToggles::default(),
            scale: 1.0,
            translation: [0.0, 0.0, -2.5],
        }
    }
}

/// Per-frame state of the textured cube. The sliders alone place the cube;
/// the bounce keeps running but nothing it draws reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CubeScene {
    pub controls: CubeControls,
    pub oscillation: Oscillation,
}

impl CubeScene {
    /// Advances one frame and returns the model matrix to draw with.
    pub fn advance(&mut self) -> Mat4 {
        self.oscillation.step();
        self.controls.model_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oscillation_flips_once_at_threshold() {
        let mut osc = Oscillation::new(0.25, 0.5);
        assert!(!osc.step());
        assert_eq!(osc.offset, 0.25);
        assert!(osc.step());
        assert_eq!(osc.offset, 0.5);
        assert_eq!(osc.direction, -1.0);
        assert!(!osc.step());
        assert_eq!(osc.offset, 0.25);
    }

    #[test]
    fn oscillation_keeps_overshoot() {
        let mut osc = Oscillation::new(0.3, 0.5);
        osc.step();
        assert!(osc.step());
        assert!((osc.offset - 0.6).abs() < 1e-6);
    }

    #[test]
    fn rotation_wraps_to_zero_not_modulo() {
        let mut rot = Rotation {
            angle: 359.0,
            step: 2.5,
            direction: 1.0,
        };
        assert!(rot.advance());
        assert_eq!(rot.angle, 0.0);
    }

    #[test]
    fn rotation_wraps_in_reverse() {
        let mut rot = Rotation {
            angle: -359.5,
            step: 1.0,
            direction: -1.0,
        };
        assert!(rot.advance());
        assert_eq!(rot.angle, 0.0);
    }

    #[test]
    fn axis_defaults_to_z_when_all_disabled() {
        let none = AxisToggles {
            x: false,
            y: false,
            z: false,
        };
        assert_eq!(none.axis(), Vec3::Z);
        let x_only = AxisToggles {
            x: true,
            y: false,
            z: false,
        };
        assert_eq!(x_only.axis(), Vec3::X);
        assert!((AxisToggles::default().axis().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn model_matrix_translates_origin() {
        let m = model_matrix(0.4, 90.0, Vec3::Z);
        let p = m.transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.4, 0.0, 0.0)).length() < 1e-6);
        let q = m.transform_point3(Vec3::X);
        assert!((q - Vec3::new(0.4, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn cube_follows_slider_changes() {
        let mut scene = CubeScene::default();
        let before = scene.advance();
        scene.controls.translation[0] = 1.0;
        let after = scene.advance();
        assert_ne!(before, after);
        assert_eq!(after.transform_point3(Vec3::ZERO).x, 1.0);
    }

    #[test]
    fn disabled_cube_axes_do_not_rotate() {
        let controls = CubeControls {
            angles: [45.0, 30.0, 90.0],
            enabled: AxisToggles {
                x: false,
                y: false,
                z: true,
            },
            scale: 2.0,
            translation: [0.0; 3],
        };
        let p = controls.model_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
    }
}
