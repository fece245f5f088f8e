use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraConfig;
use crate::core::{Button, Controller, InputEvent, InputQueue, InputState};
use crate::projection::{Projection, ProjectionMode};

pub const WORLD_UP: Vec3 = Vec3::Y;
/// Facing used for pan targets until the depth correction kicks in
pub const DEFAULT_FRONT: Vec3 = Vec3::NEG_Z;
/// Depth component forced onto `front` when panning with a negative-z position
pub const PAN_BEHIND_FRONT_Z: f32 = 1.0;

/// Active camera manipulation, resolved from held buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Idle,
    /// Modifier + middle mouse: translate along the camera plane
    Pan,
    /// Modifier + left mouse: move on a sphere around the target
    Orbit,
}

impl CameraMode {
    /// Pan wins when both button combinations are held
    pub fn resolve(input: &dyn Controller) -> Self {
        if !input.is_down(Button::AltLeft) {
            CameraMode::Idle
        } else if input.is_down(Button::MouseMiddle) {
            CameraMode::Pan
        } else if input.is_down(Button::MouseLeft) {
            CameraMode::Orbit
        } else {
            CameraMode::Idle
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CameraMode::Idle => "idle",
            CameraMode::Pan => "pan",
            CameraMode::Orbit => "orbit",
        }
    }
}

/// Camera placement and the basis derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    pub world_up: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub front: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub radius: f32,
    /// Accumulated horizontal cursor travel, read as degrees
    pub raw_yaw: f32,
    /// Accumulated vertical cursor travel, read as degrees
    pub raw_pitch: f32,
}

impl CameraState {
    /// Startup state: home position looking at the origin
    pub fn new(config: &CameraConfig) -> Self {
        let mut state = Self {
            position: config.home(),
            target: Vec3::ZERO,
            world_up: WORLD_UP,
            right: Vec3::X,
            up: Vec3::Y,
            front: DEFAULT_FRONT,
            fov: config.fov_default.clamp(config.fov_min, config.fov_max),
            radius: config.radius,
            raw_yaw: 0.0,
            raw_pitch: 0.0,
        };
        state.refresh_basis();
        state
    }

    /// Recompute right/up from position, target and world up. A degenerate
    /// configuration keeps the previous axes.
    pub fn refresh_basis(&mut self) {
        let Some(direction) = (self.position - self.target).try_normalize() else {
            return;
        };
        let Some(right) = self.world_up.cross(direction).try_normalize() else {
            return;
        };
        self.right = right;
        self.up = direction.cross(right).normalize();
    }

    /// Slide the camera along its right/up axes by `delta * dt`
    pub fn pan(&mut self, delta: Vec2, dt: f32) {
        if self.position.z < 0.0 {
            self.front.z = PAN_BEHIND_FRONT_Z;
        }

        self.refresh_basis();
        self.position += self.right * (delta.x * dt);
        self.position += self.up * (delta.y * dt);
    }

    /// Accumulate cursor travel into yaw/pitch and place the camera on the
    /// orbit sphere around the target
    pub fn orbit(&mut self, delta: Vec2, pitch_epsilon: f32) {
        self.raw_yaw += delta.x;
        self.raw_pitch += delta.y;

        let (yaw, pitch) = self.orbit_angles(pitch_epsilon);
        self.position = self.target + spherical_offset(self.radius, yaw, pitch);
        self.refresh_basis();
    }

    /// Orbit angles in radians, pitch clamped away from the poles
    pub fn orbit_angles(&self, pitch_epsilon: f32) -> (f32, f32) {
        let yaw = self.raw_yaw.to_radians();
        let pitch = clamp_pitch(self.raw_pitch.to_radians(), pitch_epsilon);
        (yaw, pitch)
    }

    /// Narrow (positive offset) or widen the field of view
    pub fn zoom(&mut self, offset: f32, sensitivity: f32, fov_min: f32, fov_max: f32) {
        self.fov = (self.fov - offset * sensitivity).clamp(fov_min, fov_max);
    }

    /// Point the target straight ahead of the camera, as panning requires
    pub fn retarget_ahead(&mut self) {
        self.target = self.position + self.front;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.world_up)
    }

    pub fn distance_to_target(&self) -> f32 {
        self.position.distance(self.target)
    }
}

/// Azimuth/altitude to cartesian offset from the sphere center
pub fn spherical_offset(radius: f32, yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        radius * pitch.cos() * yaw.sin(),
        radius * pitch.sin(),
        radius * pitch.cos() * yaw.cos(),
    )
}

pub fn clamp_pitch(pitch: f32, epsilon: f32) -> f32 {
    pitch.clamp(-FRAC_PI_2 + epsilon, FRAC_PI_2 - epsilon)
}

/// Orbit/pan camera driven by drained input events
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    state: CameraState,
    config: CameraConfig,
    input: InputState,
    mode: CameraMode,
    projection: Projection,
}

impl OrbitCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            state: CameraState::new(&config),
            config,
            input: InputState::new(),
            mode: CameraMode::Idle,
            projection: Projection::default(),
        }
    }

    /// Per-frame update: apply queued input in arrival order, then the
    /// end-of-frame reset and projection toggle
    pub fn update(&mut self, queue: &mut InputQueue, dt: f32) {
        for event in queue.drain() {
            self.handle_event(&event, dt);
        }

        if self.input.is_down(Button::KeyF) {
            self.reset();
        }
        if self.input.was_pressed(Button::KeyP) {
            self.projection.toggle();
            log::debug!("Projection switched to {:?}", self.projection.mode());
        }
        self.input.end_frame();

        if self.mode == CameraMode::Pan {
            self.state.retarget_ahead();
        }
    }

    /// Apply a single input event with the frame's elapsed seconds
    pub fn handle_event(&mut self, event: &InputEvent, dt: f32) {
        let delta = self.input.apply(event);

        match *event {
            InputEvent::Key { .. } | InputEvent::MouseButton { .. } | InputEvent::Focus { .. } => {
                self.resolve_mode()
            }
            InputEvent::CursorEntered => {}
            InputEvent::Scroll { delta } => self.state.zoom(
                delta,
                self.config.zoom_sensitivity,
                self.config.fov_min,
                self.config.fov_max,
            ),
            InputEvent::CursorMoved { .. } => {
                let delta = delta.unwrap_or(Vec2::ZERO);
                match self.mode {
                    CameraMode::Pan => self.state.pan(delta, dt),
                    CameraMode::Orbit => self.state.orbit(delta, self.config.pitch_epsilon),
                    CameraMode::Idle => {}
                }
            }
        }
    }

    fn resolve_mode(&mut self) {
        let mode = CameraMode::resolve(&self.input);
        if mode != self.mode {
            log::debug!("Camera mode {} -> {}", self.mode.label(), mode.label());
            self.mode = mode;
        }
    }

    /// Restore the startup state, dropping accumulated yaw/pitch
    pub fn reset(&mut self) {
        log::debug!("Camera reset to {:?}", self.config.home());
        self.state = CameraState::new(&self.config);
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.state.view_matrix()
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection
            .matrix(self.state.fov, aspect, self.state.distance_to_target())
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn fov(&self) -> f32 {
        self.state.fov
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        self.projection.mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn press(button: Button) -> InputEvent {
        if button.is_mouse() {
            InputEvent::MouseButton { button, pressed: true }
        } else {
            InputEvent::Key { button, pressed: true }
        }
    }

    #[test]
    fn startup_basis_is_orthonormal() {
        let state = CameraState::new(&CameraConfig::default());

        assert!((state.right - Vec3::X).length() < EPS);
        assert!((state.up - Vec3::Y).length() < EPS);
        assert!(state.right.dot(state.up).abs() < EPS);
        assert_eq!(state.front, DEFAULT_FRONT);
    }

    #[test]
    fn mode_requires_modifier() {
        let mut input = InputState::new();
        input.apply(&press(Button::MouseLeft));
        assert_eq!(CameraMode::resolve(&input), CameraMode::Idle);

        input.apply(&press(Button::AltLeft));
        assert_eq!(CameraMode::resolve(&input), CameraMode::Orbit);
    }

    #[test]
    fn pan_has_precedence_over_orbit() {
        let mut input = InputState::new();
        input.apply(&press(Button::AltLeft));
        input.apply(&press(Button::MouseLeft));
        input.apply(&press(Button::MouseMiddle));

        assert_eq!(CameraMode::resolve(&input), CameraMode::Pan);
    }

    #[test]
    fn pan_behind_origin_flips_front_depth() {
        let mut state = CameraState::new(&CameraConfig::default());
        state.position = Vec3::new(0.0, 0.0, -4.0);

        state.pan(Vec2::new(1.0, 0.0), 0.016);
        assert_eq!(state.front.z, PAN_BEHIND_FRONT_Z);
    }

    #[test]
    fn pan_in_front_keeps_default_front() {
        let mut state = CameraState::new(&CameraConfig::default());
        state.pan(Vec2::new(3.0, -2.0), 0.016);
        assert_eq!(state.front, DEFAULT_FRONT);
    }

    #[test]
    fn orbit_keeps_radius() {
        let mut state = CameraState::new(&CameraConfig::default());
        state.orbit(Vec2::new(37.0, 12.0), 0.1);

        assert!((state.distance_to_target() - 20.0).abs() < EPS);
    }

    #[test]
    fn zoom_clamps_both_ends() {
        let mut state = CameraState::new(&CameraConfig::default());
        state.zoom(-100.0, 0.05, 1.0, 45.0);
        assert_eq!(state.fov, 45.0);

        state.zoom(10_000.0, 0.05, 1.0, 45.0);
        assert_eq!(state.fov, 1.0);
    }

    #[test]
    fn projection_toggles_on_press_edge() {
        let mut camera = OrbitCamera::new(CameraConfig::default());
        let mut queue = InputQueue::default();

        queue.push(press(Button::KeyP));
        camera.update(&mut queue, 0.016);
        assert_eq!(camera.projection_mode(), ProjectionMode::Orthographic);

        // Still held: no second toggle
        camera.update(&mut queue, 0.016);
        assert_eq!(camera.projection_mode(), ProjectionMode::Orthographic);
    }
}
