use glam::Mat4;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

/// Builds the projection matrix from the camera FOV and surface aspect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    mode: ProjectionMode,
    near: f32,
    far: f32,
}

impl Projection {
    pub fn new(mode: ProjectionMode) -> Self {
        Self {
            mode,
            near: NEAR_PLANE,
            far: FAR_PLANE,
        }
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
    }

    /// `fov` in degrees. The orthographic volume matches the perspective
    /// frustum's height at `focus_distance`.
    pub fn matrix(&self, fov: f32, aspect: f32, focus_distance: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };

        match self.mode {
            ProjectionMode::Perspective => {
                Mat4::perspective_rh(fov.to_radians(), aspect, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let half_height = (focus_distance.max(self.near) * (fov.to_radians() * 0.5).tan())
                    .max(f32::EPSILON);
                let half_width = half_height * aspect;
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.far,
                )
            }
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(ProjectionMode::Perspective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn toggle_round_trips() {
        let mut projection = Projection::default();
        projection.toggle();
        assert_eq!(projection.mode(), ProjectionMode::Orthographic);
        projection.toggle();
        assert_eq!(projection.mode(), ProjectionMode::Perspective);
    }

    #[test]
    fn perspective_uses_degrees() {
        let projection = Projection::default();
        let expected = Mat4::perspective_rh(45f32.to_radians(), 4.0 / 3.0, NEAR_PLANE, FAR_PLANE);
        assert_eq!(projection.matrix(45.0, 4.0 / 3.0, 10.0), expected);
    }

    #[test]
    fn degenerate_aspect_falls_back_to_square() {
        let projection = Projection::default();
        assert_eq!(projection.matrix(45.0, 0.0, 10.0), projection.matrix(45.0, 1.0, 10.0));
        assert_eq!(
            projection.matrix(45.0, f32::INFINITY, 10.0),
            projection.matrix(45.0, 1.0, 10.0)
        );
    }

    #[test]
    fn orthographic_frames_focus_plane_like_perspective() {
        let ortho = Projection::new(ProjectionMode::Orthographic);
        let persp = Projection::default();
        let distance = 10.0;

        // A point on the top edge of the perspective frustum at the focus distance
        let top = distance * (22.5f32).to_radians().tan();
        let point = Vec4::new(0.0, top, -distance, 1.0);

        let clip_o = ortho.matrix(45.0, 1.0, distance) * point;
        let clip_p = persp.matrix(45.0, 1.0, distance) * point;

        let ndc_o = Vec3::new(clip_o.x, clip_o.y, clip_o.z) / clip_o.w;
        let ndc_p = Vec3::new(clip_p.x, clip_p.y, clip_p.z) / clip_p.w;
        assert!((ndc_o.y - 1.0).abs() < 1e-4);
        assert!((ndc_p.y - 1.0).abs() < 1e-4);
    }
}
