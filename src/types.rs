use glam::{Mat4, Vec3};

/// Lit mesh vertex: position, color, uv, normal (11 floats)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 4] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2, 3 => Float32x3];

    pub const fn new(position: [f32; 3], color: [f32; 3], uv: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            color,
            uv,
            normal,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Lamp marker vertex, position only
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LampVertex {
    pub position: [f32; 3],
}

impl LampVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LampVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-frame uniforms shared by every draw
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalsUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub _pad0: f32,
    /// xyz position, w unused
    pub light_pos: [[f32; 4]; 2],
    /// rgb color, w unused
    pub light_color: [[f32; 4]; 2],
    pub object_color: [f32; 3],
    pub _pad1: f32,
}

impl GlobalsUniform {
    pub fn new(
        view: Mat4,
        projection: Mat4,
        view_pos: Vec3,
        lights: &[crate::scene::PointLight; 2],
        object_color: Vec3,
    ) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            view_pos: view_pos.to_array(),
            _pad0: 0.0,
            light_pos: lights.map(|l| l.position.extend(1.0).to_array()),
            light_color: lights.map(|l| l.color.extend(1.0).to_array()),
            object_color: object_color.to_array(),
            _pad1: 0.0,
        }
    }
}

/// Per-draw model transform and its normal matrix
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
}

impl ModelUniform {
    pub fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: normal_matrix(model).to_cols_array_2d(),
        }
    }
}

/// Inverse-transpose of the model matrix. Singular models (zero scale) fall
/// back to the model itself.
pub fn normal_matrix(model: Mat4) -> Mat4 {
    if model.determinant().abs() <= f32::EPSILON {
        model
    } else {
        model.inverse().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_matches_eleven_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 11 * 4);
        assert_eq!(Vertex::ATTRIBUTES[3].offset, 8 * 4);
    }

    #[test]
    fn uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<GlobalsUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<GlobalsUniform>(), 224);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 128);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let normal = normal_matrix(model);
        let n = normal.transform_vector3(Vec3::X);
        assert!((n - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn singular_model_does_not_produce_nan() {
        let normal = normal_matrix(Mat4::from_scale(Vec3::ZERO));
        assert!(!normal.is_nan());
    }
}
