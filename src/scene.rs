use glam::{Mat4, Vec3};

use crate::types::{LampVertex, Vertex};

/// Every face in the tables below carries the same +z normal
const FACE_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];
const NO_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// Untinted vertex with the shared face normal
const fn tv(position: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex::new(position, NO_COLOR, uv, FACE_NORMAL)
}

/// Static indexed geometry
#[derive(Debug, Clone, Copy)]
pub struct MeshData {
    pub vertices: &'static [Vertex],
    pub indices: &'static [u16],
}

impl MeshData {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Unit quad in the xy plane, two triangles
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 1, 2, 3];

const FLOOR_VERTICES: [Vertex; 4] = [
    Vertex::new([-0.5, -0.5, 0.0], [0.0, 0.5, 0.0], [0.0, 0.0], FACE_NORMAL),
    Vertex::new([-0.5, 0.5, 0.0], [0.0, 0.5, 0.0], [0.0, 1.0], FACE_NORMAL),
    Vertex::new([0.5, -0.5, 0.0], [0.0, 0.5, 0.0], [1.0, 0.0], FACE_NORMAL),
    Vertex::new([0.5, 0.5, 0.0], [1.0, 0.5, 1.0], [1.0, 1.0], FACE_NORMAL),
];

/// Unit cube spanning [0, 1] on every axis; faces are top, bottom, left,
/// right, front, back with four corners each
const CUBE_VERTICES: [Vertex; 24] = [
    tv([0.0, 1.0, 1.0], [0.0, 1.0]),
    tv([1.0, 1.0, 1.0], [1.0, 1.0]),
    tv([0.0, 1.0, 0.0], [0.0, 0.0]),
    tv([1.0, 1.0, 0.0], [1.0, 0.0]),
    tv([0.0, 0.0, 1.0], [0.0, 1.0]),
    tv([1.0, 0.0, 1.0], [1.0, 1.0]),
    tv([0.0, 0.0, 0.0], [0.0, 0.0]),
    tv([1.0, 0.0, 0.0], [1.0, 0.0]),
    tv([0.0, 1.0, 1.0], [0.0, 1.0]),
    tv([0.0, 1.0, 0.0], [1.0, 1.0]),
    tv([0.0, 0.0, 1.0], [0.0, 0.0]),
    tv([0.0, 0.0, 0.0], [1.0, 0.0]),
    tv([1.0, 1.0, 1.0], [0.0, 1.0]),
    tv([1.0, 1.0, 0.0], [1.0, 1.0]),
    tv([1.0, 0.0, 1.0], [0.0, 0.0]),
    tv([1.0, 0.0, 0.0], [1.0, 0.0]),
    tv([0.0, 1.0, 0.0], [0.0, 1.0]),
    tv([1.0, 1.0, 0.0], [1.0, 1.0]),
    tv([0.0, 0.0, 0.0], [0.0, 0.0]),
    tv([1.0, 0.0, 0.0], [1.0, 0.0]),
    tv([0.0, 1.0, 1.0], [1.0, 1.0]),
    tv([1.0, 1.0, 1.0], [0.0, 1.0]),
    tv([0.0, 0.0, 1.0], [1.0, 0.0]),
    tv([1.0, 0.0, 1.0], [0.0, 0.0]),
];

const CUBE_INDICES: [u16; 36] = [
    0, 3, 1, 0, 3, 2, //
    4, 7, 5, 4, 7, 6, //
    8, 11, 9, 8, 11, 10, //
    12, 15, 13, 12, 15, 14, //
    16, 19, 17, 16, 19, 18, //
    20, 23, 21, 20, 23, 22,
];

/// Six-sided prism, two units tall, with a fan-style cap on top. Side panels
/// wrap the texture in thirds.
const PRISM_VERTICES: [Vertex; 30] = [
    // rear
    tv([0.25, 0.0, 1.0], [0.0, 0.0]),
    tv([-0.25, 0.0, 1.0], [0.32, 0.0]),
    tv([0.25, 2.0, 1.0], [0.0, 1.0]),
    tv([-0.25, 2.0, 1.0], [0.32, 1.0]),
    // left rear
    tv([-0.25, 0.0, 1.0], [0.33, 0.0]),
    tv([-0.5, 0.0, 0.5], [0.67, 0.0]),
    tv([-0.25, 2.0, 1.0], [0.33, 1.0]),
    tv([-0.5, 2.0, 0.5], [0.67, 1.0]),
    // left front
    tv([-0.5, 0.0, 0.5], [0.68, 0.0]),
    tv([-0.25, 0.0, 0.0], [1.0, 0.0]),
    tv([-0.5, 2.0, 0.5], [0.68, 1.0]),
    tv([-0.25, 2.0, 0.0], [1.0, 1.0]),
    // front
    tv([-0.25, 0.0, 0.0], [0.0, 0.0]),
    tv([0.25, 0.0, 0.0], [0.32, 0.0]),
    tv([-0.25, 2.0, 0.0], [0.0, 1.0]),
    tv([0.25, 2.0, 0.0], [0.32, 1.0]),
    // right front
    tv([0.25, 0.0, 0.0], [0.33, 0.0]),
    tv([0.5, 0.0, 0.5], [0.67, 0.0]),
    tv([0.25, 2.0, 0.0], [0.33, 1.0]),
    tv([0.5, 2.0, 0.5], [0.67, 1.0]),
    // right rear
    tv([0.5, 0.0, 0.5], [0.68, 0.0]),
    tv([0.25, 0.0, 1.0], [1.0, 0.0]),
    tv([0.5, 2.0, 0.5], [0.68, 1.0]),
    tv([0.25, 2.0, 1.0], [1.0, 1.0]),
    // top cap
    tv([-0.25, 2.0, 1.0], [0.0, 1.0]),
    tv([0.25, 2.0, 1.0], [1.0, 1.0]),
    tv([0.25, 2.0, 0.0], [1.0, 0.0]),
    tv([-0.25, 2.0, 0.0], [0.0, 0.0]),
    tv([-0.5, 2.0, 0.5], [0.0, 0.0]),
    tv([0.5, 2.0, 0.5], [1.0, 0.0]),
];

const PRISM_INDICES: [u16; 48] = [
    0, 1, 2, 1, 2, 3, //
    4, 5, 6, 5, 6, 7, //
    8, 9, 10, 9, 10, 11, //
    12, 13, 14, 13, 14, 15, //
    16, 17, 18, 17, 18, 19, //
    20, 21, 22, 21, 22, 23, //
    24, 25, 26, 24, 26, 27, //
    28, 24, 27, 29, 25, 26,
];

const LAMP_VERTICES: [LampVertex; 4] = [
    LampVertex { position: [-0.5, -0.5, 0.0] },
    LampVertex { position: [-0.5, 0.5, 0.0] },
    LampVertex { position: [0.5, -0.5, 0.0] },
    LampVertex { position: [0.5, 0.5, 0.0] },
];

pub const FLOOR: MeshData = MeshData {
    vertices: &FLOOR_VERTICES,
    indices: &QUAD_INDICES,
};

pub const CUBE: MeshData = MeshData {
    vertices: &CUBE_VERTICES,
    indices: &CUBE_INDICES,
};

pub const PRISM: MeshData = MeshData {
    vertices: &PRISM_VERTICES,
    indices: &PRISM_INDICES,
};

pub fn lamp_geometry() -> (&'static [LampVertex], &'static [u16]) {
    (&LAMP_VERTICES, &QUAD_INDICES)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Floor,
    Cube,
    Prism,
}

impl MeshKind {
    pub const ALL: [MeshKind; 3] = [MeshKind::Floor, MeshKind::Cube, MeshKind::Prism];

    pub fn data(self) -> MeshData {
        match self {
            MeshKind::Floor => FLOOR,
            MeshKind::Cube => CUBE,
            MeshKind::Prism => PRISM,
        }
    }
}

/// Surface texture for a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Glue,
    Wood,
    Rubik,
    Board,
}

impl Material {
    pub const ALL: [Material; 4] = [Material::Glue, Material::Wood, Material::Rubik, Material::Board];

    /// Image file name inside the assets directory
    pub fn file_name(self) -> &'static str {
        match self {
            Material::Glue => "glueStick.png",
            Material::Wood => "woodTexture.jpeg",
            Material::Rubik => "rubik_cube_PNG53.png",
            Material::Board => "board.png",
        }
    }

    /// Fallback checker colors when the image is unavailable
    pub fn fallback_colors(self) -> ([u8; 4], [u8; 4]) {
        match self {
            Material::Glue => ([220, 220, 210, 255], [170, 40, 40, 255]),
            Material::Wood => ([150, 105, 60, 255], [115, 75, 40, 255]),
            Material::Rubik => ([240, 200, 30, 255], [30, 90, 200, 255]),
            Material::Board => ([235, 235, 235, 255], [40, 40, 40, 255]),
        }
    }
}

/// Object whose transform is applied on top of the previous object's
#[derive(Debug, Clone, Copy)]
pub struct SceneObject {
    pub name: &'static str,
    pub mesh: MeshKind,
    pub material: Material,
    pub local: Mat4,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
}

/// Quad offsets and yaw (degrees) forming a lamp marker cube
const LAMP_FACES: [(Vec3, f32); 6] = [
    (Vec3::new(0.0, 0.0, 0.5), 0.0),
    (Vec3::new(0.5, 0.0, 0.0), 90.0),
    (Vec3::new(0.0, 0.0, -0.5), 180.0),
    (Vec3::new(-0.5, 0.0, 0.0), -90.0),
    (Vec3::new(0.0, 0.5, 0.0), -90.0),
    (Vec3::new(0.0, -0.5, 0.0), 90.0),
];
const LAMP_LIFT: Vec3 = Vec3::new(0.0, 5.0, 0.0);
const LAMP_SCALE: f32 = 0.125;

#[derive(Debug, Clone)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub lights: [PointLight; 2],
    /// Tint multiplied into every lit fragment
    pub object_color: Vec3,
}

impl Scene {
    /// The desk scene: glue stick, rubik cube, board and wood floor
    pub fn desk() -> Self {
        let objects = vec![
            SceneObject {
                name: "glue stick",
                mesh: MeshKind::Prism,
                material: Material::Glue,
                local: Mat4::from_scale(Vec3::new(1.0, 2.0, 1.0)),
            },
            SceneObject {
                name: "rubik cube",
                mesh: MeshKind::Cube,
                material: Material::Rubik,
                local: Mat4::from_scale(Vec3::new(2.2, 1.5, 2.2))
                    * Mat4::from_translation(Vec3::new(-1.0, 0.0, 1.0)),
            },
            SceneObject {
                name: "board",
                mesh: MeshKind::Cube,
                material: Material::Board,
                local: Mat4::from_scale(Vec3::new(3.0, 0.15, 1.0))
                    * Mat4::from_translation(Vec3::new(0.5, 0.0, 0.0)),
            },
            SceneObject {
                name: "floor",
                mesh: MeshKind::Floor,
                material: Material::Wood,
                local: Mat4::from_rotation_x(90f32.to_radians()) * Mat4::from_scale(Vec3::splat(20.0)),
            },
        ];

        Self {
            objects,
            lights: [
                PointLight {
                    position: Vec3::new(0.0, 0.35, 0.0),
                    color: Vec3::ONE,
                },
                PointLight {
                    position: Vec3::new(5.0, 0.8, 1.0),
                    color: Vec3::ONE,
                },
            ],
            object_color: Vec3::splat(0.1),
        }
    }

    /// World transforms, each object composed onto the one drawn before it
    pub fn model_matrices(&self) -> Vec<Mat4> {
        self.objects
            .iter()
            .scan(Mat4::IDENTITY, |running, object| {
                *running *= object.local;
                Some(*running)
            })
            .collect()
    }

    /// Six quad transforms per light forming a small marker cube above it
    pub fn lamp_transforms(&self) -> Vec<Mat4> {
        self.lights
            .iter()
            .flat_map(|light| lamp_faces(light.position))
            .collect()
    }
}

fn lamp_faces(light: Vec3) -> impl Iterator<Item = Mat4> {
    LAMP_FACES.iter().enumerate().map(move |(i, &(offset, degrees))| {
        let angle = degrees.to_radians();
        let mut model = Mat4::from_translation(offset / 8.0 + light)
            * Mat4::from_translation(LAMP_LIFT)
            * Mat4::from_rotation_y(angle)
            * Mat4::from_scale(Vec3::splat(LAMP_SCALE));
        // top and bottom faces tip over onto the horizontal plane
        if i >= 4 {
            model *= Mat4::from_rotation_x(angle);
        }
        model
    })
}
