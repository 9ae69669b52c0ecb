//! Procedural meshes.
//!
//! Triangles wind clockwise when seen from outside, the left-handed
//! convention the pipelines are configured with.

use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Vertex with position and color, used by the rotating cube.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl ColorVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    /// Vertex buffer layout matching `color.wgsl`.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Vertex with position, normal and texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LitVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl LitVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    /// Vertex buffer layout matching `basic.wgsl` and `skybox.wgsl`.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData<V> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
}

impl<V> MeshData<V> {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn index(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// An axis-aligned box centered at the origin.
#[must_use]
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData<LitVertex> {
    let half = Vec3::new(width, height, depth) * 0.5;
    // (normal, u, v) with u x v = -normal, so corners below wind clockwise.
    let faces = [
        (Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::X, Vec3::Y),
    ];
    let corners = [(-1.0, -1.0), (-1.0, 1.0), (1.0, 1.0), (1.0, -1.0)];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let base = index(vertices.len());
        for (s, t) in corners {
            let position = (normal + u * s + v * t) * half;
            let uv = Vec2::new((s + 1.0) * 0.5, (1.0 - t) * 0.5);
            vertices.push(LitVertex::new(position, normal, uv));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    MeshData { vertices, indices }
}

/// A UV sphere centered at the origin.
#[must_use]
pub fn sphere_mesh(radius: f32, slices: u32, stacks: u32) -> MeshData<LitVertex> {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let ring = slices + 1;

    let mut vertices = Vec::with_capacity((ring * (stacks + 1)) as usize);
    for i in 0..=stacks {
        #[allow(clippy::cast_precision_loss)]
        let v = i as f32 / stacks as f32;
        let phi = v * PI;
        for j in 0..=slices {
            #[allow(clippy::cast_precision_loss)]
            let u = j as f32 / slices as f32;
            let theta = u * TAU;
            let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            vertices.push(LitVertex::new(normal * radius, normal, Vec2::new(u, v)));
        }
    }

    let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * ring + j;
            let b = a + ring;
            let c = b + 1;
            let d = a + 1;
            indices.extend_from_slice(&[a, d, b, d, c, b]);
        }
    }

    MeshData { vertices, indices }
}

/// A capped cylinder standing on the y axis, centered at the origin.
#[must_use]
pub fn cylinder_mesh(radius: f32, height: f32, slices: u32) -> MeshData<LitVertex> {
    let slices = slices.max(3);
    let ring = slices + 1;
    let half = height * 0.5;

    let angle = |j: u32| {
        #[allow(clippy::cast_precision_loss)]
        let u = j as f32 / slices as f32;
        (u, u * TAU)
    };

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side: bottom ring then top ring.
    for (y, v) in [(-half, 1.0), (half, 0.0)] {
        for j in 0..=slices {
            let (u, theta) = angle(j);
            let normal = Vec3::new(theta.cos(), 0.0, theta.sin());
            let position = Vec3::new(radius * theta.cos(), y, radius * theta.sin());
            vertices.push(LitVertex::new(position, normal, Vec2::new(u, v)));
        }
    }
    for j in 0..slices {
        let a = j;
        let b = a + ring;
        let c = b + 1;
        let d = a + 1;
        indices.extend_from_slice(&[a, b, d, d, b, c]);
    }

    // Caps: a center vertex followed by its ring.
    for (y, normal) in [(half, Vec3::Y), (-half, Vec3::NEG_Y)] {
        let center = index(vertices.len());
        vertices.push(LitVertex::new(Vec3::new(0.0, y, 0.0), normal, Vec2::splat(0.5)));
        for j in 0..=slices {
            let (_, theta) = angle(j);
            let (x, z) = (theta.cos(), theta.sin());
            let uv = Vec2::new(x * 0.5 + 0.5, z * 0.5 + 0.5);
            vertices.push(LitVertex::new(Vec3::new(radius * x, y, radius * z), normal, uv));
        }
        for j in 0..slices {
            let k = center + 1 + j;
            if normal.y > 0.0 {
                indices.extend_from_slice(&[center, k + 1, k]);
            } else {
                indices.extend_from_slice(&[center, k, k + 1]);
            }
        }
    }

    MeshData { vertices, indices }
}

/// The eight-vertex colored solid of the rotating cube sample.
///
/// Its front face is narrower than its back face, so it reads as a
/// truncated pyramid while it spins.
#[must_use]
pub fn colored_cube() -> MeshData<ColorVertex> {
    let vertex = |position: [f32; 3], color: [f32; 4]| ColorVertex { position, color };
    let vertices = vec![
        vertex([0.5, 0.5, 1.0], [0.0, 1.0, 1.0, 1.0]),
        vertex([0.5, -0.5, 1.0], [1.0, 0.0, 1.0, 1.0]),
        vertex([-0.5, -0.5, 1.0], [1.0, 1.0, 0.0, 1.0]),
        vertex([-0.5, 0.5, 1.0], [0.2, 0.5, 1.0, 1.0]),
        vertex([1.0, 1.0, -1.0], [1.0, 0.0, 0.0, 1.0]),
        vertex([1.0, -1.0, -1.0], [1.0, 1.0, 0.0, 1.0]),
        vertex([-1.0, -1.0, -1.0], [0.0, 1.0, 0.0, 1.0]),
        vertex([-1.0, 1.0, -1.0], [0.0, 0.0, 1.0, 1.0]),
    ];
    let indices = vec![
        0, 1, 2, 2, 3, 0, // near
        0, 4, 1, 1, 4, 5, // right
        1, 5, 6, 1, 2, 6, // bottom
        2, 3, 6, 3, 7, 6, // left
        3, 0, 4, 3, 7, 4, // top
        7, 4, 5, 6, 7, 5, // far
    ];
    MeshData { vertices, indices }
}
