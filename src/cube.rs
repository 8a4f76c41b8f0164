//! Cube geometry data.
//!
//! The eight corner vertices and the fixed triangle-list index buffer for
//! the cube. The triangulation and vertex order are chosen so every face
//! winds counter-clockwise seen from outside; back-face culling depends on
//! this and any reordering will hide the wrong faces.

use glam::{Vec3, Vec4};
use glow::HasContext;

use crate::abs::Vertex;

/// A cube corner: position plus RGBA color.
#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct CubeVertex {
    pub position: Vec3,
    pub color: Vec4,
}

impl Vertex for CubeVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = size_of::<CubeVertex>() as i32;

            // Position attribute
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);

            // Color attribute. Vec4 is 16-byte aligned, so the field sits
            // after four bytes of padding; offset_of accounts for that.
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                4,
                glow::FLOAT,
                false,
                stride,
                std::mem::offset_of!(CubeVertex, color) as i32,
            );
        }
    }
}

const fn corner(x: f32, y: f32, z: f32, r: f32, g: f32, b: f32) -> CubeVertex {
    CubeVertex {
        position: Vec3::new(x, y, z),
        color: Vec4::new(r, g, b, 1.0),
    }
}

/// The eight corners of the cube, half extent 10 on every axis.
pub const VERTICES: [CubeVertex; 8] = [
    corner(10.0, 10.0, 10.0, 1.0, 0.0, 0.0),
    corner(-10.0, 10.0, 10.0, 0.0, 0.0, 0.0),
    corner(-10.0, -10.0, 10.0, 1.0, 1.0, 1.0),
    corner(10.0, -10.0, 10.0, 0.0, 1.0, 0.0),
    corner(10.0, -10.0, -10.0, 1.0, 0.0, 1.0),
    corner(-10.0, -10.0, -10.0, 0.0, 0.0, 1.0),
    corner(-10.0, 10.0, -10.0, 1.0, 1.0, 0.0),
    corner(10.0, 10.0, -10.0, 0.0, 1.0, 1.0),
];

/// Triangle-list indices, two triangles per face.
#[rustfmt::skip]
pub const INDICES: [u16; 36] = [
    // front (+z)
    0, 1, 2,
    2, 3, 0,
    // back (-z)
    7, 4, 5,
    5, 6, 7,
    // left (-x)
    6, 5, 2,
    2, 1, 6,
    // right (+x)
    7, 0, 3,
    3, 4, 7,
    // top (+y)
    7, 6, 1,
    1, 0, 7,
    // bottom (-y)
    3, 2, 5,
    5, 4, 3,
];
