//! The cube scene: GPU resources, the transform chain and the per-frame
//! render path.
//!
//! [`Transforms`] holds the matrix state and is plain math with no GL
//! handles; [`CubeScene`] owns the geometry buffers and shader program and
//! must only be built once the GL context is current.

use std::sync::Arc;

use glam::{Mat4, Vec3};
use glow::HasContext;

use crate::abs::{Mesh, Shader, ShaderError, ShaderProgram};
use crate::camera::Camera;
use crate::cube;

const FOV_Y_DEG: f32 = 45.0;
const Z_NEAR: f32 = 0.01;
const Z_FAR: f32 = 1000.0;

const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 2.0);
const CAMERA_VIEW_DIRECTION: Vec3 = Vec3::NEG_Z;
const CAMERA_UP_DIRECTION: Vec3 = Vec3::Y;

/// Where the cube sits in front of the camera.
const CUBE_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -50.0);

/// The cube spins around the main diagonal at two degrees per frame at
/// the 60 Hz reference rate; the advance is scaled by measured elapsed
/// time, so other refresh rates see the same speed.
const ROTATION_AXIS: Vec3 = Vec3::ONE;
const DEGREES_PER_SECOND: f32 = 120.0;

/// The transform chain: camera-derived view, projection, and the
/// accumulated model rotation.
pub struct Transforms {
    camera: Camera,
    view_proj: Mat4,
    angle_deg: f32,
}

impl Transforms {
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Camera::default();
        camera.set_position(CAMERA_POSITION);
        camera.set_view_direction(CAMERA_VIEW_DIRECTION);
        camera.set_up_direction(CAMERA_UP_DIRECTION);

        let mut transforms = Self {
            camera,
            view_proj: Mat4::IDENTITY,
            angle_deg: 0.0,
        };
        transforms.resize(width, height);
        transforms
    }

    /// Recomputes the projection for a new surface size and recomposes the
    /// view-projection. The camera itself never changes here.
    pub fn resize(&mut self, width: u32, height: u32) {
        let aspect_ratio = width as f32 / height as f32;
        let proj = Mat4::perspective_rh_gl(FOV_Y_DEG.to_radians(), aspect_ratio, Z_NEAR, Z_FAR);
        self.view_proj = proj * self.camera.view_matrix();
    }

    /// Advances the accumulated rotation by the elapsed time, wrapped into
    /// [0, 360).
    pub fn advance(&mut self, delta_time: f32) {
        self.angle_deg = (self.angle_deg + DEGREES_PER_SECOND * delta_time).rem_euclid(360.0);
    }

    /// The accumulated model rotation about the diagonal axis.
    pub fn rotation(&self) -> Mat4 {
        Mat4::from_axis_angle(ROTATION_AXIS.normalize(), self.angle_deg.to_radians())
    }

    /// Composes the clip-space transform for the current frame:
    /// view-projection x (translation x rotation).
    pub fn world_view_proj(&self) -> Mat4 {
        let world = Mat4::from_translation(CUBE_OFFSET) * self.rotation();
        self.view_proj * world
    }

    pub fn view(&self) -> Mat4 {
        self.camera.view_matrix()
    }
}

/// Owns the GPU-facing state for the cube: geometry buffers, the color
/// shader program, and the transform chain feeding its single uniform.
pub struct CubeScene {
    gl: Arc<glow::Context>,
    mesh: Mesh,
    program: ShaderProgram,
    transforms: Transforms,
}

impl CubeScene {
    /// Builds the scene's GPU resources. The GL context must be current.
    ///
    /// A shader compile or link failure aborts the build; whatever was
    /// already created is released on the way out. The session cannot
    /// recover from a partial pipeline, so the caller is expected to shut
    /// down.
    pub fn new(gl: &Arc<glow::Context>, width: u32, height: u32) -> Result<Self, ShaderError> {
        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
        }

        let mesh = Mesh::new(gl, &cube::VERTICES, &cube::INDICES);

        let vert = Shader::new(
            gl,
            glow::VERTEX_SHADER,
            include_str!("shaders/color/vertex_shader.glsl"),
        )?;
        let frag = Shader::new(
            gl,
            glow::FRAGMENT_SHADER,
            include_str!("shaders/color/fragment_shader.glsl"),
        )?;
        let program = ShaderProgram::new(gl, &[&vert, &frag])?;

        let transforms = Transforms::new(width, height);

        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);
            gl.enable(glow::CULL_FACE);
            gl.cull_face(glow::BACK);
            gl.front_face(glow::CCW);
        }

        log::info!("cube scene ready ({} indices)", mesh.index_count());

        Ok(Self {
            gl: Arc::clone(gl),
            mesh,
            program,
            transforms,
        })
    }

    /// Updates the viewport and projection for a new surface size. GPU
    /// buffers and shader state are untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
        self.transforms.resize(width, height);
        log::debug!("surface resized to {width}x{height}");
    }

    /// Frame-presented hook: the host loop calls this once per presented
    /// frame with the measured elapsed time.
    pub fn frame_presented(&mut self, delta_time: f32) {
        self.transforms.advance(delta_time);
    }

    /// Renders one frame: clear, bind the program, upload the composed
    /// transform, issue the single indexed draw call, release the program.
    pub fn render(&self) {
        unsafe {
            self.gl.clear_color(0.55, 0.55, 0.55, 1.0);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.program.use_program();
        self.program
            .set_uniform("u_world_view_proj", self.transforms.world_view_proj());
        self.mesh.draw();
        unsafe {
            self.gl.use_program(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_DT: f32 = 1.0 / 60.0;

    fn assert_mat4_approx_eq(a: Mat4, b: Mat4) {
        let (a, b) = (a.to_cols_array(), b.to_cols_array());
        for i in 0..16 {
            assert!(
                (a[i] - b[i]).abs() < 1e-4,
                "element {i}: {} != {}",
                a[i],
                b[i]
            );
        }
    }

    #[test]
    fn first_frame_transform_composition() {
        let transforms = Transforms::new(640, 480);
        let expected = Mat4::perspective_rh_gl(45f32.to_radians(), 640.0 / 480.0, 0.01, 1000.0)
            * Mat4::look_at_rh(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, 1.0), Vec3::Y)
            * Mat4::from_translation(Vec3::new(0.0, 0.0, -50.0));
        assert_mat4_approx_eq(transforms.world_view_proj(), expected);
    }

    #[test]
    fn resize_updates_the_aspect_ratio_only() {
        let mut transforms = Transforms::new(640, 480);
        let view_before = transforms.view();
        transforms.resize(800, 600);
        assert_mat4_approx_eq(transforms.view(), view_before);

        let expected = Mat4::perspective_rh_gl(45f32.to_radians(), 800.0 / 600.0, 0.01, 1000.0)
            * transforms.view()
            * Mat4::from_translation(Vec3::new(0.0, 0.0, -50.0));
        assert_mat4_approx_eq(transforms.world_view_proj(), expected);
    }

    #[test]
    fn resize_is_idempotent_for_an_unchanged_size() {
        let mut transforms = Transforms::new(800, 600);
        let before = transforms.world_view_proj();
        transforms.resize(800, 600);
        transforms.resize(800, 600);
        assert_eq!(
            before.to_cols_array(),
            transforms.world_view_proj().to_cols_array()
        );
    }

    #[test]
    fn advance_accumulates_two_degrees_per_reference_frame() {
        let mut transforms = Transforms::new(640, 480);
        for _ in 0..10 {
            transforms.advance(REFERENCE_DT);
        }
        let expected = Mat4::from_axis_angle(Vec3::ONE.normalize(), 20f32.to_radians());
        assert_mat4_approx_eq(transforms.rotation(), expected);
    }

    #[test]
    fn rotation_wraps_after_a_full_turn() {
        // 180 reference frames are exactly one revolution, so N and N + 180
        // advances must land on the same rotation.
        let mut short = Transforms::new(640, 480);
        let mut long = Transforms::new(640, 480);
        for _ in 0..7 {
            short.advance(REFERENCE_DT);
        }
        for _ in 0..(7 + 180) {
            long.advance(REFERENCE_DT);
        }
        assert_mat4_approx_eq(short.rotation(), long.rotation());
    }

    #[test]
    fn animation_speed_is_frame_rate_independent() {
        let mut at_60 = Transforms::new(640, 480);
        let mut at_120 = Transforms::new(640, 480);
        for _ in 0..30 {
            at_60.advance(1.0 / 60.0);
        }
        for _ in 0..60 {
            at_120.advance(1.0 / 120.0);
        }
        assert_mat4_approx_eq(at_60.rotation(), at_120.rotation());
    }
}
