//! Static geometry and transforms for the tutorial scenes.

use glam::{Mat4, Vec3, vec3};
use glow::HasContext;

use crate::abs::Vertex;

const F32: i32 = std::mem::size_of::<f32>() as i32;

/// A position with a per-vertex color.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex for ColorVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<ColorVertex>() as i32;
            // Position attribute
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            // Color attribute
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * F32);
        }
    }
}

/// A position with a color and texture coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex for TexturedVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<TexturedVertex>() as i32;
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * F32);
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(2, 2, glow::FLOAT, false, stride, 6 * F32);
        }
    }
}

/// A position with texture coordinates. The cube shaders read the UVs from location 1.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex for CubeVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<CubeVertex>() as i32;
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, stride, 3 * F32);
        }
    }
}

/// A bare position, for the flat colored rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct PositionVertex {
    pub position: [f32; 3],
}

impl Vertex for PositionVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<PositionVertex>() as i32;
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        }
    }
}

const fn cv(position: [f32; 3], color: [f32; 3]) -> ColorVertex {
    ColorVertex { position, color }
}

const fn tv(position: [f32; 3], color: [f32; 3], uv: [f32; 2]) -> TexturedVertex {
    TexturedVertex {
        position,
        color,
        uv,
    }
}

const fn cube(position: [f32; 3], uv: [f32; 2]) -> CubeVertex {
    CubeVertex { position, uv }
}

const fn pv(position: [f32; 3]) -> PositionVertex {
    PositionVertex { position }
}

pub const TRIANGLE: [ColorVertex; 3] = [
    cv([-0.5, -0.5, 0.0], [1.0, 0.0, 0.0]), // bottom left
    cv([0.5, -0.5, 0.0], [0.0, 1.0, 0.0]),  // bottom right
    cv([0.0, 0.5, 0.0], [0.0, 0.0, 1.0]),   // top
];

pub const RECTANGLE: [PositionVertex; 4] = [
    pv([0.5, 0.5, 0.0]),   // top right
    pv([0.5, -0.5, 0.0]),  // bottom right
    pv([-0.5, -0.5, 0.0]), // bottom left
    pv([-0.5, 0.5, 0.0]),  // top left
];

pub const RECTANGLE_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

pub const TEXTURED_QUAD: [TexturedVertex; 4] = [
    tv([0.5, 0.5, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0]),
    tv([0.5, -0.5, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
    tv([-0.5, -0.5, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
    tv([-0.5, 0.5, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0]),
];

pub const QUAD_INDICES: [u32; 6] = RECTANGLE_INDICES;

#[rustfmt::skip]
pub const CUBE: [CubeVertex; 36] = [
    // back
    cube([-0.5, -0.5, -0.5], [0.0, 0.0]),
    cube([ 0.5, -0.5, -0.5], [1.0, 0.0]),
    cube([ 0.5,  0.5, -0.5], [1.0, 1.0]),
    cube([ 0.5,  0.5, -0.5], [1.0, 1.0]),
    cube([-0.5,  0.5, -0.5], [0.0, 1.0]),
    cube([-0.5, -0.5, -0.5], [0.0, 0.0]),
    // front
    cube([-0.5, -0.5,  0.5], [0.0, 0.0]),
    cube([ 0.5, -0.5,  0.5], [1.0, 0.0]),
    cube([ 0.5,  0.5,  0.5], [1.0, 1.0]),
    cube([ 0.5,  0.5,  0.5], [1.0, 1.0]),
    cube([-0.5,  0.5,  0.5], [0.0, 1.0]),
    cube([-0.5, -0.5,  0.5], [0.0, 0.0]),
    // left
    cube([-0.5,  0.5,  0.5], [1.0, 0.0]),
    cube([-0.5,  0.5, -0.5], [1.0, 1.0]),
    cube([-0.5, -0.5, -0.5], [0.0, 1.0]),
    cube([-0.5, -0.5, -0.5], [0.0, 1.0]),
    cube([-0.5, -0.5,  0.5], [0.0, 0.0]),
    cube([-0.5,  0.5,  0.5], [1.0, 0.0]),
    // right
    cube([ 0.5,  0.5,  0.5], [1.0, 0.0]),
    cube([ 0.5,  0.5, -0.5], [1.0, 1.0]),
    cube([ 0.5, -0.5, -0.5], [0.0, 1.0]),
    cube([ 0.5, -0.5, -0.5], [0.0, 1.0]),
    cube([ 0.5, -0.5,  0.5], [0.0, 0.0]),
    cube([ 0.5,  0.5,  0.5], [1.0, 0.0]),
    // bottom
    cube([-0.5, -0.5, -0.5], [0.0, 1.0]),
    cube([ 0.5, -0.5, -0.5], [1.0, 1.0]),
    cube([ 0.5, -0.5,  0.5], [1.0, 0.0]),
    cube([ 0.5, -0.5,  0.5], [1.0, 0.0]),
    cube([-0.5, -0.5,  0.5], [0.0, 0.0]),
    cube([-0.5, -0.5, -0.5], [0.0, 1.0]),
    // top
    cube([-0.5,  0.5, -0.5], [0.0, 1.0]),
    cube([ 0.5,  0.5, -0.5], [1.0, 1.0]),
    cube([ 0.5,  0.5,  0.5], [1.0, 0.0]),
    cube([ 0.5,  0.5,  0.5], [1.0, 0.0]),
    cube([-0.5,  0.5,  0.5], [0.0, 0.0]),
    cube([-0.5,  0.5, -0.5], [0.0, 1.0]),
];

/// World positions of the cubes in the cube field.
pub const CUBE_POSITIONS: [Vec3; 10] = [
    vec3(0.0, 0.0, 0.0),
    vec3(2.0, 5.0, -15.0),
    vec3(-1.5, -2.2, -2.5),
    vec3(-3.8, -2.0, -12.3),
    vec3(2.4, -0.4, -3.5),
    vec3(-1.7, 3.0, -7.5),
    vec3(1.3, -2.0, -2.5),
    vec3(1.5, 2.0, -2.5),
    vec3(1.5, 0.2, -1.5),
    vec3(-1.3, 1.0, -1.5),
];

const CUBE_AXIS: Vec3 = vec3(1.0, 0.3, 0.5);
const DEGREES_PER_INDEX: f64 = 20.0;
const DEGREES_PER_SECOND: f64 = 50.0;

/// Model matrix for the `index`-th cube after `seconds` of animation.
///
/// Each cube starts out rotated a further 20 degrees than the previous one and they all spin
/// at the same rate. The angle is reduced to one turn before narrowing to f32.
pub fn cube_model(index: usize, position: Vec3, seconds: f64) -> Mat4 {
    let angle = (DEGREES_PER_INDEX * index as f64 + DEGREES_PER_SECOND * seconds) % 360.0;
    Mat4::from_translation(position)
        * Mat4::from_axis_angle(CUBE_AXIS.normalize(), (angle as f32).to_radians())
}

/// The camera sits three units back from the origin, looking down -Z.
pub fn view_matrix() -> Mat4 {
    Mat4::from_translation(vec3(0.0, 0.0, -3.0))
}

/// Perspective projection for a `width` by `height` target.
pub fn projection_matrix(width: u32, height: u32) -> Mat4 {
    let aspect = if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    };
    Mat4::perspective_rh_gl(45f32.to_radians(), aspect, 0.1, 100.0)
}

#[cfg(test)]
mod tests {
    use glam::{Vec4, vec4};

    use super::*;

    #[test]
    fn vertex_layouts_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<ColorVertex>(), 6 * 4);
        assert_eq!(std::mem::size_of::<TexturedVertex>(), 8 * 4);
        assert_eq!(std::mem::size_of::<CubeVertex>(), 5 * 4);
        assert_eq!(std::mem::size_of::<PositionVertex>(), 3 * 4);
    }

    #[test]
    fn indices_stay_in_range() {
        assert!(RECTANGLE_INDICES.iter().all(|&i| (i as usize) < RECTANGLE.len()));
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < TEXTURED_QUAD.len()));
    }

    #[test]
    fn cube_faces_cover_every_corner() {
        for corner in CUBE.iter().map(|v| v.position) {
            assert!(corner.iter().all(|c| c.abs() == 0.5));
        }
        let mut distinct: Vec<[f32; 3]> = Vec::new();
        for v in CUBE.iter() {
            if !distinct.contains(&v.position) {
                distinct.push(v.position);
            }
        }
        assert_eq!(distinct.len(), 8);
    }

    #[test]
    fn first_cube_starts_unrotated() {
        let position = CUBE_POSITIONS[0];
        assert!(cube_model(0, position, 0.0).abs_diff_eq(Mat4::from_translation(position), 1e-6));
    }

    #[test]
    fn cube_model_keeps_the_center_at_its_position() {
        for (i, position) in CUBE_POSITIONS.iter().enumerate() {
            let center = cube_model(i, *position, 1.7) * Vec4::W;
            assert!(center.truncate().abs_diff_eq(*position, 1e-5));
        }
    }

    #[test]
    fn cube_model_rotates_about_the_tilted_axis() {
        let model = cube_model(3, Vec3::ZERO, 0.0);
        let axis = CUBE_AXIS.normalize();
        assert!(model.transform_vector3(axis).abs_diff_eq(axis, 1e-5));
        assert!(!model.transform_vector3(Vec3::Y).abs_diff_eq(Vec3::Y, 1e-3));
    }

    #[test]
    fn rotation_repeats_every_full_turn_even_after_a_long_run() {
        let position = CUBE_POSITIONS[4];
        let start = cube_model(4, position, 0.25);
        // 50 degrees per second, so 7.2 seconds is one turn.
        let one_turn_later = cube_model(4, position, 0.25 + 7.2);
        let days_later = cube_model(4, position, 0.25 + 7.2 * 50_000.0);
        assert!(one_turn_later.abs_diff_eq(start, 1e-4));
        assert!(days_later.abs_diff_eq(start, 1e-4));
    }

    #[test]
    fn view_moves_the_scene_away_from_the_camera() {
        assert_eq!(view_matrix() * Vec4::W, vec4(0.0, 0.0, -3.0, 1.0));
    }

    #[test]
    fn projection_handles_a_zero_height() {
        let square = projection_matrix(600, 600);
        assert_eq!(projection_matrix(800, 0), square);
        let wide = projection_matrix(800, 600);
        assert!(wide.x_axis.x < square.x_axis.x);
    }
}
