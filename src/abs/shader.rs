//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! This module also provides the [`Uniform`] trait for setting uniform variables in shader
//! programs.
//!
//! Compile and link failures are logged with the driver's info log and do not abort: the
//! resulting program is kept around and simply renders nothing (or garbage) when used. Only a
//! failure to allocate the GL objects themselves is reported as an error.

use std::{fmt, path::Path, sync::Arc};

use glam::{Mat4, Vec2, Vec3, Vec4};
use glow::HasContext;

/// The pipeline stage a [`Shader`] is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Returns the OpenGL enum for this stage.
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Reads a shader source file into memory.
pub fn read_source(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read shader source {}: {}", path.display(), e))
}

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
    stage: ShaderStage,
    compiled: bool,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    ///
    /// A compile error is logged and the shader object is still returned.
    pub fn new(gl: &Arc<glow::Context>, stage: ShaderStage, source: &str) -> Result<Self, String> {
        unsafe {
            let shader = gl.create_shader(stage.gl_type())?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            let compiled = gl.get_shader_compile_status(shader);
            if !compiled {
                log::error!(
                    "{} shader compilation failed:\n{}",
                    stage,
                    gl.get_shader_info_log(shader)
                );
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
                stage,
                compiled,
            })
        }
    }

    /// Returns the stage this shader was compiled for.
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Returns whether the driver accepted the source.
    pub fn is_compiled(&self) -> bool {
        self.compiled
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a uniform variable in a shader program.
///
/// The location is looked up by name on every call. Unknown names resolve to no location and
/// the write is skipped.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

impl Uniform for bool {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_1_i32(Some(&loc), *self as i32);
            }
        }
    }
}

impl Uniform for i32 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_1_i32(Some(&loc), *self);
            }
        }
    }
}

impl Uniform for f32 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_1_f32(Some(&loc), *self);
            }
        }
    }
}

impl Uniform for Vec2 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_2_f32(Some(&loc), self.x, self.y);
            }
        }
    }
}

impl Uniform for Vec3 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_3_f32(Some(&loc), self.x, self.y, self.z);
            }
        }
    }
}

impl Uniform for Vec4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_4_f32(Some(&loc), self.x, self.y, self.z, self.w);
            }
        }
    }
}

impl Uniform for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_matrix_4_f32_slice(Some(&loc), false, &self.to_cols_array());
            }
        }
    }
}

impl<T: Uniform> Uniform for &T {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        (*self).set_uniform(gl, program, name);
    }
}

/// Represents an OpenGL shader program composed of a vertex and a fragment shader.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
    linked: bool,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    ///
    /// The shaders are detached again once linking is done, whether it succeeded or not, so
    /// dropping them afterwards frees them.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, String> {
        unsafe {
            let program = gl.create_program()?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            let linked = gl.get_program_link_status(program);
            if !linked {
                log::error!(
                    "shader program linking failed:\n{}",
                    gl.get_program_info_log(program)
                );
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
                linked,
            })
        }
    }

    /// Compiles both stages from in-memory sources and links them.
    pub fn from_sources(
        gl: &Arc<glow::Context>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, String> {
        let vertex = Shader::new(gl, ShaderStage::Vertex, vertex_source)?;
        let fragment = Shader::new(gl, ShaderStage::Fragment, fragment_source)?;
        Self::new(gl, &[&vertex, &fragment])
    }

    /// Reads both stages from disk, compiles them and links them.
    ///
    /// A file that cannot be read is logged and compiled as empty source, which the driver
    /// then rejects.
    pub fn from_files(
        gl: &Arc<glow::Context>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, String> {
        let vertex_path = vertex_path.as_ref();
        let fragment_path = fragment_path.as_ref();
        let load = |path: &Path| {
            read_source(path).unwrap_or_else(|e| {
                log::error!("{}", e);
                String::new()
            })
        };
        let vertex_source = load(vertex_path);
        let fragment_source = load(fragment_path);

        let program = Self::from_sources(gl, &vertex_source, &fragment_source)?;
        if program.linked {
            log::debug!(
                "linked shader program from {} and {}",
                vertex_path.display(),
                fragment_path.display()
            );
        }
        Ok(program)
    }

    /// Returns whether the program linked successfully.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable in the shader program.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }

    pub fn set_bool(&self, name: &str, value: bool) {
        self.set_uniform(name, value);
    }

    pub fn set_int(&self, name: &str, value: i32) {
        self.set_uniform(name, value);
    }

    pub fn set_float(&self, name: &str, value: f32) {
        self.set_uniform(name, value);
    }

    pub fn set_mat4(&self, name: &str, value: &Mat4) {
        self.set_uniform(name, value);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abs::{App, Mesh, Texture},
        scene,
        settings::WindowSettings,
    };

    const VERTEX: &str = "#version 330 core
layout (location = 0) in vec3 a_pos;
uniform mat4 model;
void main() {
    gl_Position = model * vec4(a_pos, 1.0);
}
";

    const FRAGMENT: &str = "#version 330 core
out vec4 frag_color;
uniform float brightness;
uniform bool inverted;
uniform vec2 offset;
uniform vec3 tint;
uniform vec4 fade;
void main() {
    vec3 base = vec3(brightness) * tint + vec3(offset, 0.0);
    if (inverted) {
        base = vec3(1.0) - base;
    }
    frag_color = vec4(base, 1.0) * fade;
}
";

    fn write_fixture(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("learnopengl-shader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn read_source_returns_whole_file() {
        let path = write_fixture("whole.vert", VERTEX);
        assert_eq!(read_source(&path).unwrap(), VERTEX);
    }

    #[test]
    fn read_source_reports_missing_file() {
        let path = Path::new("definitely/not/here.frag");
        let err = read_source(path).unwrap_err();
        assert!(err.contains("definitely/not/here.frag"));
    }

    #[test]
    fn stage_maps_to_gl_enum() {
        assert_eq!(ShaderStage::Vertex.gl_type(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_type(), glow::FRAGMENT_SHADER);
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }

    // SDL only allows one live context per process, so every GL scenario shares this test.
    #[test]
    #[ignore = "requires a display"]
    fn program_lifecycle_on_a_live_context() {
        let app = App::hidden(&WindowSettings::default()).unwrap();
        let vert = write_fixture("valid.vert", VERTEX);
        let frag = write_fixture("valid.frag", FRAGMENT);

        let vertex_stage = Shader::new(&app.gl, ShaderStage::Vertex, VERTEX).unwrap();
        let fragment_stage = Shader::new(&app.gl, ShaderStage::Fragment, FRAGMENT).unwrap();
        assert!(vertex_stage.is_compiled());
        assert!(fragment_stage.is_compiled());
        assert_eq!(vertex_stage.stage(), ShaderStage::Vertex);
        assert_eq!(fragment_stage.stage(), ShaderStage::Fragment);
        let linked = ShaderProgram::new(&app.gl, &[&vertex_stage, &fragment_stage]).unwrap();
        assert!(linked.is_linked());
        drop(linked);

        let program = ShaderProgram::from_files(&app.gl, &vert, &frag).unwrap();
        assert!(program.is_linked());
        unsafe {
            assert_eq!(app.gl.get_error(), glow::NO_ERROR);
        }

        let broken_source = "#version 330 core\nvoid main() { oops }\n";
        let broken_stage = Shader::new(&app.gl, ShaderStage::Vertex, broken_source).unwrap();
        assert!(!broken_stage.is_compiled());
        let broken = write_fixture("broken.vert", broken_source);
        let unusable = ShaderProgram::from_files(&app.gl, &broken, &frag).unwrap();
        assert!(!unusable.is_linked());
        unusable.use_program();
        // Binding an unlinked program raises INVALID_OPERATION; clear it.
        unsafe {
            app.gl.get_error();
        }

        let missing = ShaderProgram::from_files(&app.gl, "missing.vert", &frag).unwrap();
        assert!(!missing.is_linked());

        program.use_program();
        program.set_float("no_such_uniform", 1.0);
        program.set_mat4("not_here_either", &Mat4::IDENTITY);
        program.set_bool("absent_flag", true);
        program.set_float("brightness", 0.5);
        program.set_mat4("model", &Mat4::IDENTITY);
        program.set_bool("inverted", true);
        program.set_int("inverted", 0);
        program.set_uniform("offset", Vec2::new(0.1, 0.2));
        program.set_uniform("tint", Vec3::new(1.0, 0.5, 0.25));
        program.set_uniform("fade", Vec4::splat(0.75));
        unsafe {
            assert_eq!(app.gl.get_error(), glow::NO_ERROR);
        }

        let second = ShaderProgram::from_files(&app.gl, &vert, &frag).unwrap();
        assert!(second.is_linked());
        assert_ne!(program.id, second.id);
        drop(program);
        second.use_program();
        second.set_float("brightness", 1.0);
        unsafe {
            assert_eq!(app.gl.get_error(), glow::NO_ERROR);
        }

        let triangle = Mesh::new(&app.gl, &scene::TRIANGLE, None, glow::TRIANGLES).unwrap();
        assert_eq!(triangle.count(), 3);
        let rectangle = Mesh::new(
            &app.gl,
            &scene::RECTANGLE,
            Some(scene::RECTANGLE_INDICES.as_slice()),
            glow::TRIANGLES,
        )
        .unwrap();
        assert_eq!(rectangle.count(), 6);
        triangle.draw();
        rectangle.draw();

        let image = image::DynamicImage::ImageRgb8(image::RgbImage::new(3, 2));
        let texture = Texture::new(&app.gl, &image).unwrap();
        assert_eq!((texture.width(), texture.height()), (3, 2));
        texture.bind(0);
        unsafe {
            assert_eq!(app.gl.get_error(), glow::NO_ERROR);
        }
    }
}
