//! Two triangles sharing an edge, drawn from an index buffer in wireframe mode.

use std::process::ExitCode;

use anyhow::{Context, Result};
use glow::HasContext;
use learnopengl::{
    abs::{App, Mesh, ShaderProgram},
    input::{KeyboardState, process_input},
    scene,
    settings::Settings,
    state::FrameState,
};

const VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec3 a_pos;

void main() {
    gl_Position = vec4(a_pos, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 330 core
out vec4 frag_color;

void main() {
    frag_color = vec4(1.0, 0.5, 0.2, 1.0);
}
"#;

fn main() -> ExitCode {
    learnopengl::run_program(run)
}

fn run(settings: &Settings) -> Result<()> {
    let mut app = App::new(&settings.window)?;

    let shader = ShaderProgram::from_sources(&app.gl, VERTEX_SHADER, FRAGMENT_SHADER)
        .map_err(anyhow::Error::msg)
        .context("failed to create shader program")?;

    let rectangle = Mesh::new(
        &app.gl,
        &scene::RECTANGLE,
        Some(scene::RECTANGLE_INDICES.as_slice()),
        glow::TRIANGLES,
    )
    .map_err(anyhow::Error::msg)
    .context("failed to upload rectangle")?;

    unsafe {
        app.gl.polygon_mode(glow::FRONT_AND_BACK, glow::LINE);
    }

    let mut keyboard = KeyboardState::default();
    let mut state = FrameState::default();

    while app.pump_events(&mut keyboard) {
        process_input(&keyboard, &mut state);
        if state.should_close {
            break;
        }

        app.clear(settings.clear_color, false);
        shader.use_program();
        rectangle.draw();

        app.swap();
    }

    Ok(())
}
