//! A single triangle with a color per corner, interpolated across the face.

use std::process::ExitCode;

use anyhow::{Context, Result};
use learnopengl::{
    abs::{App, Mesh, ShaderProgram},
    input::{KeyboardState, process_input},
    scene,
    settings::Settings,
    state::FrameState,
};

fn main() -> ExitCode {
    learnopengl::run_program(run)
}

fn run(settings: &Settings) -> Result<()> {
    let mut app = App::new(&settings.window)?;

    let shader = ShaderProgram::from_files(
        &app.gl,
        settings.asset("shaders/triangle.vert"),
        settings.asset("shaders/triangle.frag"),
    )
    .map_err(anyhow::Error::msg)
    .context("failed to create shader program")?;

    let triangle = Mesh::new(&app.gl, &scene::TRIANGLE, None, glow::TRIANGLES)
        .map_err(anyhow::Error::msg)
        .context("failed to upload triangle")?;

    let mut keyboard = KeyboardState::default();
    let mut state = FrameState::default();

    while app.pump_events(&mut keyboard) {
        process_input(&keyboard, &mut state);
        if state.should_close {
            break;
        }

        app.clear(settings.clear_color, false);
        shader.use_program();
        triangle.draw();

        app.swap();
    }

    Ok(())
}
