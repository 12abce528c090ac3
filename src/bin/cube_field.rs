//! Ten textured cubes spinning in front of a perspective camera.

use std::{process::ExitCode, time::Instant};

use anyhow::{Context, Result};
use glow::HasContext;
use learnopengl::{
    abs::{App, Mesh, ShaderProgram, Texture},
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

    unsafe {
        app.gl.enable(glow::DEPTH_TEST);
    }

    let shader = ShaderProgram::from_files(
        &app.gl,
        settings.asset("shaders/cube.vert"),
        settings.asset("shaders/cube.frag"),
    )
    .map_err(anyhow::Error::msg)
    .context("failed to create shader program")?;

    let cube = Mesh::new(&app.gl, &scene::CUBE, None, glow::TRIANGLES)
        .map_err(anyhow::Error::msg)
        .context("failed to upload cube")?;

    let container = Texture::load_or_log(&app.gl, settings.asset("assets/container.png"));
    let face = Texture::load_or_log(&app.gl, settings.asset("assets/awesomeface.png"));

    shader.use_program();
    shader.set_int("texture1", 0);
    shader.set_int("texture2", 1);

    // The projection follows the configured size, a resize only changes the viewport.
    let projection = scene::projection_matrix(settings.window.width, settings.window.height);
    let view = scene::view_matrix();

    let mut keyboard = KeyboardState::default();
    let mut state = FrameState::default();
    let mut last_frame = Instant::now();

    while app.pump_events(&mut keyboard) {
        let now = Instant::now();
        state.advance(now.duration_since(last_frame).as_secs_f64());
        last_frame = now;

        process_input(&keyboard, &mut state);
        if state.should_close {
            break;
        }

        app.clear(settings.clear_color, true);

        if let Some(texture) = &container {
            texture.bind(0);
        }
        if let Some(texture) = &face {
            texture.bind(1);
        }

        shader.use_program();
        shader.set_float("mix_value", state.mix_value());
        shader.set_mat4("projection", &projection);
        shader.set_mat4("view", &view);
        for (i, position) in scene::CUBE_POSITIONS.iter().enumerate() {
            shader.set_mat4("model", &scene::cube_model(i, *position, state.time));
            cube.draw();
        }

        app.swap();
    }

    Ok(())
}
