//! A quad blending two textures. Up and Down change how much of the second one shows through.

use std::process::ExitCode;

use anyhow::{Context, Result};
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

    let shader = ShaderProgram::from_files(
        &app.gl,
        settings.asset("shaders/textured.vert"),
        settings.asset("shaders/textured.frag"),
    )
    .map_err(anyhow::Error::msg)
    .context("failed to create shader program")?;

    let quad = Mesh::new(
        &app.gl,
        &scene::TEXTURED_QUAD,
        Some(scene::QUAD_INDICES.as_slice()),
        glow::TRIANGLES,
    )
    .map_err(anyhow::Error::msg)
    .context("failed to upload quad")?;

    let container = Texture::load_or_log(&app.gl, settings.asset("assets/container.png"));
    let face = Texture::load_or_log(&app.gl, settings.asset("assets/awesomeface.png"));

    shader.use_program();
    shader.set_int("texture1", 0);
    shader.set_int("texture2", 1);

    let mut keyboard = KeyboardState::default();
    let mut state = FrameState::default();

    while app.pump_events(&mut keyboard) {
        process_input(&keyboard, &mut state);
        if state.should_close {
            break;
        }

        app.clear(settings.clear_color, false);

        if let Some(texture) = &container {
            texture.bind(0);
        }
        if let Some(texture) = &face {
            texture.bind(1);
        }

        shader.use_program();
        shader.set_float("mix_value", state.mix_value());
        quad.draw();

        app.swap();
    }

    Ok(())
}
