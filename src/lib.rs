//! Shared code for the LearnOpenGL programs.
//!
//! Each program under `src/bin` opens a window, builds a shader program, uploads its geometry
//! and runs a draw loop until the window is closed or Escape is pressed.

use std::process::ExitCode;

pub mod abs;
pub mod input;
pub mod logging;
pub mod scene;
pub mod settings;
pub mod state;

use settings::Settings;

/// Runs a program body with logging and settings set up, mapping its outcome to an exit code.
pub fn run_program(program: fn(&Settings) -> anyhow::Result<()>) -> ExitCode {
    if let Err(e) = logging::init(log::LevelFilter::Info) {
        eprintln!("failed to install logger: {}", e);
    }
    let settings = Settings::load();
    logging::set_level(settings.log_level());

    match program(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
