//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use anyhow::{Context, Result};
use glow::HasContext;
use sdl2::{
    event::{Event, WindowEvent},
    video::{GLProfile, SwapInterval},
};

use crate::{input::KeyboardState, settings::WindowSettings};

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Opens a window with an OpenGL 3.3 core context.
    pub fn new(settings: &WindowSettings) -> Result<Self> {
        Self::open(settings, false)
    }

    /// Same as [`App::new`] but the window is never shown.
    pub fn hidden(settings: &WindowSettings) -> Result<Self> {
        Self::open(settings, true)
    }

    fn open(settings: &WindowSettings, hidden: bool) -> Result<Self> {
        let sdl = sdl2::init()
            .map_err(anyhow::Error::msg)
            .context("failed to initialize SDL")?;
        let video_subsystem = sdl
            .video()
            .map_err(anyhow::Error::msg)
            .context("failed to initialize the SDL video subsystem")?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_depth_size(24);
        gl_attr.set_double_buffer(true);
        #[cfg(target_os = "macos")]
        gl_attr.set_context_flags().forward_compatible().set();

        let mut builder = video_subsystem.window(&settings.title, settings.width, settings.height);
        builder.opengl().resizable().position_centered();
        if hidden {
            builder.hidden();
        }
        let window = builder.build().context("failed to create window")?;

        let gl_context = window
            .gl_create_context()
            .map_err(anyhow::Error::msg)
            .context("failed to create OpenGL context")?;
        window
            .gl_make_current(&gl_context)
            .map_err(anyhow::Error::msg)
            .context("failed to make the OpenGL context current")?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };

        let interval = if settings.vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("could not set swap interval: {}", e);
        }

        let (width, height) = window.drawable_size();
        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
        }

        let event_pump = sdl
            .event_pump()
            .map_err(anyhow::Error::msg)
            .context("failed to create the SDL event pump")?;

        log::info!(
            "opened {}x{} window, {}",
            width,
            height,
            unsafe { gl.get_parameter_string(glow::VERSION) }
        );

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl: Arc::new(gl),
            event_pump,
        })
    }

    /// Drains pending window events.
    ///
    /// Key presses are recorded in `keyboard` and a resize only updates the viewport. Returns
    /// `false` once the window has been asked to close.
    pub fn pump_events(&mut self, keyboard: &mut KeyboardState) -> bool {
        let mut running = true;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => running = false,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => {
                    let (width, height) = self.window.drawable_size();
                    unsafe {
                        self.gl.viewport(0, 0, width as i32, height as i32);
                    }
                    log::debug!("viewport resized to {}x{}", width, height);
                }
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => keyboard.press(keycode),
                Event::KeyUp {
                    keycode: Some(keycode),
                    ..
                } => keyboard.release(keycode),
                _ => {}
            }
        }
        running
    }

    /// Clears the color buffer, and the depth buffer when `depth` is set.
    pub fn clear(&self, color: [f32; 4], depth: bool) {
        let mut mask = glow::COLOR_BUFFER_BIT;
        if depth {
            mask |= glow::DEPTH_BUFFER_BIT;
        }
        unsafe {
            self.gl.clear_color(color[0], color[1], color[2], color[3]);
            self.gl.clear(mask);
        }
    }

    /// Presents the back buffer.
    pub fn swap(&self) {
        self.window.gl_swap_window();
    }
}
