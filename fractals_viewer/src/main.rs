//! Fractals viewer
//!
//! Opens the viewer window and runs the poll/swap loop until the window is closed or
//! Escape is pressed. Pass a `.toml` or `.ron` window config path as the first argument to
//! override the defaults.

use fractal_window::logging;
use fractal_window::prelude::*;
use fractal_window::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
enum ViewerError {
    #[error("Failed to load config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Window(#[from] WindowError),
}

struct Viewer {
    window: Window,
    quit: KeyHandle,
    info_key: KeyHandle,
    frames: u64,
}

impl Viewer {
    fn new(config: &WindowConfig) -> Result<Self, ViewerError> {
        log::info!("Creating fractals viewer...");
        let mut window = Window::new(config)?;
        log::info!("{window}");

        window.add_event_listener(EventType::WindowResize, |event| log::info!("{event}"));
        window.add_event_listener(EventType::BufferResize, |event| log::info!("{event}"));
        window.add_event_listener(EventType::WindowMove, |event| log::debug!("{event}"));
        window.add_event_listener(EventType::FileDrop, |event| log::info!("{event}"));
        window.add_event_listener(EventType::FilesDrop, |event| log::info!("{event}"));
        window.add_event_listener(EventType::MouseWheel, |event| log::debug!("{event}"));
        window.add_event_listener(EventType::KeyDown, |event| {
            if let Event::KeyDown { key, repeat: false, .. } = event {
                log::debug!("Key down: {key:?}");
            }
        });

        let quit = window.make_key(KeyCode::Escape);
        let info_key = window.make_key(KeyCode::I);

        Ok(Self {
            window,
            quit,
            info_key,
            frames: 0,
        })
    }

    fn run(&mut self) {
        log::info!("Entering main loop");
        while !self.window.should_close() {
            if self.quit.is_clicked() {
                log::info!("Escape pressed, closing");
                self.window.set_should_close(true);
            }
            if self.info_key.is_clicked() {
                let (x, y) = (self.window.xpos(), self.window.ypos());
                log::info!("Window at ({x}, {y}), {}", self.window);
            }

            self.window.swap();
            self.window.poll();
            self.frames += 1;
        }

        let elapsed = self.window.time();
        if elapsed > 0.0 {
            log::info!(
                "Rendered {} frames in {:.2}s ({:.1} fps)",
                self.frames,
                elapsed,
                self.frames as f64 / elapsed
            );
        }
    }
}

fn load_config() -> Result<WindowConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading window config from {path}");
            WindowConfig::load_from_file(&path)
        }
        None => Ok(WindowConfig::new("Fractals", 800, 600)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = load_config().map_err(ViewerError::from)?;
    let mut viewer = Viewer::new(&config)?;
    viewer.run();

    log::info!("Fractals viewer shut down");
    Ok(())
}
