//! # Fractal Window
//!
//! A thin window facade over GLFW used by the fractals viewer.
//!
//! ## Features
//!
//! - **Window + OpenGL context**: one native window per [`Window`], released on drop
//! - **Geometry mirror**: logical size, framebuffer size and position refreshed on poll
//! - **Listeners**: callbacks registered per [`EventType`], removed by [`ListenerId`]
//! - **Key tracking**: shared [`KeyHandle`]s sampled once per poll
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fractal_window::prelude::*;
//!
//! fn main() -> Result<(), WindowError> {
//!     let mut window = Window::new(&WindowConfig::new("fractals", 800, 600))?;
//!     let escape = window.make_key(KeyCode::Escape);
//!     window.add_event_listener(EventType::WindowResize, |event| {
//!         println!("{event}");
//!     });
//!
//!     while !window.should_close() {
//!         if escape.is_clicked() {
//!             window.set_should_close(true);
//!         }
//!         window.swap();
//!         window.poll();
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod events;
pub mod input;
pub mod logging;
mod window;

pub use config::{Config, ConfigError, ContextConfig, WindowConfig};
pub use events::{Event, EventCategory, EventType, ListenerId};
pub use input::{KeyAction, KeyCode, KeyHandle, Modifiers, MouseButton, TrackedKey};
pub use window::{Window, WindowError, WindowResult};

/// Common imports for window users
pub mod prelude {
    pub use crate::{
        Config, Event, EventCategory, EventType, KeyAction, KeyCode, KeyHandle, ListenerId,
        Modifiers, MouseButton, Window, WindowConfig, WindowError,
    };
}
