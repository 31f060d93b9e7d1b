//! Native window backend trait
//!
//! This trait is the only place the facade talks to the windowing library. It is
//! crate-internal; applications only ever see [`crate::Window`].

use crate::events::Event;
use crate::input::{KeyAction, KeyCode};

/// Internal trait for native window implementations
///
/// One backend owns exactly one native window and its context. Dropping the backend
/// releases them.
///
/// # Thread Safety
/// Not `Send`: GLFW requires window calls to happen on the main thread.
pub(crate) trait WindowBackend {
    /// Check if the window should close
    ///
    /// Set by the window system when the user clicks the close button, or by
    /// [`WindowBackend::set_should_close`].
    fn should_close(&self) -> bool;

    /// Set whether the window should close
    fn set_should_close(&mut self, should_close: bool);

    /// Current logical size in screen coordinates
    fn size(&self) -> (i32, i32);

    /// Current framebuffer size in pixels
    fn framebuffer_size(&self) -> (i32, i32);

    /// Current position of the client area
    fn position(&self) -> (i32, i32);

    /// Ask the window system to move the window
    ///
    /// The move is reported back later as a [`Event::WindowMove`] from `poll_events`.
    fn set_position(&mut self, x: i32, y: i32);

    /// Current cursor position relative to the client area
    fn cursor_position(&self) -> (f64, f64);

    /// Set the window title text
    fn set_title(&mut self, title: &str);

    /// Present the back buffer
    fn swap_buffers(&mut self);

    /// Process pending native events and return them translated, in arrival order
    fn poll_events(&mut self) -> Vec<Event>;

    /// Immediate state of a key
    fn key_action(&self, key: KeyCode) -> KeyAction;

    /// Seconds since the windowing library was initialised
    fn time(&self) -> f64;
}
