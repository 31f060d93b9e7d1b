//! Window facade
//!
//! [`Window`] owns one native window and its OpenGL context, mirrors the window geometry,
//! and routes native events to listeners registered per [`EventType`].
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     Application loop            │
//! └─────────────┬───────────────────┘
//!               │ poll / swap / queries
//!         ┌─────▼─────┐
//!         │  Window   │ ← mirror state, listeners, tracked keys
//!         └─────┬─────┘
//!               │ Uses
//!      ┌────────▼────────┐
//!      │ WindowBackend   │ ← internal trait (backend.rs)
//!      └────────┬────────┘
//!               │ Implemented by
//!      ┌────────▼────────┐
//!      │ GlfwBackend     │ ← glfw_backend.rs
//!      └─────────────────┘
//! ```

mod backend;
mod glfw_backend;
#[cfg(test)]
mod mock;

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::config::WindowConfig;
use crate::events::{Event, EventListeners, EventType, ListenerId};
use crate::input::{KeyAction, KeyCode, KeyHandle, TrackedKey};
use backend::WindowBackend;
use glfw_backend::GlfwBackend;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing library could not be initialised
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// The native window or its context could not be created
    #[error("Window creation failed for '{title}' ({width}x{height})")]
    CreationFailed {
        /// Requested title
        title: String,
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Requested a window with a zero dimension
    #[error("Invalid window size {width}x{height}")]
    InvalidSize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Mirror of the native window state, refreshed during [`Window::poll`]
#[derive(Debug, Clone, PartialEq)]
struct WindowState {
    title: String,
    width: i32,
    height: i32,
    buffer_width: i32,
    buffer_height: i32,
    xpos: i32,
    ypos: i32,
    cursor: (f64, f64),
    focused: bool,
}

impl WindowState {
    /// Apply a native event to the mirror
    fn apply(&mut self, event: &Event) {
        match *event {
            Event::WindowResize { width, height } => {
                self.width = width;
                self.height = height;
            }
            Event::BufferResize { width, height } => {
                self.buffer_width = width;
                self.buffer_height = height;
            }
            Event::WindowMove { x, y } => {
                self.xpos = x;
                self.ypos = y;
            }
            Event::WindowFocus { focused } => self.focused = focused,
            Event::MouseMove { x, y } => self.cursor = (x, y),
            _ => {}
        }
    }
}

/// Application-facing window
///
/// Single threaded: create, poll and swap from the thread that owns the window.
pub struct Window {
    backend: Box<dyn WindowBackend>,
    state: WindowState,
    listeners: EventListeners,
    keys: Vec<KeyHandle>,
}

impl Window {
    /// Create the native window and OpenGL context described by `config`
    ///
    /// # Errors
    /// Fails if the library cannot be initialised or the window/context cannot be created.
    /// Nothing native stays alive on failure.
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let backend = GlfwBackend::create(config)?;
        Ok(Self::with_backend(Box::new(backend), config))
    }

    pub(crate) fn with_backend(mut backend: Box<dyn WindowBackend>, config: &WindowConfig) -> Self {
        let (native_x, native_y) = backend.position();
        let xpos = config.xpos.unwrap_or(native_x);
        let ypos = config.ypos.unwrap_or(native_y);
        backend.set_position(xpos, ypos);

        let (width, height) = backend.size();
        let (buffer_width, buffer_height) = backend.framebuffer_size();
        let cursor = backend.cursor_position();

        let state = WindowState {
            title: config.title.clone(),
            width,
            height,
            buffer_width,
            buffer_height,
            xpos,
            ypos,
            cursor,
            focused: true,
        };
        log::debug!("Window state initialised: {state:?}");

        Self {
            backend,
            state,
            listeners: EventListeners::new(),
            keys: Vec::new(),
        }
    }

    /// Check if the window should close
    pub fn should_close(&self) -> bool {
        self.backend.should_close()
    }

    /// Set whether the window should close
    pub fn set_should_close(&mut self, should_close: bool) {
        self.backend.set_should_close(should_close);
    }

    /// Window title
    pub fn title(&self) -> &str {
        &self.state.title
    }

    /// Set the window title
    pub fn set_title(&mut self, title: &str) {
        self.backend.set_title(title);
        self.state.title = title.to_string();
    }

    /// Logical width in screen coordinates
    pub const fn width(&self) -> i32 {
        self.state.width
    }

    /// Logical height in screen coordinates
    pub const fn height(&self) -> i32 {
        self.state.height
    }

    /// Framebuffer width in pixels
    pub const fn buffer_width(&self) -> i32 {
        self.state.buffer_width
    }

    /// Framebuffer height in pixels
    pub const fn buffer_height(&self) -> i32 {
        self.state.buffer_height
    }

    /// Last reported x position
    pub const fn xpos(&self) -> i32 {
        self.state.xpos
    }

    /// Last reported y position
    pub const fn ypos(&self) -> i32 {
        self.state.ypos
    }

    /// Last reported cursor position relative to the client area
    pub const fn cursor_position(&self) -> (f64, f64) {
        self.state.cursor
    }

    /// Whether the window had input focus at the last poll
    pub const fn is_focused(&self) -> bool {
        self.state.focused
    }

    /// Ask the window system to move the window
    ///
    /// Not validated. [`Window::xpos`] / [`Window::ypos`] change once the move is reported
    /// during a later [`Window::poll`].
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.backend.set_position(x, y);
    }

    /// Present the back buffer
    pub fn swap(&mut self) {
        self.backend.swap_buffers();
    }

    /// Sample tracked keys, then process pending native events and notify listeners
    pub fn poll(&mut self) {
        for key in &self.keys {
            key.update(self.backend.key_action(key.code()).is_down());
        }

        for event in self.backend.poll_events() {
            self.state.apply(&event);
            self.listeners.dispatch(&event);
        }
    }

    /// Seconds since the windowing library was initialised
    pub fn time(&self) -> f64 {
        self.backend.time()
    }

    /// Register a listener invoked for every event of `event_type` during [`Window::poll`]
    pub fn add_event_listener(
        &mut self,
        event_type: EventType,
        listener: impl FnMut(&Event) + 'static,
    ) -> ListenerId {
        self.listeners.add(event_type, listener)
    }

    /// Remove a listener; unknown ids are ignored
    pub fn remove_event_listener(&mut self, event_type: EventType, id: ListenerId) -> bool {
        self.listeners.remove(event_type, id)
    }

    /// Number of listeners registered for `event_type`
    pub fn listener_count(&self, event_type: EventType) -> usize {
        self.listeners.count(event_type)
    }

    /// Start tracking a key; every call creates a new independent handle
    pub fn make_key(&mut self, code: KeyCode) -> KeyHandle {
        let key = TrackedKey::make(code);
        self.keys.push(Rc::clone(&key));
        key
    }

    /// Immediate native state of a key, independent of tracked key handles
    pub fn get_key(&self, code: KeyCode) -> KeyAction {
        self.backend.key_action(code)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Window {{ title: {:?}, width: {}, height: {}, buffer_width: {}, buffer_height: {} }}",
            self.state.title,
            self.state.width,
            self.state.height,
            self.state.buffer_width,
            self.state.buffer_height
        )
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("state", &self.state)
            .field("listeners", &self.listeners)
            .field("keys", &self.keys.len())
            .finish_non_exhaustive()
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        log::info!("Closing window '{}'", self.state.title);
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MockBackend, MockNative};
    use super::*;
    use crate::input::Modifiers;
    use std::cell::RefCell;

    fn mock_window(config: &WindowConfig) -> (Window, Rc<RefCell<MockNative>>) {
        let width = i32::try_from(config.width).unwrap();
        let height = i32::try_from(config.height).unwrap();
        let (backend, native) = MockBackend::new(width, height);
        (Window::with_backend(Box::new(backend), config), native)
    }

    fn recorder(window: &mut Window, event_type: EventType) -> (ListenerId, Rc<RefCell<Vec<Event>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = window.add_event_listener(event_type, move |event| sink.borrow_mut().push(event.clone()));
        (id, seen)
    }

    #[test]
    fn test_construction_reflects_config() {
        let (window, _native) = mock_window(&WindowConfig::new("t", 800, 600));
        assert_eq!(window.width(), 800);
        assert_eq!(window.height(), 600);
        assert_eq!(window.buffer_width(), 1600);
        assert_eq!(window.buffer_height(), 1200);
        assert_eq!(window.title(), "t");
        assert!(!window.should_close());
    }

    #[test]
    fn test_unset_position_keeps_native_placement() {
        let (window, native) = mock_window(&WindowConfig::default());
        assert_eq!((window.xpos(), window.ypos()), (100, 80));
        assert_eq!(native.borrow().position_requests, vec![(100, 80)]);
    }

    #[test]
    fn test_position_axes_apply_independently() {
        let mut config = WindowConfig::default();
        config.ypos = Some(5);
        let (window, native) = mock_window(&config);
        assert_eq!((window.xpos(), window.ypos()), (100, 5));
        assert_eq!(native.borrow().position_requests, vec![(100, 5)]);
    }

    #[test]
    fn test_drop_releases_native_window_once() {
        let (window, native) = mock_window(&WindowConfig::default());
        assert_eq!(native.borrow().releases, 0);
        drop(window);
        assert_eq!(native.borrow().releases, 1);
    }

    #[test]
    fn test_should_close_after_close_signal() {
        let (mut window, native) = mock_window(&WindowConfig::default());
        assert!(!window.should_close());
        native.borrow_mut().close_requested = true;
        window.poll();
        assert!(window.should_close());
        assert_eq!(native.borrow().polls, 1);

        window.set_should_close(false);
        assert!(!window.should_close());
    }

    #[test]
    fn test_listener_fires_once_and_not_after_removal() {
        let (mut window, native) = mock_window(&WindowConfig::default());
        let (id, seen) = recorder(&mut window, EventType::WindowResize);

        native.borrow_mut().push(Event::WindowResize { width: 320, height: 200 });
        window.poll();
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(window.width(), 320);
        assert_eq!(window.height(), 200);

        assert!(window.remove_event_listener(EventType::WindowResize, id));
        native.borrow_mut().push(Event::WindowResize { width: 640, height: 400 });
        window.poll();
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(window.width(), 640);
    }

    #[test]
    fn test_removal_miss_is_silent() {
        let (mut window, native) = mock_window(&WindowConfig::default());
        let (id, seen) = recorder(&mut window, EventType::KeyDown);

        assert!(!window.remove_event_listener(EventType::KeyUp, id));
        assert_eq!(window.listener_count(EventType::KeyDown), 1);

        native.borrow_mut().push(Event::KeyDown {
            key: KeyCode::Space,
            scancode: 65,
            mods: Modifiers::empty(),
            repeat: false,
        });
        window.poll();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_same_closure_registered_twice_gets_distinct_ids() {
        let (mut window, native) = mock_window(&WindowConfig::default());
        let count = Rc::new(RefCell::new(0));
        let mut ids = Vec::new();
        for _ in 0..2 {
            let count = Rc::clone(&count);
            ids.push(window.add_event_listener(EventType::MouseWheel, move |_| {
                *count.borrow_mut() += 1;
            }));
        }
        assert_ne!(ids[0], ids[1]);

        native.borrow_mut().push(Event::MouseWheel { delta_x: 0.0, delta_y: 1.0 });
        window.poll();
        assert_eq!(*count.borrow(), 2);

        window.remove_event_listener(EventType::MouseWheel, ids[0]);
        native.borrow_mut().push(Event::MouseWheel { delta_x: 0.0, delta_y: -1.0 });
        window.poll();
        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn test_set_position_reflected_after_poll() {
        let (mut window, _native) = mock_window(&WindowConfig::default());
        window.set_position(-30, 2000);
        assert_eq!((window.xpos(), window.ypos()), (100, 80));
        window.poll();
        assert_eq!((window.xpos(), window.ypos()), (-30, 2000));
    }

    #[test]
    fn test_cursor_read_from_native_at_construction() {
        let (mut window, native) = mock_window(&WindowConfig::default());
        assert_eq!(window.cursor_position(), (64.0, 48.0));
        native.borrow_mut().push(Event::MouseMove { x: 1.0, y: 2.0 });
        window.poll();
        assert_eq!(window.cursor_position(), (1.0, 2.0));
    }

    #[test]
    fn test_buffer_resize_and_cursor_update_mirror() {
        let (mut window, native) = mock_window(&WindowConfig::default());
        {
            let mut native = native.borrow_mut();
            native.push(Event::BufferResize { width: 10, height: 12 });
            native.push(Event::MouseMove { x: 3.5, y: 4.0 });
            native.push(Event::WindowFocus { focused: false });
        }
        window.poll();
        assert_eq!((window.buffer_width(), window.buffer_height()), (10, 12));
        assert_eq!(window.cursor_position(), (3.5, 4.0));
        assert!(!window.is_focused());
    }

    #[test]
    fn test_make_key_does_not_deduplicate() {
        let (mut window, _native) = mock_window(&WindowConfig::default());
        let a = window.make_key(KeyCode::Escape);
        let b = window.make_key(KeyCode::Escape);
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(window.keys.len(), 2);
    }

    #[test]
    fn test_tracked_keys_sampled_on_poll() {
        let (mut window, native) = mock_window(&WindowConfig::default());
        let escape = window.make_key(KeyCode::Escape);
        let space = window.make_key(KeyCode::Space);

        native.borrow_mut().keys.insert(KeyCode::Escape, KeyAction::Press);
        window.poll();
        assert!(escape.is_clicked());
        assert!(space.is_released());

        window.poll();
        assert!(escape.is_pressed());
        assert!(!escape.is_clicked());

        native.borrow_mut().keys.insert(KeyCode::Escape, KeyAction::Release);
        window.poll();
        assert!(escape.is_released());
    }

    #[test]
    fn test_get_key_reads_native_state_directly() {
        let (mut window, native) = mock_window(&WindowConfig::default());
        let tracked = window.make_key(KeyCode::A);
        native.borrow_mut().keys.insert(KeyCode::A, KeyAction::Repeat);

        assert_eq!(window.get_key(KeyCode::A), KeyAction::Repeat);
        // Handles only change on poll
        assert!(tracked.is_released());
        assert_eq!(window.get_key(KeyCode::B), KeyAction::Release);
    }

    #[test]
    fn test_swap_title_and_time_forwarded() {
        let (mut window, native) = mock_window(&WindowConfig::default());
        native.borrow_mut().time = 1.25;
        window.swap();
        window.swap();
        window.set_title("julia");

        let native = native.borrow();
        assert_eq!(native.swaps, 2);
        assert_eq!(native.titles, vec!["julia".to_string()]);
        assert_eq!(window.title(), "julia");
        assert!((window.time() - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        let (window, _native) = mock_window(&WindowConfig::new("t", 800, 600));
        assert_eq!(
            window.to_string(),
            "Window { title: \"t\", width: 800, height: 600, buffer_width: 1600, buffer_height: 1200 }"
        );
    }

    #[test]
    fn test_zero_size_rejected_before_native_calls() {
        let result = Window::new(&WindowConfig::new("t", 0, 600));
        assert!(matches!(result, Err(WindowError::InvalidSize { width: 0, height: 600 })));
    }
}
