//! Window and input events
//!
//! Events are produced by the window backend while polling and handed to listeners
//! registered per [`EventType`]. Listeners are kept in one bucket per type, so adding or
//! removing a listener never touches another type's listeners.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::input::{KeyCode, Modifiers, MouseButton};

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A single file was dropped on the window
    FileDrop,
    /// Several files were dropped on the window at once
    FilesDrop,
    /// Logical window size changed
    WindowResize,
    /// Window moved on screen
    WindowMove,
    /// Window gained or lost input focus
    WindowFocus,
    /// Framebuffer size changed
    BufferResize,
    /// Cursor moved
    MouseMove,
    /// Mouse button went down
    MousePress,
    /// Mouse button went up
    MouseRelease,
    /// Scroll wheel or trackpad scroll
    MouseWheel,
    /// Key went down or auto-repeated
    KeyDown,
    /// Key went up
    KeyUp,
    /// Text input produced a character
    KeyTyped,
}

impl EventType {
    /// Categories every event of this type belongs to
    pub const fn category(self) -> EventCategory {
        match self {
            Self::FileDrop | Self::FilesDrop => EventCategory::APPLICATION,
            Self::WindowResize | Self::WindowMove | Self::WindowFocus => EventCategory::WINDOW,
            Self::BufferResize => EventCategory::WINDOW.union(EventCategory::BUFFER),
            Self::MouseMove | Self::MousePress | Self::MouseRelease | Self::MouseWheel => {
                EventCategory::MOUSE
            }
            Self::KeyDown | Self::KeyUp | Self::KeyTyped => EventCategory::KEYBOARD,
        }
    }
}

bitflags::bitflags! {
    /// Coarse grouping of event types
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventCategory: u8 {
        /// Application level events such as file drops
        const APPLICATION = 1 << 1;
        /// Window geometry and focus
        const WINDOW = 1 << 2;
        /// Framebuffer changes
        const BUFFER = 1 << 3;
        /// Keyboard input
        const KEYBOARD = 1 << 4;
        /// Mouse input
        const MOUSE = 1 << 5;
    }
}

/// An event delivered to listeners during [`crate::Window::poll`]
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// One file dropped
    FileDrop {
        /// Dropped path
        path: PathBuf,
    },
    /// Two or more files dropped
    FilesDrop {
        /// Dropped paths in the order the window system reported them
        paths: Vec<PathBuf>,
    },
    /// Logical size changed
    WindowResize {
        /// New width in screen coordinates
        width: i32,
        /// New height in screen coordinates
        height: i32,
    },
    /// Window moved
    WindowMove {
        /// New x position of the client area
        x: i32,
        /// New y position of the client area
        y: i32,
    },
    /// Focus changed
    WindowFocus {
        /// True when the window now has focus
        focused: bool,
    },
    /// Framebuffer size changed
    BufferResize {
        /// New width in pixels
        width: i32,
        /// New height in pixels
        height: i32,
    },
    /// Cursor moved
    MouseMove {
        /// Cursor x relative to the client area
        x: f64,
        /// Cursor y relative to the client area
        y: f64,
    },
    /// Mouse button pressed
    MousePress {
        /// Button
        button: MouseButton,
        /// Held modifiers
        mods: Modifiers,
        /// Cursor x at the time of the press
        x: f64,
        /// Cursor y at the time of the press
        y: f64,
    },
    /// Mouse button released
    MouseRelease {
        /// Button
        button: MouseButton,
        /// Held modifiers
        mods: Modifiers,
        /// Cursor x at the time of the release
        x: f64,
        /// Cursor y at the time of the release
        y: f64,
    },
    /// Scroll
    MouseWheel {
        /// Horizontal scroll offset
        delta_x: f64,
        /// Vertical scroll offset
        delta_y: f64,
    },
    /// Key pressed or repeated
    KeyDown {
        /// Key
        key: KeyCode,
        /// Platform scancode
        scancode: i32,
        /// Held modifiers
        mods: Modifiers,
        /// True when generated by key auto-repeat
        repeat: bool,
    },
    /// Key released
    KeyUp {
        /// Key
        key: KeyCode,
        /// Platform scancode
        scancode: i32,
        /// Held modifiers
        mods: Modifiers,
    },
    /// Character input
    KeyTyped {
        /// Unicode character produced
        codepoint: char,
    },
}

impl Event {
    /// Build the drop event matching the number of paths
    ///
    /// Returns `None` for an empty list.
    pub fn from_dropped_paths(mut paths: Vec<PathBuf>) -> Option<Self> {
        match paths.len() {
            0 => None,
            1 => paths.pop().map(|path| Self::FileDrop { path }),
            _ => Some(Self::FilesDrop { paths }),
        }
    }

    /// Type bucket this event is dispatched to
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::FileDrop { .. } => EventType::FileDrop,
            Self::FilesDrop { .. } => EventType::FilesDrop,
            Self::WindowResize { .. } => EventType::WindowResize,
            Self::WindowMove { .. } => EventType::WindowMove,
            Self::WindowFocus { .. } => EventType::WindowFocus,
            Self::BufferResize { .. } => EventType::BufferResize,
            Self::MouseMove { .. } => EventType::MouseMove,
            Self::MousePress { .. } => EventType::MousePress,
            Self::MouseRelease { .. } => EventType::MouseRelease,
            Self::MouseWheel { .. } => EventType::MouseWheel,
            Self::KeyDown { .. } => EventType::KeyDown,
            Self::KeyUp { .. } => EventType::KeyUp,
            Self::KeyTyped { .. } => EventType::KeyTyped,
        }
    }

    /// Categories of this event
    pub const fn category(&self) -> EventCategory {
        self.event_type().category()
    }

    /// True if this event belongs to any of the given categories
    pub const fn is_in_category(&self, category: EventCategory) -> bool {
        self.category().intersects(category)
    }

    /// Short snake_case name of the event
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FileDrop { .. } => "drop_event",
            Self::FilesDrop { .. } => "drops_event",
            Self::WindowResize { .. } => "window_resize_event",
            Self::WindowMove { .. } => "window_move_event",
            Self::WindowFocus { .. } => "window_focus_event",
            Self::BufferResize { .. } => "buffer_resize_event",
            Self::MouseMove { .. } => "mouse_move_event",
            Self::MousePress { .. } => "mouse_press_event",
            Self::MouseRelease { .. } => "mouse_release_event",
            Self::MouseWheel { .. } => "mouse_wheel_event",
            Self::KeyDown { .. } => "key_down_event",
            Self::KeyUp { .. } => "key_up_event",
            Self::KeyTyped { .. } => "key_typed_event",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ", self.name())?;
        match self {
            Self::FileDrop { path } => write!(f, "path: {:?}", path.display().to_string())?,
            Self::FilesDrop { paths } => {
                write!(f, "size: {}, paths: [", paths.len())?;
                for (i, path) in paths.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", path.display().to_string())?;
                }
                write!(f, "]")?;
            }
            Self::WindowResize { width, height } | Self::BufferResize { width, height } => {
                write!(f, "width: {width}, height: {height}")?;
            }
            Self::WindowMove { x, y } => write!(f, "x: {x}, y: {y}")?,
            Self::WindowFocus { focused } => write!(f, "focus: {focused}")?,
            Self::MouseMove { x, y } => write!(f, "x: {x}, y: {y}")?,
            Self::MousePress { button, mods, x, y } | Self::MouseRelease { button, mods, x, y } => {
                write!(f, "button: {button}, mods: {}, x: {x}, y: {y}", mods.bits())?;
            }
            Self::MouseWheel { delta_x, delta_y } => {
                write!(f, "delta_x: {delta_x}, delta_y: {delta_y}")?;
            }
            Self::KeyDown { key, scancode, mods, repeat } => write!(
                f,
                "key: {}, scan: {scancode}, mods: {}, is_repeat: {repeat}",
                key.raw(),
                mods.bits()
            )?,
            Self::KeyUp { key, scancode, mods } => write!(
                f,
                "key: {}, scan: {scancode}, mods: {}",
                key.raw(),
                mods.bits()
            )?,
            Self::KeyTyped { codepoint } => write!(f, "codepoint: {codepoint:?}")?,
        }
        write!(f, " }}")
    }
}

/// Identifies one listener registration
///
/// Ids are handed out in increasing order and never reused by the same registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Boxed listener callback
pub type Listener = Box<dyn FnMut(&Event)>;

/// Listener registry keyed by event type
#[derive(Default)]
pub struct EventListeners {
    next_id: u64,
    buckets: HashMap<EventType, HashMap<ListenerId, Listener>>,
}

impl EventListeners {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for a specific event type
    pub fn add(&mut self, event_type: EventType, listener: impl FnMut(&Event) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.buckets
            .entry(event_type)
            .or_default()
            .insert(id, Box::new(listener));
        log::debug!("Added {:?} listener #{}", event_type, id.0);
        id
    }

    /// Remove a listener from its bucket
    ///
    /// Returns false if no such registration exists.
    pub fn remove(&mut self, event_type: EventType, id: ListenerId) -> bool {
        let removed = self
            .buckets
            .get_mut(&event_type)
            .and_then(|bucket| bucket.remove(&id))
            .is_some();
        if removed {
            log::debug!("Removed {:?} listener #{}", event_type, id.0);
        }
        removed
    }

    /// Number of listeners registered for a type
    pub fn count(&self, event_type: EventType) -> usize {
        self.buckets.get(&event_type).map_or(0, HashMap::len)
    }

    /// Invoke every listener registered for the event's type
    pub fn dispatch(&mut self, event: &Event) {
        if let Some(bucket) = self.buckets.get_mut(&event.event_type()) {
            log::trace!("Dispatching {} to {} listener(s)", event, bucket.len());
            for listener in bucket.values_mut() {
                listener(event);
            }
        }
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<_, _> = self
            .buckets
            .iter()
            .map(|(event_type, bucket)| (*event_type, bucket.len()))
            .collect();
        f.debug_struct("EventListeners")
            .field("next_id", &self.next_id)
            .field("buckets", &counts)
            .finish()
    }
}
