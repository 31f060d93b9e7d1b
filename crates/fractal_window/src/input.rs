//! Keyboard and mouse input types
//!
//! Key codes follow the GLFW key table so raw values coming from the window system map
//! one-to-one onto [`KeyCode`] variants.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

macro_rules! key_codes {
    ($($(#[$meta:meta])* $name:ident = $value:literal,)*) => {
        /// Physical key codes
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum KeyCode {
            $($(#[$meta])* $name = $value,)*
        }

        impl KeyCode {
            /// Every known key code, in table order
            pub const ALL: &'static [KeyCode] = &[$(KeyCode::$name,)*];

            /// Look up a key code from its raw window-system value
            pub const fn from_raw(raw: i32) -> Option<Self> {
                match raw {
                    $($value => Some(KeyCode::$name),)*
                    _ => None,
                }
            }

            /// Map onto the GLFW key enum
            pub(crate) const fn to_glfw(self) -> glfw::Key {
                match self {
                    $(KeyCode::$name => glfw::Key::$name,)*
                }
            }
        }
    };
}

key_codes! {
    /// Unrecognised key
    Unknown = -1,

    /// Space
    Space = 32,
    /// '
    Apostrophe = 39,
    /// ,
    Comma = 44,
    /// -
    Minus = 45,
    /// .
    Period = 46,
    /// /
    Slash = 47,
    /// 0
    Num0 = 48,
    /// 1
    Num1 = 49,
    /// 2
    Num2 = 50,
    /// 3
    Num3 = 51,
    /// 4
    Num4 = 52,
    /// 5
    Num5 = 53,
    /// 6
    Num6 = 54,
    /// 7
    Num7 = 55,
    /// 8
    Num8 = 56,
    /// 9
    Num9 = 57,
    /// ;
    Semicolon = 59,
    /// =
    Equal = 61,
    /// A
    A = 65,
    /// B
    B = 66,
    /// C
    C = 67,
    /// D
    D = 68,
    /// E
    E = 69,
    /// F
    F = 70,
    /// G
    G = 71,
    /// H
    H = 72,
    /// I
    I = 73,
    /// J
    J = 74,
    /// K
    K = 75,
    /// L
    L = 76,
    /// M
    M = 77,
    /// N
    N = 78,
    /// O
    O = 79,
    /// P
    P = 80,
    /// Q
    Q = 81,
    /// R
    R = 82,
    /// S
    S = 83,
    /// T
    T = 84,
    /// U
    U = 85,
    /// V
    V = 86,
    /// W
    W = 87,
    /// X
    X = 88,
    /// Y
    Y = 89,
    /// Z
    Z = 90,
    /// [
    LeftBracket = 91,
    /// \
    Backslash = 92,
    /// ]
    RightBracket = 93,
    /// `
    GraveAccent = 96,
    /// non-US #1
    World1 = 161,
    /// non-US #2
    World2 = 162,

    /// Escape
    Escape = 256,
    /// Enter
    Enter = 257,
    /// Tab
    Tab = 258,
    /// Backspace
    Backspace = 259,
    /// Insert
    Insert = 260,
    /// Delete
    Delete = 261,
    /// Right arrow
    Right = 262,
    /// Left arrow
    Left = 263,
    /// Down arrow
    Down = 264,
    /// Up arrow
    Up = 265,
    /// Page up
    PageUp = 266,
    /// Page down
    PageDown = 267,
    /// Home
    Home = 268,
    /// End
    End = 269,
    /// Caps lock
    CapsLock = 280,
    /// Scroll lock
    ScrollLock = 281,
    /// Num lock
    NumLock = 282,
    /// Print screen
    PrintScreen = 283,
    /// Pause
    Pause = 284,
    /// F1
    F1 = 290,
    /// F2
    F2 = 291,
    /// F3
    F3 = 292,
    /// F4
    F4 = 293,
    /// F5
    F5 = 294,
    /// F6
    F6 = 295,
    /// F7
    F7 = 296,
    /// F8
    F8 = 297,
    /// F9
    F9 = 298,
    /// F10
    F10 = 299,
    /// F11
    F11 = 300,
    /// F12
    F12 = 301,
    /// F13
    F13 = 302,
    /// F14
    F14 = 303,
    /// F15
    F15 = 304,
    /// F16
    F16 = 305,
    /// F17
    F17 = 306,
    /// F18
    F18 = 307,
    /// F19
    F19 = 308,
    /// F20
    F20 = 309,
    /// F21
    F21 = 310,
    /// F22
    F22 = 311,
    /// F23
    F23 = 312,
    /// F24
    F24 = 313,
    /// F25
    F25 = 314,
    /// Keypad 0
    Kp0 = 320,
    /// Keypad 1
    Kp1 = 321,
    /// Keypad 2
    Kp2 = 322,
    /// Keypad 3
    Kp3 = 323,
    /// Keypad 4
    Kp4 = 324,
    /// Keypad 5
    Kp5 = 325,
    /// Keypad 6
    Kp6 = 326,
    /// Keypad 7
    Kp7 = 327,
    /// Keypad 8
    Kp8 = 328,
    /// Keypad 9
    Kp9 = 329,
    /// Keypad .
    KpDecimal = 330,
    /// Keypad /
    KpDivide = 331,
    /// Keypad *
    KpMultiply = 332,
    /// Keypad -
    KpSubtract = 333,
    /// Keypad +
    KpAdd = 334,
    /// Keypad enter
    KpEnter = 335,
    /// Keypad =
    KpEqual = 336,
    /// Left shift
    LeftShift = 340,
    /// Left control
    LeftControl = 341,
    /// Left alt
    LeftAlt = 342,
    /// Left super
    LeftSuper = 343,
    /// Right shift
    RightShift = 344,
    /// Right control
    RightControl = 345,
    /// Right alt
    RightAlt = 346,
    /// Right super
    RightSuper = 347,
    /// Menu
    Menu = 348,
}

impl KeyCode {
    /// Raw window-system value of this key
    pub const fn raw(self) -> i32 {
        self as i32
    }

    pub(crate) fn from_glfw(key: glfw::Key) -> Self {
        Self::from_raw(key as i32).unwrap_or(Self::Unknown)
    }
}

/// State reported for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Key is up
    Release,
    /// Key went down
    Press,
    /// Key is held and auto-repeating
    Repeat,
}

impl KeyAction {
    /// True for `Press` and `Repeat`
    pub const fn is_down(self) -> bool {
        matches!(self, Self::Press | Self::Repeat)
    }

    pub(crate) const fn from_glfw(action: glfw::Action) -> Self {
        match action {
            glfw::Action::Release => Self::Release,
            glfw::Action::Press => Self::Press,
            glfw::Action::Repeat => Self::Repeat,
        }
    }
}

bitflags::bitflags! {
    /// Modifier keys held during a key or mouse button event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        /// Shift
        const SHIFT = 0x0001;
        /// Control
        const CONTROL = 0x0002;
        /// Alt
        const ALT = 0x0004;
        /// Super / command / windows key
        const SUPER = 0x0008;
        /// Caps lock active
        const CAPS_LOCK = 0x0010;
        /// Num lock active
        const NUM_LOCK = 0x0020;
    }
}

impl Modifiers {
    pub(crate) fn from_glfw(mods: glfw::Modifiers) -> Self {
        Self::from_bits_truncate(mods.bits() as u32)
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// Any other button, by zero-based index
    Other(i32),
}

impl MouseButton {
    pub(crate) const fn from_glfw(button: glfw::MouseButton) -> Self {
        match button {
            glfw::MouseButton::Button1 => Self::Left,
            glfw::MouseButton::Button2 => Self::Right,
            glfw::MouseButton::Button3 => Self::Middle,
            other => Self::Other(other as i32),
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Middle => write!(f, "middle"),
            Self::Other(index) => write!(f, "button{index}"),
        }
    }
}

/// Number of samples kept per tracked key
const HISTORY_LEN: usize = 2;

/// A key whose down/up state is sampled once per [`crate::Window::poll`]
///
/// Slot 0 holds the latest sample, slot 1 the one before it.
#[derive(Debug)]
pub struct TrackedKey {
    code: KeyCode,
    history: Cell<[bool; HISTORY_LEN]>,
}

/// Shared handle to a tracked key
pub type KeyHandle = Rc<TrackedKey>;

impl TrackedKey {
    /// Create a key in the released state
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            history: Cell::new([false; HISTORY_LEN]),
        }
    }

    /// Create a shared handle
    pub fn make(code: KeyCode) -> KeyHandle {
        Rc::new(Self::new(code))
    }

    /// Key this handle tracks
    pub const fn code(&self) -> KeyCode {
        self.code
    }

    /// Record a new sample, pushing the current one into history
    pub fn update(&self, down: bool) {
        let [current, _] = self.history.get();
        self.history.set([down, current]);
    }

    /// Key is down in the latest sample
    pub fn is_pressed(&self) -> bool {
        self.history.get()[0]
    }

    /// Key is up in the latest sample
    pub fn is_released(&self) -> bool {
        !self.history.get()[0]
    }

    /// Key went down between the previous sample and the latest one
    pub fn is_clicked(&self) -> bool {
        let [current, previous] = self.history.get();
        current && !previous
    }
}
