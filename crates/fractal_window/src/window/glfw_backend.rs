//! Window management using GLFW
//!
//! Creates an OpenGL window and context and translates GLFW events into [`Event`]s.

use glfw::Context;

use super::backend::WindowBackend;
use super::{WindowError, WindowResult};
use crate::config::WindowConfig;
use crate::events::Event;
use crate::input::{KeyAction, KeyCode, Modifiers, MouseButton};

fn log_glfw_error(error: glfw::Error, description: String) {
    log::error!("GLFW error {error:?}: {description}");
}

/// GLFW window wrapper with proper resource management
pub(crate) struct GlfwBackend {
    // Field order is drop order: window and receiver go before the library handle.
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    glfw: glfw::Glfw,
}

impl GlfwBackend {
    /// Initialise GLFW and create a window with a current OpenGL context
    pub fn create(config: &WindowConfig) -> WindowResult<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(WindowError::InvalidSize {
                width: config.width,
                height: config.height,
            });
        }

        let mut glfw = glfw::init(log_glfw_error)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        let context = &config.context;
        glfw.window_hint(glfw::WindowHint::ContextVersion(context.major, context.minor));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(if context.core_profile {
            glfw::OpenGlProfileHint::Core
        } else {
            glfw::OpenGlProfileHint::Any
        }));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(context.forward_compat));
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or_else(|| WindowError::CreationFailed {
                title: config.title.clone(),
                width: config.width,
                height: config.height,
            })?;

        window.make_current();
        glfw.set_swap_interval(if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        window.set_size_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_pos_polling(true);
        window.set_focus_polling(true);
        window.set_key_polling(true);
        window.set_char_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_scroll_polling(true);
        window.set_drag_and_drop_polling(true);
        window.set_close_polling(true);

        log::info!(
            "Created GLFW window '{}' ({}x{}, OpenGL {}.{})",
            config.title,
            config.width,
            config.height,
            context.major,
            context.minor
        );

        Ok(Self { window, events, glfw })
    }
}

/// Translate a GLFW event; `cursor` is the cursor position reported with mouse buttons
fn translate(event: glfw::WindowEvent, cursor: (f64, f64)) -> Option<Event> {
    use glfw::WindowEvent as W;

    let event = match event {
        W::Size(width, height) => Event::WindowResize { width, height },
        W::FramebufferSize(width, height) => Event::BufferResize { width, height },
        W::Pos(x, y) => Event::WindowMove { x, y },
        W::Focus(focused) => Event::WindowFocus { focused },
        W::CursorPos(x, y) => Event::MouseMove { x, y },
        W::Scroll(delta_x, delta_y) => Event::MouseWheel { delta_x, delta_y },
        W::MouseButton(button, action, mods) => {
            let (x, y) = cursor;
            let button = MouseButton::from_glfw(button);
            let mods = Modifiers::from_glfw(mods);
            match action {
                glfw::Action::Release => Event::MouseRelease { button, mods, x, y },
                glfw::Action::Press | glfw::Action::Repeat => {
                    Event::MousePress { button, mods, x, y }
                }
            }
        }
        W::Key(key, scancode, action, mods) => {
            let key = KeyCode::from_glfw(key);
            let mods = Modifiers::from_glfw(mods);
            match action {
                glfw::Action::Release => Event::KeyUp { key, scancode, mods },
                glfw::Action::Press => Event::KeyDown { key, scancode, mods, repeat: false },
                glfw::Action::Repeat => Event::KeyDown { key, scancode, mods, repeat: true },
            }
        }
        W::Char(codepoint) => Event::KeyTyped { codepoint },
        W::FileDrop(paths) => return Event::from_dropped_paths(paths),
        W::Close => {
            log::debug!("Close requested by the window system");
            return None;
        }
        _ => return None,
    };
    Some(event)
}

impl WindowBackend for GlfwBackend {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn size(&self) -> (i32, i32) {
        self.window.get_size()
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }

    fn position(&self) -> (i32, i32) {
        self.window.get_pos()
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.window.set_pos(x, y);
    }

    fn cursor_position(&self) -> (f64, f64) {
        self.window.get_cursor_pos()
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn poll_events(&mut self) -> Vec<Event> {
        self.glfw.poll_events();
        let cursor = self.window.get_cursor_pos();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| translate(event, cursor))
            .collect()
    }

    fn key_action(&self, key: KeyCode) -> KeyAction {
        if key == KeyCode::Unknown {
            return KeyAction::Release;
        }
        KeyAction::from_glfw(self.window.get_key(key.to_glfw()))
    }

    fn time(&self) -> f64 {
        self.glfw.get_time()
    }
}

impl Drop for GlfwBackend {
    fn drop(&mut self) {
        log::info!("Destroying GLFW window");
    }
}
