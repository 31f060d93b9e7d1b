//! Scripted window backend for tests

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::backend::WindowBackend;
use crate::events::Event;
use crate::input::{KeyAction, KeyCode};

/// Native state shared between a [`MockBackend`] and the test driving it
#[derive(Debug, Default)]
pub(crate) struct MockNative {
    pub size: (i32, i32),
    pub framebuffer_size: (i32, i32),
    pub position: (i32, i32),
    pub cursor: (f64, f64),
    pub should_close: bool,
    pub close_requested: bool,
    pub pending: Vec<Event>,
    pub keys: HashMap<KeyCode, KeyAction>,
    pub time: f64,
    pub titles: Vec<String>,
    pub position_requests: Vec<(i32, i32)>,
    pub swaps: u32,
    pub polls: u32,
    pub releases: u32,
}

impl MockNative {
    /// Queue an event for the next poll
    pub fn push(&mut self, event: Event) {
        self.pending.push(event);
    }
}

pub(crate) struct MockBackend {
    native: Rc<RefCell<MockNative>>,
}

impl MockBackend {
    /// Backend reporting a framebuffer at twice the logical size
    pub fn new(width: i32, height: i32) -> (Self, Rc<RefCell<MockNative>>) {
        let native = Rc::new(RefCell::new(MockNative {
            size: (width, height),
            framebuffer_size: (width * 2, height * 2),
            position: (100, 80),
            cursor: (64.0, 48.0),
            ..MockNative::default()
        }));
        (Self { native: Rc::clone(&native) }, native)
    }
}

impl WindowBackend for MockBackend {
    fn should_close(&self) -> bool {
        self.native.borrow().should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.native.borrow_mut().should_close = should_close;
    }

    fn size(&self) -> (i32, i32) {
        self.native.borrow().size
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        self.native.borrow().framebuffer_size
    }

    fn position(&self) -> (i32, i32) {
        self.native.borrow().position
    }

    fn set_position(&mut self, x: i32, y: i32) {
        let mut native = self.native.borrow_mut();
        native.position_requests.push((x, y));
        // Window systems report the move asynchronously.
        native.pending.push(Event::WindowMove { x, y });
    }

    fn cursor_position(&self) -> (f64, f64) {
        self.native.borrow().cursor
    }

    fn set_title(&mut self, title: &str) {
        self.native.borrow_mut().titles.push(title.to_string());
    }

    fn swap_buffers(&mut self) {
        self.native.borrow_mut().swaps += 1;
    }

    fn poll_events(&mut self) -> Vec<Event> {
        let mut native = self.native.borrow_mut();
        native.polls += 1;
        if std::mem::take(&mut native.close_requested) {
            native.should_close = true;
        }
        let events = std::mem::take(&mut native.pending);
        for event in &events {
            match *event {
                Event::WindowResize { width, height } => native.size = (width, height),
                Event::BufferResize { width, height } => native.framebuffer_size = (width, height),
                Event::WindowMove { x, y } => native.position = (x, y),
                Event::MouseMove { x, y } => native.cursor = (x, y),
                _ => {}
            }
        }
        events
    }

    fn key_action(&self, key: KeyCode) -> KeyAction {
        self.native
            .borrow()
            .keys
            .get(&key)
            .copied()
            .unwrap_or(KeyAction::Release)
    }

    fn time(&self) -> f64 {
        self.native.borrow().time
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.native.borrow_mut().releases += 1;
    }
}
