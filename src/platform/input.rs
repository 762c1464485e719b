//! Keyboard and touch input
//!
//! Browser events only flip flags here. The frame loop snapshots them into a
//! `TickInput` once per simulation step.

use crate::sim::TickInput;

/// A game control, independent of the device that triggered it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

impl Control {
    /// Map a `KeyboardEvent.code`
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Control::Left),
            "ArrowRight" => Some(Control::Right),
            "ArrowUp" => Some(Control::Up),
            "ArrowDown" => Some(Control::Down),
            "Space" => Some(Control::Fire),
            _ => None,
        }
    }

    /// Map an on-screen control button id
    pub fn from_button_id(id: &str) -> Option<Self> {
        match id {
            "leftBtn" => Some(Control::Left),
            "rightBtn" => Some(Control::Right),
            "upBtn" => Some(Control::Up),
            "downBtn" => Some(Control::Down),
            "shootBtn" => Some(Control::Fire),
            _ => None,
        }
    }
}

/// Held directions plus a queued shot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    fire_queued: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed. Returns true if the key is a game control (so the caller
    /// can suppress the browser default, e.g. Space scrolling).
    pub fn key_down(&mut self, code: &str) -> bool {
        match Control::from_key_code(code) {
            Some(control) => {
                self.press(control);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        match Control::from_key_code(code) {
            Some(control) => {
                self.release(control);
                true
            }
            None => false,
        }
    }

    /// Directions are held until released; fire queues one volley
    pub fn press(&mut self, control: Control) {
        match control {
            Control::Left => self.left = true,
            Control::Right => self.right = true,
            Control::Up => self.up = true,
            Control::Down => self.down = true,
            Control::Fire => self.fire_queued = true,
        }
    }

    pub fn release(&mut self, control: Control) {
        match control {
            Control::Left => self.left = false,
            Control::Right => self.right = false,
            Control::Up => self.up = false,
            Control::Down => self.down = false,
            Control::Fire => {}
        }
    }

    /// Touch end / mouse up on any control button
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
        self.up = false;
        self.down = false;
    }

    /// Input for the next step. A queued shot is consumed.
    pub fn snapshot(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            fire: self.fire_queued,
        };
        self.fire_queued = false;
        input
    }
}
