//! Event handling for the application.
//!
//! Terminal input is polled by [`EventHandler`] and converted into [`Event`]s.
//! The keybinding registry shown in the help panel lives in `keys`.

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{
    get_context_hints, get_keybindings_grouped, KeyContext, Keybinding,
};

/// Application events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for animations and timers.
    Tick,
}
