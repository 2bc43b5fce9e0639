//! User interface components and views.
//!
//! Views are full screens that own their presentation state; components are
//! the reusable pieces they are built from.

mod components;
pub mod theme;
mod views;

pub use components::{render_context_help, NotificationManager};
pub use theme::{init_theme, Theme};
pub use views::{HelpAction, HelpView, MultiSelectAction, MultiSelectView, PaginationView};
