//! Application views (screens).

mod help;
mod multi_select;
mod pagination;

pub use help::{HelpAction, HelpView};
pub use multi_select::{MultiSelectAction, MultiSelectView};
pub use pagination::PaginationView;
