//! Keybinding registry.
//!
//! Single source of truth for the shortcuts listed in the help panel.

/// Where a keybinding applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Global,
    Pagination,
    MultiSelect,
    ConfirmDialog,
}

impl KeyContext {
    /// Section heading for the help panel.
    pub fn display(&self) -> &'static str {
        match self {
            KeyContext::Global => "Global",
            KeyContext::Pagination => "Pagination & Filtering",
            KeyContext::MultiSelect => "Multi-Select & Delete",
            KeyContext::ConfirmDialog => "Confirmation Dialog",
        }
    }

    fn all() -> [KeyContext; 4] {
        [
            KeyContext::Global,
            KeyContext::Pagination,
            KeyContext::MultiSelect,
            KeyContext::ConfirmDialog,
        ]
    }
}

/// A documented keybinding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    /// Key label, e.g. `"Ctrl+C"`.
    pub key: &'static str,
    /// What the key does.
    pub description: &'static str,
    /// Where it applies.
    pub context: KeyContext,
}

const fn bind(key: &'static str, description: &'static str, context: KeyContext) -> Keybinding {
    Keybinding {
        key,
        description,
        context,
    }
}

/// All keybindings in display order.
pub fn get_keybindings() -> Vec<Keybinding> {
    use KeyContext::*;

    vec![
        bind("Tab", "Switch between tables", Global),
        bind("1 / 2", "Jump to table", Global),
        bind("?", "Toggle this help", Global),
        bind("q", "Quit", Global),
        bind("Ctrl+C", "Quit immediately", Global),
        bind("j / ↓", "Move down", Pagination),
        bind("k / ↑", "Move up", Pagination),
        bind("l / →", "Next page", Pagination),
        bind("h / ←", "Previous page", Pagination),
        bind("g / G", "First / last page", Pagination),
        bind("/", "Search", Pagination),
        bind("s", "Cycle sort column", Pagination),
        bind("o", "Toggle sort order", Pagination),
        bind("n", "Cycle items per page", Pagination),
        bind("j / ↓", "Move down", MultiSelect),
        bind("k / ↑", "Move up", MultiSelect),
        bind("Space", "Toggle row selection", MultiSelect),
        bind("a", "Select all / none", MultiSelect),
        bind("c", "Clear selection", MultiSelect),
        bind("d", "Delete row", MultiSelect),
        bind("D", "Delete selected rows", MultiSelect),
        bind("Enter", "Confirm delete", ConfirmDialog),
        bind("Esc", "Cancel", ConfirmDialog),
    ]
}

/// Short hint line for the status bar of a context.
///
/// Keys are wrapped in brackets so the help bar can highlight them.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Global => "[Tab] switch table  [?] help  [q] quit",
        KeyContext::Pagination => {
            "[/] search  [h/l] page  [s] sort  [o] order  [n] per page  [Tab] switch  [?] help"
        }
        KeyContext::MultiSelect => {
            "[Space] select  [a] all  [d] delete  [D] delete selected  [Tab] switch  [?] help"
        }
        KeyContext::ConfirmDialog => "[Enter] confirm  [Esc] cancel",
    }
}

/// Keybindings grouped by context, in context order.
pub fn get_keybindings_grouped() -> Vec<(KeyContext, Vec<Keybinding>)> {
    let bindings = get_keybindings();
    KeyContext::all()
        .into_iter()
        .map(|context| {
            let group = bindings
                .iter()
                .filter(|b| b.context == context)
                .cloned()
                .collect();
            (context, group)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_covers_every_binding() {
        let grouped = get_keybindings_grouped();
        let total: usize = grouped.iter().map(|(_, b)| b.len()).sum();
        assert_eq!(total, get_keybindings().len());
        assert_eq!(grouped[0].0, KeyContext::Global);
    }

    #[test]
    fn test_context_hints_are_bracketed() {
        for context in KeyContext::all() {
            let hints = get_context_hints(context);
            assert!(hints.starts_with('['), "{}", context.display());
        }
    }

    #[test]
    fn test_every_context_has_bindings() {
        for (context, bindings) in get_keybindings_grouped() {
            assert!(!bindings.is_empty(), "{} has no bindings", context.display());
        }
    }
}
