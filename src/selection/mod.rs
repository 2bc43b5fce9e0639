//! Selection and deletion state for the multi-select table.
//!
//! [`SelectionController`] tracks which rows are checked and drives the
//! typed-confirmation delete flow:
//!
//! ```text
//! Idle --request--> Confirming(pending) --confirm--> Deleting --complete--> Idle
//!                        |
//!                        +--cancel--> Idle
//! ```
//!
//! The controller never holds the row collection. Callers pass the current
//! rows in, and [`SelectionController::complete`] hands back the replacement
//! collection for the owner to store.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::data::Row;

/// Phrase that must be typed to confirm a bulk delete.
pub const BULK_CONFIRMATION_PHRASE: &str = "DELETE";

/// A deletion waiting for the user to type the confirmation phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDeletion {
    /// Delete one specific row. The row name is the confirmation phrase.
    Single(Row),
    /// Delete every selected row.
    Bulk,
}

impl PendingDeletion {
    /// The text the user has to type to confirm this deletion.
    pub fn required_phrase(&self) -> &str {
        match self {
            PendingDeletion::Single(row) => &row.name,
            PendingDeletion::Bulk => BULK_CONFIRMATION_PHRASE,
        }
    }

    /// Check typed confirmation text. Case-sensitive, surrounding whitespace ignored.
    pub fn accepts(&self, input: &str) -> bool {
        input.trim() == self.required_phrase()
    }

    /// Whether this is a bulk deletion.
    pub fn is_bulk(&self) -> bool {
        matches!(self, PendingDeletion::Bulk)
    }
}

/// A confirmed deletion, snapshotted at confirm time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteRequest {
    /// Remove a single row by id.
    Single(String),
    /// Remove all of these ids. Sorted for stable logging and comparison.
    Bulk(Vec<String>),
}

impl DeleteRequest {
    /// Check whether the request targets the given id.
    pub fn contains(&self, id: &str) -> bool {
        match self {
            DeleteRequest::Single(target) => target == id,
            DeleteRequest::Bulk(ids) => ids.iter().any(|i| i == id),
        }
    }

    /// Number of ids targeted.
    pub fn len(&self) -> usize {
        match self {
            DeleteRequest::Single(_) => 1,
            DeleteRequest::Bulk(ids) => ids.len(),
        }
    }

    /// Whether no ids are targeted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where the controller is in the delete flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeletionState {
    /// No dialog open.
    #[default]
    Idle,
    /// Dialog open, waiting for a valid confirmation phrase.
    Confirming(PendingDeletion),
    /// Confirmed; waiting for the simulated backend to finish.
    Deleting {
        pending: PendingDeletion,
        request: DeleteRequest,
    },
}

/// Owns the selection set and the confirmation dialog state.
#[derive(Debug, Default)]
pub struct SelectionController {
    /// Ids of checked rows.
    selected: HashSet<String>,
    /// Delete flow state.
    state: DeletionState,
    /// Confirmation text typed so far.
    input: String,
}

impl SelectionController {
    /// Create a controller with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The set of selected ids.
    pub fn selected(&self) -> &HashSet<String> {
        &self.selected
    }

    /// Number of selected ids.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Whether every row in `rows` is selected. False for an empty collection.
    pub fn is_all_selected(&self, rows: &[Row]) -> bool {
        !rows.is_empty() && rows.iter().all(|row| self.selected.contains(&row.id))
    }

    /// Current delete flow state.
    pub fn state(&self) -> &DeletionState {
        &self.state
    }

    /// The pending deletion, if a dialog is open.
    pub fn pending(&self) -> Option<&PendingDeletion> {
        match &self.state {
            DeletionState::Idle => None,
            DeletionState::Confirming(pending) => Some(pending),
            DeletionState::Deleting { pending, .. } => Some(pending),
        }
    }

    /// Whether the confirmation dialog should be shown.
    pub fn is_dialog_open(&self) -> bool {
        !matches!(self.state, DeletionState::Idle)
    }

    /// Whether a confirmed deletion is waiting to complete.
    pub fn is_deleting(&self) -> bool {
        matches!(self.state, DeletionState::Deleting { .. })
    }

    /// The confirmation text typed so far.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the confirm action is enabled.
    pub fn is_confirmation_valid(&self) -> bool {
        match &self.state {
            DeletionState::Confirming(pending) => pending.accepts(&self.input),
            _ => false,
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Flip the selection of one id.
    pub fn toggle(&mut self, id: &str) {
        if !self.is_idle() {
            return;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Select every row, or clear the selection if all rows are already selected.
    ///
    /// Always evaluated against the rows passed in, never a cached copy.
    pub fn toggle_all(&mut self, rows: &[Row]) {
        if !self.is_idle() {
            return;
        }
        if self.is_all_selected(rows) {
            self.selected.clear();
        } else {
            self.selected = rows.iter().map(|row| row.id.clone()).collect();
        }
        debug!(selected = self.selected.len(), "Toggled select all");
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        if self.is_idle() {
            self.selected.clear();
        }
    }

    // ========================================================================
    // Delete flow
    // ========================================================================

    /// Open the confirmation dialog for a single row.
    ///
    /// Silently does nothing if `id` is not in `rows`.
    pub fn request_single_delete(&mut self, id: &str, rows: &[Row]) {
        if !self.is_idle() {
            return;
        }
        let Some(row) = rows.iter().find(|row| row.id == id) else {
            debug!(id, "Delete requested for unknown row, ignoring");
            return;
        };
        debug!(id, name = %row.name, "Confirming single delete");
        self.input.clear();
        self.state = DeletionState::Confirming(PendingDeletion::Single(row.clone()));
    }

    /// Open the confirmation dialog for all selected rows.
    pub fn request_bulk_delete(&mut self) {
        if !self.is_idle() {
            return;
        }
        debug!(selected = self.selected.len(), "Confirming bulk delete");
        self.input.clear();
        self.state = DeletionState::Confirming(PendingDeletion::Bulk);
    }

    /// Replace the confirmation text.
    pub fn set_input(&mut self, input: impl Into<String>) {
        if matches!(self.state, DeletionState::Confirming(_)) {
            self.input = input.into();
        }
    }

    /// Close the dialog without deleting anything.
    ///
    /// Ignored while a confirmed deletion is in flight.
    pub fn cancel(&mut self) {
        if let DeletionState::Confirming(_) = self.state {
            debug!("Delete cancelled");
            self.reset_dialog();
        }
    }

    /// Confirm the pending deletion.
    ///
    /// Returns the request to execute, or `None` if the confirmation text does
    /// not match or a deletion is already in flight. The selection is
    /// snapshotted here for bulk deletes.
    pub fn confirm(&mut self) -> Option<DeleteRequest> {
        if !self.is_confirmation_valid() {
            return None;
        }
        let DeletionState::Confirming(pending) = std::mem::take(&mut self.state) else {
            return None;
        };

        let request = match &pending {
            PendingDeletion::Single(row) => DeleteRequest::Single(row.id.clone()),
            PendingDeletion::Bulk => {
                let mut ids: Vec<String> = self.selected.iter().cloned().collect();
                ids.sort();
                DeleteRequest::Bulk(ids)
            }
        };

        info!(count = request.len(), bulk = pending.is_bulk(), "Delete confirmed");
        self.state = DeletionState::Deleting {
            pending,
            request: request.clone(),
        };
        Some(request)
    }

    /// Finish an in-flight deletion.
    ///
    /// Returns the replacement row collection (order preserved) and resets the
    /// dialog. Returns `None` if `request` is not the one in flight.
    pub fn complete(&mut self, request: &DeleteRequest, rows: &[Row]) -> Option<Vec<Row>> {
        match &self.state {
            DeletionState::Deleting { request: in_flight, .. } if in_flight == request => {}
            _ => {
                debug!(?request, "Ignoring completion for a request that is not in flight");
                return None;
            }
        }

        let remaining: Vec<Row> = rows
            .iter()
            .filter(|row| !request.contains(&row.id))
            .cloned()
            .collect();

        match request {
            DeleteRequest::Single(id) => {
                self.selected.remove(id);
            }
            DeleteRequest::Bulk(_) => self.selected.clear(),
        }

        info!(
            removed = rows.len() - remaining.len(),
            remaining = remaining.len(),
            "Delete completed"
        );
        self.reset_dialog();
        Some(remaining)
    }

    fn is_idle(&self) -> bool {
        matches!(self.state, DeletionState::Idle)
    }

    fn reset_dialog(&mut self) {
        self.state = DeletionState::Idle;
        self.input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_rows;

    fn rows() -> Vec<Row> {
        sample_rows().into_iter().take(15).collect()
    }

    fn ids(rows: &[Row]) -> HashSet<String> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    /// Drive a full confirm/complete cycle and return the new rows.
    fn confirm_and_complete(ctrl: &mut SelectionController, rows: &[Row]) -> Option<Vec<Row>> {
        let request = ctrl.confirm()?;
        ctrl.complete(&request, rows)
    }

    #[test]
    fn test_new_controller_is_idle() {
        let ctrl = SelectionController::new();
        assert_eq!(ctrl.state(), &DeletionState::Idle);
        assert_eq!(ctrl.selected_count(), 0);
        assert_eq!(ctrl.input(), "");
        assert!(!ctrl.is_dialog_open());
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.toggle("003");
        let before = ctrl.selected().clone();

        for row in &rows {
            ctrl.toggle(&row.id);
            ctrl.toggle(&row.id);
            assert_eq!(ctrl.selected(), &before);
        }
    }

    #[test]
    fn test_toggle_all_selects_then_clears() {
        let rows = rows();
        let mut ctrl = SelectionController::new();

        ctrl.toggle_all(&rows);
        assert_eq!(ctrl.selected(), &ids(&rows));
        assert!(ctrl.is_all_selected(&rows));

        ctrl.toggle_all(&rows);
        assert!(ctrl.selected().is_empty());
    }

    #[test]
    fn test_toggle_all_from_partial_selects_everything() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.toggle("001");
        ctrl.toggle("002");

        ctrl.toggle_all(&rows);
        assert_eq!(ctrl.selected_count(), rows.len());
    }

    #[test]
    fn test_toggle_all_uses_current_rows() {
        let mut rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.toggle_all(&rows);

        rows.push(Row::new("099", "Newcomer", "Test"));
        assert!(!ctrl.is_all_selected(&rows));

        ctrl.toggle_all(&rows);
        assert_eq!(ctrl.selected(), &ids(&rows));
    }

    #[test]
    fn test_toggle_all_on_empty_rows() {
        let mut ctrl = SelectionController::new();
        assert!(!ctrl.is_all_selected(&[]));
        ctrl.toggle_all(&[]);
        assert!(ctrl.selected().is_empty());
    }

    #[test]
    fn test_clear_selection() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.toggle_all(&rows);
        ctrl.clear_selection();
        assert_eq!(ctrl.selected_count(), 0);
    }

    #[test]
    fn test_request_single_delete_unknown_id_is_noop() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.request_single_delete("999", &rows);
        assert_eq!(ctrl.state(), &DeletionState::Idle);
        assert!(!ctrl.is_dialog_open());
    }

    #[test]
    fn test_single_delete_requires_exact_name() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.request_single_delete("005", &rows);
        assert_eq!(
            ctrl.pending(),
            Some(&PendingDeletion::Single(Row::new(
                "005",
                "Elite Innovations",
                "Technology"
            )))
        );

        ctrl.set_input("Elite Innovation");
        assert!(!ctrl.is_confirmation_valid());
        assert!(ctrl.confirm().is_none());

        ctrl.set_input("elite innovations");
        assert!(!ctrl.is_confirmation_valid());

        ctrl.set_input("  Elite Innovations ");
        assert!(ctrl.is_confirmation_valid());

        ctrl.set_input("Elite Innovations");
        assert!(ctrl.is_confirmation_valid());
    }

    #[test]
    fn test_single_delete_removes_row_and_selection() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.toggle("005");
        ctrl.toggle("007");

        ctrl.request_single_delete("005", &rows);
        ctrl.set_input("Elite Innovations");
        let remaining = confirm_and_complete(&mut ctrl, &rows).unwrap();

        assert_eq!(remaining.len(), rows.len() - 1);
        assert!(remaining.iter().all(|r| r.id != "005"));
        assert!(!ctrl.is_selected("005"));
        assert!(ctrl.is_selected("007"));
        assert_eq!(ctrl.selected_count(), 1);
    }

    #[test]
    fn test_single_delete_of_unselected_row_keeps_selection() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.toggle("001");
        ctrl.toggle("002");
        let before = ctrl.selected().clone();

        ctrl.request_single_delete("010", &rows);
        ctrl.set_input("Jupiter Industries");
        let remaining = confirm_and_complete(&mut ctrl, &rows).unwrap();

        assert!(remaining.iter().all(|r| r.id != "010"));
        assert_eq!(ctrl.selected(), &before);
    }

    #[test]
    fn test_delete_preserves_row_order() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.request_single_delete("003", &rows);
        ctrl.set_input("Creative Minds LLC");
        let remaining = confirm_and_complete(&mut ctrl, &rows).unwrap();

        let expected: Vec<Row> = rows.iter().filter(|r| r.id != "003").cloned().collect();
        assert_eq!(remaining, expected);
    }

    #[test]
    fn test_bulk_delete_removes_selected_rows() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.toggle("002");
        ctrl.toggle("004");

        ctrl.request_bulk_delete();
        ctrl.set_input("DELETE");
        let remaining = confirm_and_complete(&mut ctrl, &rows).unwrap();

        assert_eq!(remaining.len(), rows.len() - 2);
        assert!(remaining.iter().all(|r| r.id != "002" && r.id != "004"));
        assert!(ctrl.selected().is_empty());
    }

    #[test]
    fn test_bulk_delete_wrong_case_rejected() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.toggle("002");
        ctrl.toggle("004");

        ctrl.request_bulk_delete();
        ctrl.set_input("delete");
        assert!(!ctrl.is_confirmation_valid());
        assert!(ctrl.confirm().is_none());
        assert_eq!(ctrl.state(), &DeletionState::Confirming(PendingDeletion::Bulk));
        assert_eq!(ctrl.selected_count(), 2);
    }

    #[test]
    fn test_bulk_delete_accepts_surrounding_whitespace() {
        let mut ctrl = SelectionController::new();
        ctrl.toggle("001");
        ctrl.request_bulk_delete();
        ctrl.set_input("  DELETE\t");
        assert!(ctrl.is_confirmation_valid());
    }

    #[test]
    fn test_bulk_delete_allowed_with_empty_selection() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.request_bulk_delete();
        assert!(ctrl.is_dialog_open());

        ctrl.set_input("DELETE");
        let remaining = confirm_and_complete(&mut ctrl, &rows).unwrap();
        assert_eq!(remaining, rows);
    }

    #[test]
    fn test_cancel_leaves_rows_and_selection() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.toggle("002");
        let before = ctrl.selected().clone();

        ctrl.request_single_delete("002", &rows);
        ctrl.set_input("Bright");
        ctrl.cancel();
        assert_eq!(ctrl.state(), &DeletionState::Idle);
        assert_eq!(ctrl.input(), "");
        assert_eq!(ctrl.selected(), &before);

        ctrl.request_bulk_delete();
        ctrl.set_input("DELETE");
        ctrl.cancel();
        assert_eq!(ctrl.state(), &DeletionState::Idle);
        assert_eq!(ctrl.input(), "");
        assert_eq!(ctrl.selected(), &before);
    }

    #[test]
    fn test_dialog_resets_after_completion() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.toggle("001");
        ctrl.request_bulk_delete();
        ctrl.set_input("DELETE");
        confirm_and_complete(&mut ctrl, &rows).unwrap();

        assert!(ctrl.pending().is_none());
        assert_eq!(ctrl.input(), "");
        assert!(!ctrl.is_dialog_open());
    }

    #[test]
    fn test_bulk_snapshot_taken_at_confirm() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.toggle("004");
        ctrl.toggle("002");
        ctrl.request_bulk_delete();
        ctrl.set_input("DELETE");

        let request = ctrl.confirm().unwrap();
        assert_eq!(
            request,
            DeleteRequest::Bulk(vec!["002".to_string(), "004".to_string()])
        );
        // Selection edits are ignored while in flight.
        ctrl.toggle("006");
        assert!(!ctrl.is_selected("006"));
        assert!(ctrl.complete(&request, &rows).is_some());
    }

    #[test]
    fn test_double_confirm_is_rejected_while_deleting() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        ctrl.request_single_delete("001", &rows);
        ctrl.set_input("Acme Corporation");

        let first = ctrl.confirm();
        assert!(first.is_some());
        assert!(ctrl.is_deleting());
        assert!(ctrl.confirm().is_none());

        ctrl.cancel();
        assert!(ctrl.is_deleting());

        ctrl.request_single_delete("002", &rows);
        ctrl.request_bulk_delete();
        assert_eq!(
            ctrl.pending(),
            Some(&PendingDeletion::Single(rows[0].clone()))
        );
    }

    #[test]
    fn test_complete_ignores_unknown_request() {
        let rows = rows();
        let mut ctrl = SelectionController::new();
        assert!(ctrl
            .complete(&DeleteRequest::Single("001".to_string()), &rows)
            .is_none());

        ctrl.request_single_delete("001", &rows);
        ctrl.set_input("Acme Corporation");
        let request = ctrl.confirm().unwrap();
        assert!(ctrl
            .complete(&DeleteRequest::Single("002".to_string()), &rows)
            .is_none());
        assert!(ctrl.is_deleting());
        assert!(ctrl.complete(&request, &rows).is_some());
        assert!(ctrl.complete(&request, &rows).is_none());
    }

    #[test]
    fn test_set_input_ignored_when_idle() {
        let mut ctrl = SelectionController::new();
        ctrl.set_input("DELETE");
        assert_eq!(ctrl.input(), "");
    }

    #[test]
    fn test_delete_request_helpers() {
        let single = DeleteRequest::Single("001".to_string());
        assert!(single.contains("001"));
        assert!(!single.contains("002"));
        assert_eq!(single.len(), 1);

        let bulk = DeleteRequest::Bulk(vec![]);
        assert!(bulk.is_empty());
    }
}
