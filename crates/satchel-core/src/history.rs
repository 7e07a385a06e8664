//! # History
//!
//! Undo/redo over whole store states.
//!
//! Every transition produces a fresh [`StoreState`], so history is just a
//! pair of stacks of earlier and later states:
//!
//! ```text
//!   past: [s0, s1]   present: s2   future: []
//!
//!   apply(a)  → past: [s0, s1, s2]  present: s3      future: []
//!   undo()    → past: [s0, s1]      present: s2      future: [s3]
//!   redo()    → past: [s0, s1, s2]  present: s3      future: []
//! ```

use crate::store::{transition, Action, StoreState};

/// Present state plus bounded undo/redo stacks.
#[derive(Debug, Clone)]
pub struct History {
    past: Vec<StoreState>,
    present: StoreState,
    future: Vec<StoreState>,
    limit: usize,
}

impl History {
    /// Starts from an empty store, keeping at most `limit` undo steps.
    ///
    /// A `limit` of 0 disables undo entirely.
    pub fn new(limit: usize) -> Self {
        Self::with_state(StoreState::default(), limit)
    }

    /// Starts from an existing state.
    pub fn with_state(present: StoreState, limit: usize) -> Self {
        History {
            past: Vec::new(),
            present,
            future: Vec::new(),
            limit,
        }
    }

    /// The current state.
    pub fn present(&self) -> &StoreState {
        &self.present
    }

    /// Applies an action, recording the previous state for undo.
    ///
    /// Any redo steps are discarded. The step is recorded even when the
    /// action leaves the state unchanged.
    pub fn apply(&mut self, action: Action) -> &StoreState {
        let next = transition(&self.present, action);
        let previous = std::mem::replace(&mut self.present, next);

        if self.limit > 0 {
            if self.past.len() == self.limit {
                self.past.remove(0);
            }
            self.past.push(previous);
        }
        self.future.clear();

        &self.present
    }

    /// Steps back one state. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.past.pop() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.present, previous);
                self.future.push(current);
                true
            }
            None => false,
        }
    }

    /// Re-applies one undone state. Returns false when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.present, next);
                self.past.push(current);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undo steps currently held.
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::test_product;

    #[test]
    fn test_undo_restores_previous_state() {
        let mut history = History::new(10);
        history.apply(Action::add_to_cart(test_product("P1", 5000), 2));
        let before_clear = history.present().clone();

        history.apply(Action::ClearCart);
        assert!(history.present().is_cart_empty());

        assert!(history.undo());
        assert_eq!(history.present(), &before_clear);
    }

    #[test]
    fn test_redo_reapplies() {
        let mut history = History::new(10);
        history.apply(Action::SetSearchQuery("tote".to_string()));

        assert!(history.undo());
        assert!(history.present().search_query.is_empty());

        assert!(history.redo());
        assert_eq!(history.present().search_query, "tote");
        assert!(!history.redo());
    }

    #[test]
    fn test_apply_discards_redo_steps() {
        let mut history = History::new(10);
        history.apply(Action::ToggleSearch(None));
        history.undo();
        assert!(history.can_redo());

        history.apply(Action::SetSearchQuery("wallet".to_string()));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_on_fresh_history() {
        let mut history = History::new(10);
        assert!(!history.can_undo());
        assert!(!history.undo());
        assert_eq!(history.present(), &StoreState::default());
    }

    #[test]
    fn test_limit_drops_oldest_steps() {
        let mut history = History::new(2);
        for query in ["a", "b", "c"] {
            history.apply(Action::SetSearchQuery(query.to_string()));
        }

        assert_eq!(history.undo_depth(), 2);
        assert!(history.undo());
        assert!(history.undo());
        assert!(!history.undo());
        // The step back to the empty query fell off the end.
        assert_eq!(history.present().search_query, "a");
    }

    #[test]
    fn test_zero_limit_disables_undo() {
        let mut history = History::new(0);
        history.apply(Action::ToggleSearch(None));
        assert!(!history.can_undo());
        assert!(history.present().is_search_open);
    }

    #[test]
    fn test_noop_action_is_still_recorded() {
        let product = test_product("P1", 5000);
        let mut history = History::new(10);
        history.apply(Action::AddToWishlist(product.clone()));
        history.apply(Action::AddToWishlist(product));

        assert_eq!(history.undo_depth(), 2);
        assert!(history.undo());
        assert_eq!(history.present().wishlist_count(), 1);
    }
}
