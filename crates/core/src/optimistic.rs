//! Optimistic state changes
//!
//! Local state that can apply a change ahead of server confirmation and put
//! it back if the server rejects it.

/// State that supports optimistic changes with per-change undo.
pub trait Optimistic {
    /// A requested change.
    type Action;

    /// Whatever is needed to reverse one applied action.
    type Undo;

    /// Why an action could not be applied locally.
    type Error;

    /// Apply `action` locally and return how to reverse it.
    ///
    /// # Errors
    ///
    /// Returns an error when the action is invalid for the current state; the
    /// state is left unchanged in that case.
    fn apply(&mut self, action: &Self::Action) -> Result<Self::Undo, Self::Error>;

    /// Reverse a previously applied action.
    fn undo(&mut self, undo: Self::Undo);
}
