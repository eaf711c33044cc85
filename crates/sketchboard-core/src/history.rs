//! Undo/redo log of full snapshots.

/// Default maximum number of undo states to keep.
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

/// Two stacks of snapshots: undo (past states) and redo (undone states).
///
/// The caller owns the current state. `push` records it before a mutation;
/// `undo`/`redo` swap the caller's current state with the top of one stack
/// while pushing it onto the other.
#[derive(Debug, Clone)]
pub struct History<T> {
    undo_stack: Vec<T>,
    redo_stack: Vec<T>,
    /// Maximum undo depth; `None` keeps everything.
    limit: Option<usize>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::with_limit(Some(DEFAULT_HISTORY_LIMIT))
    }
}

impl<T: Clone> History<T> {
    /// Record `current` before a mutation. Clears the redo stack.
    pub fn push(&mut self, current: &T) {
        self.undo_stack.push(current.clone());
        self.redo_stack.clear();
        self.enforce_limit();
    }
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Step back. Returns the state to restore, or `None` when there is
    /// nothing to undo (in which case `current` is dropped unchanged).
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        self.enforce_limit();
        Some(next)
    }

    /// The state `undo` would restore.
    pub fn peek_undo(&self) -> Option<&T> {
        self.undo_stack.last()
    }

    /// The state `redo` would restore.
    pub fn peek_redo(&self) -> Option<&T> {
        self.redo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Forget every recorded state.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn enforce_limit(&mut self) {
        if let Some(limit) = self.limit {
            if self.undo_stack.len() > limit {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(..excess);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_empty_stack() {
        let mut history: History<Vec<i32>> = History::new();
        assert!(!history.can_undo());
        assert_eq!(history.undo(vec![1]), None);
        assert!(!history.can_redo());
        assert_eq!(history.redo(vec![1]), None);
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut history = History::new();
        let mut state = vec![1];

        history.push(&state);
        state.push(2);

        state = history.undo(state).unwrap();
        assert_eq!(state, vec![1]);
        assert!(history.can_redo());

        state = history.redo(state).unwrap();
        assert_eq!(state, vec![1, 2]);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::new();
        let mut state = 0;
        history.push(&state);
        state = 1;
        state = history.undo(state).unwrap();
        assert!(history.can_redo());

        history.push(&state);
        assert!(!history.can_redo());
        assert_eq!(history.peek_undo(), Some(&0));
    }

    #[test]
    fn test_multiple_steps_in_order() {
        let mut history = History::new();
        let mut state = 0;
        for next in 1..=3 {
            history.push(&state);
            state = next;
        }
        state = history.undo(state).unwrap();
        assert_eq!(state, 2);
        state = history.undo(state).unwrap();
        assert_eq!(state, 1);
        state = history.redo(state).unwrap();
        assert_eq!(state, 2);
        assert_eq!(history.peek_redo(), Some(&3));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(Some(2));
        for state in 0..5 {
            history.push(&state);
        }
        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.undo(5), Some(4));
        assert_eq!(history.undo(4), Some(3));
        assert_eq!(history.undo(3), None);
    }

    #[test]
    fn test_unbounded() {
        let mut history = History::with_limit(None);
        for state in 0..1000 {
            history.push(&state);
        }
        assert_eq!(history.undo_len(), 1000);
        history.clear();
        assert!(!history.can_undo());
    }
}
