//! Bounded edit history with branch-overwriting time travel.
//!
//! The history is an ordered sequence of text snapshots with a cursor;
//! the entry at the cursor is always the text shown to the user. Pushing
//! from a non-tail cursor discards everything after the cursor before
//! appending, so redo history is lost once a fresh edit is committed.
//!
//! None of the operations can fail: invalid input degrades to a no-op.
//! History navigation must never throw during interactive use.

/// Default maximum retained entries.
pub const DEFAULT_CAPACITY: usize = 50;

/// One-shot token handed out by time-travel operations.
///
/// A caller that mutates the visible text in response to `undo`, `redo`,
/// or `jump_to` must hand this token to the editing surface, which
/// consumes it on the next debounced commit and skips the push. Without
/// it the stack becomes self-referential and loses redo capability
/// immediately after every undo.
#[derive(Debug)]
#[must_use = "hand this to the editing surface or the next commit re-pushes the restored text"]
pub struct SuppressCommit(());

/// Result of a time-travel operation: the now-current text plus the
/// suppress token for the next scheduled commit.
#[derive(Debug)]
pub struct Restored {
    /// The text at the new cursor position.
    pub text: String,
    /// Token consumed by the next debounced commit.
    pub suppress: SuppressCommit,
}

/// Capacity-bounded undo/redo stack of text snapshots.
#[derive(Debug, Clone)]
pub struct EditHistory {
    entries: Vec<String>,
    cursor: usize,
    capacity: usize,
}

impl EditHistory {
    /// Creates a history with the default capacity, seeded with a single
    /// empty entry.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a history with an explicit capacity (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: vec![String::new()],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// The text currently shown to the user.
    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; the history carries at least its seed entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Current cursor index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True when `undo` would move the cursor.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// True when `redo` would move the cursor.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Commits a snapshot.
    ///
    /// No-op (returns false) when `text` equals the current entry.
    /// Otherwise truncates any redo branch, appends, and evicts the
    /// oldest entries past capacity.
    pub fn push(&mut self, text: &str) -> bool {
        if self.entries[self.cursor] == text {
            return false;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(text.to_string());

        if self.entries.len() > self.capacity {
            let evict = self.entries.len() - self.capacity;
            self.entries.drain(..evict);
        }
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Steps the cursor back one entry; no-op at the oldest entry.
    pub fn undo(&mut self) -> Restored {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.restored()
    }

    /// Steps the cursor forward one entry; no-op at the newest entry.
    pub fn redo(&mut self) -> Restored {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
        self.restored()
    }

    /// Bounds-checked absolute cursor move; out-of-range is a no-op.
    pub fn jump_to(&mut self, index: usize) -> Restored {
        if index < self.entries.len() {
            self.cursor = index;
        }
        self.restored()
    }

    fn restored(&self) -> Restored {
        Restored {
            text: self.entries[self.cursor].clone(),
            suppress: SuppressCommit(()),
        }
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}
