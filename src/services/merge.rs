// src/services/merge.rs

//! Session merge engine.
//!
//! The timetable lists a multi-room session once per room, sometimes with
//! the module name only on the first row. Rows are folded together here so
//! every logical session appears once.

use crate::models::Session;

/// Accumulates raw session rows in document order, merging duplicates.
#[derive(Debug, Default)]
pub struct SessionMerger {
    sessions: Vec<Session>,
}

impl SessionMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw row.
    ///
    /// Returns `true` if the row started a new session, `false` if it was
    /// folded into an existing one.
    pub fn push(&mut self, row: Session) -> bool {
        match self.sessions.iter().position(|s| s.equals(&row)) {
            Some(index) => {
                self.sessions[index].combine(&row);
                self.settle(index);
                false
            }
            None => {
                self.sessions.push(row);
                true
            }
        }
    }

    /// Re-merge after the session at `index` grew.
    ///
    /// A combined session gains rooms and possibly a module name, which can
    /// make it equal to another accepted session. The later of the two is
    /// folded into the earlier one until no pair is equal.
    fn settle(&mut self, mut index: usize) {
        while let Some(other) = (0..self.sessions.len())
            .find(|&i| i != index && self.sessions[i].equals(&self.sessions[index]))
        {
            let (keep, drop) = if other < index {
                (other, index)
            } else {
                (index, other)
            };
            let absorbed = self.sessions.remove(drop);
            log::debug!(
                "Folding session {} {} into {}",
                absorbed.day_name(),
                absorbed.start,
                self.sessions[keep].module_name
            );
            self.sessions[keep].combine(&absorbed);
            index = keep;
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn into_sessions(self) -> Vec<Session> {
        self.sessions
    }
}

impl Extend<Session> for SessionMerger {
    fn extend<I: IntoIterator<Item = Session>>(&mut self, rows: I) {
        for row in rows {
            self.push(row);
        }
    }
}

/// Merge raw rows into a deduplicated list in first-seen order.
pub fn merge_sessions(rows: impl IntoIterator<Item = Session>) -> Vec<Session> {
    let mut merger = SessionMerger::new();
    merger.extend(rows);
    merger.into_sessions()
}
