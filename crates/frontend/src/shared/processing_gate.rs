//! Processing gate
//!
//! Keeps a second submit-style operation from starting while one is in flight.
//! The only way in is [`ProcessingGate::try_begin`], which hands out a guard that
//! releases the slot when dropped.

use leptos::prelude::*;
use serde::Deserialize;

/// Submit-style operations guarded by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Upload,
    Question,
}

/// Which operations exclude each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockScope {
    /// One flag for everything: no question while uploading and vice versa.
    Shared,
    /// Each operation only excludes a second instance of itself.
    PerOperation,
}

#[derive(Clone, Copy)]
pub struct ProcessingGate {
    scope: LockScope,
    upload: RwSignal<bool>,
    question: RwSignal<bool>,
}

impl ProcessingGate {
    pub fn new(scope: LockScope) -> Self {
        Self {
            scope,
            upload: RwSignal::new(false),
            question: RwSignal::new(false),
        }
    }

    fn slot(&self, op: Operation) -> RwSignal<bool> {
        match op {
            Operation::Upload => self.upload,
            Operation::Question => self.question,
        }
    }

    /// Untracked check whether `op` may start right now.
    pub fn can_begin(&self, op: Operation) -> bool {
        match self.scope {
            LockScope::Shared => !self.upload.get_untracked() && !self.question.get_untracked(),
            LockScope::PerOperation => !self.slot(op).get_untracked(),
        }
    }

    /// Take the slot for `op`, or `None` if it is blocked.
    pub fn try_begin(&self, op: Operation) -> Option<ProcessingGuard> {
        if !self.can_begin(op) {
            return None;
        }
        self.slot(op).set(true);
        Some(ProcessingGuard { gate: *self, op })
    }

    /// Release the slot for `op`.
    pub fn end(&self, op: Operation) {
        self.slot(op).set(false);
    }

    /// Reactive: `op` is currently in flight.
    pub fn is_active(&self, op: Operation) -> bool {
        self.slot(op).get()
    }
}

/// Held for the lifetime of one operation.
#[must_use = "dropping the guard releases the gate immediately"]
pub struct ProcessingGuard {
    gate: ProcessingGate,
    op: Operation,
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        self.gate.end(self.op);
    }
}
