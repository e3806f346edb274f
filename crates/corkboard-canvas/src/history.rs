//! Bounded undo/redo stacks.
//!
//! Two entry points record commands:
//! - [`CommandStack::execute`] runs the command, then records it.
//! - [`CommandStack::push_done`] records a command whose effect is already
//!   in place, as happens at the end of a live-preview gesture. The command's
//!   `execute` is assumed to have been logically performed.
//!
//! Both clear the redo stack and drop the oldest entries beyond the depth
//! bound. Every change to either stack is reported to the observer as
//! `(can_undo, can_redo)`.

use std::collections::VecDeque;
use std::fmt;

use corkboard_core::constants::UNDO_DEPTH;
use corkboard_core::HistoryCallback;
use tracing::debug;

use crate::commands::Command;

pub struct CommandStack<C> {
    done: VecDeque<C>,
    undone: Vec<C>,
    max_depth: usize,
    observer: Option<HistoryCallback>,
}

impl<C> CommandStack<C> {
    /// Creates an empty stack holding at most `max_depth` undoable commands.
    pub fn new(max_depth: usize) -> Self {
        Self {
            done: VecDeque::new(),
            undone: Vec::new(),
            max_depth: max_depth.max(1),
            observer: None,
        }
    }

    /// Installs the availability observer and reports the current state.
    pub fn set_observer(&mut self, observer: HistoryCallback) {
        observer(self.can_undo(), self.can_redo());
        self.observer = Some(observer);
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.done.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.undone.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Most recent undoable command.
    pub fn peek_undo(&self) -> Option<&C> {
        self.done.back()
    }

    pub fn peek_redo(&self) -> Option<&C> {
        self.undone.last()
    }

    /// Runs `cmd` against `target` and records it.
    pub fn execute<T>(&mut self, mut cmd: C, target: &mut T)
    where
        C: Command<T>,
    {
        cmd.execute(target);
        self.record(cmd);
    }

    /// Records `cmd` without running it.
    pub fn push_done(&mut self, cmd: C) {
        self.record(cmd);
    }

    fn record(&mut self, cmd: C) {
        self.done.push_back(cmd);
        self.undone.clear();
        while self.done.len() > self.max_depth {
            self.done.pop_front();
        }
        self.notify();
    }

    /// Reverts the most recent command. Returns `false` if there was none.
    pub fn undo<T>(&mut self, target: &mut T) -> bool
    where
        C: Command<T>,
    {
        let Some(mut cmd) = self.done.pop_back() else {
            return false;
        };
        debug!("Undo: {}", cmd.name());
        cmd.undo(target);
        self.undone.push(cmd);
        self.notify();
        true
    }

    /// Re-applies the most recently undone command. Returns `false` if there
    /// was none.
    pub fn redo<T>(&mut self, target: &mut T) -> bool
    where
        C: Command<T>,
    {
        let Some(mut cmd) = self.undone.pop() else {
            return false;
        };
        debug!("Redo: {}", cmd.name());
        cmd.execute(target);
        self.done.push_back(cmd);
        self.notify();
        true
    }

    /// Empties both stacks.
    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
        self.notify();
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer(self.can_undo(), self.can_redo());
        }
    }
}

impl<C> Default for CommandStack<C> {
    fn default() -> Self {
        Self::new(UNDO_DEPTH)
    }
}

impl<C> fmt::Debug for CommandStack<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandStack")
            .field("undo_depth", &self.done.len())
            .field("redo_depth", &self.undone.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
