//! Drag lifecycle as an explicit value.
//!
//! A [`DragSession`] owns the block being dragged and walks
//! `idle -> press_pending -> drag_active -> drop_commit | cancelled`.
//! Hosts translate their own pointer events into these calls; nothing here
//! knows about geometry.

use serde::Serialize;
use thiserror::Error;

use crate::document::Document;
use crate::parsing::blocks::Block;

use super::lists::ListIntent;
use super::mover::{MoveError, MoveOutcome, MoveTarget, move_block, resolve_target_line};
use super::validate::{DropValidationResult, RejectReason, validate_drop};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragLifecycleState {
    #[default]
    Idle,
    PressPending,
    DragActive,
    DropCommit,
    Cancelled,
}

impl DragLifecycleState {
    /// States a new press may start from.
    fn is_settled(self) -> bool {
        matches!(
            self,
            DragLifecycleState::Idle | DragLifecycleState::DropCommit | DragLifecycleState::Cancelled
        )
    }
}

/// Snapshot of a session after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DragLifecycleEvent {
    pub state: DragLifecycleState,
    pub source: Option<Block>,
    pub target_line: Option<usize>,
    pub intent: Option<ListIntent>,
    pub reject_reason: Option<RejectReason>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot {action} a drag session in state {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: DragLifecycleState,
    },

    #[error(transparent)]
    Move(#[from] MoveError),
}

#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragLifecycleState,
    source: Option<Block>,
    target_line: Option<usize>,
    intent: Option<ListIntent>,
    reject_reason: Option<RejectReason>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragLifecycleState {
        self.state
    }

    pub fn source(&self) -> Option<&Block> {
        self.source.as_ref()
    }

    pub fn event(&self) -> DragLifecycleEvent {
        DragLifecycleEvent {
            state: self.state,
            source: self.source.clone(),
            target_line: self.target_line,
            intent: self.intent,
            reject_reason: self.reject_reason,
        }
    }

    fn require(&self, action: &'static str, ok: bool) -> Result<(), SessionError> {
        if ok {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }

    /// Picks up `block`. Any finished drag is forgotten.
    pub fn press(&mut self, block: Block) -> Result<DragLifecycleEvent, SessionError> {
        self.require("press", self.state.is_settled())?;
        *self = Self {
            state: DragLifecycleState::PressPending,
            source: Some(block),
            ..Self::default()
        };
        Ok(self.event())
    }

    /// The press turned into a drag.
    pub fn activate(&mut self) -> Result<DragLifecycleEvent, SessionError> {
        self.require("activate", self.state == DragLifecycleState::PressPending)?;
        self.state = DragLifecycleState::DragActive;
        Ok(self.event())
    }

    /// Validates the drop the host would preview at `target_line`, after
    /// the same snapping and clamping a [`MoveTarget::Line`] commit gets.
    pub fn hover(
        &mut self,
        doc: &Document,
        target_line: usize,
        intent: ListIntent,
    ) -> Result<DropValidationResult, SessionError> {
        self.require("hover", self.state == DragLifecycleState::DragActive)?;
        let Some(source) = self.source.as_ref() else {
            return Err(SessionError::InvalidTransition {
                action: "hover",
                state: self.state,
            });
        };
        let target_line = resolve_target_line(doc, source, MoveTarget::Line(target_line));
        let result = validate_drop(doc, source, target_line, &intent);
        self.target_line = Some(target_line);
        self.intent = Some(intent);
        self.reject_reason = result.reject_reason;
        Ok(result)
    }

    /// Drops the block. The session ends in `drop_commit` whether or not the
    /// move was accepted; a refusal is recorded on the session.
    pub fn commit(
        &mut self,
        doc: &Document,
        target: MoveTarget,
        intent: ListIntent,
    ) -> Result<MoveOutcome, SessionError> {
        self.require("commit", self.state == DragLifecycleState::DragActive)?;
        let Some(source) = self.source.as_ref() else {
            return Err(SessionError::InvalidTransition {
                action: "commit",
                state: self.state,
            });
        };
        let outcome = move_block(doc, source, target, &intent)?;
        match &outcome {
            MoveOutcome::Rejected { reason } => {
                self.reject_reason = Some(*reason);
            }
            MoveOutcome::Applied { target_line, .. } => {
                self.target_line = Some(*target_line);
                self.reject_reason = None;
            }
        }
        self.intent = Some(intent);
        self.state = DragLifecycleState::DropCommit;
        Ok(outcome)
    }

    /// Abandons a press or drag.
    pub fn cancel(&mut self) -> Result<DragLifecycleEvent, SessionError> {
        self.require(
            "cancel",
            matches!(
                self.state,
                DragLifecycleState::PressPending | DragLifecycleState::DragActive
            ),
        )?;
        self.state = DragLifecycleState::Cancelled;
        Ok(self.event())
    }
}
