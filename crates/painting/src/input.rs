//! Pointer normalization and the 3D stroke state machine.
//!
//! Mouse and touch input are folded into one [`PointerEvent`] stream. A
//! [`StrokeTracker`] turns that stream, together with the ray hit under the
//! pointer, into stroke events locked to the part the stroke started on.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::face::RayHit;
use crate::types::PartId;

/// Device-independent pointer input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { pos: Vec2 },
    Move { pos: Vec2 },
    Up,
    /// Pointer left the surface
    Leave,
    /// Gesture interrupted (multi-touch, system cancel)
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

impl PointerEvent {
    /// Normalize a touch event. Only single-finger gestures draw; a second
    /// finger cancels the stroke.
    pub fn from_touch(phase: TouchPhase, touches: &[Vec2]) -> PointerEvent {
        if touches.len() > 1 {
            return PointerEvent::Cancel;
        }
        match (phase, touches.first()) {
            (TouchPhase::Start, Some(&pos)) => PointerEvent::Down { pos },
            (TouchPhase::Move, Some(&pos)) => PointerEvent::Move { pos },
            (TouchPhase::End, _) => PointerEvent::Up,
            _ => PointerEvent::Cancel,
        }
    }

    pub fn position(&self) -> Option<Vec2> {
        match *self {
            PointerEvent::Down { pos } | PointerEvent::Move { pos } => Some(pos),
            _ => None,
        }
    }
}

/// Stroke-level result of pointer input over the 3D view
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeEvent {
    Begin(RayHit),
    Move(RayHit),
    End,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum StrokeState {
    #[default]
    Idle,
    Painting {
        part: PartId,
    },
}

/// `idle -> painting -> idle` tracker for strokes on the 3D model
#[derive(Debug, Default)]
pub struct StrokeTracker {
    state: StrokeState,
}

impl StrokeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_painting(&self) -> bool {
        matches!(self.state, StrokeState::Painting { .. })
    }

    /// Part the current stroke is locked to
    pub fn active_part(&self) -> Option<PartId> {
        match self.state {
            StrokeState::Painting { part } => Some(part),
            StrokeState::Idle => None,
        }
    }

    /// Feed one pointer event and the hit under it (if any).
    ///
    /// A stroke starts only on a press that hits a part. Moves report hits on
    /// the stroke's own part and ignore everything else. Leave and cancel
    /// always return to idle.
    pub fn handle(&mut self, event: PointerEvent, hit: Option<&RayHit>) -> Option<StrokeEvent> {
        match (event, self.state) {
            (PointerEvent::Down { .. }, _) => {
                let hit = hit?;
                self.state = StrokeState::Painting { part: hit.part };
                debug!("Stroke started on {}", hit.part);
                Some(StrokeEvent::Begin(*hit))
            }
            (PointerEvent::Move { .. }, StrokeState::Painting { part }) => {
                hit.filter(|hit| hit.part == part)
                    .map(|hit| StrokeEvent::Move(*hit))
            }
            (PointerEvent::Up | PointerEvent::Leave, StrokeState::Painting { part }) => {
                self.state = StrokeState::Idle;
                debug!("Stroke on {} ended", part);
                Some(StrokeEvent::End)
            }
            (PointerEvent::Cancel, StrokeState::Painting { part }) => {
                self.state = StrokeState::Idle;
                debug!("Stroke on {} cancelled", part);
                Some(StrokeEvent::Cancel)
            }
            (_, StrokeState::Idle) => None,
        }
    }

    /// Drop any stroke in progress without emitting an event
    pub fn reset(&mut self) {
        self.state = StrokeState::Idle;
    }
}
