//! Door selection state and highlight bookkeeping.
//!
//! A door's renderer doubles as its highlight. The selector is the only
//! writer of those renderers and keeps at most one of them enabled.

use crate::scene::{SceneGraph, SceneNodeId};

/// Where the laser pointer is this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// Point button not held
    #[default]
    Idle,
    /// Pointing, but not at a door
    PointingNoHit,
    /// Pointing at this door, which is highlighted
    PointingOnDoor(SceneNodeId),
}

/// Highlight toggles made by one selector call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightChange {
    pub cleared: Option<SceneNodeId>,
    pub highlighted: Option<SceneNodeId>,
}

impl HighlightChange {
    pub fn is_empty(&self) -> bool {
        self.cleared.is_none() && self.highlighted.is_none()
    }
}

#[derive(Clone, Debug, Default)]
pub struct DoorSelector {
    state: SelectionState,
}

impl DoorSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Door currently highlighted, if any.
    pub fn highlighted(&self) -> Option<SceneNodeId> {
        match self.state {
            SelectionState::PointingOnDoor(door) => Some(door),
            _ => None,
        }
    }

    /// The pointer ray hit `door` this frame.
    pub fn point_at_door(&mut self, scene: &mut SceneGraph, door: SceneNodeId) -> HighlightChange {
        let change = match self.highlighted() {
            Some(current) if current == door => HighlightChange::default(),
            previous => {
                if let Some(previous) = previous {
                    scene.set_renderer_enabled(previous, false);
                }
                scene.set_renderer_enabled(door, true);
                log::debug!("Highlight on '{}'", scene.name(door));
                HighlightChange {
                    cleared: previous,
                    highlighted: Some(door),
                }
            }
        };
        self.state = SelectionState::PointingOnDoor(door);
        change
    }

    /// The pointer ray found no door this frame.
    pub fn point_at_nothing(&mut self, scene: &mut SceneGraph) -> HighlightChange {
        let change = self.clear(scene);
        self.state = SelectionState::PointingNoHit;
        change
    }

    /// The point button was released.
    pub fn stop_pointing(&mut self, scene: &mut SceneGraph) -> HighlightChange {
        let change = self.clear(scene);
        self.state = SelectionState::Idle;
        change
    }

    fn clear(&mut self, scene: &mut SceneGraph) -> HighlightChange {
        let cleared = self.highlighted();
        if let Some(door) = cleared {
            scene.set_renderer_enabled(door, false);
            log::debug!("Highlight off '{}'", scene.name(door));
        }
        HighlightChange { cleared, highlighted: None }
    }
}
