//! Layers tag nodes into categories that raycasts and visibility toggling can
//! skip. Layer numbers follow the authoring convention of the tour scenes.

use serde::{Deserialize, Serialize};

/// Category tag of a scene node (0-31).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layer(pub u8);

impl Layer {
    /// Ordinary room geometry
    pub const DEFAULT: Layer = Layer(0);
    /// Never hit by raycasts (the tourist's own rig)
    pub const IGNORE_RAYCAST: Layer = Layer(2);
    /// Invisible room boundaries the laser pointer can rest on
    pub const BOUNDS: Layer = Layer(9);
    /// Door trigger volumes with their highlight renderer
    pub const TRANSPORT: Layer = Layer(10);

    /// Reserved layers keep their renderers out of room visibility toggling;
    /// the tourist controller decides when they are drawn.
    pub fn is_reserved(self) -> bool {
        self.0 >= Self::BOUNDS.0
    }

    fn bit(self) -> u32 {
        1u32 << (self.0 & 31)
    }
}

/// Set of layers a query considers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const NONE: LayerMask = LayerMask(0);

    /// Every layer except the given ones.
    pub fn all_except(layers: &[Layer]) -> Self {
        let excluded = layers.iter().fold(0u32, |acc, l| acc | l.bit());
        LayerMask(!excluded)
    }

    pub fn contains(self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }

    /// First selection pass: doors and geometry, not bounds.
    pub fn door_query() -> Self {
        Self::all_except(&[Layer::IGNORE_RAYCAST, Layer::BOUNDS])
    }

    /// Fallback pass: bounds and geometry, not doors.
    pub fn bounds_query() -> Self {
        Self::all_except(&[Layer::IGNORE_RAYCAST, Layer::TRANSPORT])
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}
