use serde::{Deserialize, Serialize};

use super::{PanelSize, Placement, PointerPosition, Viewport};

/// Distances used when placing a floating panel next to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementOffsets {
    /// Gap between pointer and panel in the default right/below placement.
    pub pointer_offset: f64,
    /// Gap between pointer and panel after flipping to the left/above side.
    pub flip_gap: f64,
}

impl Default for PlacementOffsets {
    fn default() -> Self {
        Self {
            pointer_offset: 15.0,
            flip_gap: 10.0,
        }
    }
}

/// Places a panel of `size` next to `pointer` inside `viewport`.
///
/// The panel goes right of and below the pointer. Each axis flips to the
/// opposite side on its own when the default placement would overflow the
/// viewport edge. No clamping is applied after a flip.
#[must_use]
pub fn place(
    pointer: PointerPosition,
    size: PanelSize,
    viewport: Viewport,
    offsets: PlacementOffsets,
) -> Placement {
    Placement {
        left: place_axis(
            pointer.x,
            size.width,
            f64::from(viewport.width),
            offsets,
        ),
        top: place_axis(
            pointer.y,
            size.height,
            f64::from(viewport.height),
            offsets,
        ),
    }
}

fn place_axis(pointer: f64, extent: f64, limit: f64, offsets: PlacementOffsets) -> f64 {
    let preferred = pointer + offsets.pointer_offset;
    if preferred + extent > limit {
        pointer - extent - offsets.flip_gap
    } else {
        preferred
    }
}
