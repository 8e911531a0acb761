//! Input abstraction layer.
//!
//! Normalizes mouse and touch events into a unified `InputEvent` enum
//! consumed by the stroke renderer. The renderer never sees which device
//! produced an event.

use sc_core::Point;
use smallvec::SmallVec;

/// Lifecycle phase of a raw pointer event, independent of device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// `mousedown` / `touchstart`
    Start,
    /// `mousemove` / `touchmove`
    Move,
    /// `mouseup` / `touchend`
    End,
    /// `mouseleave`
    Leave,
    /// `touchcancel`
    Cancel,
}

/// Top-left corner of the surface element in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceOrigin {
    pub left: f32,
    pub top: f32,
}

/// Device-specific position payload, in client coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSample {
    Mouse { client_x: f32, client_y: f32 },
    /// Active touch points in the order the host reports them.
    Touch { touches: SmallVec<[(f32, f32); 2]> },
}

impl PointerSample {
    pub fn mouse(client_x: f32, client_y: f32) -> Self {
        Self::Mouse { client_x, client_y }
    }

    pub fn touch(touches: &[(f32, f32)]) -> Self {
        Self::Touch {
            touches: SmallVec::from_slice(touches),
        }
    }

    /// Convert to a surface-local logical position.
    ///
    /// Touches use the first active point; multi-touch is not a gesture here.
    /// Returns `None` when there is no usable coordinate.
    pub fn to_logical(&self, origin: SurfaceOrigin) -> Option<Point> {
        let (cx, cy) = match self {
            Self::Mouse { client_x, client_y } => (*client_x, *client_y),
            Self::Touch { touches } => *touches.first()?,
        };
        let p = Point::new(cx - origin.left, cy - origin.top);
        p.is_finite().then_some(p)
    }
}

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start).
    Press { at: Point },

    /// Pointer moved (mouse move, touch move).
    Move { at: Point },

    /// Pointer released.
    Release,

    /// Pointer left the surface.
    Leave,

    /// Host cancelled the gesture (e.g. touch interrupted by the system).
    Cancel,
}

impl InputEvent {
    /// Build an event from a raw phase and sample.
    ///
    /// Press and move need a position and yield `None` without one; the
    /// ending phases never do, so a `touchend` with an empty touch list still
    /// ends the stroke.
    pub fn normalize(
        phase: PointerPhase,
        sample: &PointerSample,
        origin: SurfaceOrigin,
    ) -> Option<Self> {
        match phase {
            PointerPhase::Start => Some(Self::Press {
                at: sample.to_logical(origin)?,
            }),
            PointerPhase::Move => Some(Self::Move {
                at: sample.to_logical(origin)?,
            }),
            PointerPhase::End => Some(Self::Release),
            PointerPhase::Leave => Some(Self::Leave),
            PointerPhase::Cancel => Some(Self::Cancel),
        }
    }

    pub fn from_mouse(
        phase: PointerPhase,
        client_x: f32,
        client_y: f32,
        origin: SurfaceOrigin,
    ) -> Option<Self> {
        Self::normalize(phase, &PointerSample::mouse(client_x, client_y), origin)
    }

    pub fn from_touches(
        phase: PointerPhase,
        touches: &[(f32, f32)],
        origin: SurfaceOrigin,
    ) -> Option<Self> {
        Self::normalize(phase, &PointerSample::touch(touches), origin)
    }

}
