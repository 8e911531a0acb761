pub mod input;
pub mod session;
pub mod shortcuts;
pub mod stroke;

pub use input::{InputEvent, PointerPhase, PointerSample, SurfaceOrigin};
pub use session::SketchSession;
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use stroke::{PointerState, StrokeRenderer};
