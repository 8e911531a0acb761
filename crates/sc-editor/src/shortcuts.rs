//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s.
//! The map lives in Rust so the browser bridge and native hosts share it.
//!
//! - `E` toggles the eraser
//! - `[` / `]` shrink / grow the brush
//! - `1`–`9` pick a quick color
//! - ⌘S saves, ⌘Delete clears

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ToggleEraser,
    BrushSmaller,
    BrushLarger,
    /// Zero-based index into the configured swatches.
    PickSwatch(usize),
    ClearCanvas,
    SaveImage,
}

/// Width step for `[` / `]`.
pub const BRUSH_STEP: f32 = 2.0;

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"e"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd {
            if shift || alt {
                return None;
            }
            return match key {
                "s" | "S" => Some(ShortcutAction::SaveImage),
                "Delete" | "Backspace" => Some(ShortcutAction::ClearCanvas),
                _ => None,
            };
        }

        if alt {
            return None;
        }

        match key {
            "e" | "E" => Some(ShortcutAction::ToggleEraser),
            "[" => Some(ShortcutAction::BrushSmaller),
            "]" => Some(ShortcutAction::BrushLarger),
            _ => swatch_digit(key).map(ShortcutAction::PickSwatch),
        }
    }
}

/// `"1"` → 0 … `"9"` → 8.
fn swatch_digit(key: &str) -> Option<usize> {
    match key.as_bytes() {
        [d @ b'1'..=b'9'] => Some((d - b'1') as usize),
        _ => None,
    }
}

/// Stable string name for JS consumers.
pub fn action_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::ToggleEraser => "toggleEraser",
        ShortcutAction::BrushSmaller => "brushSmaller",
        ShortcutAction::BrushLarger => "brushLarger",
        ShortcutAction::PickSwatch(_) => "pickSwatch",
        ShortcutAction::ClearCanvas => "clearCanvas",
        ShortcutAction::SaveImage => "saveImage",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_single_keys() {
        assert_eq!(
            ShortcutMap::resolve("e", false, false, false, false),
            Some(ShortcutAction::ToggleEraser)
        );
        assert_eq!(
            ShortcutMap::resolve("E", false, true, false, false),
            Some(ShortcutAction::ToggleEraser)
        );
        assert_eq!(
            ShortcutMap::resolve("[", false, false, false, false),
            Some(ShortcutAction::BrushSmaller)
        );
        assert_eq!(
            ShortcutMap::resolve("]", false, false, false, false),
            Some(ShortcutAction::BrushLarger)
        );
    }

    #[test]
    fn resolve_swatch_digits() {
        assert_eq!(
            ShortcutMap::resolve("1", false, false, false, false),
            Some(ShortcutAction::PickSwatch(0))
        );
        assert_eq!(
            ShortcutMap::resolve("8", false, false, false, false),
            Some(ShortcutAction::PickSwatch(7))
        );
        assert_eq!(ShortcutMap::resolve("0", false, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("12", false, false, false, false), None);
    }

    #[test]
    fn resolve_command_combos() {
        // Cmd+S
        assert_eq!(
            ShortcutMap::resolve("s", false, false, false, true),
            Some(ShortcutAction::SaveImage)
        );
        // Ctrl+S
        assert_eq!(
            ShortcutMap::resolve("s", true, false, false, false),
            Some(ShortcutAction::SaveImage)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", false, false, false, true),
            Some(ShortcutAction::ClearCanvas)
        );
        // Plain Delete does nothing; clearing needs the modifier
        assert_eq!(ShortcutMap::resolve("Delete", false, false, false, false), None);
        // Cmd+E is not the eraser
        assert_eq!(ShortcutMap::resolve("e", false, false, false, true), None);
    }

    #[test]
    fn action_names_are_camel_case() {
        assert_eq!(action_name(ShortcutAction::ClearCanvas), "clearCanvas");
        assert_eq!(action_name(ShortcutAction::PickSwatch(3)), "pickSwatch");
    }
}
