//! Pointer actions emitted by the engine.

/// One abstract pointer operation.  A frame yields an ordered batch of
/// these; the external injector applies them verbatim and in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Move the cursor to absolute screen pixels.
    MoveTo { x: i32, y: i32 },
    /// Press and hold the primary button.
    DragStart,
    /// Release the primary button.
    DragEnd,
    /// A single secondary-button click.
    RightClick,
    /// Scroll by a signed amount; positive scrolls content up.
    ScrollBy { amount: i32 },
}

impl PointerAction {
    /// String representation for IPC.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MoveTo { .. } => "move-to",
            Self::DragStart => "drag-start",
            Self::DragEnd => "drag-end",
            Self::RightClick => "right-click",
            Self::ScrollBy { .. } => "scroll-by",
        }
    }

    /// Protocol fields for this action, as (key, value) pairs.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::MoveTo { x, y } => vec![("x", x.to_string()), ("y", y.to_string())],
            Self::ScrollBy { amount } => vec![("amount", amount.to_string())],
            Self::DragStart | Self::DragEnd | Self::RightClick => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_as_str() {
        assert_eq!(PointerAction::MoveTo { x: 0, y: 0 }.as_str(), "move-to");
        assert_eq!(PointerAction::DragStart.as_str(), "drag-start");
        assert_eq!(PointerAction::DragEnd.as_str(), "drag-end");
        assert_eq!(PointerAction::RightClick.as_str(), "right-click");
        assert_eq!(PointerAction::ScrollBy { amount: 3 }.as_str(), "scroll-by");
    }

    #[test]
    fn test_action_fields() {
        let fields = PointerAction::MoveTo { x: 10, y: -2 }.fields();
        assert_eq!(fields, vec![("x", "10".to_string()), ("y", "-2".to_string())]);
        assert!(PointerAction::RightClick.fields().is_empty());
        assert_eq!(
            PointerAction::ScrollBy { amount: -7 }.fields(),
            vec![("amount", "-7".to_string())]
        );
    }
}
