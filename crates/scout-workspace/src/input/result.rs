use serde::Serialize;

/// Outcome of a pointer, wheel or drag callback.
///
/// `Handled` tells the host to call `preventDefault` on the DOM event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputResult {
    Handled,
    Unhandled,
}

impl InputResult {
    #[inline]
    pub fn is_handled(&self) -> bool {
        *self == InputResult::Handled
    }
}

impl From<bool> for InputResult {
    fn from(handled: bool) -> Self {
        if handled {
            InputResult::Handled
        } else {
            InputResult::Unhandled
        }
    }
}
