use crate::icon::IconImage;

/// First native identifier handed to a custom dialog button. Small command
/// IDs are reserved by Windows (`IDOK`..`IDCONTINUE`), so custom buttons
/// start from a large number to avoid conflicts.
pub const BUTTON_ID_OFFSET: i32 = 100;

/// `IDCANCEL`, produced when the dialog is dismissed via its close button
/// or Esc.
const ID_CANCEL: i32 = 2;

/// Severity of a message box, selects the stock glyph when no custom icon
/// is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageBoxKind {
    Information,
    Warning,
    Error,
}

/// Immutable description of one dialog invocation. Built by the caller,
/// consumed by the presenter; nothing is persisted.
#[derive(Debug, Clone)]
pub struct MessageBoxRequest {
    pub kind: MessageBoxKind,
    /// Button labels in presentation order. The result of a dialog is an
    /// index into this sequence.
    pub buttons: Vec<String>,
    /// Index reported when the user dismisses the dialog without choosing a
    /// button. A non-zero value also makes the dialog cancelable (close
    /// button and Esc enabled).
    pub cancel_index: usize,
    pub title: String,
    pub message: String,
    /// Optional body text. Empty means absent: the message is then the sole
    /// content. Non-empty promotes the message to the highlighted main
    /// instruction with this text as body.
    pub detail: String,
    /// Caller-supplied icon, takes precedence over the kind's stock glyph.
    pub icon: Option<IconImage>,
}

/// How the message and detail strings are placed in the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLayout<'a> {
    /// No detail text: the message is the sole content.
    Plain(&'a str),
    /// Detail present: the message becomes the highlighted main instruction.
    Highlighted { instruction: &'a str, body: &'a str },
}

impl MessageBoxRequest {
    pub fn new(kind: MessageBoxKind) -> Self {
        Self {
            kind,
            buttons: Vec::new(),
            cancel_index: 0,
            title: String::new(),
            message: String::new(),
            detail: String::new(),
            icon: None,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    pub fn detail(mut self, detail: &str) -> Self {
        self.detail = detail.to_string();
        self
    }

    /// Append one button label.
    pub fn button(mut self, label: &str) -> Self {
        self.buttons.push(label.to_string());
        self
    }

    /// Replace the button labels with the given sequence.
    pub fn buttons<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buttons = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn cancel_index(mut self, index: usize) -> Self {
        self.cancel_index = index;
        self
    }

    pub fn icon(mut self, icon: IconImage) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Whether the dialog may be dismissed without picking a button.
    pub fn is_cancelable(&self) -> bool {
        self.cancel_index != 0
    }

    pub fn content_layout(&self) -> ContentLayout<'_> {
        if self.detail.is_empty() {
            ContentLayout::Plain(&self.message)
        } else {
            ContentLayout::Highlighted {
                instruction: &self.message,
                body: &self.detail,
            }
        }
    }

    /// Map a raw identifier returned by the native dialog back to an index
    /// into `buttons`.
    pub fn map_pressed_id(&self, id: i32) -> usize {
        map_pressed_id(id, self.cancel_index, self.buttons.len())
    }
}

/// Map a native button identifier to a zero-based index into the original
/// button sequence. No identifier (0), `IDCANCEL`, anything in the reserved
/// range below [`BUTTON_ID_OFFSET`] and anything past the button count all
/// fold to the cancel index; user cancellation and subsystem failure are
/// deliberately not distinguished.
pub fn map_pressed_id(id: i32, cancel_index: usize, button_count: usize) -> usize {
    if id == 0 || id == ID_CANCEL || id < BUTTON_ID_OFFSET {
        return cancel_index;
    }
    let index = (id - BUTTON_ID_OFFSET) as usize;
    if index >= button_count { cancel_index } else { index }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_cancel() -> MessageBoxRequest {
        MessageBoxRequest::new(MessageBoxKind::Warning)
            .title("Confirm")
            .message("Proceed?")
            .buttons(["OK", "Cancel"])
            .cancel_index(1)
    }

    #[test]
    fn test_chosen_button_maps_to_its_position() {
        let request = ok_cancel();
        assert_eq!(request.map_pressed_id(BUTTON_ID_OFFSET), 0);
        assert_eq!(request.map_pressed_id(BUTTON_ID_OFFSET + 1), 1);
    }

    #[test]
    fn test_dismissal_maps_to_cancel_index() {
        let request = ok_cancel();
        // No identifier produced at all.
        assert_eq!(request.map_pressed_id(0), 1);
        // IDCANCEL from close button / Esc.
        assert_eq!(request.map_pressed_id(2), 1);
    }

    #[test]
    fn test_reserved_and_out_of_range_ids_fold_to_cancel() {
        // IDOK from a dialog created with zero custom buttons.
        assert_eq!(map_pressed_id(1, 0, 0), 0);
        assert_eq!(map_pressed_id(11, 3, 2), 3);
        assert_eq!(map_pressed_id(BUTTON_ID_OFFSET + 5, 1, 2), 1);
    }

    #[test]
    fn test_index_round_trips_for_any_button_position() {
        let labels = ["Retry", "Skip", "Abort", "Ignore"];
        for (i, _) in labels.iter().enumerate() {
            assert_eq!(map_pressed_id(BUTTON_ID_OFFSET + i as i32, 0, labels.len()), i);
        }
    }

    #[test]
    fn test_defaults_are_not_cancelable() {
        let request = MessageBoxRequest::new(MessageBoxKind::Information);
        assert_eq!(request.cancel_index, 0);
        assert!(!request.is_cancelable());
        assert!(ok_cancel().is_cancelable());
    }

    #[test]
    fn test_empty_detail_keeps_message_as_content() {
        let request = MessageBoxRequest::new(MessageBoxKind::Error).message("boom");
        assert_eq!(request.content_layout(), ContentLayout::Plain("boom"));
    }

    #[test]
    fn test_detail_promotes_message_to_instruction() {
        let request = MessageBoxRequest::new(MessageBoxKind::Error)
            .message("boom")
            .detail("the long story");
        assert_eq!(
            request.content_layout(),
            ContentLayout::Highlighted { instruction: "boom", body: "the long story" }
        );
    }
}
