//! Text-insertion target contract.

use crate::types::KeyEvent;

/// The platform surface the router inserts text into.
///
/// Positions are character offsets into the surface's extracted text, as the
/// platform reports them.
pub trait TextSurface {
    /// Finalize `text` into the document at the cursor.
    fn commit_text(&mut self, text: &str);
    /// Show `text` as the provisional (composing) span.
    fn set_composing_text(&mut self, text: &str);
    /// End the current composing span, leaving its text in place.
    fn finish_composing_text(&mut self);
    fn selected_text(&self) -> Option<String>;
    fn text_before_cursor(&self, n: usize) -> Option<String>;
    /// Cursor position in the extracted text, if the surface can produce it.
    fn cursor_position(&self) -> Option<usize>;
    fn set_selection(&mut self, start: usize, end: usize);
    /// Dispatch a synthesized key event back to the platform.
    fn send_raw_key(&mut self, event: KeyEvent);
}
