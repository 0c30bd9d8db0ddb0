//! Blocking dialogs the submitter needs from whatever hosts it.

/// A synchronous yes/no question and a one-way notice.
///
/// Both calls block the caller until the user has answered or dismissed them.
pub trait UserInteraction: Send + Sync {
    fn confirm(&self, text: &str) -> bool;
    fn notify(&self, text: &str);
}
