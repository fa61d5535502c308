//! Defines an abstraction over the event sending mechanism.

use super::events::UserEvent;
use tao::event_loop::EventLoopProxy;

/// A trait that abstracts the sending of user events.
///
/// Menu handlers and background tasks hold an `EventProxy` instead of the
/// concrete tao proxy, so tests can substitute a channel-backed double.
/// Sending is fire-and-forget and does not return a result.
pub trait EventProxy: Send + Sync + Clone + 'static {
    fn send_event(&self, event: UserEvent);
}

impl EventProxy for EventLoopProxy<UserEvent> {
    fn send_event(&self, event: UserEvent) {
        // The real proxy errors once the event loop is gone; at that point
        // there is nobody left to act on the event, so log and move on.
        if let Err(e) = self.send_event(event) {
            tracing::warn!("Failed to send event to event loop: {}", e);
        }
    }
}
