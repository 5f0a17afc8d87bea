//! Stale-response guard for the advice collaborator.
//!
//! Strategy text comes from an outside service that answers asynchronously.
//! The engine never talks to it. What lives here is the bookkeeping a caller
//! needs so that a slow answer for an old score never replaces the text for
//! the score currently on screen: each request is tagged with the
//! `(score, mode)` it was issued for and a sequence id, and a reply is only
//! accepted if its ticket is still the latest one for the current input.

use tracing::{debug, warn};

use crate::checkout::GameMode;

/// Handle for one outstanding advice request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdviceTicket {
    id: u64,
    score: u32,
    mode: GameMode,
}

impl AdviceTicket {
    /// Sequence number, increasing per gate.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Score the request was issued for.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Mode the request was issued for.
    pub fn mode(&self) -> GameMode {
        self.mode
    }
}

/// What happened to a resolved reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceOutcome {
    /// The reply matches the current input and is now the shown text.
    Accepted(String),
    /// The input changed or a newer request was issued; the reply was dropped.
    Stale,
    /// The collaborator failed; no advice is shown.
    Failed,
}

/// Tracks the current input and the latest advice request for it.
#[derive(Debug, Default)]
pub struct AdviceGate {
    next_id: u64,
    current: Option<(u32, GameMode)>,
    latest: Option<AdviceTicket>,
    text: Option<String>,
}

impl AdviceGate {
    /// Create a gate with no input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new input. Shown text and pending tickets for a different
    /// input are discarded.
    pub fn set_input(&mut self, score: u32, mode: GameMode) {
        if self.current == Some((score, mode)) {
            return;
        }
        self.current = Some((score, mode));
        self.latest = None;
        self.text = None;
    }

    /// Forget the input entirely, e.g. when the keypad is cleared.
    pub fn clear_input(&mut self) {
        self.current = None;
        self.latest = None;
        self.text = None;
    }

    /// Issue a request for `(score, mode)`, making it the current input.
    pub fn request(&mut self, score: u32, mode: GameMode) -> AdviceTicket {
        self.set_input(score, mode);
        self.next_id += 1;
        let ticket = AdviceTicket { id: self.next_id, score, mode };
        self.latest = Some(ticket);
        debug!(id = ticket.id, score, %mode, "advice requested");
        ticket
    }

    /// Whether a request is outstanding for the current input.
    pub fn is_pending(&self) -> bool {
        self.latest.is_some()
    }

    /// Deliver the collaborator's reply for `ticket`.
    pub fn resolve<E: std::fmt::Display>(&mut self, ticket: AdviceTicket, reply: Result<String, E>) -> AdviceOutcome {
        if self.latest != Some(ticket) || self.current != Some((ticket.score, ticket.mode)) {
            debug!(id = ticket.id, score = ticket.score, "dropping stale advice");
            return AdviceOutcome::Stale;
        }
        self.latest = None;

        match reply {
            Ok(text) => {
                self.text = Some(text.clone());
                AdviceOutcome::Accepted(text)
            }
            Err(e) => {
                warn!(id = ticket.id, score = ticket.score, error = %e, "advice request failed");
                self.text = None;
                AdviceOutcome::Failed
            }
        }
    }

    /// Advice text for the current input, if any arrived.
    pub fn current_text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Reply = Result<String, &'static str>;

    fn ok(text: &str) -> Reply {
        Ok(text.to_string())
    }

    #[test]
    fn test_matching_reply_is_accepted() {
        let mut gate = AdviceGate::new();
        let ticket = gate.request(100, GameMode::DoubleOut);
        assert!(gate.is_pending());
        assert_eq!(gate.resolve(ticket, ok("T20 D20")), AdviceOutcome::Accepted("T20 D20".into()));
        assert_eq!(gate.current_text(), Some("T20 D20"));
        assert!(!gate.is_pending());
    }

    #[test]
    fn test_reply_after_input_change_is_stale() {
        let mut gate = AdviceGate::new();
        let old = gate.request(100, GameMode::DoubleOut);
        gate.set_input(101, GameMode::DoubleOut);
        assert_eq!(gate.resolve(old, ok("T20 D20")), AdviceOutcome::Stale);
        assert_eq!(gate.current_text(), None);
    }

    #[test]
    fn test_mode_change_also_invalidates() {
        let mut gate = AdviceGate::new();
        let old = gate.request(100, GameMode::DoubleOut);
        let new = gate.request(100, GameMode::MasterOut);
        assert_eq!(gate.resolve(new, ok("T20 D20 or S20 T20 D10")), AdviceOutcome::Accepted("T20 D20 or S20 T20 D10".into()));
        assert_eq!(gate.resolve(old, ok("T20 D20")), AdviceOutcome::Stale);
        assert_eq!(gate.current_text(), Some("T20 D20 or S20 T20 D10"));
    }

    #[test]
    fn test_older_request_for_same_input_is_stale() {
        let mut gate = AdviceGate::new();
        let first = gate.request(60, GameMode::DoubleOut);
        let second = gate.request(60, GameMode::DoubleOut);
        assert!(second.id() > first.id());
        assert_eq!(gate.resolve(first, ok("first")), AdviceOutcome::Stale);
        assert_eq!(gate.resolve(second, ok("second")), AdviceOutcome::Accepted("second".into()));
    }

    #[test]
    fn test_failure_degrades_to_no_text() {
        let mut gate = AdviceGate::new();
        let ticket = gate.request(40, GameMode::DoubleOut);
        assert_eq!(gate.resolve(ticket, Err("timeout")), AdviceOutcome::Failed);
        assert_eq!(gate.current_text(), None);
    }

    #[test]
    fn test_clear_input_drops_everything() {
        let mut gate = AdviceGate::new();
        let ticket = gate.request(40, GameMode::DoubleOut);
        gate.clear_input();
        assert_eq!(gate.resolve(ticket, ok("D20")), AdviceOutcome::Stale);
    }

    #[test]
    fn test_same_input_keeps_text() {
        let mut gate = AdviceGate::new();
        let ticket = gate.request(40, GameMode::DoubleOut);
        gate.resolve(ticket, ok("D20"));
        gate.set_input(40, GameMode::DoubleOut);
        assert_eq!(gate.current_text(), Some("D20"));
    }
}
