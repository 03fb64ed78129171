use std::collections::BTreeMap;

use super::ControllerId;
use super::session::SessionId;

/// Document-scope pointer subscriptions, keyed by the session that registered
/// them.
///
/// Each active session owns exactly one move row and one release row; both
/// are added when the session starts and removed when it ends. Because rows
/// are keyed rather than stored in a single slot, controllers bound to the
/// same document can never detach or reroute each other's subscriptions.
#[derive(Debug, Default)]
pub(super) struct PointerListeners {
    moves: BTreeMap<SessionId, ControllerId>,
    releases: BTreeMap<SessionId, ControllerId>,
}

impl PointerListeners {
    pub(super) fn subscribe(&mut self, session: SessionId, controller: ControllerId) {
        self.moves.insert(session, controller);
        self.releases.insert(session, controller);
    }

    pub(super) fn unsubscribe(&mut self, session: SessionId) {
        self.moves.remove(&session);
        self.releases.remove(&session);
    }

    pub(super) fn has_move(&self, session: SessionId) -> bool {
        self.moves.contains_key(&session)
    }

    pub(super) fn has_release(&self, session: SessionId) -> bool {
        self.releases.contains_key(&session)
    }

    pub(super) fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.releases.is_empty()
    }

    pub(super) fn move_rows(&self) -> impl Iterator<Item = (SessionId, ControllerId)> + '_ {
        self.moves.iter().map(|(session, controller)| (*session, *controller))
    }

    pub(super) fn release_rows(&self) -> impl Iterator<Item = (SessionId, ControllerId)> + '_ {
        self.releases
            .iter()
            .map(|(session, controller)| (*session, *controller))
    }
}

#[cfg(test)]
mod tests {
    use super::super::session::SessionCounter;
    use super::*;

    #[test]
    fn subscriptions_are_keyed_per_session() {
        let mut counter = SessionCounter::default();
        let mut listeners = PointerListeners::default();

        let first = counter.allocate();
        let second = counter.allocate();
        listeners.subscribe(first, ControllerId(0));
        listeners.subscribe(second, ControllerId(1));

        // Removing one session's rows leaves the other untouched.
        listeners.unsubscribe(first);
        assert!(!listeners.has_move(first));
        assert!(!listeners.has_release(first));
        assert!(listeners.has_move(second));
        assert!(listeners.has_release(second));

        listeners.unsubscribe(second);
        assert!(listeners.is_empty());
    }

    #[test]
    fn unsubscribe_unknown_session_is_a_no_op() {
        let mut counter = SessionCounter::default();
        let mut listeners = PointerListeners::default();

        let known = counter.allocate();
        let unknown = counter.allocate();
        listeners.subscribe(known, ControllerId(0));
        listeners.unsubscribe(unknown);

        assert!(listeners.has_move(known));
        assert_eq!(listeners.move_rows().count(), 1);
        assert_eq!(listeners.release_rows().count(), 1);
    }
}
