use std::rc::Rc;

use yew::prelude::*;

use crate::models::Session;
use crate::storage::SessionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    Checking,
    Authenticated,
    Unauthenticated,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub status: AuthStatus,
    pub session: Option<Session>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            status: AuthStatus::Checking,
            session: None,
        }
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }
}

pub enum SessionAction {
    /// Startup read of the persisted session.
    Restored(Option<Session>),
    SignedIn(Session),
    SignedOut,
    /// Another tab changed the persisted session.
    StorageChanged(Option<Session>),
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let session = match action {
            SessionAction::Restored(found) | SessionAction::StorageChanged(found) => found,
            SessionAction::SignedIn(session) => Some(session),
            SessionAction::SignedOut => None,
        };
        let status = if session.is_some() {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Unauthenticated
        };
        Rc::new(SessionState { status, session })
    }
}

/// The session as seen by every component. `sign_in` and `sign_out` are the
/// only places the persisted session is written.
#[derive(Clone, PartialEq)]
pub struct SessionContext {
    state: UseReducerHandle<SessionState>,
}

impl SessionContext {
    pub fn new(state: UseReducerHandle<SessionState>) -> Self {
        Self { state }
    }

    pub fn status(&self) -> AuthStatus {
        self.state.status
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session.as_ref()
    }

    pub fn user_id(&self) -> Option<String> {
        self.session().map(|s| s.user_id.clone())
    }

    pub fn display_name(&self) -> String {
        self.session()
            .map(|s| s.display_name.clone())
            .unwrap_or_default()
    }

    pub fn restore(&self) {
        let found = SessionStore::browser().load();
        tracing::debug!(found = found.is_some(), "restored session from storage");
        self.state.dispatch(SessionAction::Restored(found));
    }

    pub fn sync_from_storage(&self) {
        let found = SessionStore::browser().load();
        tracing::info!(found = found.is_some(), "session changed in another tab");
        self.state.dispatch(SessionAction::StorageChanged(found));
    }

    pub fn sign_in(&self, session: Session) {
        if let Err(err) = SessionStore::browser().save(&session) {
            tracing::error!(error = %err, "could not persist session");
        }
        tracing::info!(user_id = %session.user_id, "signed in");
        self.state.dispatch(SessionAction::SignedIn(session));
    }

    pub fn sign_out(&self) {
        if let Err(err) = SessionStore::browser().clear() {
            tracing::error!(error = %err, "could not clear session");
        }
        tracing::info!("signed out");
        self.state.dispatch(SessionAction::SignedOut);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            user_id: "12".into(),
            display_name: "Ravi".into(),
        }
    }

    #[test]
    fn starts_checking() {
        let state = SessionState::default();
        assert_eq!(state.status, AuthStatus::Checking);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn restore_decides_status() {
        let state = Rc::new(SessionState::default());
        let found = state.clone().reduce(SessionAction::Restored(Some(session())));
        assert_eq!(found.status, AuthStatus::Authenticated);
        let missing = state.reduce(SessionAction::Restored(None));
        assert_eq!(missing.status, AuthStatus::Unauthenticated);
    }

    #[test]
    fn sign_in_then_out() {
        let state = Rc::new(SessionState::default()).reduce(SessionAction::Restored(None));
        let state = state.reduce(SessionAction::SignedIn(session()));
        assert_eq!(state.session.as_ref(), Some(&session()));
        assert!(state.is_authenticated());
        let state = state.reduce(SessionAction::SignedOut);
        assert_eq!(state.session, None);
        assert_eq!(state.status, AuthStatus::Unauthenticated);
    }

    #[test]
    fn other_tab_logout_drops_session() {
        let state = Rc::new(SessionState::default()).reduce(SessionAction::SignedIn(session()));
        let state = state.reduce(SessionAction::StorageChanged(None));
        assert_eq!(state.status, AuthStatus::Unauthenticated);
    }
}
