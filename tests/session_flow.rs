// Sign-in and sign-out as seen from storage, the session reducer and the
// route gate, without a browser.

use std::rc::Rc;

use finance_tracker_frontend::auth::{extract_identity, AuthMode};
use finance_tracker_frontend::error::ApiError;
use finance_tracker_frontend::routes::{gate, Route, RouteOutcome};
use finance_tracker_frontend::session::{AuthStatus, SessionAction, SessionState};
use finance_tracker_frontend::storage::{
    affects_session, KeyValueStore, MemoryStorage, SessionStore, NAME_KEY, USER_ID_KEY,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use yew::prelude::Reducible;

fn store() -> SessionStore<MemoryStorage> {
    SessionStore::new(MemoryStorage::new())
}

#[test]
fn login_payload_signs_the_user_in() {
    let store = store();
    let payload = json!({ "user_id": 42, "name": "Asha Rao", "message": "Login successful" });

    let session = extract_identity(AuthMode::Login, &payload).expect("identity present");
    store.save(&session).expect("memory store accepts writes");

    assert_eq!(store.storage().get(USER_ID_KEY).as_deref(), Some("42"));
    assert_eq!(store.storage().get(NAME_KEY).as_deref(), Some("Asha Rao"));

    let state = Rc::new(SessionState::default()).reduce(SessionAction::SignedIn(session));
    assert_eq!(state.status, AuthStatus::Authenticated);
    assert_eq!(
        gate(Route::Auth, state.is_authenticated()),
        RouteOutcome::Redirect(Route::Dashboard)
    );
    assert_eq!(
        gate(Route::Budget, state.is_authenticated()),
        RouteOutcome::Render(Route::Budget)
    );
}

#[test]
fn signup_payload_prefers_id() {
    let payload = json!({ "id": "7", "user_id": "9", "name": "Ravi" });
    let session = extract_identity(AuthMode::Signup, &payload).expect("identity present");
    assert_eq!(session.user_id, "7");
}

#[test]
fn missing_identity_leaves_storage_untouched() {
    let store = store();
    let payload = json!({ "message": "Login successful" });

    let err = extract_identity(AuthMode::Login, &payload).unwrap_err();
    assert_eq!(err, ApiError::MissingIdentity);
    assert_eq!(err.user_message(), "Missing identity fields in server response.");

    assert_eq!(store.load(), None);
}

#[test]
fn restore_then_logout() {
    let store = store();
    store.storage().set(USER_ID_KEY, "3").unwrap();
    store.storage().set(NAME_KEY, "Meera").unwrap();

    let state = Rc::new(SessionState::default()).reduce(SessionAction::Restored(store.load()));
    assert_eq!(state.status, AuthStatus::Authenticated);

    store.clear().unwrap();
    let state = state.reduce(SessionAction::SignedOut);
    assert_eq!(state.status, AuthStatus::Unauthenticated);
    assert_eq!(store.load(), None);
    assert_eq!(
        gate(Route::Dashboard, state.is_authenticated()),
        RouteOutcome::Redirect(Route::Auth)
    );
}

#[test]
fn other_tab_logout_is_followed() {
    let store = store();
    store.storage().set(USER_ID_KEY, "3").unwrap();
    let state = Rc::new(SessionState::default()).reduce(SessionAction::Restored(store.load()));

    // another tab removes the id
    store.storage().remove(USER_ID_KEY).unwrap();
    assert!(affects_session(Some(USER_ID_KEY)));
    assert!(!affects_session(Some("monthlyLimit")));

    let state = state.reduce(SessionAction::StorageChanged(store.load()));
    assert_eq!(state.status, AuthStatus::Unauthenticated);
}
