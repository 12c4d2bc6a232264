//! C6 — user identity lookup.
//!
//! The real deployment backs this with a relational store; that store is an
//! external collaborator out of scope here, so `UserStore` is a trait with
//! one in-memory reference implementation good enough for the gateway to run
//! standalone and for tests to exercise the login side effect.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Result of checking a username/password pair against the store.
pub enum AuthOutcome {
    /// Credentials matched an existing account.
    Ok(u64),
    /// The account exists but the password didn't match.
    WrongPassword,
    /// No account exists for that username yet.
    NotFound,
}

/// Looks up or provisions users by username, handing back the numeric
/// `user_id` the rest of the system speaks in terms of.
pub trait UserStore: Send + Sync {
    /// Checks `username`/`password` against an existing account, if any.
    /// Does not create accounts.
    fn authenticate(&self, username: &str, password: &str) -> AuthOutcome;

    /// Creates a new account for `username` with `password`, returning its
    /// freshly minted `user_id`. Caller is responsible for having confirmed
    /// via `authenticate` that the username isn't already taken.
    fn create(&self, username: &str, password: &str) -> u64;
}

/// `Mutex<HashMap<..>>`-backed store, seeded empty. Good enough to stand in
/// for the relational store in a single gateway process.
pub struct InMemoryUserStore {
    next_id: AtomicU64,
    users: Mutex<HashMap<String, (u64, String)>>,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            users: Mutex::new(HashMap::new()),
        }
    }
}

impl UserStore for InMemoryUserStore {
    fn authenticate(&self, username: &str, password: &str) -> AuthOutcome {
        let users = self.users.lock().expect("user store mutex poisoned");
        match users.get(username) {
            Some((user_id, stored_password)) if stored_password == password => {
                AuthOutcome::Ok(*user_id)
            }
            Some(_) => AuthOutcome::WrongPassword,
            None => AuthOutcome::NotFound,
        }
    }

    fn create(&self, username: &str, password: &str) -> u64 {
        let mut users = self.users.lock().expect("user store mutex poisoned");
        let user_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        users.insert(username.to_string(), (user_id, password.to_string()));
        user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_authenticate_round_trips() {
        let store = InMemoryUserStore::default();
        let id = store.create("alice", "hunter2");
        match store.authenticate("alice", "hunter2") {
            AuthOutcome::Ok(found) => assert_eq!(found, id),
            _ => panic!("expected authenticate to succeed"),
        }
    }

    #[test]
    fn authenticate_rejects_wrong_password() {
        let store = InMemoryUserStore::default();
        store.create("bob", "correct-horse");
        assert!(matches!(
            store.authenticate("bob", "wrong"),
            AuthOutcome::WrongPassword
        ));
    }

    #[test]
    fn authenticate_reports_not_found_for_unknown_username() {
        let store = InMemoryUserStore::default();
        assert!(matches!(
            store.authenticate("nobody", "whatever"),
            AuthOutcome::NotFound
        ));
    }
}
