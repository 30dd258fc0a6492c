use tracing::{info, warn};

use fishpedia_shared::User;

use crate::error::CommandError;
use crate::events::CatalogEvent;
use crate::state::{lock, SharedState};

/// Start a session for `email`. A malformed address leaves the current
/// session (or its absence) as it was.
pub fn login(state: &SharedState, email: &str) -> Result<User, CommandError> {
    let user = User::from_email(email.trim()).map_err(|e| {
        warn!("Login rejected: malformed email");
        CommandError::from(e)
    })?;

    let mut guard = lock(state)?;
    guard.session = Some(user.clone());
    guard.events.emit(CatalogEvent::SessionChanged {
        user: Some(user.name.clone()),
    });

    info!(user = %user.name, "Logged in");
    Ok(user)
}

/// End the session. Favorites are kept.
pub fn logout(state: &SharedState) -> Result<(), CommandError> {
    let mut guard = lock(state)?;
    if let Some(user) = guard.session.take() {
        info!(user = %user.name, "Logged out");
    }
    guard
        .events
        .emit(CatalogEvent::SessionChanged { user: None });
    Ok(())
}

pub fn current_user(state: &SharedState) -> Result<Option<User>, CommandError> {
    Ok(lock(state)?.session.clone())
}

#[cfg(test)]
mod tests {
    use fishpedia_shared::ValidationError;

    use super::*;
    use crate::state::AppState;

    #[test]
    fn test_login_derives_name() {
        let state = AppState::seeded().into_shared();
        let user = login(&state, "user@example.com").unwrap();
        assert_eq!(user.name, "user");
        assert_eq!(user.email, "user@example.com");
        assert_eq!(current_user(&state).unwrap(), Some(user));
    }

    #[test]
    fn test_bad_email_keeps_previous_session() {
        let state = AppState::seeded().into_shared();
        assert_eq!(
            login(&state, "not-an-email"),
            Err(CommandError::Validation(ValidationError::InvalidEmail))
        );
        assert_eq!(current_user(&state).unwrap(), None);

        login(&state, "first@example.com").unwrap();
        assert!(login(&state, "still not valid").is_err());
        assert_eq!(current_user(&state).unwrap().unwrap().name, "first");
    }

    #[test]
    fn test_logout_clears_session() {
        let state = AppState::seeded().into_shared();
        login(&state, "user@example.com").unwrap();
        logout(&state).unwrap();
        assert_eq!(current_user(&state).unwrap(), None);
    }

    #[test]
    fn test_session_events() {
        let state = AppState::seeded().into_shared();
        let mut rx = state.lock().unwrap().events.subscribe();

        login(&state, "diver@reef.io").unwrap();
        logout(&state).unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            CatalogEvent::SessionChanged {
                user: Some("diver".into())
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            CatalogEvent::SessionChanged { user: None }
        );
    }
}
