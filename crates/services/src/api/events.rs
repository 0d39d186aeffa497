use campus_core::model::User;
use tokio::sync::broadcast;

/// Authentication lifecycle notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    LoggedIn(User),
    LoggedOut,
    /// The backend answered 401 to an authenticated request.
    TokenExpired,
}

/// Observer hub for `AuthEvent`s.
///
/// The host shell subscribes once at startup; the API client publishes
/// `TokenExpired` when a request comes back unauthorized.
#[derive(Clone, Debug)]
pub struct AuthEvents {
    tx: broadcast::Sender<AuthEvent>,
}

impl AuthEvents {
    const CAPACITY: usize = 16;

    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(Self::CAPACITY);
        Self { tx }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.tx.subscribe()
    }

    /// Publishes `event` and returns how many subscribers received it.
    pub fn emit(&self, event: AuthEvent) -> usize {
        // No subscriber is not an error: the event simply has no audience.
        self.tx.send(event).unwrap_or(0)
    }
}

impl Default for AuthEvents {
    fn default() -> Self {
        Self::new()
    }
}
