use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::domain::{OrderDraft, User};

/// Everything the client knows about the signed-in session: the auth
/// token, the cached profile, the order draft staged between checkout and
/// meeting confirmation, and the two navbar badge counts.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<User>,
    pub staged_order: Option<OrderDraft>,
    pub cart_items: usize,
    pub unread_notifications: u64,
}

/// Shared observable session store. Clones are handles to the same state;
/// every mutation publishes a fresh snapshot to all subscribers.
#[derive(Debug, Clone)]
pub struct SessionStore {
    state: Arc<watch::Sender<SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::default());
        SessionStore {
            state: Arc::new(state),
        }
    }

    /// Registers an observer. The receiver yields the state as of
    /// subscription and then every subsequent change.
    #[allow(dead_code)]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    #[allow(dead_code)]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        debug!("Storing session token");
        self.state
            .send_modify(|state| state.token = Some(token.into()));
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().token.is_some()
    }

    #[allow(dead_code)]
    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn set_current_user(&self, user: User) {
        self.state.send_modify(|state| state.user = Some(user));
    }

    /// Stages the checkout snapshot carried from the cart to meeting
    /// confirmation. Replaces any previously staged draft.
    pub fn stage_order(&self, draft: OrderDraft) {
        debug!(total = draft.total_amount, "Staging order draft");
        self.state
            .send_modify(|state| state.staged_order = Some(draft));
    }

    pub fn staged_order(&self) -> Option<OrderDraft> {
        self.state.borrow().staged_order.clone()
    }

    pub fn discard_staged_order(&self) {
        self.state.send_modify(|state| state.staged_order = None);
    }

    pub fn cart_items(&self) -> usize {
        self.state.borrow().cart_items
    }

    pub fn set_cart_items(&self, count: usize) {
        self.state.send_modify(|state| state.cart_items = count);
    }

    pub fn unread_notifications(&self) -> u64 {
        self.state.borrow().unread_notifications
    }

    pub fn set_unread_notifications(&self, count: u64) {
        self.state
            .send_modify(|state| state.unread_notifications = count);
    }

    /// Signs the session out: token, profile, staged draft and badges all
    /// reset in one published change.
    pub fn clear(&self) {
        debug!("Clearing session");
        self.state.send_modify(|state| *state = SessionState::default());
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore::new()
    }
}
