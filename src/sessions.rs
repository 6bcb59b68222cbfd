// src/sessions.rs
//
// Dashboard sessions: one upstream client and one hospital wizard per signed-in admin.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use crate::auth::{generate_access_token, hash_access_token};
use crate::client::ApiClient;
use crate::wizard::SharedWizard;

pub struct DashboardSession {
    pub username: String,
    pub client: ApiClient,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub wizard: SharedWizard,
}

impl DashboardSession {
    /// False once expired or once the upstream rejected our token.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at && self.client.session().is_active()
    }
}

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<DashboardSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the plain token (shown once) and its session. Dead sessions are
    /// swept out on the way in.
    pub async fn create(
        &self,
        username: &str,
        client: ApiClient,
        ttl_hours: i64,
    ) -> (String, Arc<DashboardSession>) {
        let token = generate_access_token();
        let now = Utc::now();
        let session = Arc::new(DashboardSession {
            username: username.to_string(),
            client,
            created_at: now,
            // out-of-range ttl gives a session that is already dead
            expires_at: TimeDelta::try_hours(ttl_hours)
                .and_then(|ttl| now.checked_add_signed(ttl))
                .unwrap_or(now),
            wizard: SharedWizard::new(),
        });

        let mut sessions = self.sessions.write().await;
        Self::sweep_locked(&mut sessions, now);
        sessions.insert(hash_access_token(&token), session.clone());
        (token, session)
    }

    /// Drops every expired or torn-down session. Returns how many went.
    pub async fn sweep(&self) -> usize {
        Self::sweep_locked(&mut *self.sessions.write().await, Utc::now())
    }

    fn sweep_locked(sessions: &mut HashMap<String, Arc<DashboardSession>>, now: DateTime<Utc>) -> usize {
        let before = sessions.len();
        sessions.retain(|_, session| session.is_live(now));
        let swept = before - sessions.len();
        if swept > 0 {
            tracing::info!(swept, "dropped dead dashboard sessions");
        }
        swept
    }

    /// Live session for a token. Dead sessions are dropped on sight.
    pub async fn lookup(&self, token: &str) -> Option<Arc<DashboardSession>> {
        let key = hash_access_token(token);
        let session = self.sessions.read().await.get(&key).cloned()?;
        if session.is_live(Utc::now()) {
            return Some(session);
        }

        tracing::info!(username = %session.username, "dropping dead dashboard session");
        self.sessions.write().await.remove(&key);
        None
    }

    pub async fn remove(&self, token: &str) -> bool {
        self.sessions
            .write()
            .await
            .remove(&hash_access_token(token))
            .is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Session;

    fn client() -> ApiClient {
        ApiClient::new("http://upstream.test", Session::with_token("up-token"))
    }

    #[tokio::test]
    async fn create_then_lookup() {
        let store = SessionStore::new();
        let (token, _) = store.create("admin", client(), 24).await;

        let found = store.lookup(&token).await.unwrap();
        assert_eq!(found.username, "admin");
        assert!(store.lookup("not-a-token").await.is_none());
    }

    #[tokio::test]
    async fn upstream_teardown_kills_session() {
        let store = SessionStore::new();
        let (token, session) = store.create("admin", client(), 24).await;

        session.client.session().clear();
        assert!(store.lookup(&token).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn expired_session_is_dropped() {
        let store = SessionStore::new();
        let (token, _) = store.create("admin", client(), 0).await;
        assert!(store.lookup(&token).await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn abandoned_sessions_are_swept_without_lookup() {
        let store = SessionStore::new();
        store.create("stale", client(), 0).await;
        let (_, torn) = store.create("torn", client(), 24).await;
        torn.client.session().clear();
        assert_eq!(store.len().await, 1);

        let (token, _) = store.create("fresh", client(), 24).await;
        assert_eq!(store.len().await, 1);
        assert!(store.lookup(&token).await.is_some());
    }

    #[tokio::test]
    async fn sweep_reports_count() {
        let store = SessionStore::new();
        let (_, first) = store.create("a", client(), 24).await;
        let (_, second) = store.create("b", client(), 24).await;
        first.client.session().clear();
        second.client.session().clear();

        assert_eq!(store.sweep().await, 2);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn huge_ttl_does_not_panic() {
        let store = SessionStore::new();
        let (token, session) = store.create("admin", client(), i64::MAX).await;
        assert_eq!(session.expires_at, session.created_at);
        assert!(store.lookup(&token).await.is_none());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = SessionStore::new();
        let (token, _) = store.create("admin", client(), 24).await;
        assert!(store.remove(&token).await);
        assert!(!store.remove(&token).await);
    }
}
