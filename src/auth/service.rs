//! Session lifecycle service.
//!
//! `AuthService` ties the pieces together: it drives the [`ApiClient`]
//! for register/login, publishes the result to the [`SessionStore`],
//! persists it through [`SessionStorage`], and arms a one-shot timer
//! that logs the user out when the access token expires.
//!
//! Exactly one expiry timer is live at a time: arming a new one (e.g. a
//! re-login before the old token ran out) cancels the previous timer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::models::{AccessData, LoginRequest, RegisterRequest};

use super::storage::SessionStorage;
use super::store::SessionStore;
use super::token;

/// Route the host application should navigate to after logout.
pub const LOGIN_ROUTE: &str = "/auth/login";

type LogoutHook = Arc<dyn Fn(&str) + Send + Sync>;

struct ServiceInner {
    client: ApiClient,
    store: SessionStore,
    storage: SessionStorage,
    expiry_timer: Mutex<Option<JoinHandle<()>>>,
    on_logout: Mutex<Option<LogoutHook>>,
}

/// Session lifecycle service.
/// Clone is cheap - the state is shared behind an Arc, so the expiry
/// task and the host UI can hold the same service.
#[derive(Clone)]
pub struct AuthService {
    inner: Arc<ServiceInner>,
}

impl AuthService {
    pub fn new(client: ApiClient, storage: SessionStorage) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                client,
                store: SessionStore::new(),
                storage,
                expiry_timer: Mutex::new(None),
                on_logout: Mutex::new(None),
            }),
        }
    }

    /// The observable session state. Subscribe here for login/logout
    /// notifications.
    pub fn store(&self) -> &SessionStore {
        &self.inner.store
    }

    /// True iff a user is currently logged in.
    pub fn is_authenticated(&self) -> bool {
        self.inner.store.is_authenticated()
    }

    /// Register a hook invoked after logout with the route to navigate
    /// to. Replaces any previously registered hook.
    pub fn on_logout<F>(&self, hook: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        *self
            .inner
            .on_logout
            .lock()
            .expect("logout hook lock poisoned") = Some(Arc::new(hook));
    }

    /// Create a new account. No session side effects; callers log in
    /// separately (or the host auto-fills the login form).
    pub async fn register(&self, request: &RegisterRequest) -> Result<AccessData> {
        self.inner.client.register(request).await
    }

    /// Log in and establish the session: the result is published to the
    /// session store, persisted to disk, and the expiry timer is armed
    /// before the access data is returned to the caller.
    pub async fn login(&self, request: &LoginRequest) -> Result<AccessData> {
        let data = self.inner.client.login(request).await?;

        self.inner.store.publish(Some(data.clone()));
        self.inner
            .storage
            .save(&data)
            .context("Failed to persist session")?;
        self.schedule_expiry(&data.access_token)?;

        info!(email = %data.user.email, "logged in");
        Ok(data)
    }

    /// Restore a persisted session on startup. Must run inside the
    /// Tokio runtime (the expiry timer is a spawned task).
    ///
    /// Returns `true` if a valid session was found and published. An
    /// absent entry leaves the state anonymous; an expired or
    /// undecodable entry is discarded from disk.
    pub fn restore(&self) -> Result<bool> {
        let Some(data) = self.inner.storage.load()? else {
            return Ok(false);
        };

        match token::is_expired(&data.access_token) {
            Ok(false) => {}
            Ok(true) => {
                debug!("stored session has expired, discarding");
                self.inner.storage.clear()?;
                return Ok(false);
            }
            Err(e) => {
                warn!(error = %e, "stored access token is undecodable, discarding");
                self.inner.storage.clear()?;
                return Ok(false);
            }
        }

        self.inner.store.publish(Some(data.clone()));
        self.schedule_expiry(&data.access_token)?;
        info!(email = %data.user.email, "session restored");
        Ok(true)
    }

    /// Arm the automatic-logout timer for the token's `exp` instant,
    /// cancelling any previously armed timer. A token that is already
    /// expired logs out immediately.
    pub fn schedule_expiry(&self, access_token: &str) -> Result<()> {
        let expires_at = token::expires_at(access_token)
            .context("Failed to decode access token expiry")?;
        let delay_ms = (expires_at - Utc::now()).num_milliseconds();

        if delay_ms <= 0 {
            debug!("access token already expired");
            return self.logout();
        }

        debug!(delay_ms, "arming session expiry timer");
        let service = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms as u64)).await;
            info!("access token expired");
            if let Err(e) = service.logout() {
                warn!(error = %e, "automatic logout failed");
            }
        });

        let previous = self
            .inner
            .expiry_timer
            .lock()
            .expect("expiry timer lock poisoned")
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
        Ok(())
    }

    /// Log out: cancel the expiry timer, publish the anonymous state,
    /// erase the persisted session, and tell the host to navigate to
    /// the login route. Idempotent.
    pub fn logout(&self) -> Result<()> {
        // When invoked from the expiry task this aborts the task's own
        // handle; the abort only lands at an await point and everything
        // below is synchronous, so logout still completes.
        let timer = self
            .inner
            .expiry_timer
            .lock()
            .expect("expiry timer lock poisoned")
            .take();
        if let Some(timer) = timer {
            timer.abort();
        }

        self.inner.store.publish(None);
        self.inner.storage.clear()?;

        // Clone the hook out of the lock so it may re-enter the service
        let hook = self
            .inner
            .on_logout
            .lock()
            .expect("logout hook lock poisoned")
            .clone();
        if let Some(hook) = hook {
            hook(LOGIN_ROUTE);
        }

        info!("logged out");
        Ok(())
    }
}
