//! Session state: identity token and per-call deadlines.
//!
//! The session owns the only shared mutable state in the client: the
//! identity token and the credentials that produced it. Reads and writes go
//! through one mutex so a concurrent `authenticate` and a call using the old
//! token serialize instead of racing.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use crate::core::deadline::Deadline;
use crate::core::error::{Error, Result};
use crate::rpc::auth::{AuthDisableRequest, AuthEnableRequest, AuthenticateRequest};
use crate::rpc::transport::{CallContext, Transport};

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<String>,
    password: Option<String>,
}

/// Holds identity state and stamps every outgoing call with a deadline and
/// the current token.
pub struct Session {
    transport: Arc<dyn Transport>,
    state: Mutex<SessionState>,
    default_timeout: Duration,
}

impl Session {
    /// Create a session over the given transport.
    pub fn new(transport: Arc<dyn Transport>, default_timeout: Duration) -> Self {
        Self {
            transport,
            state: Mutex::new(SessionState::default()),
            default_timeout,
        }
    }

    /// The transport this session wraps.
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// The default per-call timeout.
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Build the context for an outgoing call.
    ///
    /// The explicit timeout wins; otherwise the configured default applies.
    /// A zero timeout yields an already-expired deadline, so the call fails
    /// deterministically with deadline-exceeded.
    pub fn context(&self, timeout: Option<Duration>) -> CallContext {
        let budget = timeout.unwrap_or(self.default_timeout);
        CallContext::new(Deadline::after(budget)).with_token(self.state.lock().token.clone())
    }

    /// The current identity token, if authenticated.
    pub fn token(&self) -> Option<String> {
        self.state.lock().token.clone()
    }

    /// The user that last authenticated.
    pub fn user(&self) -> Option<String> {
        self.state.lock().user.clone()
    }

    /// The password that last authenticated.
    pub fn password(&self) -> Option<String> {
        self.state.lock().password.clone()
    }

    /// Authenticate and store the resulting token.
    ///
    /// Fails with a precondition error when authentication is disabled
    /// server-side. Credentials are retained for re-authentication.
    pub fn authenticate(
        &self,
        user: &str,
        password: &str,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let ctx = self.context(timeout);
        let resp = self.transport.authenticate(
            &ctx,
            AuthenticateRequest {
                user: user.to_string(),
                password: password.to_string(),
            },
        )?;

        let mut state = self.state.lock();
        state.token = Some(resp.token);
        state.user = Some(user.to_string());
        state.password = Some(password.to_string());
        debug!(user, "session authenticated");
        Ok(())
    }

    /// Re-authenticate with the stored credentials, refreshing the token.
    pub fn reauthenticate(&self, timeout: Option<Duration>) -> Result<()> {
        let (user, password) = {
            let state = self.state.lock();
            match (&state.user, &state.password) {
                (Some(u), Some(p)) => (u.clone(), p.clone()),
                _ => {
                    return Err(Error::failed_precondition(
                        "no stored credentials to re-authenticate with",
                    ))
                }
            }
        };
        self.authenticate(&user, &password, timeout)
    }

    /// Enable authentication enforcement server-side.
    pub fn auth_enable(&self, timeout: Option<Duration>) -> Result<()> {
        let ctx = self.context(timeout);
        self.transport.auth_enable(&ctx, AuthEnableRequest {})?;
        debug!("auth enabled");
        Ok(())
    }

    /// Disable authentication enforcement server-side.
    ///
    /// The stored token is invalidated; privileged calls after this must
    /// re-authenticate once auth is enabled again.
    pub fn auth_disable(&self, timeout: Option<Duration>) -> Result<()> {
        let ctx = self.context(timeout);
        self.transport.auth_disable(&ctx, AuthDisableRequest {})?;
        self.state.lock().token = None;
        debug!("auth disabled, token cleared");
        Ok(())
    }
}
