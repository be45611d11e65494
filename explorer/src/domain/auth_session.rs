//! Authentication session state machine.
//!
//! States: `Unconfigured → Initializing → {SignedOut, SignedIn}`, with
//! `SignedOut ⇄ SignedIn` via `TransitionInProgress`. The manager owns the
//! provider subscription for its whole lifetime and tears it down on
//! [`AuthSessionManager::shutdown`] or drop.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::error::AuthError;
use super::localization::{Locale, MessageKey, localize};
use super::ports::IdentityProvider;

const UNKNOWN_SIGN_IN_CODE: &str = "unknown";
const UNKNOWN_SIGN_OUT_CODE: &str = "sign-out-error";

/// Profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Display name, when the provider has one.
    pub display_name: Option<String>,
    /// Account email.
    pub email: String,
    /// Avatar URL, when the provider has one.
    pub photo_url: Option<String>,
}

impl UserProfile {
    /// Display name falling back to a localised "user" label.
    pub fn display_name_or_default(&self, locale: Locale) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| localize(MessageKey::DefaultDisplayName, locale))
    }
}

/// Session lifecycle states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSession {
    /// Configuration was absent at start; terminal.
    Unconfigured,
    /// Waiting for the first session change from the provider.
    Initializing,
    /// No user is signed in.
    SignedOut,
    /// A user is signed in.
    SignedIn(UserProfile),
    /// A sign-in or sign-out call is in flight.
    TransitionInProgress,
}

impl AuthSession {
    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::SignedIn(profile) => Some(profile),
            _ => None,
        }
    }
}

/// Session actions the user can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    /// Interactive sign-in.
    SignIn,
    /// Sign-out.
    SignOut,
}

impl fmt::Display for AuthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignIn => f.write_str("sign-in"),
            Self::SignOut => f.write_str("sign-out"),
        }
    }
}

/// Identity provider error codes with dedicated user-facing copy.
///
/// Unknown codes land in [`ProviderErrorCode::Other`] and use the generic
/// message; adding a code means adding a variant and its two match arms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorCode {
    /// `auth/popup-blocked`
    PopupBlocked,
    /// `auth/popup-closed-by-user`
    PopupClosedByUser,
    /// `auth/cancelled-popup-request`
    CancelledPopupRequest,
    /// `auth/unauthorized-domain`
    UnauthorizedDomain,
    /// `auth/invalid-oauth-client-id`
    InvalidOAuthClientId,
    /// `auth/operation-not-supported-in-this-environment`
    OperationNotSupported,
    /// `auth/network-request-failed`
    NetworkRequestFailed,
    /// `auth/configuration-not-found`
    ConfigurationNotFound,
    /// Any other code, kept verbatim.
    Other(String),
}

impl ProviderErrorCode {
    /// Raw provider code.
    pub fn as_str(&self) -> &str {
        match self {
            Self::PopupBlocked => "auth/popup-blocked",
            Self::PopupClosedByUser => "auth/popup-closed-by-user",
            Self::CancelledPopupRequest => "auth/cancelled-popup-request",
            Self::UnauthorizedDomain => "auth/unauthorized-domain",
            Self::InvalidOAuthClientId => "auth/invalid-oauth-client-id",
            Self::OperationNotSupported => "auth/operation-not-supported-in-this-environment",
            Self::NetworkRequestFailed => "auth/network-request-failed",
            Self::ConfigurationNotFound => "auth/configuration-not-found",
            Self::Other(code) => code.as_str(),
        }
    }

    pub(crate) fn message_key(&self) -> MessageKey {
        match self {
            Self::PopupBlocked => MessageKey::AuthPopupBlocked,
            Self::PopupClosedByUser => MessageKey::AuthPopupClosed,
            Self::CancelledPopupRequest => MessageKey::AuthPopupPending,
            Self::UnauthorizedDomain => MessageKey::AuthUnauthorizedDomain,
            Self::InvalidOAuthClientId => MessageKey::AuthInvalidClientId,
            Self::OperationNotSupported => MessageKey::AuthUnsupportedEnvironment,
            Self::NetworkRequestFailed => MessageKey::AuthNetworkFailed,
            Self::ConfigurationNotFound => MessageKey::AuthProviderDisabled,
            Self::Other(_) => MessageKey::AuthGenericFailure,
        }
    }
}

impl From<&str> for ProviderErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "auth/popup-blocked" => Self::PopupBlocked,
            "auth/popup-closed-by-user" => Self::PopupClosedByUser,
            "auth/cancelled-popup-request" => Self::CancelledPopupRequest,
            "auth/unauthorized-domain" => Self::UnauthorizedDomain,
            "auth/invalid-oauth-client-id" => Self::InvalidOAuthClientId,
            "auth/operation-not-supported-in-this-environment" => Self::OperationNotSupported,
            "auth/network-request-failed" => Self::NetworkRequestFailed,
            "auth/configuration-not-found" => Self::ConfigurationNotFound,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session state plus the last auth error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    /// Current session state.
    pub session: AuthSession,
    /// Last sign-in/sign-out error, cleared when a new action starts or the
    /// provider reports a session change.
    pub error: Option<AuthError>,
}

impl AuthSnapshot {
    fn new(session: AuthSession) -> Self {
        Self {
            session,
            error: None,
        }
    }

    /// Whether gated UI should show the "checking session" affordance.
    pub fn is_checking(&self) -> bool {
        matches!(self.session, AuthSession::Initializing)
    }

    /// Copy for the "checking session" affordance.
    pub fn checking_message(locale: Locale) -> &'static str {
        localize(MessageKey::CheckingSession, locale)
    }

    fn session_for(user: Option<UserProfile>) -> AuthSession {
        match user {
            Some(profile) => AuthSession::SignedIn(profile),
            None => AuthSession::SignedOut,
        }
    }
}

/// Published snapshot plus the last session that was not a transition.
///
/// A failed sign-out restores `settled`, which always reflects the most
/// recent outcome from the listener or a completed action.
struct SessionCell {
    published: watch::Sender<AuthSnapshot>,
    settled: Mutex<AuthSession>,
}

impl SessionCell {
    fn new(session: AuthSession) -> Self {
        let (published, _) = watch::channel(AuthSnapshot::new(session.clone()));
        Self {
            published,
            settled: Mutex::new(session),
        }
    }

    fn settle(&self, session: AuthSession, error: Option<AuthError>) {
        let mut guard = self.settled.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = session.clone();
        self.published.send_modify(|snapshot| {
            snapshot.session = session;
            snapshot.error = error;
        });
    }

    fn settled(&self) -> AuthSession {
        self.settled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Owner of the session state and the provider subscription.
pub struct AuthSessionManager {
    provider: Arc<dyn IdentityProvider>,
    configured: bool,
    state: Arc<SessionCell>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl AuthSessionManager {
    /// Start the manager.
    ///
    /// When `configuration_present` is false or the provider reports itself
    /// unconfigured, the manager enters `Unconfigured` permanently and never
    /// subscribes. Otherwise it enters `Initializing` and spawns the listener
    /// that applies session changes, so it must be called inside a Tokio
    /// runtime.
    pub fn start(provider: Arc<dyn IdentityProvider>, configuration_present: bool) -> Self {
        let configured = configuration_present && provider.is_configured();
        if !configured {
            warn!(
                configuration_present,
                "identity provider not configured; sign-in and translation are disabled"
            );
            return Self {
                provider,
                configured,
                state: Arc::new(SessionCell::new(AuthSession::Unconfigured)),
                listener: Mutex::new(None),
            };
        }

        let state = Arc::new(SessionCell::new(AuthSession::Initializing));
        let mut subscription = provider.subscribe();
        let listener_state = Arc::clone(&state);
        let listener = tokio::spawn(async move {
            while let Some(user) = subscription.next_change().await {
                debug!(signed_in = user.is_some(), "session change received");
                listener_state.settle(AuthSnapshot::session_for(user), None);
            }
            debug!("session subscription closed by provider");
        });

        Self {
            provider,
            configured,
            state,
            listener: Mutex::new(Some(listener)),
        }
    }

    /// Whether identity configuration was present at start.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Clone the current state.
    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.published.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn watch(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.published.subscribe()
    }

    /// Run the sign-in flow.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ConfigurationMissing`] when unconfigured, or
    /// [`AuthError::Provider`] when the provider rejects the flow. The error
    /// is also recorded in the snapshot.
    pub async fn sign_in(&self) -> Result<(), AuthError> {
        self.ensure_configured(AuthAction::SignIn)?;
        self.enter_transition();

        match self.provider.sign_in().await {
            Ok(profile) => {
                info!("sign-in completed");
                self.state.settle(AuthSession::SignedIn(profile), None);
                Ok(())
            }
            Err(error) => {
                let code = ProviderErrorCode::from(error.code().unwrap_or(UNKNOWN_SIGN_IN_CODE));
                warn!(error = %error, code = %code, "sign-in failed");
                let auth_error = AuthError::Provider { code };
                self.state
                    .settle(AuthSession::SignedOut, Some(auth_error.clone()));
                Err(auth_error)
            }
        }
    }

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ConfigurationMissing`] when unconfigured, or
    /// [`AuthError::Provider`] when the provider fails; in that case the
    /// last settled session is restored, including one committed by a
    /// sign-in that finished while this call was in flight.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.ensure_configured(AuthAction::SignOut)?;
        self.enter_transition();

        match self.provider.sign_out().await {
            Ok(()) => {
                info!("sign-out completed");
                self.state.settle(AuthSession::SignedOut, None);
                Ok(())
            }
            Err(error) => {
                let code = ProviderErrorCode::from(error.code().unwrap_or(UNKNOWN_SIGN_OUT_CODE));
                warn!(error = %error, code = %code, "sign-out failed");
                let auth_error = AuthError::Provider { code };
                self.state
                    .settle(self.state.settled(), Some(auth_error.clone()));
                Err(auth_error)
            }
        }
    }

    /// Tear down the provider subscription. Idempotent.
    pub fn shutdown(&self) {
        let handle = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
            debug!("session subscription torn down");
        }
    }

    fn ensure_configured(&self, action: AuthAction) -> Result<(), AuthError> {
        if self.configured {
            return Ok(());
        }
        let error = AuthError::ConfigurationMissing { action };
        self.state
            .published
            .send_modify(|snapshot| snapshot.error = Some(error.clone()));
        Err(error)
    }

    fn enter_transition(&self) {
        self.state.published.send_modify(|snapshot| {
            snapshot.session = AuthSession::TransitionInProgress;
            snapshot.error = None;
        });
    }
}

impl Drop for AuthSessionManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
