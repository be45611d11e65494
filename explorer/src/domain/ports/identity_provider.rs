//! Driven port for the external identity provider.
//!
//! The session manager consumes only this capability surface; popup
//! mechanics and token storage stay inside the adapter.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use super::define_port_error;
use crate::domain::auth_session::UserProfile;

/// Stream of session changes delivered by the provider.
///
/// Each item is the current user (`None` when signed out). Dropping the
/// subscription unsubscribes.
#[derive(Debug)]
pub struct SessionSubscription {
    receiver: mpsc::UnboundedReceiver<Option<UserProfile>>,
}

impl SessionSubscription {
    /// Create a connected sender/subscription pair.
    ///
    /// # Examples
    /// ```
    /// use explorer::domain::ports::SessionSubscription;
    ///
    /// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
    /// let (sender, mut subscription) = SessionSubscription::channel();
    /// sender.send(None).expect("subscription alive");
    /// assert_eq!(subscription.next_change().await, Some(None));
    /// # });
    /// ```
    pub fn channel() -> (mpsc::UnboundedSender<Option<UserProfile>>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, Self { receiver })
    }

    /// Wait for the next session change. `None` means the provider closed the
    /// stream.
    pub async fn next_change(&mut self) -> Option<Option<UserProfile>> {
        self.receiver.recv().await
    }
}

define_port_error! {
    /// Errors surfaced by the identity provider.
    pub enum IdentityProviderError {
        /// The provider rejected the action with an error code.
        Rejected { code: String } =>
            "identity provider rejected the request: {code}",
        /// The provider failed without a usable error code.
        Unavailable { message: String } =>
            "identity provider unavailable: {message}",
    }
}

impl IdentityProviderError {
    /// Provider error code, when one was reported.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code } if !code.trim().is_empty() => Some(code.as_str()),
            Self::Rejected { .. } | Self::Unavailable { .. } => None,
        }
    }
}

/// Port for the identity provider backing the translate gate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Whether the provider was initialised with usable configuration.
    fn is_configured(&self) -> bool;

    /// Open the session-change subscription.
    fn subscribe(&self) -> SessionSubscription;

    /// Run the interactive sign-in flow.
    async fn sign_in(&self) -> Result<UserProfile, IdentityProviderError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), IdentityProviderError>;
}

/// Provider used when no identity backend is available.
///
/// Reports itself as unconfigured, publishes a single signed-out change and
/// treats sign-out as a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledIdentityProvider;

#[async_trait]
impl IdentityProvider for DisabledIdentityProvider {
    fn is_configured(&self) -> bool {
        false
    }

    fn subscribe(&self) -> SessionSubscription {
        let (sender, subscription) = SessionSubscription::channel();
        if sender.send(None).is_err() {
            debug!("session subscription dropped before the initial change");
        }
        subscription
    }

    async fn sign_in(&self) -> Result<UserProfile, IdentityProviderError> {
        Err(IdentityProviderError::unavailable(
            "identity provider is disabled",
        ))
    }

    async fn sign_out(&self) -> Result<(), IdentityProviderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for identity provider helpers.

    use super::*;

    #[test]
    fn blank_codes_are_treated_as_missing() {
        assert_eq!(IdentityProviderError::rejected("  ").code(), None);
        assert_eq!(
            IdentityProviderError::rejected("auth/popup-blocked").code(),
            Some("auth/popup-blocked")
        );
        assert_eq!(IdentityProviderError::unavailable("boom").code(), None);
    }

    #[tokio::test]
    async fn disabled_provider_reports_signed_out_once() {
        let provider = DisabledIdentityProvider;
        assert!(!provider.is_configured());
        let mut subscription = provider.subscribe();
        assert_eq!(subscription.next_change().await, Some(None));
        assert_eq!(subscription.next_change().await, None);
    }
}
