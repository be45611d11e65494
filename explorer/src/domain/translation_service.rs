//! Gated English to Vietnamese translation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::auth_session::AuthSessionManager;
use super::error::TranslateError;
use super::ports::{LanguagePair, TranslationRequest, Translator};
use super::translation::{TranslationResult, TranslationText};
use super::view_state::ViewStore;

/// Runs translate actions for signed-in users.
#[derive(Clone)]
pub struct TranslationService {
    translator: Arc<dyn Translator>,
    store: Arc<ViewStore>,
    auth: Arc<AuthSessionManager>,
}

impl TranslationService {
    /// Create a service writing into the translation lane of `store`.
    pub fn new(
        translator: Arc<dyn Translator>,
        store: Arc<ViewStore>,
        auth: Arc<AuthSessionManager>,
    ) -> Self {
        Self {
            translator,
            store,
            auth,
        }
    }

    /// Translate the text currently held in the translation lane.
    pub async fn translate(&self) {
        let text = self.store.update(|view| view.translation.text.clone());
        self.run(&text).await;
    }

    /// Replace the lane text with `text`, then translate it.
    pub async fn translate_text(&self, text: &str) {
        self.store
            .update(|view| view.translation.text = text.to_owned());
        self.run(text).await;
    }

    async fn run(&self, raw: &str) {
        let text = match self.admit(raw) {
            Ok(text) => text,
            Err(error) => {
                debug!(reason = %error, "translate rejected");
                self.store
                    .update(|view| view.translation.error = Some(error));
                return;
            }
        };

        let generation = self.store.begin_translation(|lane| {
            lane.translating = true;
            lane.error = None;
            lane.result = None;
        });
        let request = TranslationRequest {
            text: text.as_str().to_owned(),
            languages: LanguagePair::ENGLISH_TO_VIETNAMESE,
        };

        let outcome = match self.translator.translate(&request).await {
            Ok(translated) if !translated.trim().is_empty() => Ok(translated),
            Ok(_) => {
                warn!("translator returned an empty translation");
                Err(TranslateError::Unavailable)
            }
            Err(error) => {
                warn!(error = %error, "translation failed");
                Err(TranslateError::Unavailable)
            }
        };

        let committed = self.store.commit(generation, |view| {
            view.translation.translating = false;
            match outcome {
                Ok(translated_text) => {
                    view.translation.result = Some(TranslationResult {
                        source_text: text.as_str().to_owned(),
                        translated_text,
                    });
                }
                Err(error) => view.translation.error = Some(error),
            }
        });
        if committed.is_some() {
            info!(generation = generation.value(), "translate finished");
        }
    }

    fn admit(&self, raw: &str) -> Result<TranslationText, TranslateError> {
        if !self.auth.is_configured() {
            return Err(TranslateError::ConfigurationMissing);
        }
        if self.auth.snapshot().session.user().is_none() {
            return Err(TranslateError::SignInRequired);
        }
        TranslationText::parse(raw).ok_or(TranslateError::Validation)
    }
}
