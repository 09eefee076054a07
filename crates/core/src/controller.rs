//! Translation request controller.
//!
//! One submission at a time moves the session through
//! `Idle -> Pending -> {Succeeded, Failed} -> Idle`. The session's busy flag,
//! read and written only under the session mutex, is the lock: overlapping
//! submissions are refused here rather than by whatever front-end disables
//! its buttons.

use crate::language::Language;
use crate::notify::{Clipboard, ClipboardError, Notice, Notifier};
use crate::session::{SessionState, FAILURE_MESSAGE};
use crate::translate::{TranslateError, TranslationRequest, Translator};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

const LOG_TARGET: &str = "controller";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("input is empty")]
    EmptyInput,
    #[error("a translation is already in progress")]
    Busy,
}

/// How an accepted submission resolved. A failure is still an `Ok` from
/// [`TranslationController::submit_translation`]; the cause is kept for
/// logging and tests only.
#[derive(Debug)]
pub enum SubmitOutcome {
    Succeeded(String),
    Failed(TranslateError),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }

    pub fn display_text(&self) -> &str {
        match self {
            SubmitOutcome::Succeeded(text) => text,
            SubmitOutcome::Failed(_) => FAILURE_MESSAGE,
        }
    }
}

pub struct TranslationController<T, C, N> {
    translator: T,
    clipboard: C,
    notifier: N,
    session: Mutex<SessionState>,
    request_timeout: Option<Duration>,
}

/// Holds the busy flag for one submission and releases it on drop, so a
/// dropped submit future still leaves the controller idle.
struct BusyGuard<'a> {
    session: &'a Mutex<SessionState>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        lock(self.session).is_busy = false;
    }
}

fn lock(session: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T, C, N> TranslationController<T, C, N>
where
    T: Translator,
    C: Clipboard,
    N: Notifier,
{
    pub fn new(translator: T, clipboard: C, notifier: N, session: SessionState) -> Self {
        let session = SessionState {
            is_busy: false,
            ..session
        };
        Self {
            translator,
            clipboard,
            notifier,
            session: Mutex::new(session),
            request_timeout: None,
        }
    }

    /// Bounds how long a submission may stay pending. Expiry counts as a
    /// failed request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn state(&self) -> SessionState {
        lock(&self.session).clone()
    }

    pub fn set_input_text<S: Into<String>>(&self, text: S) {
        lock(&self.session).input_text = text.into();
    }

    pub fn set_source_lang(&self, lang: Language) {
        lock(&self.session).source_lang = lang;
    }

    pub fn set_target_lang(&self, lang: Language) {
        lock(&self.session).target_lang = lang;
    }

    pub async fn submit_translation(&self) -> Result<SubmitOutcome, SubmitError> {
        let (guard, request) = match self.begin() {
            Ok(pending) => pending,
            Err(e) => {
                let notice = match e {
                    SubmitError::EmptyInput => Notice::EmptyInput,
                    SubmitError::Busy => Notice::Busy,
                };
                tracing::debug!(target: LOG_TARGET, reason = %e, "submission rejected");
                self.notifier.notify(notice);
                return Err(e);
            }
        };

        let input_len = request.text.len();
        let source_lang = request.source_lang;
        let target_lang = request.target_lang;
        tracing::debug!(
            target: LOG_TARGET,
            input_len,
            %source_lang,
            %target_lang,
            "translation pending"
        );

        let started = Instant::now();
        let call = self.translator.translate(request);
        let result = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(TranslateError::Timeout)),
            None => call.await,
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let outcome = match result {
            Ok(response) => {
                tracing::info!(
                    target: LOG_TARGET,
                    input_len,
                    output_len = response.translated_text.len(),
                    %source_lang,
                    %target_lang,
                    elapsed_ms,
                    "translation succeeded"
                );
                SubmitOutcome::Succeeded(response.translated_text)
            }
            Err(e) => {
                tracing::warn!(
                    target: LOG_TARGET,
                    error = %e,
                    status = ?e.status(),
                    %source_lang,
                    %target_lang,
                    elapsed_ms,
                    "translation failed"
                );
                SubmitOutcome::Failed(e)
            }
        };

        {
            let mut session = lock(&self.session);
            session.translated_text = Some(outcome.display_text().to_owned());
            session.is_busy = false;
        }
        drop(guard);
        Ok(outcome)
    }

    /// Validates the input and takes the busy flag in one critical section.
    fn begin(&self) -> Result<(BusyGuard<'_>, TranslationRequest), SubmitError> {
        let mut session = lock(&self.session);
        if !session.has_input() {
            return Err(SubmitError::EmptyInput);
        }
        if session.is_busy {
            return Err(SubmitError::Busy);
        }
        session.is_busy = true;

        let request = TranslationRequest {
            text: session.input_text.clone(),
            source_lang: session.source_lang,
            target_lang: session.target_lang,
        };
        drop(session);

        let guard = BusyGuard {
            session: &self.session,
        };
        Ok((guard, request))
    }

    pub fn clear_session(&self) {
        let mut session = lock(&self.session);
        session.input_text.clear();
        session.translated_text = None;
    }

    /// Copies the current result. Returns `Ok(false)` without touching the
    /// clipboard when there is nothing to copy.
    pub fn copy_result(&self) -> Result<bool, ClipboardError> {
        let text = match lock(&self.session).translated_text.clone() {
            Some(t) if !t.is_empty() => t,
            _ => return Ok(false),
        };
        self.clipboard.write_text(&text)?;
        self.notifier.notify(Notice::Copied);
        Ok(true)
    }
}
