//! Selection-driven pricing editor.
//!
//! An editor holds the pricing form for one selected key at a time and
//! moves through `Idle -> Loading -> Loaded | Error` whenever the
//! selection changes. Every selection change refetches: returning to a
//! previously edited key shows the stored record, not the old edits.

use thiserror::Error;
use tracing::{debug, warn};

use crate::client::{ClientError, PricingBackend};
use crate::models::pricing::{PricingKey, PricingMode, PricingRecord};
use crate::pricing::form::PricingForm;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    Idle,
    Loading(PricingKey),
    /// `record` is `None` when nothing is stored yet for the key.
    Loaded {
        key: PricingKey,
        record: Option<PricingRecord>,
    },
    Error {
        key: PricingKey,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient message for the admin, like a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Proof that a fetch was started for `key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    key: PricingKey,
}

impl LoadTicket {
    pub fn key(&self) -> PricingKey {
        self.key
    }
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("nothing is selected")]
    NothingSelected,

    #[error("pricing for {0} is still loading")]
    Busy(PricingKey),

    #[error(transparent)]
    Client(#[from] ClientError),
}

pub struct PricingEditor<B> {
    backend: B,
    state: EditorState,
    form: PricingForm,
    notice: Option<Notice>,
}

/// Mode a fresh form starts in for `key`.
fn default_mode(key: &PricingKey) -> PricingMode {
    match key {
        PricingKey::Vehicle { mode, .. } => *mode,
        PricingKey::Location { .. } => PricingMode::P2p,
    }
}

impl<B: PricingBackend> PricingEditor<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: EditorState::Idle,
            form: PricingForm::with_defaults(PricingMode::P2p),
            notice: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn form(&self) -> &PricingForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PricingForm {
        &mut self.form
    }

    pub fn selection(&self) -> Option<PricingKey> {
        match &self.state {
            EditorState::Idle => None,
            EditorState::Loading(key)
            | EditorState::Loaded { key, .. }
            | EditorState::Error { key, .. } => Some(*key),
        }
    }

    /// True when the form differs from what was loaded.
    pub fn is_dirty(&self) -> bool {
        match &self.state {
            EditorState::Loaded {
                record: Some(record),
                ..
            } => self.form != PricingForm::from_record(record),
            EditorState::Loaded { key, record: None } => {
                self.form != PricingForm::with_defaults(default_mode(key))
            }
            _ => false,
        }
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Starts loading `key`, unless a load of that same key is in flight.
    pub fn begin_load(&mut self, key: PricingKey) -> Option<LoadTicket> {
        if self.state == EditorState::Loading(key) {
            debug!(key = %key, "load already in flight");
            return None;
        }

        self.state = EditorState::Loading(key);
        Some(LoadTicket { key })
    }

    /// Applies a fetch result. Results for a superseded selection are dropped.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Option<PricingRecord>, ClientError>,
    ) {
        if self.state != EditorState::Loading(ticket.key) {
            debug!(key = %ticket.key, "dropping stale load result");
            return;
        }

        let key = ticket.key;
        self.state = match result {
            Ok(Some(record)) => {
                self.form = PricingForm::from_record(&record);
                EditorState::Loaded {
                    key,
                    record: Some(record),
                }
            }
            Ok(None) => {
                self.form = PricingForm::with_defaults(default_mode(&key));
                EditorState::Loaded { key, record: None }
            }
            Err(err) => {
                warn!(key = %key, error = %err, "failed to load pricing");
                let message = err.user_message();
                self.notice = Some(Notice {
                    kind: NoticeKind::Error,
                    message: message.clone(),
                });
                EditorState::Error { key, message }
            }
        };
    }

    /// Switches the editor to `key` and loads its stored pricing.
    pub async fn select(&mut self, key: PricingKey) -> &EditorState {
        if let Some(ticket) = self.begin_load(key) {
            let result = self.backend.fetch_pricing(key).await;
            self.finish_load(ticket, result);
        }
        &self.state
    }

    /// Submits the form for the selected key.
    ///
    /// On failure the edited form is kept so the admin can fix and resubmit.
    pub async fn save(&mut self) -> Result<PricingRecord, EditorError> {
        let key = match &self.state {
            EditorState::Loaded { key, .. } => *key,
            EditorState::Loading(key) => return Err(EditorError::Busy(*key)),
            EditorState::Idle | EditorState::Error { .. } => {
                return Err(EditorError::NothingSelected);
            }
        };

        let outcome = match self.form.assemble() {
            Ok(payload) => self.backend.save_pricing(key, &payload).await,
            Err(issues) => Err(ClientError::Validation(issues)),
        };

        match outcome {
            Ok(record) => {
                self.form = PricingForm::from_record(&record);
                self.state = EditorState::Loaded {
                    key,
                    record: Some(record.clone()),
                };
                self.notice = Some(Notice {
                    kind: NoticeKind::Success,
                    message: "Pricing saved".to_string(),
                });
                Ok(record)
            }
            Err(err) => {
                warn!(key = %key, error = %err, "failed to save pricing");
                self.notice = Some(Notice {
                    kind: NoticeKind::Error,
                    message: err.user_message(),
                });
                Err(err.into())
            }
        }
    }
}
