//! The validation scheduler.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use a11y_analysis::{AnalysisEngine, AnalysisRequest, DomEngine, ProgressSink, ProgressStage, RuleEngine};
use a11y_config::{RuleConfiguration, RunMode, SettingsStore};
use a11y_types::{DocumentUri, Language};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::host::{EditorHost, LogLevel};
use crate::state::{DocumentEntry, ValidationState};

struct Inner<D, R, H> {
    engine: AnalysisEngine<D, R>,
    host: Arc<H>,
    settings: Arc<SettingsStore>,
    documents: DashMap<DocumentUri, DocumentEntry>,
    /// Source of debounce-timer generations, shared across URIs.
    generations: AtomicU64,
    /// Source of opaque progress tokens.
    progress_tokens: AtomicU64,
}

/// Drives validation from document lifecycle events.
///
/// Cheap to clone; all clones share the same per-URI state. Every entry
/// point is cancel-safe in the sense that dropped futures only delay work,
/// never corrupt a document's state slot.
pub struct ValidationScheduler<D, R, H> {
    inner: Arc<Inner<D, R, H>>,
}

impl<D, R, H> Clone for ValidationScheduler<D, R, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D, R, H> ValidationScheduler<D, R, H>
where
    D: DomEngine + 'static,
    R: RuleEngine + 'static,
    H: EditorHost,
{
    #[must_use]
    pub fn new(engine: AnalysisEngine<D, R>, host: Arc<H>, settings: Arc<SettingsStore>) -> Self {
        Self {
            inner: Arc::new(Inner {
                engine,
                host,
                settings,
                documents: DashMap::new(),
                generations: AtomicU64::new(0),
                progress_tokens: AtomicU64::new(0),
            }),
        }
    }

    /// Current validation state for a URI. `Idle` for unknown documents.
    #[must_use]
    pub fn validation_state(&self, uri: &DocumentUri) -> ValidationState {
        self.inner
            .documents
            .get(uri)
            .map_or(ValidationState::Idle, |entry| entry.state)
    }

    /// Number of open documents being tracked.
    #[must_use]
    pub fn open_document_count(&self) -> usize {
        self.inner.documents.len()
    }

    /// A document was opened in the editor. Validates immediately,
    /// independent of the run mode.
    ///
    /// A re-open of an already-tracked URI (some hosts skip the close) is
    /// treated like an edit: the snapshot updates, but an in-flight run
    /// keeps its state slot and picks up a follow-up instead of racing a
    /// second run.
    #[tracing::instrument(skip(self, text), fields(uri = %uri))]
    pub async fn document_opened(
        &self,
        uri: DocumentUri,
        language_id: &str,
        version: i32,
        text: Arc<str>,
    ) {
        tracing::debug!("document opened");
        let queued = match self.inner.documents.entry(uri.clone()) {
            Entry::Occupied(mut slot) => {
                let entry = slot.get_mut();
                entry.language_id = language_id.to_string();
                entry.language = Language::from_language_id(language_id);
                entry.version = version;
                entry.text = text;
                if entry.state.is_running() {
                    entry.state = ValidationState::RunningWithFollowup;
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(DocumentEntry {
                    state: ValidationState::Idle,
                    language_id: language_id.to_string(),
                    language: Language::from_language_id(language_id),
                    version,
                    text,
                });
                false
            }
        };
        if !queued {
            self.start_run(&uri).await;
        }
    }

    /// The document's text changed. In on-type mode this arms (or re-arms)
    /// the debounce timer, or queues a follow-up run when an analysis is
    /// already in flight. In on-save mode only the snapshot is updated.
    #[tracing::instrument(skip(self, text), fields(uri = %uri))]
    pub async fn document_changed(&self, uri: DocumentUri, version: i32, text: Arc<str>) {
        let on_type = self.inner.settings.current().run == RunMode::OnType;
        let schedule = {
            let Some(mut entry) = self.inner.documents.get_mut(&uri) else {
                tracing::warn!(uri = %uri, "change for untracked document");
                return;
            };
            entry.version = version;
            entry.text = text;
            if !on_type {
                false
            } else if entry.state.is_running() {
                // The edit is not dropped: eligibility re-arms once the
                // in-flight run completes.
                entry.state = ValidationState::RunningWithFollowup;
                false
            } else {
                true
            }
        };
        if schedule {
            self.arm_debounce(&uri);
        }
    }

    /// The document was saved. In on-save mode this bypasses the debounce
    /// and validates now; a save arriving mid-run is already covered by the
    /// in-flight analysis and is ignored, not queued.
    #[tracing::instrument(skip(self), fields(uri = %uri))]
    pub async fn document_saved(&self, uri: DocumentUri) {
        if self.inner.settings.current().run != RunMode::OnSave {
            return;
        }
        if self.validation_state(&uri).is_running() {
            tracing::debug!(uri = %uri, "save during in-flight analysis, ignored");
            return;
        }
        self.start_run(&uri).await;
    }

    /// The document was closed. Terminal for the URI: the state slot is
    /// removed (outstanding timers stand down against it) and diagnostics
    /// are cleared at the host.
    #[tracing::instrument(skip(self), fields(uri = %uri))]
    pub async fn document_closed(&self, uri: DocumentUri) {
        tracing::debug!("document closed");
        self.inner.documents.remove(&uri);
        self.inner.host.publish_diagnostics(&uri, Vec::new()).await;
    }

    /// Configuration-change notification from the editor host. Swaps the
    /// settings and re-validates every open document against them.
    #[tracing::instrument(skip(self, section))]
    pub async fn settings_changed(&self, section: serde_json::Value) {
        // A malformed section keeps the previous settings; the store logs
        // it, and the user gets told through the editor's log channel.
        if self.inner.settings.update_from_json(section).is_err() {
            self.inner
                .host
                .log_message(
                    LogLevel::Warning,
                    "invalid accessibility analyzer configuration, keeping previous settings",
                )
                .await;
        }
        let uris: Vec<DocumentUri> = self
            .inner
            .documents
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        for uri in uris {
            let queued = {
                let Some(mut entry) = self.inner.documents.get_mut(&uri) else {
                    continue;
                };
                if entry.state.is_running() {
                    entry.state = ValidationState::RunningWithFollowup;
                    true
                } else {
                    false
                }
            };
            if !queued {
                self.start_run(&uri).await;
            }
        }
    }

    /// Arm (or re-arm) the debounce timer for a URI. The newest generation
    /// wins; earlier timers observe the mismatch when they fire.
    fn arm_debounce(&self, uri: &DocumentUri) {
        let generation = self.inner.generations.fetch_add(1, Ordering::Relaxed) + 1;
        {
            let Some(mut entry) = self.inner.documents.get_mut(uri) else {
                return;
            };
            entry.state = ValidationState::Pending { generation };
        }
        let delay = self.inner.settings.current().debounce_duration();
        let this = self.clone();
        let uri = uri.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            this.debounce_fired(&uri, generation).await;
        });
    }

    async fn debounce_fired(&self, uri: &DocumentUri, generation: u64) {
        {
            let Some(entry) = self.inner.documents.get(uri) else {
                return; // closed while the timer was armed
            };
            if entry.state != (ValidationState::Pending { generation }) {
                return; // re-armed or superseded
            }
        }
        self.start_run(uri).await;
    }

    /// Transition a URI into `Running` and launch the analysis, or clear
    /// diagnostics and return to `Idle` if a gate rejects the document.
    async fn start_run(&self, uri: &DocumentUri) {
        let request = {
            let Some(mut entry) = self.inner.documents.get_mut(uri) else {
                return;
            };
            if entry.state.is_running() {
                // At most one concurrent analysis per URI.
                return;
            }
            let settings = self.inner.settings.current();
            let permitted = settings.enable
                && settings.includes_language(&entry.language_id)
                && settings.within_size_cap(entry.text.len() as u64)
                && entry.language.is_some();
            let Some(language) = entry.language.filter(|_| permitted) else {
                tracing::debug!(uri = %uri, "validation gated, clearing diagnostics");
                entry.state = ValidationState::Idle;
                drop(entry);
                self.inner.host.publish_diagnostics(uri, Vec::new()).await;
                return;
            };
            entry.state = ValidationState::Running;
            AnalysisRequest {
                uri: uri.clone(),
                text: Arc::clone(&entry.text),
                language,
                version: entry.version,
                rules: RuleConfiguration::from_settings(&settings),
            }
        };
        let this = self.clone();
        tokio::spawn(async move {
            this.run_analysis(request).await;
        });
    }

    async fn run_analysis(&self, request: AnalysisRequest) {
        let token = self.inner.progress_tokens.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner
            .host
            .progress_begin(token, "Accessibility analysis")
            .await;
        let progress = HostProgress {
            host: Arc::clone(&self.inner.host),
            token,
        };
        let diagnostics = self.inner.engine.analyze(&request, &progress).await;
        self.inner.host.progress_end(token).await;

        let Some((stale, followup)) = ({
            self.inner.documents.get_mut(&request.uri).map(|mut entry| {
                let stale = entry.version != request.version;
                let followup = entry.state == ValidationState::RunningWithFollowup;
                entry.state = ValidationState::Idle;
                (stale, followup)
            })
        }) else {
            // Closed mid-run; diagnostics were already cleared.
            return;
        };

        if stale {
            // A newer edit exists; its own run will publish.
            tracing::debug!(uri = %request.uri, version = request.version, "stale result suppressed");
        } else {
            self.inner
                .host
                .publish_diagnostics(&request.uri, diagnostics)
                .await;
        }
        if followup {
            // The queued edit is honored by re-arming the debounce timer
            // rather than going idle.
            self.arm_debounce(&request.uri);
        }
    }
}

/// Bridges the engine's progress checkpoints onto the editor host. The
/// engine awaits each checkpoint, so every `report` for a token reaches the
/// host between its `begin` and `end`.
struct HostProgress<H> {
    host: Arc<H>,
    token: u64,
}

#[async_trait::async_trait]
impl<H: EditorHost> ProgressSink for HostProgress<H> {
    async fn report(&self, stage: ProgressStage) {
        self.host.progress_report(self.token, stage.message()).await;
    }
}
