use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use catalog_core::{EntryId, FormId, SubmitRequest};
use catalog_logging::{catalog_error, catalog_warn};
use tokio::sync::mpsc as async_mpsc;

use crate::codec::encode_file;
use crate::pipeline::ChannelSessionObserver;
use crate::{
    ApiSettings, AuthenticatedClient, CatalogApi, EngineError, EngineEvent, HttpCatalogApi,
    SessionStore,
};

enum EngineCommand {
    FetchEntries,
    FetchEntry { form_id: FormId, id: EntryId },
    Submit { form_id: FormId, request: SubmitRequest },
    Login { email: String, password: String },
    EncodeImage { form_id: FormId, source: PathBuf },
}

/// Runs network and codec work on a dedicated single-threaded runtime and
/// reports results as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: async_mpsc::UnboundedSender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings, session: Arc<SessionStore>) -> Result<Self, EngineError> {
        let (event_tx, event_rx) = mpsc::channel();
        let observer = Arc::new(ChannelSessionObserver::new(event_tx.clone()));
        let client = AuthenticatedClient::new(&settings, session, observer)?;
        let api: Arc<dyn CatalogApi> = Arc::new(HttpCatalogApi::new(client));
        Self::spawn(api, event_tx, event_rx)
    }

    fn spawn(
        api: Arc<dyn CatalogApi>,
        event_tx: mpsc::Sender<EngineEvent>,
        event_rx: mpsc::Receiver<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, mut cmd_rx) = async_mpsc::unbounded_channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("catalog-engine".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(command) = cmd_rx.recv().await {
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        tokio::spawn(async move {
                            handle_command(api.as_ref(), command, event_tx).await;
                        });
                    }
                });
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        })
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            catalog_error!("Engine runtime stopped; command dropped");
        }
    }

    pub fn fetch_entries(&self) {
        self.send(EngineCommand::FetchEntries);
    }

    pub fn fetch_entry(&self, form_id: FormId, id: EntryId) {
        self.send(EngineCommand::FetchEntry { form_id, id });
    }

    pub fn submit(&self, form_id: FormId, request: SubmitRequest) {
        self.send(EngineCommand::Submit { form_id, request });
    }

    pub fn login(&self, email: impl Into<String>, password: impl Into<String>) {
        self.send(EngineCommand::Login {
            email: email.into(),
            password: password.into(),
        });
    }

    pub fn encode_image(&self, form_id: FormId, source: impl Into<PathBuf>) {
        self.send(EngineCommand::EncodeImage {
            form_id,
            source: source.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.events().try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.events().recv_timeout(timeout).ok()
    }

    fn events(&self) -> MutexGuard<'_, mpsc::Receiver<EngineEvent>> {
        self.event_rx.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn handle_command(
    api: &dyn CatalogApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchEntries => EngineEvent::EntriesFetched(api.list_entries().await),
        EngineCommand::FetchEntry { form_id, id } => EngineEvent::EntryFetched {
            form_id,
            result: api.get_entry(&id).await,
        },
        EngineCommand::Submit { form_id, request } => EngineEvent::SubmitCompleted {
            form_id,
            result: api.submit_entry(&request).await,
        },
        EngineCommand::Login { email, password } => {
            EngineEvent::LoginCompleted(api.login(&email, &password).await)
        }
        EngineCommand::EncodeImage { form_id, source } => EngineEvent::ImageEncoded {
            form_id,
            result: encode_file(&source).await,
        },
    };
    if event_tx.send(event).is_err() {
        catalog_warn!("Engine event receiver dropped");
    }
}
