use std::sync::Arc;
use std::time::Duration;

use catalog_core::{Effect, Msg, Notification, RequestFailure, Route};
use catalog_engine::{ApiError, EngineHandle, EngineEvent, FailureKind, SessionStore};
use catalog_logging::{catalog_debug, catalog_info};

/// Effects the engine cannot execute; handed back to the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UiAction {
    Navigate(Route),
    Notify(Notification),
}

/// Executes core effects against the engine and the session store.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
    session: Arc<SessionStore>,
    in_flight: usize,
}

impl EffectRunner {
    pub(crate) fn new(engine: EngineHandle, session: Arc<SessionStore>) -> Self {
        Self {
            engine,
            session,
            in_flight: 0,
        }
    }

    pub(crate) fn run(&mut self, effects: Vec<Effect>) -> Vec<UiAction> {
        let mut actions = Vec::new();
        for effect in effects {
            catalog_debug!("Running effect {}", effect_name(&effect));
            match effect {
                Effect::FetchEntries => {
                    self.in_flight += 1;
                    self.engine.fetch_entries();
                }
                Effect::FetchEntry { form_id, id } => {
                    self.in_flight += 1;
                    self.engine.fetch_entry(form_id, id);
                }
                Effect::SubmitEntry { form_id, request } => {
                    self.in_flight += 1;
                    self.engine.submit(form_id, request);
                }
                Effect::EncodeImage { form_id, source } => {
                    self.in_flight += 1;
                    self.engine.encode_image(form_id, source);
                }
                Effect::Login { email, password } => {
                    self.in_flight += 1;
                    self.engine.login(email, password);
                }
                Effect::StoreCredential { token } => self.session.set_credential(&token),
                Effect::RememberIdentity { email } => self.session.set_remembered_identity(&email),
                Effect::ForgetIdentity => self.session.clear_remembered_identity(),
                Effect::ClearSession => {
                    catalog_info!("Clearing stored session");
                    self.session.logout();
                }
                Effect::Notify(notification) => actions.push(UiAction::Notify(notification)),
                Effect::Navigate(route) => actions.push(UiAction::Navigate(route)),
            }
        }
        actions
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    /// Waits for the next engine event and translates it into a message.
    pub(crate) fn next_msg(&mut self, timeout: Duration) -> Option<Msg> {
        let event = self.engine.recv_timeout(timeout)?;
        if !matches!(event, EngineEvent::SessionExpired) {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        Some(event_to_msg(event))
    }
}

fn effect_name(effect: &Effect) -> &'static str {
    match effect {
        Effect::FetchEntries => "FetchEntries",
        Effect::FetchEntry { .. } => "FetchEntry",
        Effect::SubmitEntry { .. } => "SubmitEntry",
        Effect::EncodeImage { .. } => "EncodeImage",
        Effect::Login { .. } => "Login",
        Effect::StoreCredential { .. } => "StoreCredential",
        Effect::RememberIdentity { .. } => "RememberIdentity",
        Effect::ForgetIdentity => "ForgetIdentity",
        Effect::ClearSession => "ClearSession",
        Effect::Notify(_) => "Notify",
        Effect::Navigate(_) => "Navigate",
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::EntriesFetched(result) => Msg::EntriesLoaded(result.map_err(classify)),
        EngineEvent::EntryFetched { form_id, result } => Msg::EntryFetched {
            form_id,
            result: result.map_err(classify),
        },
        EngineEvent::SubmitCompleted { form_id, result } => Msg::SubmitFinished {
            form_id,
            result: result.map_err(classify),
        },
        EngineEvent::LoginCompleted(result) => Msg::LoginFinished(result.map_err(classify)),
        EngineEvent::ImageEncoded { form_id, result } => Msg::ImageEncoded {
            form_id,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::SessionExpired => Msg::SessionExpired,
    }
}

fn classify(err: ApiError) -> RequestFailure {
    match err.kind {
        FailureKind::Unauthorized => RequestFailure::SessionExpired,
        FailureKind::HttpStatus(_) | FailureKind::LoginRejected => {
            RequestFailure::Rejected(err.to_string())
        }
        FailureKind::InvalidUrl
        | FailureKind::Timeout
        | FailureKind::Network
        | FailureKind::InvalidResponse => RequestFailure::Unavailable(err.to_string()),
    }
}
