use std::path::PathBuf;

use crate::{CatalogEntry, EntryId, FormId, PosterImage};

/// How a remote call failed, as far as the state machine cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The credential was refused. Handled globally via `Msg::SessionExpired`.
    SessionExpired,
    /// The service answered but refused the request.
    Rejected(String),
    /// The service could not be reached or answered unintelligibly.
    Unavailable(String),
}

impl RequestFailure {
    pub fn describe(&self) -> &str {
        match self {
            RequestFailure::SessionExpired => "session expired",
            RequestFailure::Rejected(message) | RequestFailure::Unavailable(message) => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Startup: whether a credential is stored, and the remembered identity.
    SessionRestored {
        signed_in: bool,
        remembered_identity: Option<String>,
    },
    LoginEmailChanged(String),
    LoginPasswordChanged(String),
    RememberMeToggled,
    LoginSubmitted,
    /// Login result carrying the issued bearer token.
    LoginFinished(Result<String, RequestFailure>),
    LogoutClicked,
    /// The request pipeline saw an unauthorized response.
    SessionExpired,

    /// The catalog view asked for a (re)load.
    LoadRequested,
    EntriesLoaded(Result<Vec<CatalogEntry>, RequestFailure>),
    PageSelected(usize),
    NextPageClicked,
    PreviousPageClicked,
    CreateClicked,
    EntryClicked(EntryId),

    /// The form view opened, in edit mode when `id` is present.
    FormOpened { id: Option<EntryId> },
    EntryFetched {
        form_id: FormId,
        result: Result<CatalogEntry, RequestFailure>,
    },
    TitleChanged(String),
    /// Raw year field input; filtered against `current_year`.
    YearInput { value: String, current_year: i32 },
    /// A file was picked or dropped onto the poster area.
    ImageSelected(PathBuf),
    ImageEncoded {
        form_id: FormId,
        result: Result<PosterImage, String>,
    },
    SubmitClicked { current_year: i32 },
    SubmitFinished {
        form_id: FormId,
        result: Result<(), RequestFailure>,
    },
    CancelClicked,

    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
