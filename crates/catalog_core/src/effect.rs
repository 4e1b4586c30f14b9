use std::path::PathBuf;

use crate::{EntryId, FormId, SubmitRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the full entry collection.
    FetchEntries,
    /// Fetch one entry to preload an edit form.
    FetchEntry { form_id: FormId, id: EntryId },
    SubmitEntry {
        form_id: FormId,
        request: SubmitRequest,
    },
    /// Read and encode a user-selected image file.
    EncodeImage { form_id: FormId, source: PathBuf },
    Login { email: String, password: String },
    StoreCredential { token: String },
    RememberIdentity { email: String },
    ForgetIdentity,
    /// Drop the stored credential and the remembered identity.
    ClearSession,
    Notify(Notification),
    Navigate(Route),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Catalog,
    CreateEntry,
    EditEntry(EntryId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
}

impl Notification {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            text: text.into(),
        }
    }
}
