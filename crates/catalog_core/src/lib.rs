//! Catalog core: pure session, list and entry-form state machine.
mod catalog;
mod effect;
mod entry;
mod form;
mod login;
mod msg;
mod state;
mod update;
pub mod validate;
mod view_model;

pub use catalog::{CatalogListState, LoadStatus, DEFAULT_PAGE_SIZE};
pub use effect::{Effect, Notification, NotificationLevel, Route};
pub use entry::{CatalogEntry, EntryId, PosterImage, SubmitMode, SubmitRequest};
pub use form::{DraftEntry, EntryForm, FormId, FormPhase};
pub use login::{LoginForm, SessionPhase};
pub use msg::{Msg, RequestFailure};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, CatalogView, FormView, LoginView, PageLink};
