use crate::{CatalogEntry, EntryId, FormPhase, PosterImage, Route, SessionPhase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub route: Route,
    pub session: SessionPhase,
    pub login: LoginView,
    pub catalog: CatalogView,
    pub form: Option<FormView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginView {
    pub email: String,
    pub remember_me: bool,
    pub pending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    pub loading: bool,
    /// The collection itself is empty, as opposed to the page.
    pub empty: bool,
    pub entries: Vec<CatalogEntry>,
    pub pages: Vec<PageLink>,
    pub current_page: usize,
    pub total_pages: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub number: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub editing: Option<EntryId>,
    pub title: String,
    pub publishing_year: String,
    pub poster: Option<PosterImage>,
    pub phase: FormPhase,
    pub last_submit_failed: bool,
    pub submit_enabled: bool,
}
