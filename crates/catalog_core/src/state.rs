use crate::view_model::{AppViewModel, CatalogView, FormView, LoginView, PageLink};
use crate::{
    CatalogListState, EntryForm, EntryId, FormId, LoginForm, Route, SessionPhase,
    DEFAULT_PAGE_SIZE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    session: SessionPhase,
    login: LoginForm,
    list: CatalogListState,
    form: Option<EntryForm>,
    next_form_id: FormId,
    route: Route,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            session: SessionPhase::SignedOut,
            login: LoginForm::default(),
            list: CatalogListState::new(page_size),
            form: None,
            next_form_id: 1,
            route: Route::Landing,
            dirty: false,
        }
    }

    pub fn session(&self) -> SessionPhase {
        self.session
    }

    pub fn login(&self) -> &LoginForm {
        &self.login
    }

    pub fn list(&self) -> &CatalogListState {
        &self.list
    }

    pub fn form(&self) -> Option<&EntryForm> {
        self.form.as_ref()
    }

    /// Last route the state machine navigated to.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            route: self.route.clone(),
            session: self.session,
            login: LoginView {
                email: self.login.email.clone(),
                remember_me: self.login.remember_me,
                pending: self.session == SessionPhase::SigningIn,
            },
            catalog: self.catalog_view(),
            form: self.form.as_ref().map(|form| FormView {
                editing: form.editing().cloned(),
                title: form.draft().title.clone(),
                publishing_year: form.draft().publishing_year.clone(),
                poster: form.draft().poster.clone(),
                phase: form.phase(),
                last_submit_failed: form.last_submit_failed(),
                submit_enabled: form.can_submit(),
            }),
            dirty: self.dirty,
        }
    }

    fn catalog_view(&self) -> CatalogView {
        let total_pages = self.list.total_pages();
        let current_page = self.list.current_page();
        CatalogView {
            loading: self.list.is_loading(),
            empty: self.list.is_empty(),
            entries: self.list.current_page_entries().to_vec(),
            pages: (1..=total_pages)
                .map(|number| PageLink {
                    number,
                    active: number == current_page,
                })
                .collect(),
            current_page,
            total_pages,
            previous_enabled: current_page > 1,
            next_enabled: current_page < total_pages,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_session(&mut self, session: SessionPhase) {
        self.session = session;
        self.mark_dirty();
    }

    pub(crate) fn login_mut(&mut self) -> &mut LoginForm {
        self.mark_dirty();
        &mut self.login
    }

    pub(crate) fn list_mut(&mut self) -> &mut CatalogListState {
        &mut self.list
    }

    pub(crate) fn set_route(&mut self, route: Route) {
        self.route = route;
        self.mark_dirty();
    }

    pub(crate) fn open_form(&mut self, editing: Option<EntryId>) -> FormId {
        let form_id = self.next_form_id;
        self.next_form_id += 1;
        self.form = Some(EntryForm::new(form_id, editing));
        self.mark_dirty();
        form_id
    }

    pub(crate) fn close_form(&mut self) {
        if self.form.take().is_some() {
            self.mark_dirty();
        }
    }

    /// The open form, if any, that still matches `form_id`.
    pub(crate) fn form_for(&mut self, form_id: FormId) -> Option<&mut EntryForm> {
        self.form
            .as_mut()
            .filter(|form| form.form_id() == form_id)
    }

    pub(crate) fn form_mut(&mut self) -> Option<&mut EntryForm> {
        self.form.as_mut()
    }

    /// Drops everything tied to the signed-in user.
    pub(crate) fn reset_session_state(&mut self) {
        let page_size = self.list.page_size();
        self.list = CatalogListState::new(page_size);
        self.form = None;
        self.session = SessionPhase::SignedOut;
        self.login.password.clear();
        self.mark_dirty();
    }
}
