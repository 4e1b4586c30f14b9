use catalog_logging::{catalog_debug, catalog_info, catalog_warn};

use crate::validate::accept_year_input;
use crate::{
    AppState, Effect, EntryForm, FormId, FormPhase, LoginForm, Msg, Notification, RequestFailure,
    Route, SessionPhase,
};

const LOGIN_REJECTED: &str = "Login failed. Please check your credentials.";
const LOGIN_UNAVAILABLE: &str = "Error during login. Please try again.";
const LOAD_FAILED: &str = "Error loading entries. Please try again.";
const SUBMIT_FAILED: &str = "Error submitting entry. Please try again.";
const ENTRY_CREATED: &str = "Entry created successfully!";
const ENTRY_UPDATED: &str = "Entry updated successfully!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SessionRestored {
            signed_in,
            remembered_identity,
        } => {
            state.login_mut().restore(remembered_identity);
            if signed_in {
                state.set_session(SessionPhase::SignedIn);
                navigate(&mut state, Route::Catalog)
            } else {
                state.set_session(SessionPhase::SignedOut);
                navigate(&mut state, Route::Landing)
            }
        }
        Msg::LoginEmailChanged(email) => {
            state.login_mut().email = email;
            Vec::new()
        }
        Msg::LoginPasswordChanged(password) => {
            state.login_mut().password = password;
            Vec::new()
        }
        Msg::RememberMeToggled => {
            let login = state.login_mut();
            login.remember_me = !login.remember_me;
            Vec::new()
        }
        Msg::LoginSubmitted => submit_login(&mut state),
        Msg::LoginFinished(result) => finish_login(&mut state, result),
        Msg::LogoutClicked => {
            catalog_info!("Logout requested");
            state.reset_session_state();
            *state.login_mut() = LoginForm::default();
            let mut effects = vec![Effect::ClearSession];
            effects.extend(navigate(&mut state, Route::Landing));
            effects
        }
        Msg::SessionExpired => {
            catalog_warn!("Session expired; returning to landing route");
            // A 401 on the login call itself is answered by `LoginFinished`.
            let signing_in = state.session() == SessionPhase::SigningIn;
            state.reset_session_state();
            if signing_in {
                state.set_session(SessionPhase::SigningIn);
            }
            navigate(&mut state, Route::Landing)
        }
        Msg::LoadRequested => {
            if state.list_mut().begin_load() {
                state.mark_dirty();
                vec![Effect::FetchEntries]
            } else {
                catalog_debug!("Entry load already in flight; coalescing request");
                Vec::new()
            }
        }
        Msg::EntriesLoaded(result) => {
            if !state.list().is_loading() {
                catalog_debug!("Dropping entries for a load that is no longer pending");
                return (state, Vec::new());
            }
            state.mark_dirty();
            match result {
                Ok(entries) => {
                    catalog_info!("Loaded {} catalog entries", entries.len());
                    state.list_mut().finish_load(entries);
                    Vec::new()
                }
                Err(RequestFailure::SessionExpired) => {
                    state.list_mut().abandon_load();
                    Vec::new()
                }
                Err(failure) => {
                    catalog_warn!("Error fetching entries: {}", failure.describe());
                    state.list_mut().fail_load(failure.describe().to_string());
                    vec![Effect::Notify(Notification::error(LOAD_FAILED))]
                }
            }
        }
        Msg::PageSelected(page) => {
            if state.list_mut().go_to_page(page) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NextPageClicked => {
            if state.list_mut().next_page() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PreviousPageClicked => {
            if state.list_mut().previous_page() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CreateClicked => navigate(&mut state, Route::CreateEntry),
        Msg::EntryClicked(id) => navigate(&mut state, Route::EditEntry(id)),
        Msg::FormOpened { id } => {
            let form_id = state.open_form(id.clone());
            match id {
                Some(id) => vec![Effect::FetchEntry { form_id, id }],
                None => Vec::new(),
            }
        }
        Msg::EntryFetched { form_id, result } => {
            let Some(form) = state.form_for(form_id) else {
                catalog_debug!("Dropping fetched entry for closed form {}", form_id);
                return (state, Vec::new());
            };
            match result {
                Ok(entry) => {
                    if form.populate(entry) {
                        state.mark_dirty();
                    } else {
                        catalog_debug!("Form {} already edited; keeping draft", form_id);
                    }
                }
                Err(RequestFailure::SessionExpired) => {}
                Err(failure) => {
                    // The form stays usable; the service will judge the submit.
                    catalog_warn!("Error fetching entry details: {}", failure.describe());
                }
            }
            Vec::new()
        }
        Msg::TitleChanged(title) => {
            edit_form(&mut state, |form| form.set_title(title));
            Vec::new()
        }
        Msg::YearInput {
            value,
            current_year,
        } => {
            if accept_year_input(&value, current_year) {
                edit_form(&mut state, |form| form.set_publishing_year(value));
            } else {
                catalog_debug!("Rejected year input {:?}", value);
            }
            Vec::new()
        }
        Msg::ImageSelected(source) => match state.form() {
            Some(form) if form.accepts_edits() => vec![Effect::EncodeImage {
                form_id: form.form_id(),
                source,
            }],
            _ => {
                catalog_debug!("Ignoring image selection without an editable form");
                Vec::new()
            }
        },
        Msg::ImageEncoded { form_id, result } => {
            let Some(form) = state.form_for(form_id).filter(|form| form.accepts_edits()) else {
                catalog_debug!("Dropping encoded image for form {}", form_id);
                return (state, Vec::new());
            };
            match result {
                Ok(poster) => {
                    form.set_poster(poster);
                    state.mark_dirty();
                    Vec::new()
                }
                Err(message) => {
                    catalog_warn!("Error reading image: {}", message);
                    vec![Effect::Notify(Notification::error(format!(
                        "Could not read the selected image: {message}"
                    )))]
                }
            }
        }
        Msg::SubmitClicked { current_year } => submit_form(&mut state, current_year),
        Msg::SubmitFinished { form_id, result } => finish_submit(&mut state, form_id, result),
        Msg::CancelClicked => {
            state.close_form();
            navigate(&mut state, Route::Catalog)
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn navigate(state: &mut AppState, route: Route) -> Vec<Effect> {
    state.set_route(route.clone());
    vec![Effect::Navigate(route)]
}

fn edit_form(state: &mut AppState, apply: impl FnOnce(&mut EntryForm)) {
    match state.form_mut() {
        Some(form) if form.accepts_edits() => {
            apply(form);
            state.mark_dirty();
        }
        Some(form) => {
            catalog_debug!("Ignoring edit while form is {:?}", form.phase());
        }
        None => catalog_debug!("Ignoring edit without an open form"),
    }
}

fn submit_login(state: &mut AppState) -> Vec<Effect> {
    if state.session() == SessionPhase::SigningIn {
        catalog_debug!("Login already in flight");
        return Vec::new();
    }
    if let Err(err) = state.login().validate() {
        state.mark_dirty();
        return vec![Effect::Notify(Notification::error(err.to_string()))];
    }
    state.set_session(SessionPhase::SigningIn);
    let login = state.login();
    vec![Effect::Login {
        email: login.email.clone(),
        password: login.password.clone(),
    }]
}

fn finish_login(state: &mut AppState, result: Result<String, RequestFailure>) -> Vec<Effect> {
    if state.session() != SessionPhase::SigningIn {
        catalog_debug!("Dropping login result without a pending login");
        return Vec::new();
    }
    match result {
        Ok(token) => {
            catalog_info!("Login succeeded");
            state.set_session(SessionPhase::SignedIn);
            let login = state.login_mut();
            login.password.clear();
            let identity = if login.remember_me {
                Effect::RememberIdentity {
                    email: login.email.clone(),
                }
            } else {
                Effect::ForgetIdentity
            };
            let mut effects = vec![Effect::StoreCredential { token }, identity];
            effects.extend(navigate(state, Route::Catalog));
            effects
        }
        Err(failure) => {
            catalog_warn!("Login failed: {}", failure.describe());
            state.set_session(SessionPhase::SignedOut);
            let text = match failure {
                RequestFailure::Unavailable(_) => LOGIN_UNAVAILABLE,
                RequestFailure::SessionExpired | RequestFailure::Rejected(_) => LOGIN_REJECTED,
            };
            vec![Effect::Notify(Notification::error(text))]
        }
    }
}

fn submit_form(state: &mut AppState, current_year: i32) -> Vec<Effect> {
    let Some(form) = state.form_mut() else {
        catalog_debug!("Submit without an open form");
        return Vec::new();
    };
    if !form.can_submit() {
        catalog_debug!("Submit ignored while form is {:?}", form.phase());
        return Vec::new();
    }
    let form_id = form.form_id();
    let outcome = form.begin_submit(current_year);
    state.mark_dirty();
    match outcome {
        Ok(request) => {
            catalog_info!("Submitting form {} ({:?})", form_id, request.mode);
            vec![Effect::SubmitEntry { form_id, request }]
        }
        Err(err) => vec![Effect::Notify(Notification::error(err.to_string()))],
    }
}

fn finish_submit(
    state: &mut AppState,
    form_id: FormId,
    result: Result<(), RequestFailure>,
) -> Vec<Effect> {
    let Some(form) = state
        .form_for(form_id)
        .filter(|form| form.phase() == FormPhase::Submitting)
    else {
        catalog_debug!("Dropping submit result for form {}", form_id);
        return Vec::new();
    };
    let effects = match result {
        Ok(()) => {
            let text = if form.is_edit_mode() {
                ENTRY_UPDATED
            } else {
                ENTRY_CREATED
            };
            form.submit_succeeded();
            let mut effects = vec![Effect::Notify(Notification::success(text))];
            effects.extend(navigate(state, Route::Catalog));
            effects
        }
        Err(RequestFailure::SessionExpired) => {
            form.submit_interrupted();
            Vec::new()
        }
        Err(failure) => {
            catalog_warn!("Error submitting entry: {}", failure.describe());
            form.submit_failed();
            vec![Effect::Notify(Notification::error(SUBMIT_FAILED))]
        }
    };
    state.mark_dirty();
    effects
}
