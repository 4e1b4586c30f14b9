use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use catalog_core::{
    update, AppState, AppViewModel, EntryId, Msg, Notification, NotificationLevel, Route,
    SessionPhase,
};
use catalog_engine::{ApiSettings, EngineHandle, SessionStore};
use catalog_logging::{catalog_debug, catalog_info, catalog_warn};
use chrono::Datelike;
use clap::Parser;

use super::cli::{Cli, Command};
use super::effects::{EffectRunner, UiAction};
use super::persistence::RonFileStore;
use super::{logging, ui};

const EVENT_POLL: Duration = Duration::from_millis(100);
/// Slack on top of the request timeout before giving up on outstanding work.
const SETTLE_MARGIN: Duration = Duration::from_secs(5);

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose, &cli.log_file);
    catalog_info!("Catalog client starting against {}", cli.backend_url);

    let session = Arc::new(SessionStore::new(RonFileStore::open(&cli.state_file)));
    let settings = ApiSettings {
        base_url: cli.backend_url.clone(),
        request_timeout: Duration::from_secs(cli.timeout_secs),
        ..ApiSettings::default()
    };
    let engine =
        EngineHandle::new(settings, session.clone()).context("failed to start the engine")?;
    let settle_timeout = Duration::from_secs(cli.timeout_secs) + SETTLE_MARGIN;
    let mut app = App::new(EffectRunner::new(engine, session.clone()), settle_timeout);

    app.dispatch(Msg::SessionRestored {
        signed_in: session.credential().is_some(),
        remembered_identity: session.remembered_identity(),
    });
    app.settle();

    let current_year = chrono::Local::now().year();
    run_command(&mut app, cli.command, current_year)?;

    for line in ui::render::render(&app.view()) {
        println!("{line}");
    }
    report(app.notifications())
}

fn run_command(app: &mut App, command: Command, current_year: i32) -> anyhow::Result<()> {
    match command {
        Command::Login {
            email,
            password,
            remember,
        } => {
            if let Some(email) = email {
                app.dispatch(Msg::LoginEmailChanged(email));
            }
            if app.state().login().remember_me != remember {
                app.dispatch(Msg::RememberMeToggled);
            }
            app.dispatch(Msg::LoginPasswordChanged(password));
            app.dispatch(Msg::LoginSubmitted);
        }
        Command::Logout => app.dispatch(Msg::LogoutClicked),
        Command::List { page } => {
            require_signed_in(app)?;
            app.dispatch(Msg::PageSelected(page));
        }
        Command::Create {
            title,
            year,
            poster,
        } => {
            require_signed_in(app)?;
            app.dispatch(Msg::CreateClicked);
            fill_form(app, Some(title), Some(year), poster, current_year)?;
            app.dispatch(Msg::SubmitClicked { current_year });
        }
        Command::Edit {
            id,
            title,
            year,
            poster,
        } => {
            require_signed_in(app)?;
            app.dispatch(Msg::EntryClicked(EntryId::new(id)));
            app.settle();
            fill_form(app, title, year, poster, current_year)?;
            app.dispatch(Msg::SubmitClicked { current_year });
        }
    }
    app.settle();
    Ok(())
}

fn require_signed_in(app: &App) -> anyhow::Result<()> {
    if app.state().session() != SessionPhase::SignedIn {
        bail!("not signed in; run `catalog login` first");
    }
    Ok(())
}

fn fill_form(
    app: &mut App,
    title: Option<String>,
    year: Option<String>,
    poster: Option<PathBuf>,
    current_year: i32,
) -> anyhow::Result<()> {
    if let Some(title) = title {
        app.dispatch(Msg::TitleChanged(title));
    }
    if let Some(year) = year {
        app.dispatch(Msg::YearInput {
            value: year.clone(),
            current_year,
        });
        let accepted = app
            .state()
            .form()
            .is_some_and(|form| form.draft().publishing_year == year);
        if !accepted {
            bail!("publishing year {year:?} is not a year up to {current_year}");
        }
    }
    if let Some(poster) = poster {
        app.dispatch(Msg::ImageSelected(poster));
        app.settle();
    }
    Ok(())
}

fn report(notifications: &[Notification]) -> anyhow::Result<()> {
    let mut failed = false;
    for notification in notifications {
        match notification.level {
            NotificationLevel::Success => eprintln!("{}", notification.text),
            NotificationLevel::Error => {
                failed = true;
                eprintln!("error: {}", notification.text);
            }
        }
    }
    if failed {
        bail!("the last command did not complete");
    }
    Ok(())
}

/// Drives the pure core: dispatches messages, runs their effects and feeds
/// engine results back in.
struct App {
    state: AppState,
    runner: EffectRunner,
    notifications: Vec<Notification>,
    settle_timeout: Duration,
}

impl App {
    fn new(runner: EffectRunner, settle_timeout: Duration) -> Self {
        Self {
            state: AppState::new(),
            runner,
            notifications: Vec::new(),
            settle_timeout,
        }
    }

    fn state(&self) -> &AppState {
        &self.state
    }

    fn view(&self) -> AppViewModel {
        self.state.view()
    }

    fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            catalog_debug!("State changed; route is {:?}", state.route());
        }
        self.state = state;
        for action in self.runner.run(effects) {
            self.handle(action);
        }
    }

    fn handle(&mut self, action: UiAction) {
        match action {
            UiAction::Notify(notification) => {
                match notification.level {
                    NotificationLevel::Success => catalog_info!("{}", notification.text),
                    NotificationLevel::Error => catalog_warn!("{}", notification.text),
                }
                self.notifications.push(notification);
            }
            UiAction::Navigate(route) => self.enter_route(route),
        }
    }

    /// Runs the initialization a freshly shown view performs.
    fn enter_route(&mut self, route: Route) {
        catalog_info!("Navigated to {:?}", route);
        match route {
            Route::Landing => {}
            Route::Catalog => self.dispatch(Msg::LoadRequested),
            Route::CreateEntry => self.dispatch(Msg::FormOpened { id: None }),
            Route::EditEntry(id) => self.dispatch(Msg::FormOpened { id: Some(id) }),
        }
    }

    /// Feeds engine results back until no request is outstanding.
    fn settle(&mut self) {
        let deadline = Instant::now() + self.settle_timeout;
        while !self.runner.is_idle() {
            match self.runner.next_msg(EVENT_POLL) {
                Some(msg) => self.dispatch(msg),
                None if Instant::now() >= deadline => {
                    catalog_warn!("Gave up waiting for outstanding requests");
                    return;
                }
                None => {}
            }
        }
    }
}
