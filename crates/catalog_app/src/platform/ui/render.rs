//! Plain-text rendering of the view model.

use catalog_core::{AppViewModel, CatalogView, FormPhase, FormView, LoginView, PosterImage, Route};
use catalog_engine::decode_image;

pub(crate) fn render(view: &AppViewModel) -> Vec<String> {
    match &view.route {
        Route::Landing => render_landing(&view.login),
        Route::Catalog => render_catalog(&view.catalog),
        Route::CreateEntry | Route::EditEntry(_) => match &view.form {
            Some(form) => render_form(form),
            None => vec!["Form closed.".to_string()],
        },
    }
}

fn render_landing(login: &LoginView) -> Vec<String> {
    let mut lines = vec!["Not signed in.".to_string()];
    if !login.email.is_empty() {
        lines.push(format!("Email: {}", login.email));
    }
    if login.remember_me {
        lines.push("Remember me: on".to_string());
    }
    lines
}

fn render_catalog(catalog: &CatalogView) -> Vec<String> {
    if catalog.loading {
        return vec!["Loading...".to_string()];
    }
    if catalog.empty {
        return vec!["Your catalog is empty.".to_string()];
    }

    let mut lines: Vec<String> = catalog
        .entries
        .iter()
        .map(|entry| {
            let poster = entry
                .poster
                .as_ref()
                .map(describe_poster)
                .unwrap_or_else(|| "no poster".to_string());
            format!(
                "[{}] {} ({}) {}",
                entry.id, entry.title, entry.publishing_year, poster
            )
        })
        .collect();
    lines.push(pagination_line(catalog));
    lines
}

fn pagination_line(catalog: &CatalogView) -> String {
    let mut parts = Vec::with_capacity(catalog.pages.len() + 2);
    parts.push(if catalog.previous_enabled { "Prev" } else { "(Prev)" }.to_string());
    for link in &catalog.pages {
        parts.push(if link.active {
            format!("[{}]", link.number)
        } else {
            link.number.to_string()
        });
    }
    parts.push(if catalog.next_enabled { "Next" } else { "(Next)" }.to_string());
    parts.join(" ")
}

fn render_form(form: &FormView) -> Vec<String> {
    let heading = match &form.editing {
        Some(id) => format!("Edit entry {id}"),
        None => "Create a new entry".to_string(),
    };
    let poster = form
        .poster
        .as_ref()
        .map(describe_poster)
        .unwrap_or_else(|| "none".to_string());
    vec![
        heading,
        format!("Title: {}", form.title),
        format!("Publishing year: {}", form.publishing_year),
        format!("Poster: {poster}"),
        format!("Status: {}", status_label(form)),
    ]
}

fn status_label(form: &FormView) -> String {
    let phase = phase_label(form.phase);
    if form.last_submit_failed {
        format!("{phase}, last submit failed")
    } else {
        phase.to_string()
    }
}

fn phase_label(phase: FormPhase) -> &'static str {
    match phase {
        FormPhase::Empty => "empty",
        FormPhase::Loaded => "loaded",
        FormPhase::Dirty => "edited",
        FormPhase::Submitting => "submitting",
        FormPhase::Succeeded => "saved",
    }
}

fn describe_poster(poster: &PosterImage) -> String {
    if !poster.is_encoded() {
        return format!("poster at {}", poster.as_str());
    }
    match decode_image(poster) {
        Ok(image) => format!("inline {} ({} bytes)", image.media_type, image.bytes.len()),
        Err(err) => format!("unreadable poster ({err})"),
    }
}
