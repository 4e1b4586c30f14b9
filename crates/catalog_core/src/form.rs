use crate::validate::{validate_publishing_year, validate_title, ValidationError};
use crate::{CatalogEntry, EntryId, PosterImage, SubmitMode, SubmitRequest};

/// Identifies one opened form so late async results can be matched to it.
pub type FormId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Empty,
    Loaded,
    Dirty,
    Submitting,
    Succeeded,
}

/// Editable working copy of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftEntry {
    pub title: String,
    pub publishing_year: String,
    pub poster: Option<PosterImage>,
}

/// Draft plus the create/edit state machine around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    form_id: FormId,
    editing: Option<EntryId>,
    draft: DraftEntry,
    phase: FormPhase,
    last_submit_failed: bool,
}

impl EntryForm {
    pub(crate) fn new(form_id: FormId, editing: Option<EntryId>) -> Self {
        Self {
            form_id,
            editing,
            draft: DraftEntry::default(),
            phase: FormPhase::Empty,
            last_submit_failed: false,
        }
    }

    pub fn form_id(&self) -> FormId {
        self.form_id
    }

    pub fn editing(&self) -> Option<&EntryId> {
        self.editing.as_ref()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing.is_some()
    }

    pub fn draft(&self) -> &DraftEntry {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Whether the most recent submit was refused or could not be delivered.
    /// Cleared when the next submit goes out.
    pub fn last_submit_failed(&self) -> bool {
        self.last_submit_failed
    }

    /// Field edits are refused while a submit is outstanding or after it
    /// succeeded.
    pub fn accepts_edits(&self) -> bool {
        !matches!(self.phase, FormPhase::Submitting | FormPhase::Succeeded)
    }

    pub fn can_submit(&self) -> bool {
        self.accepts_edits()
    }

    /// Fills an untouched edit form from the fetched snapshot.
    pub(crate) fn populate(&mut self, entry: CatalogEntry) -> bool {
        if self.phase != FormPhase::Empty {
            return false;
        }
        self.draft = DraftEntry {
            title: entry.title,
            publishing_year: entry.publishing_year.to_string(),
            poster: entry.poster,
        };
        self.phase = FormPhase::Loaded;
        true
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.draft.title = title;
        self.phase = FormPhase::Dirty;
    }

    pub(crate) fn set_publishing_year(&mut self, year: String) {
        self.draft.publishing_year = year;
        self.phase = FormPhase::Dirty;
    }

    pub(crate) fn set_poster(&mut self, poster: PosterImage) {
        self.draft.poster = Some(poster);
        self.phase = FormPhase::Dirty;
    }

    /// Runs submit-time validation and, on success, moves to `Submitting`.
    pub(crate) fn begin_submit(&mut self, current_year: i32) -> Result<SubmitRequest, ValidationError> {
        let checked = validate_title(&self.draft.title)
            .and_then(|()| validate_publishing_year(&self.draft.publishing_year, current_year));
        if let Err(err) = checked {
            self.phase = FormPhase::Dirty;
            return Err(err);
        }

        self.phase = FormPhase::Submitting;
        self.last_submit_failed = false;
        let mode = match &self.editing {
            Some(id) => SubmitMode::Update(id.clone()),
            None => SubmitMode::Create,
        };
        Ok(SubmitRequest {
            mode,
            title: self.draft.title.clone(),
            publishing_year: self.draft.publishing_year.clone(),
            poster: self.draft.poster.clone(),
        })
    }

    pub(crate) fn submit_succeeded(&mut self) {
        self.phase = FormPhase::Succeeded;
    }

    /// The submit failed; the draft goes back to editable so it can be retried.
    pub(crate) fn submit_failed(&mut self) {
        self.last_submit_failed = true;
        self.phase = FormPhase::Dirty;
    }

    /// Returns to an editable state without recording a failure.
    pub(crate) fn submit_interrupted(&mut self) {
        self.phase = FormPhase::Dirty;
    }
}
