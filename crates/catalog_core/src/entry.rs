use std::fmt;

/// Identity of a catalog entry as assigned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A displayable poster reference.
///
/// Either a self-describing encoded image (`data:<mime>;base64,...`) produced
/// on this client, or whatever reference the remote service handed back.
/// Both forms can be used as a display source as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterImage(String);

impl PosterImage {
    pub const DATA_URL_PREFIX: &'static str = "data:";

    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// True when this is an encoded image rather than a remote reference.
    pub fn is_encoded(&self) -> bool {
        self.0.starts_with(Self::DATA_URL_PREFIX)
    }

    /// Media type embedded in an encoded image.
    pub fn media_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix(Self::DATA_URL_PREFIX)?;
        let header = rest.split_once(',')?.0;
        let media_type = header.split(';').next()?;
        (!media_type.is_empty()).then_some(media_type)
    }
}

/// Immutable snapshot of one catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: EntryId,
    pub title: String,
    pub publishing_year: i32,
    pub poster: Option<PosterImage>,
}

/// Whether a submit creates a new entry or replaces an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update(EntryId),
}

/// Validated payload ready to be sent to the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub mode: SubmitMode,
    pub title: String,
    pub publishing_year: String,
    pub poster: Option<PosterImage>,
}

impl SubmitRequest {
    pub fn id(&self) -> Option<&EntryId> {
        match &self.mode {
            SubmitMode::Create => None,
            SubmitMode::Update(id) => Some(id),
        }
    }
}
