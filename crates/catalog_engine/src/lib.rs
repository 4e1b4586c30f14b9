//! Catalog engine: session storage, authenticated HTTP pipeline, image codec
//! and effect execution.
mod api;
mod codec;
mod engine;
mod persist;
mod pipeline;
mod session;
mod types;
mod wire;

pub use api::{
    CatalogApi, HttpCatalogApi, CREATE_ENTRY_PATH, GET_ENTRY_PATH, LIST_ENTRIES_PATH, LOGIN_PATH,
    UPDATE_ENTRY_PATH,
};
pub use codec::{decode_image, encode_bytes, encode_file, DecodedImage, ReadError, MAX_IMAGE_BYTES};
pub use engine::EngineHandle;
pub use persist::{read_optional, write_atomic, PersistError};
pub use pipeline::{ApiSettings, AuthenticatedClient, ChannelSessionObserver, SessionObserver};
pub use session::{
    KeyValueStore, MemoryStore, SessionStore, CREDENTIAL_KEY, REMEMBERED_IDENTITY_KEY,
};
pub use types::{ApiError, EngineError, EngineEvent, FailureKind};
