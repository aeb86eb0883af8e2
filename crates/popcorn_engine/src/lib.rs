//! Popcorn engine: remote lookups, cancellable tasks and local storage.
mod engine;
mod lookup;
mod persist;
mod slot;
mod store;
mod types;

pub use engine::EngineHandle;
pub use lookup::{LookupSettings, MovieLookup, OmdbLookup, DEFAULT_ENDPOINT};
pub use persist::{ensure_data_dir, AtomicFileWriter, PersistError};
pub use slot::{run_cancellable, TaskSlot};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use types::{EngineEvent, FailureKind, LookupError, MovieRecord, RequestId, SearchHit};
