pub mod library;
pub mod project_store;

pub use library::{calculate_checksum, LibraryCache, ReferenceLibrary};
pub use project_store::{slugify, FsProjectStore, ProjectStore, StoredProject};
