//! # OrbitLens Runtime
//!
//! Entrypoint wiring for one page: a [`ContentScript`] session bound to a
//! site integration, the [`LandmarkWatcher`] for sites without navigation
//! events, and a [`FixtureMemberSource`] for offline lookups.

mod content_script;
mod error;
mod fixture;
mod watcher;

pub use content_script::ContentScript;
pub use error::{FixtureError, WatchError};
pub use fixture::FixtureMemberSource;
pub use watcher::{LandmarkWatcher, WatchHandle};
