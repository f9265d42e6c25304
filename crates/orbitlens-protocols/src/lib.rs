//! # OrbitLens Protocols
//!
//! Interface definitions and the shared data model for OrbitLens.
//! Contains no implementations beyond plain data helpers.
//!
//! ## Core Traits
//!
//! - [`PageAdapter`] - Site/page-kind specific DOM knowledge
//! - [`SiteIntegration`] - Bundles a site's adapters and navigation signals
//! - [`MemberDataSource`] - Background member lookup collaborator
//! - [`CredentialStore`] - Credential/settings collaborator

pub mod adapter;
pub mod credentials;
pub mod error;
pub mod member_data;
pub mod site;
pub mod types;

pub use adapter::PageAdapter;
pub use credentials::{CredentialStore, Credentials};
pub use error::{FetchError, SiteError};
pub use member_data::{FetchContext, MemberDataRequest, MemberDataResponse, MemberDataSource};
pub use site::{LifecycleEvent, NavigationStrategy, SiteIntegration, SiteManifest};
pub use types::*;
