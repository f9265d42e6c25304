//! LinkedIn profile adapter for OrbitLens.

mod extension;
mod profile_page;

pub use extension::LinkedInSite;
pub use profile_page::LinkedInProfilePage;
