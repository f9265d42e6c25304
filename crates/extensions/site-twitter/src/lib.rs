//! Twitter/X profile adapter for OrbitLens.

mod extension;
mod profile_page;

pub use extension::TwitterSite;
pub use profile_page::TwitterProfilePage;
