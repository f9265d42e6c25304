//! Gmail thread adapter for OrbitLens.

mod extension;
mod thread_page;

pub use extension::GmailSite;
pub use thread_page::GmailEmailThreadPage;
