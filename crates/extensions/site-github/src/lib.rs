//! GitHub page adapters for OrbitLens.
//!
//! Injects widgets into comment headers on issue, pull request and
//! discussion pages.

mod comment;
mod discussion_page;
mod extension;
mod issue_page;

pub use discussion_page::GitHubDiscussionPage;
pub use extension::GitHubSite;
pub use issue_page::GitHubIssueOrPullRequestPage;
