//! Shared data types.

mod common;
mod member;
mod platform;

pub use common::Version;
pub use member::{Identity, IdentitySource, MemberRecord, OrbitLevel, Organization};
pub use platform::Platform;

#[cfg(test)]
#[path = "member_tests.rs"]
mod tests;
