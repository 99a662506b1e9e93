//! Domain logic - pure release naming and ordering rules independent of git operations

pub mod branch;
pub mod tag;
pub mod version;

pub use branch::{is_open_testing_branch, remote_ref, TestingBranch, ORIGIN};
pub use tag::{ReleaseTag, RELEASE_TAG_PATTERN};
pub use version::{validate_upgrade, Version};
