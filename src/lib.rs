//! # sitegate
//!
//! A single-password gate for server-rendered sites. Every request must carry a
//! `session-pw` cookie equal to the project password; anything else is
//! redirected to `/login`. The login page and everything under `/api/` are
//! exempt.

pub mod cli;
pub mod sitegate;

pub use self::sitegate::{gate, new, router};

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
