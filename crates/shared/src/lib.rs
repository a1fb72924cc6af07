//! Wire types shared by the playground client, CLI and development server.

pub mod domain;
pub mod error;
pub mod protocol;
