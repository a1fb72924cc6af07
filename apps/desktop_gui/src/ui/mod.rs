//! UI layer for the playground: app shell, view rendering, and theme colours.

pub mod app;
pub mod theme;
pub mod view;

pub use app::{PlaygroundApp, StartupConfig};
