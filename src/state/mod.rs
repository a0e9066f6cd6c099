// UI state types shared between the app and the renderer.

pub mod lists;

pub use lists::{LoadingState, SelectableList};
