// GitHub CLI module.
// Builds gh command lines and runs them through the host shell.

pub mod fetcher;
pub mod operations;

pub use fetcher::{CommandRunner, ShellFetcher};
pub use operations::Operation;
