// Result cache for gh CLI invocations.
// One file per (owner, repo, operation) key, mtime-based freshness.

pub mod key;
pub mod store;

pub use key::CacheKey;
pub use store::ResultCache;
