// Cache store: hit/stale/miss decisions and entry persistence.
// Entries hold the verbatim payload; freshness comes from the file mtime.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::Utc;

use crate::config::{Config, PLACEHOLDER};
use crate::error::{HubdeckError, Result};
use crate::gh::{CommandRunner, Operation, ShellFetcher};

use super::key::CacheKey;

/// Disk-backed cache over gh invocations.
///
/// One file per (owner, repo, operation) key. A fresh entry (younger
/// than the TTL) is returned as-is; otherwise the operation's command
/// runs and its output fully replaces the entry. No locking: concurrent
/// callers on the same key race with last-writer-wins.
pub struct ResultCache<F = ShellFetcher> {
    config: Config,
    fetcher: F,
}

impl<F: CommandRunner> ResultCache<F> {
    pub fn new(config: Config, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Look up one operation result, fetching and overwriting on
    /// miss, staleness, or bypass.
    ///
    /// `owner` of `None` fails with `MissingOwner` before any I/O.
    /// An absent `repo` becomes the placeholder used by account-wide
    /// operations. The payload is returned verbatim; callers decode.
    pub fn get(
        &self,
        operation: Operation,
        owner: Option<&str>,
        repo: Option<&str>,
        bypass_cache: bool,
    ) -> Result<String> {
        let Some(owner) = owner else {
            return Err(HubdeckError::MissingOwner);
        };
        let repo = repo.unwrap_or(PLACEHOLDER);

        let key = CacheKey::new(owner, repo, operation.name());
        let path = self.config.data_dir.join(key.file_name());

        if !bypass_cache && path.exists() {
            if entry_age(&path)? < self.config.ttl {
                self.log_event(&format!(
                    "cache hit for {}/{} on {}",
                    key.owner(),
                    key.repo(),
                    key.operation()
                ));
                return fs::read_to_string(&path).map_err(HubdeckError::Storage);
            }
            self.log_event(&format!(
                "cache expired for {}/{} on {}",
                key.owner(),
                key.repo(),
                key.operation()
            ));
        } else {
            self.log_event(&format!(
                "cache miss or bypass for {}/{} on {}",
                key.owner(),
                key.repo(),
                key.operation()
            ));
        }

        // A fetch failure propagates here and leaves any existing entry
        // untouched.
        let payload = self.fetcher.run(&operation.command_line(owner, repo))?;
        write_entry(&path, &payload)?;
        self.log_event(&format!(
            "cache updated for {}/{} on {}",
            key.owner(),
            key.repo(),
            key.operation()
        ));

        Ok(payload)
    }

    /// Append one line to the cache event log. Best-effort: log writes
    /// never block or fail the operation.
    fn log_event(&self, message: &str) {
        let line = format!(
            "{} - INFO - {}\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            message
        );
        if let Ok(mut file) = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.cache_log)
        {
            let _ = file.write_all(line.as_bytes());
        }
    }
}

/// Wall-clock age of an entry, read from the storage medium's mtime.
fn entry_age(path: &Path) -> Result<Duration> {
    let modified = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(HubdeckError::Storage)?;
    Ok(SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO))
}

/// Fully replace an entry, atomically via temp file + rename.
fn write_entry(path: &Path, payload: &str) -> Result<()> {
    fn inner(path: &Path, payload: &str) -> std::io::Result<()> {
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(payload.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    }
    inner(path, payload).map_err(HubdeckError::Storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Returns a fixed payload and records every command line it runs.
    struct CountingRunner {
        payload: String,
        calls: RefCell<Vec<String>>,
    }

    impl CountingRunner {
        fn new(payload: &str) -> Self {
            Self {
                payload: payload.to_string(),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl CommandRunner for CountingRunner {
        fn run(&self, command_line: &str) -> Result<String> {
            self.calls.borrow_mut().push(command_line.to_string());
            Ok(self.payload.clone())
        }
    }

    /// Echoes the command line back as the payload, so different keys
    /// produce observably different entries.
    struct EchoRunner {
        calls: RefCell<usize>,
    }

    impl EchoRunner {
        fn new() -> Self {
            Self {
                calls: RefCell::new(0),
            }
        }
    }

    impl CommandRunner for EchoRunner {
        fn run(&self, command_line: &str) -> Result<String> {
            *self.calls.borrow_mut() += 1;
            Ok(command_line.to_string())
        }
    }

    /// Always fails the way a non-zero gh exit does.
    struct FailingRunner {
        calls: RefCell<usize>,
    }

    impl FailingRunner {
        fn new() -> Self {
            Self {
                calls: RefCell::new(0),
            }
        }
    }

    impl CommandRunner for FailingRunner {
        fn run(&self, _command_line: &str) -> Result<String> {
            *self.calls.borrow_mut() += 1;
            Err(HubdeckError::CommandFailed {
                code: 7,
                log: std::path::PathBuf::from("/tmp/unused.log"),
            })
        }
    }

    fn cache_in<F: CommandRunner>(dir: &TempDir, fetcher: F) -> ResultCache<F> {
        let config = Config::at(dir.path().to_path_buf());
        config.ensure_dirs().unwrap();
        ResultCache::new(config, fetcher)
    }

    fn entry_path(cache: &ResultCache<impl CommandRunner>, owner: &str, repo: &str, op: Operation) -> std::path::PathBuf {
        cache
            .config()
            .data_dir
            .join(CacheKey::new(owner, repo, op.name()).file_name())
    }

    /// Push an entry's mtime into the past.
    fn age_entry(path: &Path, secs: u64) {
        let file = fs::OpenOptions::new().write(true).open(path).unwrap();
        let times = fs::FileTimes::new().set_modified(SystemTime::now() - Duration::from_secs(secs));
        file.set_times(times).unwrap();
    }

    fn data_entries(cache: &ResultCache<impl CommandRunner>) -> usize {
        fs::read_dir(&cache.config().data_dir).unwrap().count()
    }

    #[test]
    fn test_idempotent_hit() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CountingRunner::new(r#"{"open": 3}"#));

        let first = cache
            .get(Operation::Issues, Some("acme"), Some("svc-a"), false)
            .unwrap();
        let second = cache
            .get(Operation::Issues, Some("acme"), Some("svc-a"), false)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.fetcher().call_count(), 1);
    }

    #[test]
    fn test_ttl_boundary() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CountingRunner::new("[]"));

        cache
            .get(Operation::Issues, Some("acme"), Some("svc-a"), false)
            .unwrap();
        let path = entry_path(&cache, "acme", "svc-a", Operation::Issues);

        // Just inside the 1800s window: still a hit.
        age_entry(&path, 1799);
        cache
            .get(Operation::Issues, Some("acme"), Some("svc-a"), false)
            .unwrap();
        assert_eq!(cache.fetcher().call_count(), 1);

        // Just past the window: stale, refetched.
        age_entry(&path, 1801);
        cache
            .get(Operation::Issues, Some("acme"), Some("svc-a"), false)
            .unwrap();
        assert_eq!(cache.fetcher().call_count(), 2);
    }

    #[test]
    fn test_bypass_forces_refresh() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CountingRunner::new("[]"));

        cache
            .get(Operation::Issues, Some("acme"), Some("svc-a"), false)
            .unwrap();
        // Entry is fresh, but bypass must refetch anyway.
        cache
            .get(Operation::Issues, Some("acme"), Some("svc-a"), true)
            .unwrap();
        assert_eq!(cache.fetcher().call_count(), 2);
    }

    #[test]
    fn test_missing_owner_fails_fast() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CountingRunner::new("[]"));

        let err = cache
            .get(Operation::Issues, None, Some("svc-a"), false)
            .unwrap_err();
        assert!(matches!(err, HubdeckError::MissingOwner));
        assert_eq!(cache.fetcher().call_count(), 0);
        assert_eq!(data_entries(&cache), 0);
    }

    #[test]
    fn test_fetch_failure_writes_no_entry() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, FailingRunner::new());

        let err = cache
            .get(Operation::Issues, Some("acme"), Some("svc-a"), false)
            .unwrap_err();
        assert!(matches!(err, HubdeckError::CommandFailed { code: 7, .. }));
        assert_eq!(data_entries(&cache), 0);
    }

    #[test]
    fn test_fetch_failure_leaves_existing_entry_untouched() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, FailingRunner::new());
        let path = entry_path(&cache, "acme", "svc-a", Operation::Issues);
        fs::write(&path, "old payload").unwrap();

        cache
            .get(Operation::Issues, Some("acme"), Some("svc-a"), true)
            .unwrap_err();
        assert_eq!(fs::read_to_string(&path).unwrap(), "old payload");
    }

    #[test]
    fn test_key_isolation() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, EchoRunner::new());

        let issues_ab = cache
            .get(Operation::Issues, Some("a"), Some("b"), false)
            .unwrap();
        let prs_ab = cache
            .get(Operation::PullRequests, Some("a"), Some("b"), false)
            .unwrap();
        let issues_ac = cache
            .get(Operation::Issues, Some("a"), Some("c"), false)
            .unwrap();

        // Three distinct entries, each serving its own payload on hit.
        assert_eq!(data_entries(&cache), 3);
        assert_eq!(
            cache
                .get(Operation::Issues, Some("a"), Some("b"), false)
                .unwrap(),
            issues_ab
        );
        assert_eq!(
            cache
                .get(Operation::PullRequests, Some("a"), Some("b"), false)
                .unwrap(),
            prs_ab
        );
        assert_eq!(
            cache
                .get(Operation::Issues, Some("a"), Some("c"), false)
                .unwrap(),
            issues_ac
        );
        assert_ne!(issues_ab, prs_ab);
        assert_ne!(issues_ab, issues_ac);
        assert_eq!(*cache.fetcher().calls.borrow(), 3);
    }

    #[test]
    fn test_repositories_scenario() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CountingRunner::new(r#"["svc-a","svc-b"]"#));

        let first = cache
            .get(Operation::Repositories, Some("acme"), None, false)
            .unwrap();
        let repos: Vec<String> = serde_json::from_str(&first).unwrap();
        assert_eq!(repos, vec!["svc-a", "svc-b"]);

        // Within TTL: same two entries, no second invocation.
        let second = cache
            .get(Operation::Repositories, Some("acme"), None, false)
            .unwrap();
        assert_eq!(second, first);
        assert_eq!(cache.fetcher().call_count(), 1);

        // Past TTL: same payload, but refetched and timestamp renewed.
        let path = entry_path(&cache, "acme", PLACEHOLDER, Operation::Repositories);
        age_entry(&path, 1801);
        let third = cache
            .get(Operation::Repositories, Some("acme"), None, false)
            .unwrap();
        assert_eq!(third, first);
        assert_eq!(cache.fetcher().call_count(), 2);
        assert!(entry_age(&path).unwrap() < Duration::from_secs(60));
    }

    #[test]
    fn test_events_are_appended_to_cache_log() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir, CountingRunner::new("[]"));

        cache
            .get(Operation::Issues, Some("acme"), Some("svc-a"), false)
            .unwrap();
        cache
            .get(Operation::Issues, Some("acme"), Some("svc-a"), false)
            .unwrap();

        let log = fs::read_to_string(&cache.config().cache_log).unwrap();
        assert!(log.contains("cache miss or bypass for acme/svc-a on issues"));
        assert!(log.contains("cache updated for acme/svc-a on issues"));
        assert!(log.contains("cache hit for acme/svc-a on issues"));
    }
}
