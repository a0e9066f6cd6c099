// Cache key derivation.
// One entry per (owner, repo, operation) triple, named with a fixed separator.

/// Separator between key components in the entry filename.
const KEY_SEPARATOR: &str = "_-_";

/// Identifies one cache entry. Two keys are equal iff all three
/// components are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    owner: String,
    repo: String,
    operation: &'static str,
}

impl CacheKey {
    /// Build a key, sanitizing owner and repo so the derived filename
    /// can never escape the data directory.
    pub fn new(owner: &str, repo: &str, operation: &'static str) -> Self {
        Self {
            owner: sanitize_component(owner),
            repo: sanitize_component(repo),
            operation,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn operation(&self) -> &str {
        self.operation
    }

    /// Filename of the entry inside the data directory.
    pub fn file_name(&self) -> String {
        format!(
            "{owner}{sep}{repo}{sep}{op}.json",
            owner = self.owner,
            repo = self.repo,
            op = self.operation,
            sep = KEY_SEPARATOR,
        )
    }
}

/// Replace path separators and other filesystem-hostile characters.
fn sanitize_component(component: &str) -> String {
    component
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
