// Startup prefetch of the owner -> repositories inventory.
// Runs once, before the first frame; the UI waits on it.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::cache::ResultCache;
use crate::config::PLACEHOLDER;
use crate::error::{HubdeckError, Result};
use crate::gh::{CommandRunner, Operation};
use crate::json::str_at;
use crate::pipeline::Pipeline;

/// Owners mapped to their (sorted) repository names.
pub type Inventory = BTreeMap<String, Vec<String>>;

/// gh org list prints a header and indented footer; strip them in the shell.
const ORG_LIST_CMD: &str = "gh org list -L 1024 | grep -vE '(^ |Showing [0-9])'";

/// Gather every owner the account can see and the repositories under
/// each: the account-wide repo list, then `gh org list`, then one repo
/// list per organization. Blocking; repo lists go through the cache.
pub fn collect_inventory<F: CommandRunner>(cache: &ResultCache<F>) -> Result<Inventory> {
    let mut inventory = Inventory::new();

    let raw = cache.get(Operation::Repositories, Some(PLACEHOLDER), None, false)?;
    let repos: Vec<Value> = serde_json::from_str(&raw)?;
    for repo in &repos {
        let owner = str_at(repo, &["owner", "login"], "");
        let name = str_at(repo, &["name"], "");
        if owner.is_empty() || name.is_empty() {
            continue;
        }
        let names = inventory.entry(owner.to_string()).or_default();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    let orgs = cache.fetcher().run(ORG_LIST_CMD)?;
    for org in orgs.split_whitespace() {
        let raw = cache.get(Operation::Repositories, Some(org), None, false)?;
        let repos: Vec<Value> = serde_json::from_str(&raw)?;
        let names = inventory.entry(org.to_string()).or_default();
        for repo in &repos {
            let name = str_at(repo, &["name"], "");
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }

    for names in inventory.values_mut() {
        names.sort();
    }
    Ok(inventory)
}

/// Startup gate: run the blocking inventory collection off the async
/// runtime and hand the pipeline back once it resolves.
pub async fn gather<F>(pipeline: Pipeline<F>) -> Result<(Pipeline<F>, Inventory)>
where
    F: CommandRunner + Send + 'static,
{
    let (pipeline, inventory) = tokio::task::spawn_blocking(move || {
        let inventory = collect_inventory(pipeline.cache());
        (pipeline, inventory)
    })
    .await
    .map_err(|e| HubdeckError::Other(format!("prefetch task failed: {e}")))?;
    Ok((pipeline, inventory?))
}
