// Data pipeline between the cache and the UI.
// Decodes cached payloads and shapes them into tab summaries and rows.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::cache::ResultCache;
use crate::error::Result;
use crate::gh::{CommandRunner, Operation, ShellFetcher};
use crate::json::{bool_at, str_at, u64_at};

/// Content for one tab: a summary line (or block, for Overview), the
/// plain-text body (Overview only), and table rows.
#[derive(Debug, Clone, Default)]
pub struct TabData {
    pub summary: String,
    pub body: String,
    pub rows: Vec<[String; 5]>,
}

/// Shapes cached gh payloads for the presentation layer.
///
/// All JSON decoding happens here; the cache below stays
/// payload-opaque.
pub struct Pipeline<F = ShellFetcher> {
    cache: ResultCache<F>,
}

impl<F: CommandRunner> Pipeline<F> {
    pub fn new(cache: ResultCache<F>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &ResultCache<F> {
        &self.cache
    }

    /// Overview tab: `gh repo view` text plus a summary derived from
    /// the repo_info JSON.
    pub fn overview(&self, owner: &str, repo: &str, bypass: bool) -> Result<TabData> {
        let body = self
            .cache
            .get(Operation::Overview, Some(owner), Some(repo), bypass)?;
        let raw = self
            .cache
            .get(Operation::RepoInfo, Some(owner), Some(repo), bypass)?;
        let info: Value = serde_json::from_str(&raw)?;

        let summary = format!(
            "🕒: {created}\n🌐: {url}\n\n📦: {name}\n📝: {description}\n\n\
             🔱: {forks}   👀: {watchers}   ⭐: {stars}   ❗: {issues}   🔗: {prs}",
            created = str_at(&info, &["createdAt"], "-"),
            url = str_at(&info, &["url"], "-"),
            name = str_at(&info, &["name"], "-"),
            description = str_at(&info, &["description"], "-"),
            forks = u64_at(&info, &["forkCount"]),
            watchers = u64_at(&info, &["watchers", "totalCount"]),
            stars = u64_at(&info, &["stargazerCount"]),
            issues = u64_at(&info, &["issues", "totalCount"]),
            prs = u64_at(&info, &["pullRequests", "totalCount"]),
        );

        Ok(TabData {
            summary,
            body,
            rows: Vec::new(),
        })
    }

    /// Issues tab: one row per open issue, with open/closed totals.
    pub fn issues(&self, owner: &str, repo: &str, bypass: bool) -> Result<TabData> {
        let raw = self
            .cache
            .get(Operation::Issues, Some(owner), Some(repo), bypass)?;
        let issues: Vec<Value> = serde_json::from_str(&raw)?;

        let mut rows = Vec::new();
        let mut open = 0usize;
        let mut closed = 0usize;

        for issue in &issues {
            if bool_at(issue, &["closed"]) {
                closed += 1;
                continue;
            }
            open += 1;
            rows.push([
                u64_at(issue, &["number"]).to_string(),
                author_of(issue),
                age_days(str_at(issue, &["createdAt"], "")),
                updated_stamp(str_at(issue, &["updatedAt"], "")),
                str_at(issue, &["title"], "").to_string(),
            ]);
        }

        Ok(TabData {
            summary: format!("🌐: {}   🟢: {}   🔒: {}", issues.len(), open, closed),
            body: String::new(),
            rows,
        })
    }

    /// PullRequests tab: one row per pull request, any state.
    pub fn pull_requests(&self, owner: &str, repo: &str, bypass: bool) -> Result<TabData> {
        let raw = self
            .cache
            .get(Operation::PullRequests, Some(owner), Some(repo), bypass)?;
        let prs: Vec<Value> = serde_json::from_str(&raw)?;

        let open = prs
            .iter()
            .filter(|pr| str_at(pr, &["state"], "") == "OPEN")
            .count();
        let rows = prs
            .iter()
            .map(|pr| {
                [
                    u64_at(pr, &["number"]).to_string(),
                    age_days(str_at(pr, &["createdAt"], "")),
                    str_at(pr, &["state"], "").to_string(),
                    author_of(pr),
                    str_at(pr, &["title"], "").to_string(),
                ]
            })
            .collect();

        Ok(TabData {
            summary: format!(
                "🌐: {}   🟢: {}   🔒: {}",
                prs.len(),
                open,
                prs.len() - open
            ),
            body: String::new(),
            rows,
        })
    }

    /// Actions tab: one row per workflow run.
    pub fn actions(&self, owner: &str, repo: &str, bypass: bool) -> Result<TabData> {
        let raw = self
            .cache
            .get(Operation::Actions, Some(owner), Some(repo), bypass)?;
        let runs: Vec<Value> = serde_json::from_str(&raw)?;

        let rows = runs
            .iter()
            .map(|run| {
                // Completed runs report a conclusion; in-flight ones only a status.
                let result = match str_at(run, &["conclusion"], "") {
                    "" => str_at(run, &["status"], "").to_string(),
                    conclusion => conclusion.to_string(),
                };
                [
                    u64_at(run, &["number"]).to_string(),
                    u64_at(run, &["attempt"]).to_string(),
                    str_at(run, &["event"], "").to_string(),
                    result,
                    str_at(run, &["name"], "").to_string(),
                ]
            })
            .collect();

        Ok(TabData {
            summary: format!("🌐: {}", runs.len()),
            body: String::new(),
            rows,
        })
    }
}

/// Author display name, falling back to the login.
fn author_of(item: &Value) -> String {
    match str_at(item, &["author", "name"], "") {
        "" => str_at(item, &["author", "login"], "").to_string(),
        name => name.to_string(),
    }
}

/// Whole days since an RFC 3339 timestamp.
fn age_days(created_at: &str) -> String {
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(created) => {
            let days = Utc::now()
                .signed_duration_since(created.with_timezone(&Utc))
                .num_days()
                .max(0);
            format!("{days} days")
        }
        Err(_) => String::new(),
    }
}

/// Human timestamp for the "Updated @" column.
fn updated_stamp(updated_at: &str) -> String {
    match DateTime::parse_from_rfc3339(updated_at) {
        Ok(updated) => updated.format("%a, %b %d, %Y @ %I:%M%p").to_string(),
        Err(_) => String::new(),
    }
}
