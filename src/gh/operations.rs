// The fixed set of read queries against the gh CLI.
// Each operation owns its command line, field list, and result-size limit.

use crate::config::PLACEHOLDER;

/// Fields requested from `gh repo view --json`.
const REPO_INFO_FIELDS: &[&str] = &[
    "archivedAt",
    "assignableUsers",
    "codeOfConduct",
    "contactLinks",
    "createdAt",
    "defaultBranchRef",
    "deleteBranchOnMerge",
    "description",
    "diskUsage",
    "forkCount",
    "fundingLinks",
    "hasDiscussionsEnabled",
    "hasIssuesEnabled",
    "hasProjectsEnabled",
    "hasWikiEnabled",
    "homepageUrl",
    "id",
    "isArchived",
    "isBlankIssuesEnabled",
    "isEmpty",
    "isFork",
    "isInOrganization",
    "isMirror",
    "isPrivate",
    "isSecurityPolicyEnabled",
    "isTemplate",
    "isUserConfigurationRepository",
    "issueTemplates",
    "issues",
    "labels",
    "languages",
    "latestRelease",
    "licenseInfo",
    "mentionableUsers",
    "mergeCommitAllowed",
    "milestones",
    "mirrorUrl",
    "name",
    "nameWithOwner",
    "openGraphImageUrl",
    "owner",
    "parent",
    "primaryLanguage",
    "projects",
    "pullRequestTemplates",
    "pullRequests",
    "pushedAt",
    "rebaseMergeAllowed",
    "repositoryTopics",
    "securityPolicyUrl",
    "squashMergeAllowed",
    "sshUrl",
    "stargazerCount",
    "templateRepository",
    "updatedAt",
    "url",
    "usesCustomOpenGraphImage",
    "viewerCanAdminister",
    "viewerDefaultCommitEmail",
    "viewerDefaultMergeMethod",
    "viewerHasStarred",
    "viewerPermission",
    "viewerPossibleCommitEmails",
    "viewerSubscription",
    "visibility",
    "watchers",
];

/// Fields requested from `gh issue list --json`.
const ISSUE_FIELDS: &[&str] = &[
    "assignees",
    "author",
    "body",
    "closed",
    "closedAt",
    "comments",
    "createdAt",
    "id",
    "isPinned",
    "labels",
    "milestone",
    "number",
    "reactionGroups",
    "state",
    "stateReason",
    "title",
    "updatedAt",
    "url",
];

/// Fields requested from `gh pr list --json`.
const PULL_REQUEST_FIELDS: &[&str] = &[
    "author",
    "baseRefName",
    "closed",
    "closedAt",
    "createdAt",
    "headRefName",
    "id",
    "isDraft",
    "labels",
    "mergedAt",
    "number",
    "state",
    "title",
    "updatedAt",
    "url",
];

/// Fields requested from `gh run list --json`.
const RUN_FIELDS: &[&str] = &[
    "attempt",
    "conclusion",
    "createdAt",
    "databaseId",
    "displayTitle",
    "event",
    "headBranch",
    "name",
    "number",
    "startedAt",
    "status",
    "updatedAt",
    "url",
];

/// A named read query against the gh CLI.
///
/// The set is fixed and known ahead of time; the cache keys entries by
/// `name()` and treats the payload as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Overview,
    RepoInfo,
    Repositories,
    Issues,
    PullRequests,
    Actions,
}

impl Operation {
    /// Stable name used in cache keys and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Overview => "overview",
            Operation::RepoInfo => "repo_info",
            Operation::Repositories => "repositories",
            Operation::Issues => "issues",
            Operation::PullRequests => "pull_requests",
            Operation::Actions => "actions",
        }
    }

    /// Build the gh command line for this operation.
    pub fn command_line(&self, owner: &str, repo: &str) -> String {
        match self {
            Operation::Overview => format!("gh repo view {}/{}", owner, repo),
            Operation::RepoInfo => format!(
                "gh repo view {}/{} --json {}",
                owner,
                repo,
                REPO_INFO_FIELDS.join(",")
            ),
            Operation::Repositories => {
                // Account-wide when owner is the placeholder, per-owner otherwise.
                if owner == PLACEHOLDER {
                    "gh repo list --json owner,name -L 1024".to_string()
                } else {
                    format!("gh repo list --json name -L 1024 {}", owner)
                }
            }
            Operation::Issues => format!(
                "gh issue list -R {}/{} -L 40960 -s all --json {}",
                owner,
                repo,
                ISSUE_FIELDS.join(",")
            ),
            Operation::PullRequests => format!(
                "gh pr list -R {}/{} -L 40960 -s all --json {}",
                owner,
                repo,
                PULL_REQUEST_FIELDS.join(",")
            ),
            Operation::Actions => format!(
                "gh run list -R {}/{} -L 1024 --json {}",
                owner,
                repo,
                RUN_FIELDS.join(",")
            ),
        }
    }
}
