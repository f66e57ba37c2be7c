use serde::Deserialize;

/// A commit returned from a comparison between two refs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeCommit {
    pub sha: String,
    pub message: String,
}

/// Identifies one merged pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestInfo {
    /// Pull request number as it appears in the repository
    pub id: String,
    pub title: String,
    /// Login of the pull request author
    pub author: String,
}

#[derive(Debug, Deserialize)]
pub struct CompareCommitDetail {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CompareCommit {
    pub sha: String,
    pub commit: CompareCommitDetail,
}

/// Body of `GET /repos/{owner}/{repo}/compare/{base}...{head}`.
#[derive(Debug, Deserialize)]
pub struct CompareResponse {
    #[serde(default)]
    pub commits: Vec<CompareCommit>,
}

impl From<CompareCommit> for ForgeCommit {
    fn from(commit: CompareCommit) -> Self {
        Self {
            sha: commit.sha,
            message: commit.commit.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compare_response() {
        let body = serde_json::json!({
            "status": "ahead",
            "commits": [
                {
                    "sha": "3cb7e43",
                    "commit": { "message": "[ST-671] post waiver to slack not task (#6128)" }
                },
                {
                    "sha": "c0c43ba",
                    "commit": { "message": "PLAT-337 bugsnag logconfig fix\n\nblack formatting" }
                }
            ]
        });

        let response: CompareResponse = serde_json::from_value(body).unwrap();
        let commits: Vec<ForgeCommit> =
            response.commits.into_iter().map(ForgeCommit::from).collect();

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].sha, "3cb7e43");
        assert_eq!(
            commits[1].message,
            "PLAT-337 bugsnag logconfig fix\n\nblack formatting"
        );
    }

    #[test]
    fn missing_commits_is_empty() {
        let response: CompareResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.commits.is_empty());
    }
}
