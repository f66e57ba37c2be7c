//! Maps a commit range onto the pull requests merged within it.
use futures_util::future::try_join_all;
use log::*;
use regex::Regex;
use std::sync::LazyLock;

use crate::{
    error::Result,
    forge::{request::PullRequestInfo, traits::Forge},
};

static MERGE_COMMIT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Merge pull request #(?<number>\d+) from").unwrap()
});

static SQUASH_COMMIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(#(?<number>\d+)\)$").unwrap());

/// Pull request number referenced by a commit message, if any.
///
/// Classification only looks at the first line: a merge commit
/// (`Merge pull request #N from ...`) or a squash merge whose subject ends
/// in `(#N)`. Anything else is treated as an ordinary commit that belongs to
/// some merge and is ignored.
pub fn pr_number_from_message(message: &str) -> Option<u64> {
    let first_line = message.lines().next().unwrap_or_default();

    let captures = if first_line.contains("Merge pull request") {
        MERGE_COMMIT_REGEX.captures(message)
    } else {
        SQUASH_COMMIT_REGEX.captures(first_line)
    }?;

    captures["number"].parse().ok()
}

/// Pull requests merged between `previous` and `current`, in commit order.
/// Pull requests are fetched concurrently; any failed fetch fails the whole
/// range.
pub async fn get_commits_between(
    forge: &dyn Forge,
    repo: &str,
    current: &str,
    previous: &str,
) -> Result<Vec<PullRequestInfo>> {
    let commits = forge.compare(repo, previous, current).await?;

    let numbers: Vec<u64> = commits
        .iter()
        .filter_map(|commit| {
            let number = pr_number_from_message(&commit.message);
            if number.is_none() {
                debug!("skipping commit without pull request: {}", commit.sha);
            }
            number
        })
        .collect();

    info!(
        "{repo}: {} of {} commits reference pull requests",
        numbers.len(),
        commits.len()
    );

    try_join_all(
        numbers
            .into_iter()
            .map(|number| forge.get_pull_request(repo, number)),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ReleaseNotesError,
        forge::{request::ForgeCommit, traits::MockForge},
    };

    fn commit(sha: &str, message: &str) -> ForgeCommit {
        ForgeCommit {
            sha: sha.into(),
            message: message.into(),
        }
    }

    #[test]
    fn classifies_commit_messages() {
        assert_eq!(
            pr_number_from_message(
                "Merge pull request #6130 from lolatravel/feature/PLAT-337\n\nPLAT-337 bugsnag logconfig fix"
            ),
            Some(6130)
        );
        assert_eq!(
            pr_number_from_message("[ST-671] post waiver to slack not task (#6128)"),
            Some(6128)
        );
        assert_eq!(
            pr_number_from_message(
                "[FLY-342] Add birthmonth node on traveler profile (#6126)\n\n* added birthmonth field\n\n* blackened files"
            ),
            Some(6126)
        );
        assert_eq!(
            pr_number_from_message(
                "PLAT-337 bugsnag logconfig fix\n\nIf bugsnag was turned on, the log config would crash"
            ),
            None
        );
    }

    #[test]
    fn only_first_line_is_classified() {
        // a squash reference on a later line is not a pull request subject
        assert_eq!(
            pr_number_from_message("Fix typo\n\nfollow up to (#6120)"),
            None
        );
        assert_eq!(pr_number_from_message("Merge pull request from nowhere"), None);
        assert_eq!(pr_number_from_message(""), None);
    }

    #[tokio::test]
    async fn maps_commits_to_pull_requests() {
        let mut forge = MockForge::new();

        forge
            .expect_compare()
            .withf(|repo, previous, current| {
                repo == "lola-server" && previous == "c0c43ba" && current == "3cb7e43"
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![
                    commit("1", "[FLY-342] Add birthmonth node on traveler profile (#6126)\n\n* added birthmonth field"),
                    commit("2", "[ST-671] post waiver to slack not task (#6128)"),
                    commit("3", "PLAT-337 bugsnag logconfig fix\n\nblack formatting"),
                    commit("4", "Merge pull request #6130 from lolatravel/feature/PLAT-337\n\nPLAT-337 bugsnag logconfig fix"),
                ])
            });

        forge
            .expect_get_pull_request()
            .times(3)
            .returning(|_, number| {
                let (title, author) = match number {
                    6126 => ("[FLY-342] Add birthmonth node on traveler profile", "JKThanassi"),
                    6128 => ("[ST-671] post waiver to slack not task", "maxvoltage"),
                    6130 => ("PLAT-337 bugsnag logconfig fix", "mmcmahon"),
                    _ => unreachable!("unexpected pull request {number}"),
                };
                Ok(PullRequestInfo {
                    id: number.to_string(),
                    title: title.into(),
                    author: author.into(),
                })
            });

        let prs = get_commits_between(&forge, "lola-server", "3cb7e43", "c0c43ba")
            .await
            .unwrap();

        let ids: Vec<&str> = prs.iter().map(|pr| pr.id.as_str()).collect();
        assert_eq!(ids, vec!["6126", "6128", "6130"]);
        assert_eq!(prs[2].author, "mmcmahon");
    }

    #[tokio::test]
    async fn failed_pull_request_fails_range() {
        let mut forge = MockForge::new();

        forge.expect_compare().returning(|_, _, _| {
            Ok(vec![commit("1", "HIIT-70 Post savings to #savings channel (#6155)")])
        });
        forge
            .expect_get_pull_request()
            .returning(|_, _| Err(ReleaseNotesError::upstream("404 Not Found")));

        let result = get_commits_between(&forge, "lola-server", "8fb51f8", "74d5a0d").await;

        assert!(matches!(result, Err(ReleaseNotesError::UpstreamFetch(_))));
    }
}
