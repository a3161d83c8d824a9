use std::collections::BTreeMap;

use serde::Serialize;

use crate::records::{Account, Activity};

/// Per-user totals merged from comments and contributor statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStat {
    pub id: u64,
    pub user_name: String,
    pub comments_count: u64,
    pub commits_count: u64,
}

impl UserStat {
    fn new(account: &Account) -> Self {
        Self {
            id: account.id,
            user_name: account.login.clone(),
            comments_count: 0,
            commits_count: 0,
        }
    }
}

/// Merge comment and contributor records into one ranked list.
///
/// Comments are walked first, then contributor stats. A contribution sets
/// `commits_count` (last one wins); a comment adds one to `comments_count`.
/// The result is ordered by comments, then commits, both descending; remaining
/// ties stay in ascending id order.
pub fn aggregate(comments: &[Activity], contributors: &[Activity]) -> Vec<UserStat> {
    let mut by_id: BTreeMap<u64, UserStat> = BTreeMap::new();

    for activity in comments.iter().chain(contributors) {
        match activity {
            Activity::Contribution { author, total } => {
                by_id
                    .entry(author.id)
                    .or_insert_with(|| UserStat::new(author))
                    .commits_count = *total;
            }
            Activity::Comment { user } => {
                by_id
                    .entry(user.id)
                    .or_insert_with(|| UserStat::new(user))
                    .comments_count += 1;
            }
        }
    }

    let mut ranked: Vec<UserStat> = by_id.into_values().collect();
    ranked.sort_by(|a, b| {
        b.comments_count
            .cmp(&a.comments_count)
            .then(b.commits_count.cmp(&a.commits_count))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn account(id: u64, login: &str) -> Account {
        Account {
            id,
            login: login.to_string(),
        }
    }

    fn comment(id: u64, login: &str) -> Activity {
        Activity::Comment {
            user: account(id, login),
        }
    }

    fn contribution(id: u64, login: &str, total: u64) -> Activity {
        Activity::Contribution {
            author: account(id, login),
            total,
        }
    }

    fn stat(id: u64, name: &str, comments: u64, commits: u64) -> UserStat {
        UserStat {
            id,
            user_name: name.to_string(),
            comments_count: comments,
            commits_count: commits,
        }
    }

    #[test]
    fn merges_comments_and_commits() {
        let comments = vec![comment(1, "a"), comment(1, "a"), comment(2, "b")];
        let contributors = vec![contribution(1, "a", 5)];

        assert_eq!(
            aggregate(&comments, &contributors),
            vec![stat(1, "a", 2, 5), stat(2, "b", 1, 0)]
        );
    }

    #[test]
    fn empty_inputs_give_empty_output() {
        assert!(aggregate(&[], &[]).is_empty());
    }

    #[test]
    fn contributor_only_users_are_listed() {
        let contributors = vec![contribution(9, "solo", 3)];
        assert_eq!(aggregate(&[], &contributors), vec![stat(9, "solo", 0, 3)]);
    }

    #[test]
    fn commits_are_assigned_not_summed() {
        let contributors = vec![contribution(4, "d", 10), contribution(4, "d", 2)];
        assert_eq!(aggregate(&[], &contributors), vec![stat(4, "d", 0, 2)]);
    }

    #[test]
    fn first_login_seen_names_the_user() {
        let comments = vec![comment(5, "old-name")];
        let contributors = vec![contribution(5, "new-name", 1)];

        let ranked = aggregate(&comments, &contributors);
        assert_eq!(ranked[0].user_name, "old-name");
    }

    #[test]
    fn commits_break_comment_ties() {
        let comments = vec![comment(1, "a"), comment(2, "b"), comment(3, "c")];
        let contributors = vec![contribution(1, "a", 1), contribution(3, "c", 8)];

        let ids: Vec<u64> = aggregate(&comments, &contributors)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn full_ties_keep_ascending_id() {
        let comments = vec![comment(30, "z"), comment(10, "x"), comment(20, "y")];

        let ids: Vec<u64> = aggregate(&comments, &[]).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn output_is_sorted_and_unique() {
        let comments: Vec<Activity> = (0..40u64)
            .map(|i| comment(i % 7, &format!("user{}", i % 7)))
            .collect();
        let contributors: Vec<Activity> = (0..10u64)
            .map(|i| contribution(i, &format!("user{i}"), i * 3 % 5))
            .collect();

        let ranked = aggregate(&comments, &contributors);

        let mut ids: Vec<u64> = ranked.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, (0..10).collect::<Vec<_>>());

        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.comments_count > b.comments_count
                    || (a.comments_count == b.comments_count
                        && a.commits_count >= b.commits_count)
            );
        }

        let total_comments: u64 = ranked.iter().map(|s| s.comments_count).sum();
        assert_eq!(total_comments, 40);
    }

    #[test]
    fn aggregation_is_repeatable() {
        let comments = vec![comment(2, "b"), comment(1, "a")];
        let contributors = vec![contribution(2, "b", 7)];

        assert_eq!(
            aggregate(&comments, &contributors),
            aggregate(&comments, &contributors)
        );
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(stat(1, "a", 2, 5)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "userName": "a",
                "commentsCount": 2,
                "commitsCount": 5
            })
        );
    }
}
