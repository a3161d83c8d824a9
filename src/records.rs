use serde::Deserialize;

/// The `user` / `author` object GitHub attaches to comments and contributor stats.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub id: u64,
    pub login: String,
}

/// One element of `GET /repos/{repo}/comments`.
///
/// `user` is `null` for comments left by deleted accounts.
#[derive(Debug, Deserialize)]
pub struct CommentRecord {
    pub user: Option<Account>,
}

/// One element of `GET /repos/{repo}/stats/contributors`.
#[derive(Debug, Deserialize)]
pub struct ContributorStat {
    pub author: Option<Account>,
    #[serde(default)]
    pub total: u64,
}

/// A record the aggregator knows how to count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    Comment { user: Account },
    Contribution { author: Account, total: u64 },
}

impl CommentRecord {
    pub fn into_activity(self) -> Option<Activity> {
        self.user.map(|user| Activity::Comment { user })
    }
}

impl ContributorStat {
    pub fn into_activity(self) -> Option<Activity> {
        let total = self.total;
        self.author
            .map(|author| Activity::Contribution { author, total })
    }
}
