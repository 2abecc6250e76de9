use super::{TraktClient, user_path};
use crate::{
    Res,
    types::{Stats, UserProfile},
};

impl TraktClient {
    /// Watch counters of `user`.
    ///
    /// `GET /users/{user}/stats`. Only the movie, show and episode counters
    /// are decoded; the other sections of the answer are ignored.
    pub async fn get_stats(&self, user: &str) -> Res<Stats> {
        let path = user_path(user, "/stats");
        self.execute(self.get(&path)).await
    }

    /// Public profile of `user`.
    ///
    /// `GET /users/{user}?extended=full`
    pub async fn get_profile(&self, user: &str) -> Res<UserProfile> {
        let path = user_path(user, "?extended=full");
        self.execute(self.get(&path)).await
    }
}
