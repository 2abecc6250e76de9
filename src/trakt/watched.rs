use super::{TraktClient, user_path};
use crate::{
    Res,
    types::{Show, WatchedItem},
};

impl TraktClient {
    /// Shows `user` has played, with `aired_episodes` backfilled.
    ///
    /// `GET /users/{user}/watched/shows`
    ///
    /// Items whose aired count is missing or implausible get one
    /// [`get_show_details`](Self::get_show_details) call each, in order. A
    /// failing lookup is logged and leaves that item as the API returned it.
    pub async fn get_watched(&self, user: &str) -> Res<Vec<WatchedItem>> {
        let path = user_path(user, "/watched/shows");
        let mut watched: Vec<WatchedItem> = self.execute(self.get(&path)).await?;

        for item in watched.iter_mut().filter(|item| item.aired_episodes_suspect()) {
            let Some(trakt_id) = item.show.trakt_id() else {
                tracing::warn!(title = %item.show.title, "show has no trakt id, keeping aired count");
                continue;
            };

            match self.get_show_details(trakt_id).await {
                Ok(details) => {
                    if let Some(aired) = details.aired_episodes {
                        item.show.aired_episodes = Some(aired);
                    }
                }
                Err(e) => {
                    tracing::warn!(trakt_id, title = %item.show.title, error = %e, "show details lookup failed");
                }
            }
        }

        Ok(watched)
    }

    /// Full metadata for one show, including `aired_episodes`.
    ///
    /// `GET /shows/{id}?extended=full`
    pub async fn get_show_details(&self, trakt_id: u64) -> Res<Show> {
        let path = format!("/shows/{trakt_id}?extended=full");
        self.execute(self.get(&path)).await
    }
}
