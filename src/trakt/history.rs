use super::{TraktClient, user_path};
use crate::{Res, types::HistoryItem};

/// Page size used when walking the whole history.
pub const PAGE_SIZE: u32 = 100;

impl TraktClient {
    /// One page of watch history, newest first.
    ///
    /// `GET /users/{user}/history?limit={limit}&page={page}`
    pub async fn get_history(&self, user: &str, limit: u32, page: u32) -> Res<Vec<HistoryItem>> {
        self.fetch_history(user, limit, page, false).await
    }

    /// Same as [`get_history`](Self::get_history) with full show, episode
    /// and movie metadata.
    pub async fn get_history_extended(
        &self,
        user: &str,
        limit: u32,
        page: u32,
    ) -> Res<Vec<HistoryItem>> {
        self.fetch_history(user, limit, page, true).await
    }

    /// Every history item of `user`, in API order.
    ///
    /// Pages 1, 2, 3, ... of [`PAGE_SIZE`] items are requested until one
    /// comes back empty. The first error aborts the walk. There is no guard
    /// against an API that never returns an empty page.
    pub async fn get_all_history(&self, user: &str) -> Res<Vec<HistoryItem>> {
        self.get_all_history_with(user, |_, _| {}).await
    }

    /// [`get_all_history`](Self::get_all_history) reporting
    /// `(page, items so far)` after every non-empty page.
    pub async fn get_all_history_with<F>(&self, user: &str, mut on_page: F) -> Res<Vec<HistoryItem>>
    where
        F: FnMut(u32, usize),
    {
        let mut all_history = Vec::new();
        let mut page = 1;

        loop {
            let items = self.get_history(user, PAGE_SIZE, page).await?;
            if items.is_empty() {
                break;
            }

            all_history.extend(items);
            on_page(page, all_history.len());
            page += 1;
        }

        tracing::debug!(user, pages = page, items = all_history.len(), "history walked");
        Ok(all_history)
    }

    async fn fetch_history(
        &self,
        user: &str,
        limit: u32,
        page: u32,
        extended: bool,
    ) -> Res<Vec<HistoryItem>> {
        let mut path = user_path(user, &format!("/history?limit={limit}&page={page}"));
        if extended {
            path.push_str("&extended=full");
        }
        self.execute(self.get(&path)).await
    }
}
