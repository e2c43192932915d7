//! Hashtag comment bot
//!
//! Looks up a hashtag, pulls its recent media, ranks them by likes and
//! drops a comment under the top posts.

use crate::{
    Error, Result,
    types::{
        CommentOutcome, HashtagCommentsResponse,
        wire::{HashtagMedia, HashtagSearchResponse, ObjectId, RecentMediaResponse},
    },
};
use tracing::{debug, info, warn};

use super::{GraphClient, PageCredentials};

/// Graph version pinned for the hashtag search and recent media edges
const HASHTAG_GRAPH_VERSION: &str = "v22.0";

/// Fields requested for each recent media object
const RECENT_MEDIA_FIELDS: &str = "id,caption,like_count,permalink,media_type";

/// Sort media by like count, most liked first, and keep the top `limit`
fn top_by_likes(mut media: Vec<HashtagMedia>, limit: usize) -> Vec<HashtagMedia> {
    media.sort_by(|a, b| b.like_count.cmp(&a.like_count));
    media.truncate(limit);
    media
}

impl GraphClient {
    /// Comment on the most liked recent media of a hashtag.
    ///
    /// Individual comment failures are counted rather than fatal, so a
    /// restricted media object does not stop the rest of the run. A
    /// hashtag with no recent media yields an empty result.
    pub async fn ig_hashtag_comments(
        &self,
        credentials: &PageCredentials,
        hashtag: &str,
        message: &str,
        limit: usize,
    ) -> Result<HashtagCommentsResponse> {
        info!("Commenting on top media for hashtag '{}'", hashtag);
        let session = self.acquire_instagram_session(credentials).await?;

        let search: HashtagSearchResponse = self
            .get(
                &format!("{}/ig_hashtag_search", HASHTAG_GRAPH_VERSION),
                &[
                    ("user_id", session.account_id.as_str()),
                    ("q", hashtag),
                    ("access_token", &session.page_token),
                ],
            )
            .await?;

        let hashtag_id = match search.data.into_iter().next() {
            Some(result) => result.id,
            None => return Err(Error::hashtag_not_found(hashtag)),
        };
        debug!("Resolved hashtag '{}' to id {}", hashtag, hashtag_id);

        let recent: RecentMediaResponse = self
            .get(
                &format!("{}/{}/recent_media", HASHTAG_GRAPH_VERSION, hashtag_id),
                &[
                    ("user_id", session.account_id.as_str()),
                    ("fields", RECENT_MEDIA_FIELDS),
                    ("access_token", &session.page_token),
                ],
            )
            .await?;

        if recent.data.is_empty() {
            warn!("No recent media found for hashtag '{}'", hashtag);
            return Ok(HashtagCommentsResponse::new(hashtag_id, Vec::new(), 0));
        }

        let top_media = top_by_likes(recent.data, limit);
        let mut comments = Vec::new();
        let mut failed = 0u32;

        for media in top_media {
            debug!(
                "Commenting on media {} ({} likes)",
                media.id, media.like_count
            );

            let result: Result<ObjectId> = self
                .post_query(
                    &format!("{}/comments", media.id),
                    &[
                        ("message", message),
                        ("access_token", &session.page_token),
                    ],
                )
                .await;

            match result {
                Ok(comment) => comments.push(CommentOutcome {
                    media_id: media.id,
                    comment_id: comment.id,
                    permalink: media.permalink,
                }),
                Err(e) => {
                    warn!("Failed to comment on media {}: {}", media.id, e);
                    failed += 1;
                }
            }
        }

        info!(
            "Posted {} comment(s) for hashtag '{}', {} failed",
            comments.len(),
            hashtag,
            failed
        );
        Ok(HashtagCommentsResponse::new(hashtag_id, comments, failed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(id: &str, likes: u64) -> HashtagMedia {
        HashtagMedia {
            id: id.to_string(),
            caption: None,
            like_count: likes,
            permalink: String::new(),
            media_type: Some("IMAGE".to_string()),
        }
    }

    #[test]
    fn test_top_by_likes_sorts_descending() {
        let ranked = top_by_likes(vec![media("a", 3), media("b", 9), media("c", 5)], 5);
        let ids: Vec<&str> = ranked.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_top_by_likes_truncates_to_limit() {
        let ranked = top_by_likes(
            vec![media("a", 1), media("b", 2), media("c", 3), media("d", 4)],
            2,
        );
        let ids: Vec<&str> = ranked.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "c"]);
    }

    #[test]
    fn test_top_by_likes_keeps_all_when_fewer_than_limit() {
        let ranked = top_by_likes(vec![media("a", 1)], 5);
        assert_eq!(ranked.len(), 1);
    }
}
