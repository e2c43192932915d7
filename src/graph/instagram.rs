//! Instagram publishing operations
//!
//! All operations run against the Instagram Business Account linked to
//! the configured page, using the container-then-publish flow: create a
//! media container, wait for it if it needs processing, then publish it.

use crate::{
    Error, Result,
    types::{
        CarouselPublishResponse, MediaPublishResponse, PostItem, ReelPublishResponse,
        wire::{MediaStatus, ObjectId},
    },
};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{GraphClient, PageCredentials};

/// Graph version pinned for the reel container and publish calls
const IG_REELS_GRAPH_VERSION: &str = "v20.0";

/// Single image container
#[derive(Debug, Serialize)]
struct ImageContainer<'a> {
    image_url: &'a str,
    caption: &'a str,
    access_token: &'a str,
}

/// One item of a carousel container
#[derive(Debug, Serialize)]
struct CarouselItem<'a> {
    image_url: &'a str,
    is_carousel_item: &'a str,
    access_token: &'a str,
}

/// Carousel container referencing its item containers
#[derive(Debug, Serialize)]
struct CarouselContainer<'a> {
    media_type: &'a str,
    children: &'a str,
    caption: &'a str,
    access_token: &'a str,
}

/// Reel container created from a hosted video URL
#[derive(Debug, Serialize)]
struct ReelContainer<'a> {
    video_url: &'a str,
    caption: &'a str,
    media_type: &'a str,
    share_to_feed: &'a str,
    access_token: &'a str,
}

/// Publish request for a finished container
#[derive(Debug, Serialize)]
struct MediaPublish<'a> {
    creation_id: &'a str,
    access_token: &'a str,
}

impl GraphClient {
    /// Publish a single image to the Instagram account.
    pub async fn ig_post_image(
        &self,
        credentials: &PageCredentials,
        image_url: &str,
        caption: &str,
    ) -> Result<MediaPublishResponse> {
        info!("Posting image to Instagram");
        let session = self.acquire_instagram_session(credentials).await?;

        let container = ImageContainer {
            image_url,
            caption,
            access_token: &session.page_token,
        };
        let creation: ObjectId = self
            .post_form(&format!("{}/media", session.account_id), &container)
            .await?;
        debug!("Created media container {}", creation.id);

        let publish = MediaPublish {
            creation_id: &creation.id,
            access_token: &session.page_token,
        };
        let media: ObjectId = self
            .post_form(&format!("{}/media_publish", session.account_id), &publish)
            .await?;

        info!("Published Instagram media {}", media.id);
        Ok(MediaPublishResponse::new(creation.id, media.id))
    }

    /// Publish an image carousel to the Instagram account.
    ///
    /// Item containers that fail to create are skipped with a warning,
    /// but a carousel where nothing uploaded is an error. The caption
    /// comes from the first item.
    pub async fn ig_post_carousel(
        &self,
        credentials: &PageCredentials,
        posts: &[PostItem],
    ) -> Result<CarouselPublishResponse> {
        info!("Posting {} item carousel to Instagram", posts.len());
        let session = self.acquire_instagram_session(credentials).await?;

        let mut children = Vec::new();
        let mut skipped = 0u32;

        for post in posts {
            let item = CarouselItem {
                image_url: &post.image_url,
                is_carousel_item: "true",
                access_token: &session.page_token,
            };

            let upload: Result<ObjectId> = self
                .post_form(&format!("{}/media", session.account_id), &item)
                .await;

            match upload {
                Ok(container) => {
                    debug!("Created carousel item {}", container.id);
                    children.push(container.id);
                }
                Err(e) => {
                    warn!("Skipping carousel item {}: {}", post.image_url, e);
                    skipped += 1;
                }
            }
        }

        if children.is_empty() {
            return Err(Error::media_upload(
                "carousel items",
                "no images were uploaded",
            ));
        }

        let caption = posts.first().map(|p| p.caption.as_str()).unwrap_or_default();
        let child_list = children.join(",");
        let container = CarouselContainer {
            media_type: "CAROUSEL",
            children: &child_list,
            caption,
            access_token: &session.page_token,
        };
        let carousel: ObjectId = self
            .post_form(&format!("{}/media", session.account_id), &container)
            .await?;
        debug!("Created carousel container {}", carousel.id);

        let publish = MediaPublish {
            creation_id: &carousel.id,
            access_token: &session.page_token,
        };
        let media: ObjectId = self
            .post_form(&format!("{}/media_publish", session.account_id), &publish)
            .await?;

        info!(
            "Published Instagram carousel {} with {} item(s), {} skipped",
            media.id,
            children.len(),
            skipped
        );
        Ok(CarouselPublishResponse::new(
            carousel.id,
            media.id,
            children,
            skipped,
        ))
    }

    /// Upload and publish a reel on the Instagram account.
    ///
    /// The video is ingested server side from `video_url`, so the
    /// container needs processing time before it can be published. The
    /// container status is polled until it reports `FINISHED`.
    pub async fn ig_upload_reel(
        &self,
        credentials: &PageCredentials,
        video_url: &str,
        caption: &str,
    ) -> Result<ReelPublishResponse> {
        info!("Uploading reel to Instagram");
        let session = self.acquire_instagram_session(credentials).await?;

        let container = ReelContainer {
            video_url,
            caption,
            media_type: "REELS",
            share_to_feed: "true",
            access_token: &session.page_token,
        };
        let creation: ObjectId = self
            .post_form(
                &format!("{}/{}/media", IG_REELS_GRAPH_VERSION, session.account_id),
                &container,
            )
            .await?;
        debug!("Created reel container {}", creation.id);

        let attempts = self
            .wait_for_media_ready(&creation.id, &session.page_token)
            .await?;

        let publish = MediaPublish {
            creation_id: &creation.id,
            access_token: &session.page_token,
        };
        let media: ObjectId = self
            .post_form(
                &format!(
                    "{}/{}/media_publish",
                    IG_REELS_GRAPH_VERSION, session.account_id
                ),
                &publish,
            )
            .await?;

        info!(
            "Published Instagram reel {} after {} status probe(s)",
            media.id, attempts
        );
        Ok(ReelPublishResponse::new(creation.id, media.id, attempts))
    }

    /// Poll a media container until it reports `FINISHED`.
    ///
    /// Sleeps before each probe since a container is never ready the
    /// instant it is created. Returns how many probes ran.
    async fn wait_for_media_ready(&self, creation_id: &str, page_token: &str) -> Result<u32> {
        for attempt in 1..=self.status_poll_attempts() {
            tokio::time::sleep(self.status_poll_interval()).await;

            let status: MediaStatus = self
                .get(
                    creation_id,
                    &[
                        ("fields", "status_code,status"),
                        ("access_token", page_token),
                    ],
                )
                .await?;

            let code = status.status_code.as_deref().unwrap_or("UNKNOWN");
            debug!(
                "Status probe {}/{} for {}: {}",
                attempt,
                self.status_poll_attempts(),
                creation_id,
                code
            );

            match code {
                "FINISHED" => return Ok(attempt),
                "ERROR" => {
                    let detail = status
                        .status
                        .unwrap_or_else(|| "no status detail".to_string());
                    return Err(Error::processing(creation_id, detail));
                }
                _ => {}
            }
        }

        Err(Error::processing_timeout(
            creation_id,
            self.status_poll_attempts(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carousel_container_wire_shape() {
        let container = CarouselContainer {
            media_type: "CAROUSEL",
            children: "111,222",
            caption: "Weekend shots",
            access_token: "token",
        };
        let json = serde_json::to_value(&container).unwrap();
        assert_eq!(json["media_type"], "CAROUSEL");
        assert_eq!(json["children"], "111,222");
    }

    #[test]
    fn test_carousel_item_flag_is_string() {
        let item = CarouselItem {
            image_url: "https://cdn.example.com/a.jpg",
            is_carousel_item: "true",
            access_token: "token",
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["is_carousel_item"], "true");
    }

    #[test]
    fn test_reel_container_shares_to_feed() {
        let container = ReelContainer {
            video_url: "https://cdn.example.com/v.mp4",
            caption: "",
            media_type: "REELS",
            share_to_feed: "true",
            access_token: "token",
        };
        let json = serde_json::to_value(&container).unwrap();
        assert_eq!(json["media_type"], "REELS");
        assert_eq!(json["share_to_feed"], "true");
    }
}
