//! Facebook page publishing operations

use crate::{
    Error, Result,
    types::{
        FeedPostResponse, PostItem, ReelUploadResponse,
        wire::{ObjectId, ReelUploadSession},
    },
};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{GraphClient, PageCredentials};

/// Graph version pinned for the resumable reel upload flow
const REELS_GRAPH_VERSION: &str = "v22.0";

/// Unpublished photo upload
#[derive(Debug, Serialize)]
struct PhotoUpload<'a> {
    url: &'a str,
    published: &'a str,
    access_token: &'a str,
}

/// One attachment reference in a feed post
#[derive(Debug, Serialize)]
struct AttachedMedia<'a> {
    media_fbid: &'a str,
}

/// Start phase of a resumable reel upload
#[derive(Debug, Serialize)]
struct ReelStart<'a> {
    upload_phase: &'a str,
    access_token: &'a str,
}

/// Finish phase of a resumable reel upload
#[derive(Debug, Serialize)]
struct ReelFinish<'a> {
    upload_phase: &'a str,
    video_id: &'a str,
    access_token: &'a str,
    video_state: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl GraphClient {
    /// Publish a multi-image post to the page feed.
    ///
    /// Each image is first uploaded unpublished, then a single feed post
    /// attaches every photo that made it. Failed uploads are skipped so
    /// one bad URL does not sink the batch, but a batch where nothing
    /// uploaded is an error. The post message comes from the first
    /// item's caption.
    pub async fn fb_post_images(
        &self,
        credentials: &PageCredentials,
        posts: &[PostItem],
    ) -> Result<FeedPostResponse> {
        info!("Posting {} image(s) to page feed", posts.len());
        let page_token = self.acquire_page_token(credentials).await?;

        let mut media_fbids = Vec::new();
        let mut skipped = 0u32;

        for post in posts {
            let payload = PhotoUpload {
                url: &post.image_url,
                published: "false",
                access_token: &page_token,
            };

            let upload: Result<ObjectId> = self
                .post_form(&format!("{}/photos", credentials.page_id), &payload)
                .await;

            match upload {
                Ok(photo) => {
                    debug!("Uploaded photo {}", photo.id);
                    media_fbids.push(photo.id);
                }
                Err(e) => {
                    warn!("Skipping image {}: {}", post.image_url, e);
                    skipped += 1;
                }
            }
        }

        if media_fbids.is_empty() {
            return Err(Error::media_upload("photos", "no images were uploaded"));
        }

        let message = posts.first().map(|p| p.caption.as_str()).unwrap_or_default();

        let mut form: Vec<(String, String)> = vec![
            ("message".to_string(), message.to_string()),
            ("access_token".to_string(), page_token),
        ];
        for (index, fbid) in media_fbids.iter().enumerate() {
            let attachment = serde_json::to_string(&AttachedMedia { media_fbid: fbid })?;
            form.push((format!("attached_media[{}]", index), attachment));
        }

        let post: ObjectId = self
            .post_form(&format!("{}/feed", credentials.page_id), &form)
            .await?;

        info!(
            "Published feed post {} with {} photo(s), {} skipped",
            post.id,
            media_fbids.len(),
            skipped
        );
        Ok(FeedPostResponse::new(post.id, media_fbids, skipped))
    }

    /// Upload and publish a reel on the page.
    ///
    /// Runs the three-phase resumable flow: start a session, push the
    /// video bytes to the returned upload URL, then finish with the
    /// published state. The source video is fetched from `video_url`
    /// and streamed up in one shot.
    pub async fn fb_upload_reel(
        &self,
        credentials: &PageCredentials,
        video_url: &str,
        caption: &str,
    ) -> Result<ReelUploadResponse> {
        info!("Uploading reel to page {}", credentials.page_id);
        let page_token = self.acquire_page_token(credentials).await?;

        let reels_path = format!(
            "{}/{}/video_reels",
            REELS_GRAPH_VERSION, credentials.page_id
        );

        let start = ReelStart {
            upload_phase: "start",
            access_token: &page_token,
        };
        let session: ReelUploadSession = self.post_json(&reels_path, &start).await?;
        debug!("Started reel upload session for video {}", session.video_id);

        let video_data = self.download(video_url).await?;
        self.upload_video(&session.upload_url, &page_token, video_data)
            .await?;

        let finish = ReelFinish {
            upload_phase: "finish",
            video_id: &session.video_id,
            access_token: &page_token,
            video_state: "PUBLISHED",
            description: (!caption.is_empty()).then_some(caption),
        };
        let finish_response: serde_json::Value = self.post_json(&reels_path, &finish).await?;
        debug!("Reel finish response: {}", finish_response);

        info!("Published reel {} to the page", session.video_id);
        Ok(ReelUploadResponse::new(session.video_id))
    }
}
