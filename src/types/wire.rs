//! Wire types for Graph API payloads
//!
//! These structs mirror the JSON bodies the Graph API actually returns.
//! Fields the API omits depending on node type or error state are
//! modelled as `Option` so a partial payload never fails to decode.

use serde::{Deserialize, Serialize};

/// Response from the OAuth token exchange endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The exchanged access token
    pub access_token: Option<String>,

    /// Token type, usually "bearer"
    pub token_type: Option<String>,

    /// Seconds until the token expires, absent for non-expiring tokens
    pub expires_in: Option<u64>,
}

/// Page node fetched with `fields=access_token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageTokenResponse {
    /// The page access token
    pub access_token: Option<String>,

    /// Page id
    pub id: Option<String>,
}

/// Page node fetched with `fields=instagram_business_account`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstagramAccountResponse {
    /// Linked Instagram Business Account, absent when none is connected
    pub instagram_business_account: Option<InstagramBusinessAccount>,

    /// Page id
    pub id: Option<String>,
}

/// The Instagram Business Account node linked to a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstagramBusinessAccount {
    /// Instagram Business Account id
    pub id: String,
}

/// Generic `{"id": ...}` creation response
///
/// Photos, media containers, publishes and comments all come back in
/// this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectId {
    /// Id of the created object
    pub id: String,
}

/// Response from starting a resumable reel upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelUploadSession {
    /// Id of the video being created
    pub video_id: String,

    /// Upload endpoint for the video bytes
    pub upload_url: String,
}

/// Processing status of a media container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaStatus {
    /// Machine readable status, e.g. "FINISHED", "IN_PROGRESS", "ERROR"
    pub status_code: Option<String>,

    /// Human readable status detail
    pub status: Option<String>,
}

/// Response from the hashtag search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagSearchResponse {
    /// Matching hashtags, empty when the tag does not exist
    #[serde(default)]
    pub data: Vec<HashtagResult>,
}

/// One hashtag search match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagResult {
    /// Hashtag id
    pub id: String,
}

/// Response from the recent media edge of a hashtag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentMediaResponse {
    /// Recent media tagged with the hashtag
    #[serde(default)]
    pub data: Vec<HashtagMedia>,
}

/// One media object returned by the recent media edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagMedia {
    /// Media id
    pub id: String,

    /// Caption, absent for caption-less media
    pub caption: Option<String>,

    /// Like count, zero when the owner hides it
    #[serde(default)]
    pub like_count: u64,

    /// Permalink to the media
    #[serde(default)]
    pub permalink: String,

    /// Media type, e.g. "IMAGE", "VIDEO", "CAROUSEL_ALBUM"
    pub media_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_deserialization() {
        let json = r#"{"access_token":"EAAG-long","token_type":"bearer","expires_in":5183944}"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token.as_deref(), Some("EAAG-long"));
        assert_eq!(response.expires_in, Some(5183944));
    }

    #[test]
    fn test_token_response_without_expiry() {
        let json = r#"{"access_token":"EAAG-page"}"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token.as_deref(), Some("EAAG-page"));
        assert!(response.expires_in.is_none());
    }

    #[test]
    fn test_instagram_account_response_missing_link() {
        let json = r#"{"id":"1234567890"}"#;
        let response: InstagramAccountResponse = serde_json::from_str(json).unwrap();
        assert!(response.instagram_business_account.is_none());
        assert_eq!(response.id.as_deref(), Some("1234567890"));
    }

    #[test]
    fn test_instagram_account_response_with_link() {
        let json = r#"{"instagram_business_account":{"id":"178414"},"id":"1234567890"}"#;
        let response: InstagramAccountResponse = serde_json::from_str(json).unwrap();
        let account = response.instagram_business_account.unwrap();
        assert_eq!(account.id, "178414");
    }

    #[test]
    fn test_reel_upload_session_deserialization() {
        let json = r#"{"video_id":"v-1","upload_url":"https://rupload.facebook.com/video-upload/v22.0/v-1"}"#;
        let session: ReelUploadSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.video_id, "v-1");
        assert!(session.upload_url.starts_with("https://rupload"));
    }

    #[test]
    fn test_media_status_partial_payload() {
        let json = r#"{"status_code":"IN_PROGRESS"}"#;
        let status: MediaStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.status_code.as_deref(), Some("IN_PROGRESS"));
        assert!(status.status.is_none());
    }

    #[test]
    fn test_hashtag_search_empty_data() {
        let json = r#"{"data":[]}"#;
        let response: HashtagSearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.data.is_empty());
    }

    #[test]
    fn test_hashtag_media_defaults() {
        let json = r#"{"id":"m-1","media_type":"IMAGE"}"#;
        let media: HashtagMedia = serde_json::from_str(json).unwrap();
        assert_eq!(media.id, "m-1");
        assert_eq!(media.like_count, 0);
        assert!(media.permalink.is_empty());
        assert!(media.caption.is_none());
    }

    #[test]
    fn test_recent_media_sorted_by_likes() {
        let json = r#"{"data":[
            {"id":"a","like_count":3},
            {"id":"b","like_count":9},
            {"id":"c","like_count":5}
        ]}"#;
        let mut response: RecentMediaResponse = serde_json::from_str(json).unwrap();
        response.data.sort_by(|x, y| y.like_count.cmp(&x.like_count));
        let ids: Vec<&str> = response.data.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }
}
