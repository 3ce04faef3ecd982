//! Tests for the tracks client against a mock backend.
//!
//! These tests use mock servers to verify request shapes and status mapping
//! without requiring a real backend.

use serde_json::json;
use tracklist_client::{ClientError, ServerSettings, TracksClient};
use tracklist_core::{
    AudioUpload, QueryParams, SortField, SortOrder, SyncError, TrackDraft, TrackId, TracksApi,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Helpers
// =============================================================================

fn track_json(id: &str, title: &str, artist: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "artist": artist,
        "album": "",
        "genres": ["Rock"],
        "slug": title.to_lowercase(),
        "coverImage": "",
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z"
    })
}

async fn client_for(server: &MockServer) -> TracksClient {
    TracksClient::new(&ServerSettings::new(server.uri())).unwrap()
}

// =============================================================================
// Listing Tests
// =============================================================================

mod listing {
    use super::*;

    #[tokio::test]
    async fn test_list_sends_query_and_parses_page() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "5"))
            .and(query_param("sort", "createdAt"))
            .and(query_param("order", "desc"))
            .and(query_param("search", "love"))
            .and(query_param("genre", "Pop"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [track_json("t1", "Love Song", "Adele")],
                "meta": { "total": 6, "page": 2, "limit": 5, "totalPages": 2 }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let query = QueryParams {
            page: 2,
            search: "love".to_string(),
            sort: SortField::CreatedAt,
            order: SortOrder::Desc,
            genre: Some("Pop".to_string()),
            artist: None,
        };

        let page = client.list_tracks(&query, 5).await.unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, TrackId::new("t1"));
        assert_eq!(page.meta.total, 6);
        assert_eq!(page.meta.total_pages, 2);
        assert!(!page.meta.has_next());
        assert!(page.meta.has_previous());
    }

    #[tokio::test]
    async fn test_list_server_error_maps_to_unexpected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let result = client.list_tracks(&QueryParams::default(), 10).await;

        match result.unwrap_err() {
            ClientError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("Internal"));
            }
            e => panic!("Expected ServerError, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_list_garbage_body_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err: SyncError = TracksApi::list_tracks(&client, &QueryParams::default(), 10)
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Unexpected(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_failure() {
        // Port 9 (discard) is closed on test machines
        let client = TracksClient::new(&ServerSettings::new("http://127.0.0.1:9")).unwrap();

        let err = TracksApi::list_genres(&client).await.unwrap_err();
        assert!(matches!(err, SyncError::Network(_)), "got {:?}", err);
    }
}

// =============================================================================
// Mutation Tests
// =============================================================================

mod mutations {
    use super::*;

    #[tokio::test]
    async fn test_create_posts_camel_case_draft() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/tracks"))
            .and(body_json(json!({
                "title": "New",
                "artist": "Someone",
                "genres": ["Rock"],
                "coverImage": "https://img.example.com/c.png"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(track_json("srv-1", "New", "Someone")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let mut draft = TrackDraft::new("New", "Someone", "Rock");
        draft.cover_image = Some("https://img.example.com/c.png".to_string());

        let track = client.create_track(&draft).await.unwrap();
        assert_eq!(track.id, TrackId::new("srv-1"));
    }

    #[tokio::test]
    async fn test_create_validation_error_carries_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/tracks"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Bad Request",
                "message": "Track with this title already exists",
                "errors": { "title": "duplicate" }
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = TracksApi::create_track(&client, &TrackDraft::new("Dup", "A", "Rock"))
            .await
            .unwrap_err();

        match err {
            SyncError::Validation { message, fields } => {
                assert_eq!(message, "Track with this title already exists");
                assert_eq!(fields.get("title").map(String::as_str), Some("duplicate"));
            }
            e => panic!("Expected Validation, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_update_puts_to_track_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/tracks/t9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(track_json("t9", "Renamed", "A")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let track = client
            .update_track(&TrackId::new("t9"), &TrackDraft::new("Renamed", "A", "Rock"))
            .await
            .unwrap();
        assert_eq!(track.title, "Renamed");
    }

    #[tokio::test]
    async fn test_delete_missing_track_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/tracks/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Track not found" })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = TracksApi::delete_track(&client, &TrackId::new("gone"))
            .await
            .unwrap_err();

        assert_eq!(err, SyncError::not_found("gone"));
    }

    #[tokio::test]
    async fn test_delete_no_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/tracks/t1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        assert!(client.delete_track(&TrackId::new("t1")).await.is_ok());
    }

    #[tokio::test]
    async fn test_bulk_delete_partition() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/tracks/delete"))
            .and(body_json(json!({ "ids": ["a", "b", "c"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": ["a", "c"],
                "failed": ["b"]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let ids = vec![TrackId::new("a"), TrackId::new("b"), TrackId::new("c")];
        let result = client.delete_tracks(&ids).await.unwrap();

        assert_eq!(result.success, vec![TrackId::new("a"), TrackId::new("c")]);
        assert_eq!(result.failed, vec![TrackId::new("b")]);
    }

    #[tokio::test]
    async fn test_provisional_id_never_hits_the_wire() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = TracksApi::delete_track(&client, &TrackId::provisional())
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::InvalidInput(_)));
    }
}

// =============================================================================
// Audio File Tests
// =============================================================================

mod audio_files {
    use super::*;

    #[tokio::test]
    async fn test_upload_returns_updated_track() {
        let mock_server = MockServer::start().await;

        let mut body = track_json("t1", "Song", "A");
        body["audioFile"] = json!("t1.mp3");

        Mock::given(method("POST"))
            .and(path("/api/tracks/t1/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let upload = AudioUpload::new("song.mp3", vec![0xFF, 0xFB, 0x90, 0x00]);
        let track = client.upload_audio(&TrackId::new("t1"), &upload).await.unwrap();

        assert_eq!(track.audio_file.as_deref(), Some("t1.mp3"));
        assert!(client.audio_url(&track).unwrap().as_str().ends_with("/api/files/t1.mp3"));
    }

    #[tokio::test]
    async fn test_upload_too_large_is_validation() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/tracks/t1/upload"))
            .respond_with(ResponseTemplate::new(413))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let upload = AudioUpload::new("song.wav", vec![0; 16]);
        let err = client
            .upload_audio(&TrackId::new("t1"), &upload)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_file_clears_reference() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/tracks/t1/file"))
            .respond_with(ResponseTemplate::new(200).set_body_json(track_json("t1", "Song", "A")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let track = client.delete_audio(&TrackId::new("t1")).await.unwrap();
        assert!(!track.has_audio());
    }
}

// =============================================================================
// Genre Tests
// =============================================================================

mod genres {
    use super::*;

    #[tokio::test]
    async fn test_list_genres() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/genres"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Jazz", "Rock"])))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let genres = client.list_genres().await.unwrap();
        assert_eq!(genres, vec!["Jazz".to_string(), "Rock".to_string()]);
    }
}
