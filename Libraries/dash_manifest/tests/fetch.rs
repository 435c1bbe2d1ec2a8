use std::io::Write;
use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;
use dash_manifest::{analyze, fetch, Error, FetchError, FetchOptions, Source};
use tempfile::NamedTempFile;

const MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" type="static">
  <Period>
    <AdaptationSet contentType="audio" mimeType="audio/mp4" codecs="mp4a.40.2" lang="en">
      <AudioChannelConfiguration schemeIdUri="urn:mpeg:dash:23003:3:audio_channel_configuration:2011" value="2"/>
      <Representation id="audio" bandwidth="128000"/>
    </AdaptationSet>
  </Period>
</MPD>"#;

async fn serve() -> String {
    let router = Router::new()
        .route(
            "/manifest.mpd",
            get(|| async { ([(header::CONTENT_TYPE, "application/dash+xml")], MANIFEST) }),
        )
        .route(
            "/charset.mpd",
            get(|| async { ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], MANIFEST) }),
        )
        .route(
            "/page.html",
            get(|| async { ([(header::CONTENT_TYPE, "text/html")], "<html></html>") }),
        )
        .route(
            "/missing.mpd",
            get(|| async { (StatusCode::NOT_FOUND, "not found") }),
        )
        .route(
            "/empty.mpd",
            get(|| async { ([(header::CONTENT_TYPE, "text/xml")], "") }),
        )
        .route(
            "/slow.mpd",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                ([(header::CONTENT_TYPE, "application/dash+xml")], MANIFEST)
            }),
        )
        .route(
            "/broken.mpd",
            get(|| async { ([(header::CONTENT_TYPE, "application/dash+xml")], "<MPD><Period>") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

fn options() -> FetchOptions {
    FetchOptions {
        timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

fn remote(base: &str, path: &str) -> Source {
    Source::parse(&format!("{}{}", base, path)).unwrap()
}

#[tokio::test]
async fn fetches_dash_manifest() {
    let base = serve().await;
    let body = fetch(&remote(&base, "/manifest.mpd"), &options()).await.unwrap();
    assert_eq!(body, MANIFEST);
}

#[tokio::test]
async fn accepts_content_type_with_parameters() {
    let base = serve().await;
    assert!(fetch(&remote(&base, "/charset.mpd"), &options()).await.is_ok());
}

#[tokio::test]
async fn rejects_unexpected_content_type() {
    let base = serve().await;
    let err = fetch(&remote(&base, "/page.html"), &options()).await.unwrap_err();
    assert!(matches!(err, FetchError::UnacceptableContentType(ct) if ct == "text/html"));
}

#[tokio::test]
async fn rejects_non_success_status() {
    let base = serve().await;
    let err = fetch(&remote(&base, "/missing.mpd"), &options()).await.unwrap_err();
    assert!(matches!(err, FetchError::NonSuccessStatus(404)));
}

#[tokio::test]
async fn rejects_empty_body() {
    let base = serve().await;
    let err = fetch(&remote(&base, "/empty.mpd"), &options()).await.unwrap_err();
    assert!(matches!(err, FetchError::EmptyBody));
}

#[tokio::test]
async fn rejects_body_over_the_size_cap() {
    let base = serve().await;
    let options = FetchOptions {
        max_body_bytes: 64,
        ..options()
    };
    let err = fetch(&remote(&base, "/manifest.mpd"), &options).await.unwrap_err();
    assert!(matches!(err, FetchError::TooLarge { limit: 64, .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = Source::parse(&format!("http://{}/manifest.mpd", addr)).unwrap();
    let err = fetch(&source, &options()).await.unwrap_err();
    assert!(matches!(err, FetchError::NetworkError(_)));
}

#[tokio::test]
async fn slow_server_hits_the_request_timeout() {
    let base = serve().await;
    let options = FetchOptions {
        timeout: Duration::from_millis(200),
        ..options()
    };

    let started = std::time::Instant::now();
    let err = analyze(&remote(&base, "/slow.mpd"), &options).await.unwrap_err();
    assert!(err.is_timeout(), "{}", err);
    assert!(matches!(err, Error::Fetch(FetchError::NetworkError(_))));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn analyzes_remote_manifest() {
    let base = serve().await;
    let extraction = analyze(&remote(&base, "/manifest.mpd"), &options()).await.unwrap();
    assert!(extraction.summary.videos.is_empty());
    assert_eq!(extraction.summary.audios.len(), 1);
    assert_eq!(extraction.summary.audios[0].channels, "2");
    assert_eq!(extraction.summary.audios[0].bitrate, "128000");
}

#[tokio::test]
async fn malformed_remote_manifest_is_a_parse_error() {
    let base = serve().await;
    let err = analyze(&remote(&base, "/broken.mpd"), &options()).await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[tokio::test]
async fn reads_local_files() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(MANIFEST.as_bytes()).unwrap();

    let by_path = Source::parse(file.path().to_str().unwrap()).unwrap();
    assert_eq!(fetch(&by_path, &options()).await.unwrap(), MANIFEST);

    let by_url = Source::parse(&format!("file://{}", file.path().display())).unwrap();
    assert_eq!(by_url, by_path);
}

#[tokio::test]
async fn local_files_are_checked_like_responses() {
    let empty = NamedTempFile::new().unwrap();
    let err = fetch(&Source::File(empty.path().to_path_buf()), &options()).await.unwrap_err();
    assert!(matches!(err, FetchError::EmptyBody));

    let mut large = NamedTempFile::new().unwrap();
    large.write_all(MANIFEST.as_bytes()).unwrap();
    let options = FetchOptions {
        max_body_bytes: 16,
        ..options()
    };
    let err = fetch(&Source::File(large.path().to_path_buf()), &options).await.unwrap_err();
    assert!(matches!(err, FetchError::TooLarge { limit: 16, .. }));

    let mut binary = NamedTempFile::new().unwrap();
    binary.write_all(&[0xff, 0xfe, 0x00, 0x3c]).unwrap();
    let err = fetch(&Source::File(binary.path().to_path_buf()), &FetchOptions::default()).await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidEncoding));
}

#[tokio::test]
async fn missing_local_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = Source::File(dir.path().join("absent.mpd"));
    let err = fetch(&source, &options()).await.unwrap_err();
    assert!(matches!(err, FetchError::Io(_)));
}
