use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yamusic::crypto::md5_hex;
use yamusic::{ClientConfig, ItemId, StorageId, Track, YandexError, YandexMusic};

fn client_for(server: &MockServer) -> YandexMusic {
    let config = ClientConfig::new()
        .with_api_base_url(server.uri())
        .with_storage_base_url(format!("{}/download-info/", server.uri()));
    YandexMusic::with_config(config).unwrap()
}

fn lease_body(host: &str, path: &str) -> String {
    format!(
        "<response><host>{}</host><path>{}</path><ts>999</ts><s>abc</s></response>",
        host, path
    )
}

#[tokio::test]
async fn resolves_storage_id_to_signed_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download-info/12345/abcde67890/2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(lease_body("s.example", "/trackpath")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ym = client_for(&server);
    let url = ym
        .resolve_download_url(&StorageId::new("12345/abcde67890").unwrap())
        .await
        .unwrap();

    let key = md5_hex(&format!("{}{}{}", "XGRlBW9FXlekgbPrRHuSiA", "trackpath", "abc"));
    assert_eq!(url, format!("http://s.example/get-mp3/{}/999/trackpath", key));
}

#[tokio::test]
async fn each_resolution_fetches_a_fresh_lease() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download-info/1/a/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(lease_body("h", "/p/x")))
        .expect(2)
        .mount(&server)
        .await;

    let ym = client_for(&server);
    let id = StorageId::new("1/a").unwrap();
    let first = ym.resolve_download_url(&id).await.unwrap();
    let second = ym.resolve_download_url(&id).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn lease_without_leading_separator_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download-info/1/a/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(lease_body("h", "trackpath")))
        .mount(&server)
        .await;

    let ym = client_for(&server);
    let err = ym
        .resolve_download_url(&StorageId::new("1/a").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, YandexError::ContractViolation(_)));
}

#[tokio::test]
async fn track_lookup_then_resolution() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/handlers/track.jsx"))
        .and(query_param("track", "43117:3542"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"track": {"id": 43117, "title": "Midnight City", "storageDir": "77158/a1b2c3"}}"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/download-info/77158/a1b2c3/2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(lease_body("s.example", "/trackpath")),
        )
        .mount(&server)
        .await;

    let ym = client_for(&server);
    let page = ym
        .get_track(Some(ItemId::new(3542)), ItemId::new(43117))
        .await
        .unwrap();
    let url = ym.track_download_url(&page.track).await.unwrap();
    assert!(url.starts_with("http://s.example/get-mp3/"));
    assert!(url.ends_with("/999/trackpath"));
}

#[tokio::test]
async fn downloads_resolved_audio_to_file() {
    let server = MockServer::start().await;
    let authority = server.address().to_string();
    let audio = vec![0xABu8; 4096];

    Mock::given(method("GET"))
        .and(path("/download-info/9/z/2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(lease_body(&authority, "/trackpath")),
        )
        .mount(&server)
        .await;

    let key = md5_hex("XGRlBW9FXlekgbPrRHuSiAtrackpathabc");
    Mock::given(method("GET"))
        .and(path(format!("/get-mp3/{}/999/trackpath", key)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(audio.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let mut ym = client_for(&server);
    ym.set_embed_tags(false);

    let track = Track {
        id: ItemId::new(1),
        title: "Go/Now".to_string(),
        storage_dir: "9/z".to_string(),
        artists: vec![yamusic::Artist::new("M83", 711232)],
        ..Default::default()
    };

    let dir = std::env::temp_dir().join(format!("yamusic_download_{}", std::process::id()));
    let result = ym.download_track_to(&track, &dir).await.unwrap();

    assert_eq!(result.path, dir.join("M83 - Go_Now.mp3"));
    assert_eq!(result.size, audio.len() as u64);
    assert_eq!(std::fs::read(&result.path).unwrap(), audio);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn truncated_download_leaves_no_file() {
    // Audio host that promises more bytes than it sends, then hangs up.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let audio_authority = listener.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: audio/mpeg\r\nContent-Length: 100000\r\n\r\n0123456789",
            )
            .await
            .unwrap();
        let _ = socket.shutdown().await;
    });

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download-info/9/cut/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(lease_body(&audio_authority, "/trackpath")),
        )
        .mount(&server)
        .await;

    let mut ym = client_for(&server);
    ym.set_embed_tags(false);

    let track = Track {
        id: ItemId::new(2),
        title: "Outro".to_string(),
        storage_dir: "9/cut".to_string(),
        artists: vec![yamusic::Artist::new("M83", 711232)],
        ..Default::default()
    };

    let dir = std::env::temp_dir().join(format!("yamusic_truncated_{}", std::process::id()));
    let err = ym.download_track_to(&track, &dir).await.unwrap_err();
    assert!(matches!(err, YandexError::TransportError(_)));

    assert!(!dir.join("M83 - Outro.mp3").exists());
    assert!(!dir.join("M83 - Outro.mp3.part").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn unresolvable_track_creates_no_output_dir() {
    let server = MockServer::start().await;
    let ym = client_for(&server);

    let dir = std::env::temp_dir().join(format!("yamusic_unresolved_{}", std::process::id()));
    let err = ym
        .download_track_to(&Track::default(), &dir)
        .await
        .unwrap_err();
    assert!(matches!(err, YandexError::NotFound(_)));
    assert!(!dir.exists());
}
