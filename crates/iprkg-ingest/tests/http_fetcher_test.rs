//! HTTP fetcher tests against a mock release server

mod common;

use common::{gzip_bytes, ReleaseFixture};
use iprkg_ingest::fetch::{FetchError, Fetcher, HttpFetcher, SourceFile};
use iprkg_ingest::interpro;
use std::time::Duration;
use tokio::runtime::Handle;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn fetcher(server: &MockServer, cache_dir: &std::path::Path) -> HttpFetcher {
    HttpFetcher::new(
        format!("{}/", server.uri()),
        cache_dir,
        Duration::from_secs(10),
        Handle::current(),
    )
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/interpro2go"))
        .respond_with(ResponseTemplate::new(200).set_body_string(common::INTERPRO2GO))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(&server, dir.path());

    let (first, second) = tokio::task::spawn_blocking(move || {
        let first = fetcher.ensure(SourceFile::InterPro2Go, false).unwrap();
        let second = fetcher.ensure(SourceFile::InterPro2Go, false).unwrap();
        (first, second)
    })
    .await
    .unwrap();

    assert_eq!(first, dir.path().join("interpro2go"));
    assert_eq!(first, second);
    assert_eq!(std::fs::read_to_string(&first).unwrap(), common::INTERPRO2GO);
    assert!(!dir.path().join("interpro2go.part").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_force_downloads_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entry.list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(common::ENTRY_LIST))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(&server, dir.path());

    tokio::task::spawn_blocking(move || {
        fetcher.ensure(SourceFile::EntryList, false).unwrap();
        fetcher.ensure(SourceFile::EntryList, true).unwrap();
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/short_names.dat"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(&server, dir.path());

    let err = tokio::task::spawn_blocking(move || {
        fetcher.ensure(SourceFile::ShortNames, false).unwrap_err()
    })
    .await
    .unwrap();

    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert!(!dir.path().join("short_names.dat").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pipeline_over_http() {
    let server = MockServer::start().await;
    let files: [(&str, Vec<u8>); 5] = [
        ("/entry.list", common::ENTRY_LIST.as_bytes().to_vec()),
        ("/short_names.dat", common::SHORT_NAMES.as_bytes().to_vec()),
        ("/ParentChildTreeFile.txt", common::TREE.as_bytes().to_vec()),
        ("/interpro2go", common::INTERPRO2GO.as_bytes().to_vec()),
        ("/protein2ipr.dat.gz", gzip_bytes(common::PROTEIN2IPR)),
    ];
    for (file, body) in files {
        Mock::given(method("GET"))
            .and(path(file))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .expect(1)
            .mount(&server)
            .await;
    }

    // The fixture's staged files are replaced by an empty data directory
    let fixture = ReleaseFixture::new();
    std::fs::remove_dir_all(fixture.data_dir()).unwrap();

    let mut config = fixture.config();
    config.base_url = format!("{}/", server.uri());
    let oracle = fixture.oracle();
    let fetcher = HttpFetcher::from_config(&config, Handle::current()).unwrap();

    let stats = tokio::task::spawn_blocking(move || interpro::run(&fetcher, &oracle, &config))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(stats.nodes_written, 12);
    assert_eq!(stats.relations_written, 10);
    assert!(fixture.data_dir().join("protein2ipr.dat.gz").is_file());
    assert!(fixture.data_dir().join("protein2ipr_human.tsv").is_file());
}
