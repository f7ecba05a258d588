use std::time::Duration;

use pretty_assertions::assert_eq;
use toplist_engine::{
    ApiClient, ApiError, FetchSettings, LanguageRecord, PageRequest, ReqwestApiClient,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestApiClient {
    let settings = FetchSettings {
        api_base: server.uri(),
        ..FetchSettings::default()
    };
    ReqwestApiClient::new(settings).expect("client")
}

#[tokio::test]
async fn catalog_is_parsed_from_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/metadata"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
                "CountOfAllRepos": 120000,
                "CountOfAllStars": 98000000,
                "AllReposPages": 1200,
                "Languages": [
                    {"Name": "C++", "EscapedName": "C%2B%2B", "CountOfRepos": 9000, "CountOfStars": 5000000, "Pages": 90}
                ]
            }"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let catalog = client_for(&server).fetch_catalog().await.expect("catalog");
    assert_eq!(catalog.count_of_all_repos, 120_000);
    assert_eq!(catalog.all_repos_pages, 1200);
    assert_eq!(
        catalog.languages,
        vec![LanguageRecord {
            name: "C++".to_string(),
            escaped_name: "C%2B%2B".to_string(),
            count_of_repos: 9000,
            count_of_stars: 5_000_000,
            pages: 90,
        }]
    );
}

#[tokio::test]
async fn language_page_keeps_escaped_name_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/language/C%2B%2B/2"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{
                "Id": 1,
                "FullName": "fmtlib/fmt",
                "Name": "fmt",
                "OwnerLogin": "fmtlib",
                "OwnerAvatarUrl": "https://avatars.githubusercontent.com/u/1?v=4",
                "GithubLink": "https://github.com/fmtlib/fmt",
                "Description": "A modern formatting library",
                "Homepage": "",
                "Language": "C++",
                "Stargazers": 20000,
                "Archived": 0,
                "LicenseSpdxId": "NOASSERTION",
                "CreatedAt": "2012-12-07T16:26:46Z",
                "RepoPushedAt": null,
                "FirstFetchedFromGithubAt": null
            }]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let page = PageRequest::Language {
        escaped_name: "C%2B%2B".to_string(),
        page: 2,
    };
    let records = client_for(&server).fetch_page(&page).await.expect("page");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].owner_login, "fmtlib");
    assert_eq!(records[0].stargazers, 20_000);
    assert!(!records[0].archived);
    assert_eq!(records[0].repo_pushed_at, None);
    assert_eq!(records[0].license_spdx_id.as_deref(), Some("NOASSERTION"));
}

#[tokio::test]
async fn archived_flag_accepts_numbers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all/3"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"Name": "old", "Archived": 1}, {"Name": "new", "Archived": false}]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let records = client_for(&server)
        .fetch_page(&PageRequest::All { page: 3 })
        .await
        .expect("page");
    assert!(records[0].archived);
    assert!(!records[1].archived);
}

#[tokio::test]
async fn http_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_page(&PageRequest::All { page: 9 })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::HttpStatus {
            status: 404,
            reason: "Not Found".to_string()
        }
    );
    assert_eq!(err.to_string(), "http status 404: Not Found");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/metadata"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_catalog().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/metadata"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("{}"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        api_base: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let err = ReqwestApiClient::new(settings)
        .expect("client")
        .fetch_catalog()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Timeout(_)), "{err:?}");
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[{}, {}, {}, {}]"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        api_base: server.uri(),
        max_bytes: 4,
        ..FetchSettings::default()
    };
    let err = ReqwestApiClient::new(settings)
        .expect("client")
        .fetch_page(&PageRequest::All { page: 1 })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::TooLarge { max_bytes: 4, .. }), "{err:?}");
}

#[test]
fn invalid_base_is_rejected_up_front() {
    let settings = FetchSettings {
        api_base: "not a url".to_string(),
        ..FetchSettings::default()
    };
    assert!(matches!(
        ReqwestApiClient::new(settings),
        Err(ApiError::InvalidUrl(_))
    ));
}
