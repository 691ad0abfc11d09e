//! Integration tests for the HTTP client against a mock server

use djen::adapters::comunica::{ComunicaClient, DeclaredTotal, PageFetcher};
use djen::config::{ApiConfig, TotalCountConfig};
use djen::domain::{FetchError, FetchErrorKind, QueryParameters};
use mockito::Matcher;

const PATH: &str = "/api/v1/comunicacao";

fn client_for(server: &mockito::ServerGuard) -> ComunicaClient {
    ComunicaClient::new(&ApiConfig {
        base_url: format!("{}{}", server.url(), PATH),
        page_size: 2,
        user_agent: "djen-test".to_string(),
        ..ApiConfig::default()
    })
    .unwrap()
}

fn license_query() -> QueryParameters {
    QueryParameters::builder()
        .license_number("118093")
        .license_jurisdiction("rj")
        .start_date("2024-01-01")
        .end_date("2024-01-31")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_fetch_page_sends_query_and_parses_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("size".into(), "2".into()),
            Matcher::UrlEncoded("numeroOab".into(), "118093".into()),
            Matcher::UrlEncoded("ufOab".into(), "RJ".into()),
            Matcher::UrlEncoded("dataDisponibilizacaoInicio".into(), "2024-01-01".into()),
            Matcher::UrlEncoded("dataDisponibilizacaoFim".into(), "2024-01-31".into()),
        ]))
        .match_header("user-agent", "djen-test")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"status":"success","count":3,"items":[
                {"id":1,"siglaTribunal":"TJRJ"},
                {"id":2,"siglaTribunal":"TJSP"}
            ]}"#,
        )
        .create_async()
        .await;

    let page = client_for(&server)
        .fetch_page(&license_query(), 2)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id(), Some("1".to_string()));
    assert_eq!(page.declared_total, Some(DeclaredTotal::Items(3)));
}

#[tokio::test]
async fn test_fetch_page_reads_configured_total_field() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"paginas":"7","count":999,"items":[]}"#)
        .create_async()
        .await;

    let client = ComunicaClient::new(&ApiConfig {
        base_url: format!("{}{}", server.url(), PATH),
        total_count: TotalCountConfig {
            fields: vec!["paginas".to_string()],
            unit: "pages".to_string(),
        },
        ..ApiConfig::default()
    })
    .unwrap();

    let page = client.fetch_page(&license_query(), 1).await.unwrap();
    assert_eq!(page.declared_total, Some(DeclaredTotal::Pages(7)));
}

#[tokio::test]
async fn test_party_and_text_are_encoded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("nomeParte".into(), "42.789.521/0001-10".into()),
            Matcher::UrlEncoded("texto".into(), "citação".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"items":[]}"#)
        .create_async()
        .await;

    let params = QueryParameters::builder()
        .party_name("42.789.521/0001-10")
        .text("citação")
        .build()
        .unwrap();

    let page = client_for(&server).fetch_page(&params, 1).await.unwrap();

    mock.assert_async().await;
    assert!(page.items.is_empty());
    assert_eq!(page.declared_total, None);
}

async fn error_for(status: usize, body: &str) -> FetchError {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", PATH)
        .match_query(Matcher::Any)
        .with_status(status)
        .with_body(body)
        .create_async()
        .await;

    client_for(&server)
        .fetch_page(&license_query(), 1)
        .await
        .unwrap_err()
}

#[tokio::test]
async fn test_status_classification() {
    assert_eq!(
        error_for(500, "internal").await,
        FetchError::ServerError {
            status: 500,
            message: "internal".to_string()
        }
    );
    assert_eq!(
        error_for(503, "down").await,
        FetchError::ServerUnavailable { status: 503 }
    );
    assert_eq!(error_for(502, "").await.kind(), FetchErrorKind::ServerUnavailable);
    assert_eq!(error_for(404, "missing").await.kind(), FetchErrorKind::ClientError);
    assert_eq!(error_for(429, "slow down").await.kind(), FetchErrorKind::ClientError);
    assert_eq!(error_for(504, "").await.kind(), FetchErrorKind::UnknownServerError);
}

#[tokio::test]
async fn test_invalid_body_is_invalid_response() {
    assert_eq!(
        error_for(200, "<html>maintenance</html>").await.kind(),
        FetchErrorKind::InvalidResponse
    );
    assert_eq!(
        error_for(200, r#"{"count":1}"#).await.kind(),
        FetchErrorKind::InvalidResponse
    );
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let client = ComunicaClient::new(&ApiConfig {
        base_url: "http://127.0.0.1:1/api/v1/comunicacao".to_string(),
        timeout_seconds: 5,
        ..ApiConfig::default()
    })
    .unwrap();

    let err = client.fetch_page(&license_query(), 1).await.unwrap_err();
    assert_eq!(err.kind(), FetchErrorKind::Network);
}

#[tokio::test]
async fn test_slow_server_is_timeout_error() {
    // Accepts connections and never answers
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });

    let client = ComunicaClient::new(&ApiConfig {
        base_url: format!("http://{address}{PATH}"),
        timeout_seconds: 1,
        ..ApiConfig::default()
    })
    .unwrap();

    let err = client.fetch_page(&license_query(), 1).await.unwrap_err();
    server.abort();

    assert_eq!(err.kind(), FetchErrorKind::Timeout);
    assert!(matches!(err, FetchError::Timeout(_)));
}
