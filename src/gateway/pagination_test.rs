//! Tests for pagination links and resource references
//! 分页链接和资源引用的测试

use std::collections::HashMap;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::routing::get;
use axum::{Extension, Router};
use tower::ServiceExt;
use url::Url;

use crate::gateway::pagination::{
    named_resource, named_resource_list, pagination_links, LinkBase, PageParams, RequestUrl,
};

fn current_url(input: &str) -> Url {
    Url::parse(input).expect("valid test URL")
}

/// Parse the query string of a link into a map / 将链接的查询字符串解析为映射
fn query_map(link: &str) -> HashMap<String, String> {
    let url = current_url(link);
    let query = url.query().unwrap_or_default();
    serde_urlencoded::from_str(query).expect("query parses")
}

#[test]
fn test_previous_absent_iff_skip_zero() {
    let url = current_url("http://clinic.example/patients?skip=0&limit=20");

    for (skip, limit, count) in [(0, 20, 100), (0, 0, 0), (0, 5, 3)] {
        let (previous, _) = pagination_links(&url, skip, limit, count);
        assert!(previous.is_none(), "skip={} must have no previous", skip);
    }

    for (skip, limit, count) in [(1, 20, 100), (20, 20, 45), (100, 5, 3)] {
        let (previous, _) = pagination_links(&url, skip, limit, count);
        assert!(previous.is_some(), "skip={} must have previous", skip);
    }
}

#[test]
fn test_next_absent_iff_window_reaches_count() {
    let url = current_url("http://clinic.example/patients?skip=0&limit=20");

    for (skip, limit, count) in [(0, 20, 20), (40, 20, 45), (0, 0, 0), (10, 10, 15)] {
        let (_, next) = pagination_links(&url, skip, limit, count);
        assert_eq!(
            next.is_none(),
            skip + limit >= count,
            "skip={} limit={} count={}",
            skip,
            limit,
            count
        );
    }
}

#[test]
fn test_example_page_window() {
    // GET /patients?skip=20&limit=20 with count=45 / count=45的示例场景
    let url = current_url("http://clinic.example/patients?skip=20&limit=20");
    let (previous, next) = pagination_links(&url, 20, 20, 45);

    let previous = query_map(&previous.expect("previous present"));
    assert_eq!(previous["skip"], "0");
    assert_eq!(previous["limit"], "20");

    let next = query_map(&next.expect("next present"));
    assert_eq!(next["skip"], "40");
    assert_eq!(next["limit"], "20");
}

#[test]
fn test_previous_clamps_at_zero() {
    let url = current_url("http://clinic.example/patients?skip=5&limit=20");
    let (previous, _) = pagination_links(&url, 5, 20, 100);
    let previous = query_map(&previous.expect("previous present"));
    assert_eq!(previous["skip"], "0");
}

#[test]
fn test_links_preserve_other_query_parameters() {
    let url = current_url("http://clinic.example/doctors?search=levi&skip=20&limit=10&extra=x");
    let (previous, next) = pagination_links(&url, 20, 10, 100);

    for link in [previous.expect("previous"), next.expect("next")] {
        let params = query_map(&link);
        assert_eq!(params["search"], "levi");
        assert_eq!(params["extra"], "x");
        assert_eq!(params.len(), 4);
    }
}

#[test]
fn test_link_round_trip_recovers_page() {
    // Rewriting skip/limit and re-parsing recovers exactly the requested page
    // 重写skip/limit并重新解析可精确恢复请求的页
    let url = current_url("http://clinic.example/tasks?search=ecg&skip=30&limit=15");
    let (_, next) = pagination_links(&url, 30, 15, 100);
    let next = next.expect("next present");

    let params = query_map(&next);
    let skip: i32 = params["skip"].parse().unwrap();
    let limit: i32 = params["limit"].parse().unwrap();
    assert_eq!((skip, limit), (45, 15));

    // Following the next link again moves one more page forward
    // 再次跟随next链接向前移动一页
    let (previous, _) = pagination_links(&current_url(&next), skip, limit, 100);
    let previous = query_map(&previous.expect("previous present"));
    assert_eq!(previous["skip"], "30");
    assert_eq!(previous["search"], "ecg");
}

#[test]
fn test_named_resource_strips_query() {
    let url = current_url("http://clinic.example/patients?skip=20&limit=20&search=x");
    let reference = named_resource(&url, "patients", 7);

    assert_eq!(reference.name, "patients");
    assert_eq!(reference.url, "http://clinic.example/patients/7");
}

#[test]
fn test_named_resource_list_shape() {
    let url = current_url("http://clinic.example/patients?skip=20&limit=20");
    let page = PageParams { skip: 20, limit: 20 };
    let list = named_resource_list(&url, "patients", &page, 45, &[21, 22, 23]);

    assert_eq!(list.count, 45);
    assert_eq!(list.results.len(), 3);
    assert_eq!(list.results[0].url, "http://clinic.example/patients/21");
    assert!(list.previous.is_some());
    assert!(list.next.is_some());
}

// ---------------------------------------------------------------------------
// External URL resolution / 外部URL解析
// ---------------------------------------------------------------------------

/// Handler echoing the externally visible URL / 回显外部可见URL的处理器
async fn echo_url(RequestUrl(url): RequestUrl) -> String {
    url.to_string()
}

fn create_echo_app(link_base: LinkBase) -> Router {
    Router::new()
        .route("/patients", get(echo_url))
        .layer(Extension(link_base))
}

async fn resolved_url(app: Router, request: Request<Body>) -> String {
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_request_url_uses_host_header() {
    let app = create_echo_app(LinkBase::default());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/patients?skip=5&limit=10")
        .header("host", "clinic.example")
        .body(Body::empty())
        .unwrap();

    assert_eq!(
        resolved_url(app, request).await,
        "http://clinic.example/patients?skip=5&limit=10"
    );
}

#[tokio::test]
async fn test_request_url_prefers_forwarded_headers() {
    // Behind a reverse proxy the forwarded host wins over the bind address
    // 在反向代理后面，转发的主机优先于绑定地址
    let app = create_echo_app(LinkBase::default());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/patients")
        .header("host", "10.0.0.5:8080")
        .header("x-forwarded-host", "api.clinic.example")
        .header("x-forwarded-proto", "https")
        .body(Body::empty())
        .unwrap();

    assert_eq!(
        resolved_url(app, request).await,
        "https://api.clinic.example/patients"
    );
}

#[tokio::test]
async fn test_request_url_prefers_configured_public_url() {
    let link_base = LinkBase::from_config(Some("https://gw.clinic.example:8443")).unwrap();
    let app = create_echo_app(link_base);
    let request = Request::builder()
        .method(Method::GET)
        .uri("/patients?skip=0&limit=20")
        .header("host", "10.0.0.5:8080")
        .header("x-forwarded-host", "something.else")
        .body(Body::empty())
        .unwrap();

    assert_eq!(
        resolved_url(app, request).await,
        "https://gw.clinic.example:8443/patients?skip=0&limit=20"
    );
}
