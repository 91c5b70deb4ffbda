//! Cursor pagination links and resource references
//! 游标分页链接和资源引用
//!
//! Links are always built against the externally visible gateway address,
//! never against the address the process is bound to, so they stay usable
//! behind reverse proxies.
//! 链接始终基于外部可见的网关地址构建，而不是进程绑定的地址，
//! 因此在反向代理后面仍然可用。

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::Deserialize;
use url::Url;
use validator::Validate;

use super::error::GatewayError;
use super::schemas::{NamedResource, NamedResourceList};

/// Query parameter holding the page offset / 保存页偏移量的查询参数
pub const SKIP_PARAMETER: &str = "skip";
/// Query parameter holding the page size / 保存页大小的查询参数
pub const LIMIT_PARAMETER: &str = "limit";

/// Page window bound from the query string / 从查询字符串绑定的分页窗口
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct PageParams {
    #[validate(range(min = 0, message = "skip must be non-negative"))]
    pub skip: i32,
    #[validate(range(min = 0, message = "limit must be non-negative"))]
    pub limit: i32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { skip: 0, limit: 20 }
    }
}

/// Externally visible base address for link synthesis
/// 用于链接合成的外部可见基础地址
///
/// When `public_url` is unset, trusted forwarding headers
/// (`X-Forwarded-Proto`/`X-Forwarded-Host`) win over the `Host` header.
/// 未设置`public_url`时，受信任的转发头优先于`Host`头。
#[derive(Debug, Clone, Default)]
pub struct LinkBase {
    public_url: Option<Url>,
}

impl LinkBase {
    pub fn new(public_url: Option<Url>) -> Self {
        Self { public_url }
    }

    /// Parse the configured public URL, if any / 解析配置的公共URL（如有）
    pub fn from_config(public_url: Option<&str>) -> Result<Self, url::ParseError> {
        let public_url = public_url.map(Url::parse).transpose()?;
        Ok(Self { public_url })
    }

    /// Resolve the full externally visible URL of the request
    /// 解析请求的完整外部可见URL
    fn resolve(&self, parts: &Parts) -> Result<Url, GatewayError> {
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let (scheme, authority) = if let Some(public) = &self.public_url {
            let host = public.host_str().unwrap_or("localhost");
            let authority = match public.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            };
            (public.scheme().to_string(), authority)
        } else if let Some(forwarded_host) = header_value(parts, "x-forwarded-host") {
            let scheme = header_value(parts, "x-forwarded-proto").unwrap_or("http");
            (scheme.to_string(), forwarded_host.to_string())
        } else {
            let host = header_value(parts, "host").unwrap_or("localhost");
            ("http".to_string(), host.to_string())
        };

        Url::parse(&format!("{}://{}{}", scheme, authority, path_and_query))
            .map_err(|_| GatewayError::BadRequest("invalid request URL".to_string()))
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

/// Extractor yielding the externally visible request URL
/// 产生外部可见请求URL的提取器
#[derive(Debug, Clone)]
pub struct RequestUrl(pub Url);

impl<S> FromRequestParts<S> for RequestUrl
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let base = parts
            .extensions
            .get::<LinkBase>()
            .cloned()
            .unwrap_or_default();
        Ok(RequestUrl(base.resolve(parts)?))
    }
}

/// Build the paginated reference list for a page of identifiers
/// 为一页标识符构建分页引用列表
pub fn named_resource_list(
    current: &Url,
    resource: &str,
    page: &PageParams,
    count: i32,
    ids: &[i32],
) -> NamedResourceList {
    let (previous, next) = pagination_links(current, page.skip, page.limit, count);
    NamedResourceList {
        count,
        next,
        previous,
        results: ids
            .iter()
            .map(|id| named_resource(current, resource, *id))
            .collect(),
    }
}

/// Compute previous and next links for pagination.
/// 计算分页的上一页和下一页链接。
///
/// `previous` is absent exactly when `skip <= 0`; `next` is absent exactly
/// when `skip + limit >= count`.
/// 当且仅当`skip <= 0`时没有`previous`；当且仅当`skip + limit >= count`
/// 时没有`next`。
pub fn pagination_links(
    current: &Url,
    skip: i32,
    limit: i32,
    count: i32,
) -> (Option<String>, Option<String>) {
    let previous =
        (skip > 0).then(|| replace_page_parameters(current, (skip - limit).max(0), limit).to_string());
    let next =
        (skip + limit < count).then(|| replace_page_parameters(current, skip + limit, limit).to_string());
    (previous, next)
}

/// Rewrite skip and limit while preserving every other query parameter
/// 重写skip和limit，同时保留所有其他查询参数
fn replace_page_parameters(url: &Url, skip: i32, limit: i32) -> Url {
    let others: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SKIP_PARAMETER && key != LIMIT_PARAMETER)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut rewritten = url.clone();
    {
        let mut pairs = rewritten.query_pairs_mut();
        pairs.clear();
        for (key, value) in &others {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(SKIP_PARAMETER, &skip.to_string());
        pairs.append_pair(LIMIT_PARAMETER, &limit.to_string());
    }
    rewritten
}

/// Build a named reference to a single resource.
/// 构建指向单个资源的命名引用。
///
/// The reference always strips the query and points at
/// `/<resource>/<id>` on the externally visible host.
/// 引用始终去除查询参数，并指向外部可见主机上的`/<resource>/<id>`。
pub fn named_resource(current: &Url, resource: &str, id: i32) -> NamedResource {
    let mut url = current.clone();
    url.set_query(None);
    url.set_path(&format!("/{}/{}", resource, id));
    NamedResource {
        name: resource.to_string(),
        url: url.to_string(),
    }
}
