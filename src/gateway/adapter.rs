//! Generic REST-to-RPC resource adapter
//! 通用REST到RPC资源适配器
//!
//! One reusable pattern covers List/Get/Create/Update/Delete for every
//! resource kind. A resource kind implements the operation traits it
//! actually offers; the route table then lists exactly which operations
//! exist. Backends are passed in at construction so tests can substitute
//! fakes per adapter instance.
//! 一个可重用的模式覆盖每个资源类型的List/Get/Create/Update/Delete。
//! 资源类型实现它实际提供的操作trait；路由表因此精确列出存在哪些操作。
//! 后端在构造时传入，因此测试可以为每个适配器实例替换伪造实现。

use async_trait::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::{Extension, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};
use validator::Validate;

use super::auth::Credential;
use super::error::GatewayError;
use super::pagination::{named_resource_list, PageParams, RequestUrl};
use super::schemas::{IdHolder, NamedResourceList};

/// One page of backend identifiers plus the total count
/// 一页后端标识符加总数
#[derive(Debug, Clone, PartialEq)]
pub struct IdPage {
    pub count: i32,
    pub ids: Vec<i32>,
}

/// A resource kind exposed through the gateway / 通过网关公开的资源类型
pub trait Resource: Clone + Send + Sync + 'static {
    /// Route segment and reference name for this resource kind
    /// 此资源类型的路由段和引用名称
    const RESOURCE: &'static str;
}

/// Listing a page of resource identifiers / 列出一页资源标识符
#[async_trait]
pub trait ListBackend: Resource {
    /// Resource-specific filters bound from the query string
    /// 从查询字符串绑定的资源特定过滤器
    type ListFilter: DeserializeOwned + Validate + Send;

    async fn list_ids(
        &self,
        credential: &Credential,
        page: &PageParams,
        filter: Self::ListFilter,
    ) -> Result<IdPage, GatewayError>;
}

/// Fetching one resource by identifier / 按标识符获取单个资源
#[async_trait]
pub trait GetBackend: Resource {
    /// REST detail representation of the resource / 资源的REST详情表示
    type Detail: Serialize + Send;

    async fn fetch(&self, credential: &Credential, id: i32) -> Result<Self::Detail, GatewayError>;
}

/// Creating a resource / 创建资源
#[async_trait]
pub trait CreateBackend: Resource {
    type CreateBody: DeserializeOwned + Validate + Send;

    async fn create(
        &self,
        credential: &Credential,
        body: Self::CreateBody,
    ) -> Result<i32, GatewayError>;
}

/// Updating a resource / 更新资源
#[async_trait]
pub trait UpdateBackend: Resource {
    type UpdateBody: DeserializeOwned + Validate + Send;

    async fn update(
        &self,
        credential: &Credential,
        id: i32,
        body: Self::UpdateBody,
    ) -> Result<i32, GatewayError>;
}

/// Deleting a resource / 删除资源
#[async_trait]
pub trait DeleteBackend: Resource {
    async fn delete(&self, credential: &Credential, id: i32) -> Result<(), GatewayError>;
}

// ---------------------------------------------------------------------------
// Binding extractors / 绑定提取器
// ---------------------------------------------------------------------------

/// Query binding that turns rejections and constraint violations into 400
/// 将拒绝和约束违规转换为400的查询绑定
pub struct BoundQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for BoundQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| GatewayError::BadRequest(rejection.body_text()))?;
        value
            .validate()
            .map_err(|violations| GatewayError::BadRequest(violations.to_string()))?;
        Ok(BoundQuery(value))
    }
}

/// JSON body binding that turns rejections and constraint violations into 400
/// 将拒绝和约束违规转换为400的JSON请求体绑定
pub struct BoundJson<T>(pub T);

impl<T, S> FromRequest<S> for BoundJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| GatewayError::BadRequest(rejection.body_text()))?;
        value
            .validate()
            .map_err(|violations| GatewayError::BadRequest(violations.to_string()))?;
        Ok(BoundJson(value))
    }
}

/// Numeric path identifier binding; non-numeric identifiers are 400
/// 数字路径标识符绑定；非数字标识符为400
pub struct RecordId(pub i32);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| GatewayError::BadRequest(rejection.body_text()))?;
        Ok(RecordId(id))
    }
}

// ---------------------------------------------------------------------------
// Generic handlers / 通用处理器
// ---------------------------------------------------------------------------

/// List resource references for one page / 列出一页资源引用
pub async fn list<B: ListBackend>(
    State(backend): State<B>,
    Extension(credential): Extension<Credential>,
    RequestUrl(url): RequestUrl,
    BoundQuery(page): BoundQuery<PageParams>,
    BoundQuery(filter): BoundQuery<B::ListFilter>,
) -> Result<Json<NamedResourceList>, GatewayError> {
    debug!("listing {} skip={} limit={}", B::RESOURCE, page.skip, page.limit);

    let id_page = backend.list_ids(&credential, &page, filter).await?;
    Ok(Json(named_resource_list(
        &url,
        B::RESOURCE,
        &page,
        id_page.count,
        &id_page.ids,
    )))
}

/// Fetch one resource detail / 获取单个资源详情
pub async fn fetch<B: GetBackend>(
    State(backend): State<B>,
    Extension(credential): Extension<Credential>,
    RecordId(id): RecordId,
) -> Result<Json<B::Detail>, GatewayError> {
    debug!("fetching {} id={}", B::RESOURCE, id);

    let detail = backend.fetch(&credential, id).await?;
    Ok(Json(detail))
}

/// Create a resource and return its identifier / 创建资源并返回其标识符
pub async fn create<B: CreateBackend>(
    State(backend): State<B>,
    Extension(credential): Extension<Credential>,
    BoundJson(body): BoundJson<B::CreateBody>,
) -> Result<(StatusCode, Json<IdHolder>), GatewayError> {
    info!("creating {}", B::RESOURCE);

    let id = backend.create(&credential, body).await?;
    Ok((StatusCode::CREATED, Json(IdHolder { id })))
}

/// Update a resource; idempotent from the caller's perspective
/// 更新资源；从调用者的角度来看是幂等的
pub async fn update<B: UpdateBackend>(
    State(backend): State<B>,
    Extension(credential): Extension<Credential>,
    RecordId(id): RecordId,
    BoundJson(body): BoundJson<B::UpdateBody>,
) -> Result<Json<IdHolder>, GatewayError> {
    info!("updating {} id={}", B::RESOURCE, id);

    let id = backend.update(&credential, id, body).await?;
    Ok(Json(IdHolder { id }))
}

/// Delete a resource / 删除资源
pub async fn remove<B: DeleteBackend>(
    State(backend): State<B>,
    Extension(credential): Extension<Credential>,
    RecordId(id): RecordId,
) -> Result<Json<serde_json::Value>, GatewayError> {
    info!("deleting {} id={}", B::RESOURCE, id);

    backend.delete(&credential, id).await?;
    Ok(Json(json!({})))
}

/// Explicit stand-in for operations the surface lists but no backend offers
/// 表面列出但没有后端提供的操作的显式占位
pub async fn not_implemented() -> GatewayError {
    GatewayError::NotImplemented
}

/// Build the route set for a resource kind offering all five operations
/// 为提供全部五个操作的资源类型构建路由集
pub fn resource_router<B>(backend: B) -> Router
where
    B: ListBackend + GetBackend + CreateBackend + UpdateBackend + DeleteBackend,
{
    let collection = format!("/{}", B::RESOURCE);
    let item = format!("/{}/{{id}}", B::RESOURCE);

    Router::new()
        .route(&collection, get(list::<B>).post(create::<B>))
        .route(&item, get(fetch::<B>).put(update::<B>).delete(remove::<B>))
        .with_state(backend)
}
