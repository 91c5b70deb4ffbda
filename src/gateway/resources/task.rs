//! Task resource binding
//! 任务资源绑定

use async_trait::async_trait;
use serde::Deserialize;
use tonic::transport::Channel;
use validator::Validate;

use crate::gateway::adapter::{
    CreateBackend, DeleteBackend, GetBackend, IdPage, ListBackend, Resource, UpdateBackend,
};
use crate::gateway::auth::Credential;
use crate::gateway::error::GatewayError;
use crate::gateway::pagination::PageParams;
use crate::gateway::schemas::{Task, TaskBase, TaskUpdate};
use crate::proto::tasks::{
    tasks_service_client::TasksServiceClient, CreateTaskRequest, DeleteTaskRequest,
    GetTaskRequest, ListTasksRequest, Task as ProtoTask, UpdateTaskRequest,
};

/// Handle to the tasks backend service / 任务后端服务的句柄
#[derive(Clone)]
pub struct TasksBackend {
    client: TasksServiceClient<Channel>,
}

impl TasksBackend {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: TasksServiceClient::new(channel),
        }
    }
}

/// Task list filters bound from the query string / 从查询字符串绑定的任务列表过滤器
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct TaskFilter {
    #[validate(length(min = 1, max = 100, message = "search must be 1 to 100 characters"))]
    pub search: Option<String>,
}

impl Resource for TasksBackend {
    const RESOURCE: &'static str = "tasks";
}

#[async_trait]
impl ListBackend for TasksBackend {
    type ListFilter = TaskFilter;

    async fn list_ids(
        &self,
        credential: &Credential,
        page: &PageParams,
        filter: Self::ListFilter,
    ) -> Result<IdPage, GatewayError> {
        let response = self
            .client
            .clone()
            .list_tasks(ListTasksRequest {
                token: credential.as_str().to_owned(),
                skip: page.skip,
                limit: page.limit,
                search: filter.search.unwrap_or_default(),
            })
            .await?
            .into_inner();

        Ok(IdPage {
            count: response.count,
            ids: response.results,
        })
    }
}

#[async_trait]
impl GetBackend for TasksBackend {
    type Detail = Task;

    async fn fetch(&self, credential: &Credential, id: i32) -> Result<Self::Detail, GatewayError> {
        let response = self
            .client
            .clone()
            .get_task(GetTaskRequest {
                token: credential.as_str().to_owned(),
                id,
            })
            .await?
            .into_inner();

        // A success envelope without the object means the backend violated
        // its own contract.
        // 没有对象的成功信封意味着后端违反了自己的契约。
        let task = response.task.ok_or(GatewayError::CorruptResponse)?;
        Ok(task_from_proto(task))
    }
}

#[async_trait]
impl CreateBackend for TasksBackend {
    type CreateBody = TaskBase;

    async fn create(
        &self,
        credential: &Credential,
        body: Self::CreateBody,
    ) -> Result<i32, GatewayError> {
        let response = self
            .client
            .clone()
            .create_task(CreateTaskRequest {
                token: credential.as_str().to_owned(),
                title: body.title,
                description: body.description.unwrap_or_default(),
                expertise: body.expertise.unwrap_or_default(),
                patient_id: body.patient_id,
            })
            .await?
            .into_inner();

        Ok(response.id)
    }
}

#[async_trait]
impl UpdateBackend for TasksBackend {
    type UpdateBody = TaskUpdate;

    async fn update(
        &self,
        credential: &Credential,
        id: i32,
        body: Self::UpdateBody,
    ) -> Result<i32, GatewayError> {
        let response = self
            .client
            .clone()
            .update_task(UpdateTaskRequest {
                token: credential.as_str().to_owned(),
                task: Some(ProtoTask {
                    id,
                    patient_id: body.patient_id,
                    expertise: body.expertise.unwrap_or_default(),
                    title: body.title,
                    description: body.description.unwrap_or_default(),
                    // created_at is owned by the backend and ignored on update
                    // created_at由后端拥有，更新时被忽略
                    created_at: String::new(),
                    complete: body.complete,
                }),
            })
            .await?
            .into_inner();

        Ok(response.id)
    }
}

#[async_trait]
impl DeleteBackend for TasksBackend {
    async fn delete(&self, credential: &Credential, id: i32) -> Result<(), GatewayError> {
        self.client
            .clone()
            .delete_task(DeleteTaskRequest {
                token: credential.as_str().to_owned(),
                id,
            })
            .await?;

        Ok(())
    }
}

/// Map the backend detail representation onto the REST schema
/// 将后端详情表示映射到REST模式
fn task_from_proto(task: ProtoTask) -> Task {
    Task {
        base: TaskBase {
            patient_id: task.patient_id,
            expertise: Some(task.expertise),
            title: task.title,
            description: Some(task.description),
        },
        id: task.id,
        created_at: task.created_at,
        complete: task.complete,
    }
}
