//! Appointment resource binding
//! 预约资源绑定
//!
//! Appointments offer the generic list/get/create/delete operations plus
//! two appointment-specific ones: assigning a patient and removing the
//! assigned patient. The appointment identifier always comes from the
//! path, the patient identifier from the body.
//! 预约提供通用的list/get/create/delete操作，外加两个预约特定的操作：
//! 分配患者和移除已分配的患者。预约标识符始终来自路径，
//! 患者标识符来自请求体。

use async_trait::async_trait;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, put};
use axum::{Extension, Router};
use serde::Deserialize;
use tonic::transport::Channel;
use tracing::info;
use validator::Validate;

use crate::gateway::adapter::{
    self, BoundJson, CreateBackend, DeleteBackend, GetBackend, IdPage, ListBackend, RecordId,
    Resource,
};
use crate::gateway::auth::Credential;
use crate::gateway::error::GatewayError;
use crate::gateway::pagination::PageParams;
use crate::gateway::schemas::{
    validate_date, Appointment, AppointmentBase, AssignPatientBody, IdHolder,
};
use crate::proto::appointments::{
    appointments_service_client::AppointmentsServiceClient, Appointment as ProtoAppointment,
    AssignPatientRequest, CreateAppointmentRequest, DeleteAppointmentRequest,
    GetAppointmentRequest, ListAppointmentsRequest, RemovePatientRequest,
};

/// Handle to the appointments backend service / 预约后端服务的句柄
#[derive(Clone)]
pub struct AppointmentsBackend {
    client: AppointmentsServiceClient<Channel>,
}

impl AppointmentsBackend {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: AppointmentsServiceClient::new(channel),
        }
    }
}

/// Appointment list filters bound from the query string
/// 从查询字符串绑定的预约列表过滤器
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AppointmentFilter {
    #[validate(custom(function = "validate_date"))]
    pub date: Option<String>,
    pub doctor_id: Option<i32>,
    pub patient_id: Option<i32>,
}

impl Resource for AppointmentsBackend {
    const RESOURCE: &'static str = "appointments";
}

#[async_trait]
impl ListBackend for AppointmentsBackend {
    type ListFilter = AppointmentFilter;

    async fn list_ids(
        &self,
        credential: &Credential,
        page: &PageParams,
        filter: Self::ListFilter,
    ) -> Result<IdPage, GatewayError> {
        let response = self
            .client
            .clone()
            .list_appointments(ListAppointmentsRequest {
                token: credential.as_str().to_owned(),
                skip: page.skip,
                limit: page.limit,
                date: filter.date.unwrap_or_default(),
                doctor_id: filter.doctor_id.unwrap_or_default(),
                patient_id: filter.patient_id.unwrap_or_default(),
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
impl GetBackend for AppointmentsBackend {
    type Detail = Appointment;

    async fn fetch(&self, credential: &Credential, id: i32) -> Result<Self::Detail, GatewayError> {
        let response = self
            .client
            .clone()
            .get_appointment(GetAppointmentRequest {
                token: credential.as_str().to_owned(),
                id,
            })
            .await?
            .into_inner();

        Ok(appointment_from_proto(response))
    }
}

#[async_trait]
impl CreateBackend for AppointmentsBackend {
    type CreateBody = AppointmentBase;

    async fn create(
        &self,
        credential: &Credential,
        body: Self::CreateBody,
    ) -> Result<i32, GatewayError> {
        let response = self
            .client
            .clone()
            .create_appointment(CreateAppointmentRequest {
                token: credential.as_str().to_owned(),
                patient_id: body.patient_id,
                doctor_id: body.doctor_id,
                start_time: body.start_time,
                end_time: body.end_time,
            })
            .await?
            .into_inner();

        Ok(response.id)
    }
}

#[async_trait]
impl DeleteBackend for AppointmentsBackend {
    async fn delete(&self, credential: &Credential, id: i32) -> Result<(), GatewayError> {
        self.client
            .clone()
            .delete_appointment(DeleteAppointmentRequest {
                token: credential.as_str().to_owned(),
                appointment_id: id,
            })
            .await?;

        Ok(())
    }
}

/// Patient assignment operations specific to appointments
/// 预约特有的患者分配操作
#[async_trait]
pub trait AssignmentBackend: Resource {
    async fn assign_patient(
        &self,
        credential: &Credential,
        appointment_id: i32,
        patient_id: i32,
    ) -> Result<i32, GatewayError>;

    async fn remove_patient(
        &self,
        credential: &Credential,
        appointment_id: i32,
    ) -> Result<i32, GatewayError>;
}

#[async_trait]
impl AssignmentBackend for AppointmentsBackend {
    async fn assign_patient(
        &self,
        credential: &Credential,
        appointment_id: i32,
        patient_id: i32,
    ) -> Result<i32, GatewayError> {
        let response = self
            .client
            .clone()
            .assign_patient(AssignPatientRequest {
                token: credential.as_str().to_owned(),
                appointment_id,
                patient_id,
            })
            .await?
            .into_inner();

        Ok(response.patient_id)
    }

    async fn remove_patient(
        &self,
        credential: &Credential,
        appointment_id: i32,
    ) -> Result<i32, GatewayError> {
        let response = self
            .client
            .clone()
            .remove_patient(RemovePatientRequest {
                token: credential.as_str().to_owned(),
                appointment_id,
            })
            .await?
            .into_inner();

        Ok(response.patient_id)
    }
}

/// Assign a patient to an appointment / 将患者分配到预约
pub async fn assign_patient<B: AssignmentBackend>(
    State(backend): State<B>,
    Extension(credential): Extension<Credential>,
    RecordId(id): RecordId,
    BoundJson(body): BoundJson<AssignPatientBody>,
) -> Result<Json<IdHolder>, GatewayError> {
    info!("assigning patient to {} id={}", B::RESOURCE, id);

    let patient_id = backend.assign_patient(&credential, id, body.patient_id).await?;
    Ok(Json(IdHolder { id: patient_id }))
}

/// Remove the assigned patient from an appointment / 从预约中移除已分配的患者
pub async fn remove_patient<B: AssignmentBackend>(
    State(backend): State<B>,
    Extension(credential): Extension<Credential>,
    RecordId(id): RecordId,
) -> Result<Json<IdHolder>, GatewayError> {
    info!("removing patient from {} id={}", B::RESOURCE, id);

    let patient_id = backend.remove_patient(&credential, id).await?;
    Ok(Json(IdHolder { id: patient_id }))
}

/// Build the appointment route set.
/// 构建预约路由集。
///
/// The backend offers no update operation, so PUT on the item route is an
/// explicit not-implemented stand-in rather than a silent gap.
/// 后端不提供更新操作，因此条目路由上的PUT是显式的未实现占位，
/// 而不是静默的缺口。
pub fn appointment_routes<B>(backend: B) -> Router
where
    B: ListBackend + GetBackend + CreateBackend + DeleteBackend + AssignmentBackend,
{
    let collection = format!("/{}", B::RESOURCE);
    let item = format!("/{}/{{id}}", B::RESOURCE);
    let assignment = format!("/{}/{{id}}/patient", B::RESOURCE);

    Router::new()
        .route(
            &collection,
            get(adapter::list::<B>).post(adapter::create::<B>),
        )
        .route(
            &item,
            get(adapter::fetch::<B>)
                .put(adapter::not_implemented)
                .delete(adapter::remove::<B>),
        )
        .route(
            &assignment,
            put(assign_patient::<B>).delete(remove_patient::<B>),
        )
        .with_state(backend)
}

/// Map the backend detail representation onto the REST schema
/// 将后端详情表示映射到REST模式
fn appointment_from_proto(appointment: ProtoAppointment) -> Appointment {
    Appointment {
        id: appointment.id,
        patient_id: appointment.patient_id,
        doctor_id: appointment.doctor_id,
        start_time: appointment.start_time,
        end_time: appointment.end_time,
        approved_by_patient: appointment.approved_by_patient,
        visited: appointment.visited,
    }
}
