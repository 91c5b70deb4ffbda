//! Doctor resource binding
//! 医生资源绑定

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
use crate::gateway::schemas::{Doctor, DoctorBase};
use crate::proto::doctors::{
    doctor, doctors_service_client::DoctorsServiceClient, CreateDoctorRequest,
    DeleteDoctorRequest, Doctor as ProtoDoctor, GetDoctorRequest, ListDoctorsRequest,
    UpdateDoctorRequest,
};

/// Handle to the doctors backend service / 医生后端服务的句柄
#[derive(Clone)]
pub struct DoctorsBackend {
    client: DoctorsServiceClient<Channel>,
}

impl DoctorsBackend {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: DoctorsServiceClient::new(channel),
        }
    }
}

/// Doctor list filters bound from the query string / 从查询字符串绑定的医生列表过滤器
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct DoctorFilter {
    #[validate(length(min = 1, max = 100, message = "search must be 1 to 100 characters"))]
    pub search: Option<String>,
}

impl Resource for DoctorsBackend {
    const RESOURCE: &'static str = "doctors";
}

#[async_trait]
impl ListBackend for DoctorsBackend {
    type ListFilter = DoctorFilter;

    async fn list_ids(
        &self,
        credential: &Credential,
        page: &PageParams,
        filter: Self::ListFilter,
    ) -> Result<IdPage, GatewayError> {
        let response = self
            .client
            .clone()
            .list_doctors(ListDoctorsRequest {
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
impl GetBackend for DoctorsBackend {
    type Detail = Doctor;

    async fn fetch(&self, credential: &Credential, id: i32) -> Result<Self::Detail, GatewayError> {
        let response = self
            .client
            .clone()
            .get_doctor(GetDoctorRequest {
                token: credential.as_str().to_owned(),
                id,
            })
            .await?
            .into_inner();

        // A success envelope without the object means the backend violated
        // its own contract.
        // 没有对象的成功信封意味着后端违反了自己的契约。
        let doctor = response.doctor.ok_or(GatewayError::CorruptResponse)?;
        Ok(doctor_from_proto(doctor))
    }
}

#[async_trait]
impl CreateBackend for DoctorsBackend {
    type CreateBody = DoctorBase;

    async fn create(
        &self,
        credential: &Credential,
        body: Self::CreateBody,
    ) -> Result<i32, GatewayError> {
        let response = self
            .client
            .clone()
            .create_doctor(CreateDoctorRequest {
                token: credential.as_str().to_owned(),
                name: body.name,
                gender: gender_from_wire(body.gender.as_deref()),
                phone_number: body.phone_number.unwrap_or_default(),
                specialities: body.specialities,
                special_note: body.special_note.unwrap_or_default(),
            })
            .await?
            .into_inner();

        Ok(response.id)
    }
}

#[async_trait]
impl UpdateBackend for DoctorsBackend {
    type UpdateBody = DoctorBase;

    async fn update(
        &self,
        credential: &Credential,
        id: i32,
        body: Self::UpdateBody,
    ) -> Result<i32, GatewayError> {
        let response = self
            .client
            .clone()
            .update_doctor(UpdateDoctorRequest {
                token: credential.as_str().to_owned(),
                id,
                name: body.name,
                gender: gender_from_wire(body.gender.as_deref()),
                phone_number: body.phone_number.unwrap_or_default(),
                specialities: body.specialities,
                special_note: body.special_note.unwrap_or_default(),
            })
            .await?
            .into_inner();

        Ok(response.id)
    }
}

#[async_trait]
impl DeleteBackend for DoctorsBackend {
    async fn delete(&self, credential: &Credential, id: i32) -> Result<(), GatewayError> {
        self.client
            .clone()
            .delete_doctor(DeleteDoctorRequest {
                token: credential.as_str().to_owned(),
                id,
            })
            .await?;

        Ok(())
    }
}

/// Map the backend detail representation onto the REST schema
/// 将后端详情表示映射到REST模式
fn doctor_from_proto(doctor: ProtoDoctor) -> Doctor {
    Doctor {
        base: DoctorBase {
            name: doctor.name,
            gender: Some(gender_to_wire(doctor.gender)),
            phone_number: Some(doctor.phone_number),
            // Repeated fields deserialize to concrete vectors, so an omitted
            // speciality list reaches clients as [] rather than null.
            // repeated字段反序列化为具体向量，因此省略的专科列表
            // 以[]而不是null到达客户端。
            specialities: doctor.specialities,
            special_note: Some(doctor.special_note),
        },
        id: doctor.id,
        active: doctor.active,
    }
}

fn gender_to_wire(value: i32) -> String {
    doctor::Gender::try_from(value)
        .map(|gender| gender.as_str_name().to_lowercase())
        .unwrap_or_else(|_| value.to_string())
}

fn gender_from_wire(value: Option<&str>) -> i32 {
    match value {
        None | Some("") => doctor::Gender::Unspecified as i32,
        Some(name) => doctor::Gender::from_str_name(&name.to_uppercase())
            .map(|gender| gender as i32)
            .unwrap_or(-1),
    }
}
