//! Patient resource binding
//! 患者资源绑定

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
use crate::gateway::schemas::{EmergencyContact, Patient, PatientBase, PersonalId};
use crate::proto::patients::{
    patient, patients_service_client::PatientsServiceClient, CreatePatientRequest,
    DeletePatientRequest, GetPatientRequest, ListPatientsRequest, Patient as ProtoPatient,
    UpdatePatientRequest,
};

/// Handle to the patients backend service / 患者后端服务的句柄
#[derive(Clone)]
pub struct PatientsBackend {
    client: PatientsServiceClient<Channel>,
}

impl PatientsBackend {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: PatientsServiceClient::new(channel),
        }
    }
}

/// Patient list filters bound from the query string / 从查询字符串绑定的患者列表过滤器
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PatientFilter {
    #[validate(length(min = 1, max = 100, message = "search must be 1 to 100 characters"))]
    pub search: Option<String>,
}

impl Resource for PatientsBackend {
    const RESOURCE: &'static str = "patients";
}

#[async_trait]
impl ListBackend for PatientsBackend {
    type ListFilter = PatientFilter;

    async fn list_ids(
        &self,
        credential: &Credential,
        page: &PageParams,
        filter: Self::ListFilter,
    ) -> Result<IdPage, GatewayError> {
        let response = self
            .client
            .clone()
            .list_patients(ListPatientsRequest {
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
impl GetBackend for PatientsBackend {
    type Detail = Patient;

    async fn fetch(&self, credential: &Credential, id: i32) -> Result<Self::Detail, GatewayError> {
        let response = self
            .client
            .clone()
            .get_patient(GetPatientRequest {
                token: credential.as_str().to_owned(),
                id,
            })
            .await?
            .into_inner();

        Ok(patient_from_proto(response))
    }
}

#[async_trait]
impl CreateBackend for PatientsBackend {
    type CreateBody = PatientBase;

    async fn create(
        &self,
        credential: &Credential,
        body: Self::CreateBody,
    ) -> Result<i32, GatewayError> {
        let response = self
            .client
            .clone()
            .create_patient(CreatePatientRequest {
                token: credential.as_str().to_owned(),
                name: body.name,
                personal_id: Some(patient::PersonalId {
                    id: body.personal_id.id,
                    r#type: body.personal_id.r#type,
                }),
                gender: gender_from_wire(body.gender.as_deref()),
                phone_number: body.phone_number.unwrap_or_default(),
                languages: body.languages,
                birth_date: body.birth_date,
                emergency_contacts: contacts_to_proto(body.emergency_contacts),
                referred_by: body.referred_by.unwrap_or_default(),
                special_note: body.special_note.unwrap_or_default(),
            })
            .await?
            .into_inner();

        Ok(response.id)
    }
}

#[async_trait]
impl UpdateBackend for PatientsBackend {
    type UpdateBody = PatientBase;

    async fn update(
        &self,
        credential: &Credential,
        id: i32,
        body: Self::UpdateBody,
    ) -> Result<i32, GatewayError> {
        let response = self
            .client
            .clone()
            .update_patient(UpdatePatientRequest {
                token: credential.as_str().to_owned(),
                id,
                name: body.name,
                personal_id: Some(patient::PersonalId {
                    id: body.personal_id.id,
                    r#type: body.personal_id.r#type,
                }),
                gender: gender_from_wire(body.gender.as_deref()),
                phone_number: body.phone_number.unwrap_or_default(),
                languages: body.languages,
                birth_date: body.birth_date,
                emergency_contacts: contacts_to_proto(body.emergency_contacts),
                referred_by: body.referred_by.unwrap_or_default(),
                special_note: body.special_note.unwrap_or_default(),
            })
            .await?
            .into_inner();

        Ok(response.id)
    }
}

#[async_trait]
impl DeleteBackend for PatientsBackend {
    async fn delete(&self, credential: &Credential, id: i32) -> Result<(), GatewayError> {
        self.client
            .clone()
            .delete_patient(DeletePatientRequest {
                token: credential.as_str().to_owned(),
                id,
            })
            .await?;

        Ok(())
    }
}

/// Map the backend detail representation onto the REST schema
/// 将后端详情表示映射到REST模式
fn patient_from_proto(patient: ProtoPatient) -> Patient {
    // A missing personal id is normalized to empty fields; repeated fields
    // are always concrete vectors, so list-typed JSON fields never show null.
    // 缺失的证件标识归一化为空字段；repeated字段始终是具体的向量，
    // 因此列表类型的JSON字段永远不会显示null。
    let personal_id = patient.personal_id.unwrap_or_default();
    Patient {
        base: PatientBase {
            name: patient.name,
            personal_id: PersonalId {
                id: personal_id.id,
                r#type: personal_id.r#type,
            },
            gender: Some(gender_to_wire(patient.gender)),
            phone_number: Some(patient.phone_number),
            languages: patient.languages,
            birth_date: patient.birth_date,
            emergency_contacts: patient
                .emergency_contacts
                .into_iter()
                .map(|contact| EmergencyContact {
                    name: contact.name,
                    closeness: contact.closeness,
                    phone: contact.phone,
                })
                .collect(),
            referred_by: Some(patient.referred_by),
            special_note: Some(patient.special_note),
        },
        id: patient.id,
        active: patient.active,
        age: patient.age,
    }
}

fn contacts_to_proto(contacts: Vec<EmergencyContact>) -> Vec<patient::EmergencyContact> {
    contacts
        .into_iter()
        .map(|contact| patient::EmergencyContact {
            name: contact.name,
            closeness: contact.closeness,
            phone: contact.phone,
        })
        .collect()
}

/// Render a backend gender value as the lower-case wire string.
/// 将后端性别值渲染为小写的线上字符串。
///
/// Values without a string mapping fall back to their raw numeric form.
/// 没有字符串映射的值回退到其原始数字形式。
fn gender_to_wire(value: i32) -> String {
    patient::Gender::try_from(value)
        .map(|gender| gender.as_str_name().to_lowercase())
        .unwrap_or_else(|_| value.to_string())
}

/// Translate the wire gender string case-insensitively.
/// 不区分大小写地转换线上性别字符串。
///
/// Unrecognized values are forwarded out of range so the backend rejects
/// them instead of being silently coerced here.
/// 无法识别的值以超出范围的形式转发，由后端拒绝，而不是在这里被静默强制转换。
fn gender_from_wire(value: Option<&str>) -> i32 {
    match value {
        None | Some("") => patient::Gender::Unspecified as i32,
        Some(name) => patient::Gender::from_str_name(&name.to_uppercase())
            .map(|gender| gender as i32)
            .unwrap_or(-1),
    }
}
