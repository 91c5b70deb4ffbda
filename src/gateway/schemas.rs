//! Public REST payload types for the clinic gateway
//! 诊所网关的公共REST负载类型
//!
//! These are the wire shapes of the versioned JSON contract. Field
//! constraints are enforced here, before any backend call is made.
//! 这些是版本化JSON契约的线上形状。字段约束在任何后端调用之前
//! 在这里强制执行。

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Named pointer to a resource / 指向资源的命名指针
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of resource references / 一页资源引用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResourceList {
    pub count: i32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// Identifier envelope returned by create/update/assign operations
/// 创建/更新/分配操作返回的标识符信封
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdHolder {
    pub id: i32,
}

/// Body for assigning a patient to an appointment / 将患者分配到预约的请求体
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssignPatientBody {
    #[validate(range(min = 1, message = "patient_id must be positive"))]
    pub patient_id: i32,
}

// ---------------------------------------------------------------------------
// Patient / 患者
// ---------------------------------------------------------------------------

/// Government-issued identifier of a patient / 患者的证件标识
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PersonalId {
    #[validate(length(min = 1, max = 64, message = "personal id must be 1 to 64 characters"))]
    pub id: String,
    #[validate(length(min = 1, max = 32, message = "personal id type must be 1 to 32 characters"))]
    pub r#type: String,
}

/// Emergency contact of a patient / 患者的紧急联系人
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmergencyContact {
    #[validate(length(min = 1, max = 100, message = "contact name must be 1 to 100 characters"))]
    pub name: String,
    #[validate(length(max = 100, message = "closeness must be at most 100 characters"))]
    pub closeness: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

/// Patient fields accepted on create and update / 创建和更新时接受的患者字段
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PatientBase {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,
    #[validate(nested)]
    pub personal_id: PersonalId,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[validate(custom(function = "validate_date"))]
    pub birth_date: String,
    #[serde(default)]
    #[validate(nested)]
    pub emergency_contacts: Vec<EmergencyContact>,
    #[serde(default)]
    pub referred_by: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500, message = "special note must be at most 500 characters"))]
    pub special_note: Option<String>,
}

/// Full patient detail representation / 完整的患者详情表示
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    #[serde(flatten)]
    pub base: PatientBase,
    pub id: i32,
    pub active: bool,
    pub age: i32,
}

// ---------------------------------------------------------------------------
// Doctor / 医生
// ---------------------------------------------------------------------------

/// Doctor fields accepted on create and update / 创建和更新时接受的医生字段
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DoctorBase {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub specialities: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 500, message = "special note must be at most 500 characters"))]
    pub special_note: Option<String>,
}

/// Full doctor detail representation / 完整的医生详情表示
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(flatten)]
    pub base: DoctorBase,
    pub id: i32,
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Appointment / 预约
// ---------------------------------------------------------------------------

/// Appointment fields accepted on create / 创建时接受的预约字段
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppointmentBase {
    #[validate(range(min = 1, message = "patient_id must be positive"))]
    pub patient_id: i32,
    #[validate(range(min = 1, message = "doctor_id must be positive"))]
    pub doctor_id: i32,
    #[validate(custom(function = "validate_datetime"))]
    pub start_time: String,
    #[validate(custom(function = "validate_datetime"))]
    pub end_time: String,
}

/// Full appointment detail representation / 完整的预约详情表示
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i32,
    pub patient_id: i32,
    pub doctor_id: i32,
    pub start_time: String,
    pub end_time: String,
    pub approved_by_patient: bool,
    pub visited: bool,
}

// ---------------------------------------------------------------------------
// Task / 任务
// ---------------------------------------------------------------------------

/// Task fields accepted on create / 创建时接受的任务字段
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskBase {
    #[validate(range(min = 1, message = "patient_id must be positive"))]
    pub patient_id: i32,
    #[serde(default)]
    pub expertise: Option<String>,
    #[validate(length(min = 1, max = 100, message = "title must be 1 to 100 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
}

/// Task fields accepted on update; carries the completion flag
/// 更新时接受的任务字段；携带完成标志
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(range(min = 1, message = "patient_id must be positive"))]
    pub patient_id: i32,
    #[serde(default)]
    pub expertise: Option<String>,
    #[validate(length(min = 1, max = 100, message = "title must be 1 to 100 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
    pub complete: bool,
}

/// Full task detail representation / 完整的任务详情表示
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(flatten)]
    pub base: TaskBase,
    pub id: i32,
    pub created_at: String,
    pub complete: bool,
}

// ---------------------------------------------------------------------------
// Custom field validators / 自定义字段验证器
// ---------------------------------------------------------------------------

/// Phone numbers are an optional leading `+` followed by 7 to 15 digits
/// 电话号码是可选的前导`+`加7到15位数字
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let valid = (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        let mut error = ValidationError::new("phone");
        error.message = Some("phone number must contain 7 to 15 digits".into());
        Err(error)
    }
}

/// Calendar dates use the `YYYY-MM-DD` form / 日历日期使用`YYYY-MM-DD`形式
pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    match chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut error = ValidationError::new("date");
            error.message = Some("date must use the YYYY-MM-DD format".into());
            Err(error)
        }
    }
}

/// Instants use the RFC 3339 form / 时间点使用RFC 3339形式
pub fn validate_datetime(value: &str) -> Result<(), ValidationError> {
    match chrono::DateTime::parse_from_rfc3339(value) {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut error = ValidationError::new("datetime");
            error.message = Some("time must use the RFC 3339 format".into());
            Err(error)
        }
    }
}
