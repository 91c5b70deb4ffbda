//! Generated protobuf code for the clinic backend services
//! 诊所后端服务的生成protobuf代码

/// Patients backend protocol / 患者后端协议
pub mod patients {
    tonic::include_proto!("patients");
}

/// Doctors backend protocol / 医生后端协议
pub mod doctors {
    tonic::include_proto!("doctors");
}

/// Appointments backend protocol / 预约后端协议
pub mod appointments {
    tonic::include_proto!("appointments");
}

/// Tasks backend protocol / 任务后端协议
pub mod tasks {
    tonic::include_proto!("tasks");
}
