//! Per-resource backend bindings
//! 每资源后端绑定
//!
//! Each resource kind binds the generic adapter to its gRPC client:
//! request building, detail mapping, and enumeration translation live here.
//! 每个资源类型将通用适配器绑定到其gRPC客户端：
//! 请求构建、详情映射和枚举转换都在这里。

pub mod appointment;
pub mod doctor;
pub mod patient;
pub mod task;

// Re-export the backend handles / 重新导出后端句柄
pub use appointment::AppointmentsBackend;
pub use doctor::DoctorsBackend;
pub use patient::PatientsBackend;
pub use task::TasksBackend;
