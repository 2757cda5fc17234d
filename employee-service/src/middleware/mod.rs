pub mod employee_id;
pub mod json_body;

pub use employee_id::EmployeeId;
pub use json_body::JsonBody;
