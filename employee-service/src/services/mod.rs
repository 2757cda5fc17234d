pub mod database;
pub mod metrics;
pub mod store;

pub use database::MongoDb;
pub use self::metrics::{get_metrics, init_metrics};
pub use store::{EmployeeStore, StoreError};
