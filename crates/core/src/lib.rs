pub mod config;
pub mod domain;
pub mod mapper;

pub use domain::customer::{Customer, CustomerId, CustomerRecord};
pub use mapper::{to_customer, to_record};
