pub mod errors;
pub mod db;
pub mod provider;
pub mod user;
pub mod job;
pub mod transaction;
pub mod service_offering;
