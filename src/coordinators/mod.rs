// Coordinators layer - workflow orchestration
//
// Coordinators compose stores and providers for specific API endpoints.
// They decide the sequence of operations; the logic lives in providers.

pub mod auth_coordinator;
pub mod discount_coordinator;
pub mod lab_coordinator;

pub use auth_coordinator::AuthCoordinator;
pub use discount_coordinator::DiscountCoordinator;
pub use lab_coordinator::LabCoordinator;
