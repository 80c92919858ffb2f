pub mod cache;
pub mod deriver;
pub mod gaps;
pub mod goals;
pub mod handlers;
pub mod model;

pub use cache::PlanCache;
pub use deriver::PlanPolicy;
