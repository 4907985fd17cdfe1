pub mod controller;
pub mod router;

pub use router::init_manager_router;
