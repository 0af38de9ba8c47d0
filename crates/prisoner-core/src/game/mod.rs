pub mod scenario;
pub mod snapshot;
