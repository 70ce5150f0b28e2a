pub mod error;
pub mod estimate;
pub mod precision;
pub mod session;

pub use error::GpumeError;
pub use estimate::{estimate, estimate_for, vram_gb, Estimate};
pub use precision::Precision;
pub use session::{Session, SessionState};
