// HASHEQ BENCH - ROOT LIBRARY
// Status: PRODUCTION (Measurement Grade)

// 1. تعريف الوحدات (Modules)
pub mod error;
pub mod utils;
pub mod models;
pub mod fixture;
pub mod catalogue;
pub mod harness;
pub mod hardware;
pub mod report;

// 2. التصدير العام (Re-exports)
pub use error::{HarnessError, HarnessResult};
pub use models::{BuilderPerson, DerivedPerson, Entity, PlainPerson, RecordPerson, Variant};
pub use catalogue::{BenchmarkId, Operation};
pub use harness::{Harness, ProtocolConfig, SweepPlan};
pub use utils::config_loader::{load_config, HarnessConfig};
pub use utils::logger::init_logger;

pub mod prelude {
    pub use crate::HarnessError;
    pub use crate::{BenchmarkId, Operation};
    pub use crate::{Entity, Variant};
}
