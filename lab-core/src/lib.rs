pub mod analysis;
pub mod category;
#[cfg(feature = "api")]
pub mod client;
pub mod config;
mod de;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod latest;
pub mod results;
pub mod sample;
pub mod timestamp;
pub mod user;
pub mod validation;

pub use category::{AnalysisType, Category, ClientType, Estado, UserRole, WaterCategory};
pub use config::{ApiConfig, Session};
pub use error::{LabError, Result};
