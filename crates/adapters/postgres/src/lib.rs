//! sharebnb-adapter-postgres - PostgreSQL 适配器

mod connection;
mod error_mapper;
mod metrics;
mod migration;

pub use connection::*;
pub use error_mapper::*;
pub use metrics::*;
pub use migration::*;
