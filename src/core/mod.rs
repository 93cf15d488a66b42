pub mod export;
pub mod food;
pub mod logging;
pub mod monthly;
pub mod projection;
pub mod query;
pub mod summary;
pub mod trend;
pub mod units;
