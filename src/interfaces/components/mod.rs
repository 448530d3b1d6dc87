pub mod charts;
pub mod metrics;
pub mod section;
