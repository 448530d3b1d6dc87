// Price bars, series and the trading calendar
pub mod market;

// Feature registry shared by training and inference
pub mod ml;

// Prediction and report types
pub mod forecast;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
