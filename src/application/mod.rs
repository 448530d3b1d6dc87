// Return and moving-average features
pub mod feature_engineering_service;

// Scaler, model artifacts and the prediction step
pub mod ml;

// Fetch -> features -> prediction orchestration
pub mod forecast_service;

// Background worker used by the UI
pub mod client;
