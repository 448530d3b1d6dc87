pub mod model_store;
pub mod predictor;
pub mod scaler;
pub mod smartcore_predictor;

pub use model_store::ModelStore;
pub use predictor::{ModelSet, predict_next_day};
pub use scaler::StandardScaler;
pub use smartcore_predictor::SmartCorePredictor;
