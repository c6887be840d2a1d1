pub mod estimator; // CalorieEstimator seam + error strings
pub mod gemini; // Google Gemini generateContent client
pub mod storage; // Upload directory

pub use estimator::CalorieEstimator;
pub use gemini::GeminiClient;
pub use storage::UploadStore;
