//! vantage-core - Core types and contracts for the Vantage analytics client.

pub mod api_url;
pub mod credentials;
pub mod error;
pub mod models;
pub mod store;
pub mod token;

pub use api_url::ApiUrl;
pub use credentials::Credentials;
pub use error::{ApiError, AuthError, Error, TransportError};
pub use models::{
    Anomaly, AuthenticatedUser, ChartData, FeatureMetricRow, FeatureUsage, FeatureZScore,
    Insights, TokenResponse, UsageSummary, UserActivity, ZScoreBucket,
};
pub use store::{MemoryTokenStore, TokenStore};
pub use token::AccessToken;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
