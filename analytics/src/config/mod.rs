pub mod settings;

pub use settings::AnalyticsSettings;
