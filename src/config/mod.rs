pub mod settings;

pub use settings::{ApiSettings, AppSettings, Environment, SessionSettings, Settings};
