pub mod settings_io;

pub use settings_io::{SettingsError, load_or_default, load_settings};
