pub mod record;
pub mod settings;

pub use record::*;
pub use settings::*;
