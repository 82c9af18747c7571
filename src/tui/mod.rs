pub mod app;
pub mod host;
pub mod input;
pub mod render;
pub mod theme;

pub use app::run;
