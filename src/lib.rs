pub mod dom;
pub mod io;
pub mod logging;
pub mod model;
pub mod nav;
pub mod ops;
pub mod tui;
