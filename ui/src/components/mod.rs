pub mod chart;
pub mod overlay;
pub mod shell;

pub use chart::*;
pub use overlay::*;
pub use shell::*;
