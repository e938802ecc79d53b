pub mod event_bus;
pub mod frame;
pub mod transition;

pub use event_bus::*;
pub use frame::*;
pub use transition::*;
