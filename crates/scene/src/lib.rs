pub mod feature;
pub mod mobility;
pub mod selection;

pub use feature::*;
pub use mobility::*;
pub use selection::*;
