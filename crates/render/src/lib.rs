pub mod command;
pub mod path;
pub mod recording;
pub mod rgb;
pub mod svg_surface;

pub use command::*;
pub use path::*;
pub use recording::*;
pub use rgb::*;
pub use svg_surface::*;
