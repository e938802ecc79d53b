pub mod choropleth;
pub mod config;
pub mod globe;
pub mod legend;
pub mod path;
pub mod picking;
pub mod projection;
pub mod rotation;
pub mod symbology;

pub use choropleth::*;
pub use config::*;
pub use globe::*;
pub use legend::*;
pub use path::*;
pub use picking::*;
pub use projection::*;
pub use rotation::*;
pub use symbology::*;
