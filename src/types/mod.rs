//! Data types shared by measurement and rendering.

mod bounds;
mod schema;
mod style;

pub use bounds::*;
pub use schema::*;
pub use style::*;
