//! Chart aggregate: the strike-axis viewport and the gestures that move it.

pub mod entities;
pub mod gesture;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use gesture::*;
pub use services::*;
pub use value_objects::*;
