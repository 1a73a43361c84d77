//! Chart aggregate: options, the resolved chart, layout services and the scene.

pub mod entities;
pub mod options;
pub mod scene;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use options::*;
pub use value_objects::*;
