pub mod dom;
pub mod rendering;
pub mod services;

pub use dom::{DataAttributeSource, ElementTextTarget};
pub use rendering::CanvasRenderer;
pub use services::{BrowserTimeProvider, ConsoleLogger};
