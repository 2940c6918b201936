pub mod analysis;
pub mod enums;
pub mod lab;
pub mod medication;
pub mod recommendation;
pub mod risk;

pub use analysis::*;
pub use enums::*;
pub use lab::*;
pub use medication::*;
pub use recommendation::*;
pub use risk::*;
