pub mod casino;
pub mod catalog;
pub mod events;
pub mod normalize;
pub mod outcome;
pub mod rng;
pub mod store;

// Re-export main components
pub use casino::*;
pub use catalog::*;
pub use events::*;
pub use normalize::*;
pub use outcome::*;
pub use rng::*;
pub use store::*;
