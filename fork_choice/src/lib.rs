pub mod error;
pub mod handlers;
pub mod helpers;
pub mod justification;
pub mod store;

pub use error::Error;
pub use handlers::*;
pub use helpers::*;
pub use justification::*;
pub use store::*;
