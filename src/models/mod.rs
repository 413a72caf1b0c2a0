pub mod error;
pub mod level;
pub mod user;
pub mod event;

pub use error::*;
pub use level::*;
pub use user::*;
pub use event::*;
