pub mod error;
pub mod event;
pub mod machine;
pub mod model;

pub use error::{StateError, StateResult};
pub use event::{CursorEvent, StateTransition};
pub use machine::CursorLockMachine;
pub use model::CursorMode;
