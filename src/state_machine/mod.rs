mod engine;
mod store;
mod task;

pub use engine::Engine;
pub use store::{Store, StatusCounts};
pub use task::{Note, Status, Task, elapsed_minutes};
