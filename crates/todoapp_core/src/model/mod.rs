mod filter;
mod task;

pub use filter::FilterMode;
pub use task::{IdGenerator, Task, TaskId};
