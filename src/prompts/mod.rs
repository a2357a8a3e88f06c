pub mod matcher;
mod pool;

pub use pool::PromptPool;
