pub mod completion;

pub use completion::CompletionService;
