pub mod completion;
pub mod ticket;
