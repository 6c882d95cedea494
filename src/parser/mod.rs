/// The cursor-based DOM parser
pub mod dom;
mod input;

pub use dom::Parser;
