//! The CMF message layer: an ordered, schema-free sequence of tagged fields, written
//! with [`builder::MessageBuilder`] and read back with [`parser::MessageParser`].

pub mod builder;
pub mod parser;

pub use builder::{MessageBuilder, Sink};
pub use parser::{MessageParser, ParseEvent};
