mod engine;
mod tables;

pub use engine::Checker;
pub use tables::TableListParser;
