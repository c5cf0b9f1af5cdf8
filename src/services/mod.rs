pub mod llm;
pub mod parser;
