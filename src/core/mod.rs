pub mod commands;
pub mod redirect;
pub mod state;
pub mod tokenizer;
