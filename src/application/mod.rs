pub mod balance;
pub mod engine;
