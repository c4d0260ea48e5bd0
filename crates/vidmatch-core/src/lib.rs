pub mod config;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod models;
pub mod orchestrator;
pub mod similarity;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
