pub mod batch;
pub mod cli;
pub mod config;
pub mod pod;
pub mod summary;
