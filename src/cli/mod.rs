pub mod batch;
pub mod config;
pub mod dashboard;
pub mod print;
pub mod run;
