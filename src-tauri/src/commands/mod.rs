pub mod config;
pub mod documents;
pub mod generation;
pub mod session;
