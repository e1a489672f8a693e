pub mod api;
pub mod config;
pub mod controller;
pub mod filter;
pub mod generator;
pub mod orchestrator;
pub mod session;
pub mod store;
pub mod ui;
pub mod view;

#[cfg(test)]
pub mod test_support;
