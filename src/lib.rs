pub mod config;
pub mod content;
pub mod cooldown;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod hint;
pub mod logging;
pub mod paths;
pub mod quiz;
pub mod session;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod testing;
