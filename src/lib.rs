#[macro_use]
extern crate tracing;

pub mod config;
pub mod dns;
pub mod dns_check;
pub mod notify;
pub mod records;
pub mod state;
pub mod tracker;

#[cfg(test)]
mod testing;
