pub mod apiclient;
pub mod cli;
pub mod combine;
pub mod config;
pub mod errors;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod utils;
