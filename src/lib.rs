#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod markdown;
pub mod pages;
pub mod render;
pub mod sitemap;
pub mod wiki;
