//! Library exports for the PC catalog service
//!
//! This module exposes internal components for testing and potential library usage.

pub mod config;
pub mod database;
pub mod error;
pub mod handler;
pub mod logging;
pub mod model;
pub mod route;
pub mod static_files;
pub mod validation;
