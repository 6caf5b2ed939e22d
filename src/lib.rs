//! Quillpen - administrative backend of the Quillpen blogging platform.
//!
//! Hosts the scheduled job registry (persisted cron jobs kept in sync with an
//! in-process scheduler), tag administration and admin token handling.

pub mod api;
pub mod app;
pub mod app_info;
pub mod auth;
pub mod boot;
pub mod cli;
pub mod commands;
pub mod config;
pub mod database;
pub mod environment;
pub mod jobs;
pub mod page;
pub mod router;
pub mod setup_tracing;
pub mod tags;
