//! titanic-tui - A terminal dashboard for the Titanic passenger manifest
//!
//! Loads the cleaned passenger CSV once, then lets the user slice it by
//! port, age and sex while every chart is recomputed from scratch.

pub mod action;
pub mod app;
pub mod component;
pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod services;
pub mod tui;
