//! HTTP service exposing the resource estimator

pub mod api;
pub mod config;
