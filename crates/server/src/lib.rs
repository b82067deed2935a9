pub mod api;

#[cfg(feature = "server")]
pub mod assistant;

#[cfg(feature = "server")]
pub mod auth;

#[cfg(feature = "server")]
pub mod config;

#[cfg(feature = "server")]
pub mod db;

#[cfg(feature = "server")]
pub mod error_convert;

#[cfg(feature = "server")]
pub mod health;

#[cfg(feature = "server")]
pub mod llm;

#[cfg(feature = "server")]
pub mod openapi;

#[cfg(feature = "server")]
pub mod precedent_index;

#[cfg(feature = "server")]
pub mod rate_limit;

#[cfg(feature = "server")]
pub mod repo;

#[cfg(feature = "server")]
pub mod rest;

#[cfg(feature = "server")]
pub mod storage;
