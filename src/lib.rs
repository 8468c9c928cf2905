//! My Good Movers - Conversational Moving Assistant Backend
//!
//! This crate implements a chatbot service for a moving company: intent
//! routing, FAQ matching over embeddings, multi-turn move estimation, and
//! distance-based cost calculation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
