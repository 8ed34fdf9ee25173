//! Pure game logic and configuration for the EchoChamber moderation game.
//!
//! This crate owns the state transition engine: the pure function that
//! takes a run state, a post, and a chosen action and produces the next
//! state plus an ending determination. It performs no I/O; persistence
//! of the resulting state and leaderboard record is the caller's job.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `echochamber-config.yaml`
//!   into strongly-typed structs.
//! - [`engine`] -- [`apply_action`], the transition engine, plus its
//!   [`Transition`] result and [`EngineError`].
//!
//! [`apply_action`]: engine::apply_action
//! [`Transition`]: engine::Transition
//! [`EngineError`]: engine::EngineError

pub mod config;
pub mod engine;
