//! Shared test utilities for the multitool workspace.
//!
//! This crate provides git fixtures for the commit suggestion tests. It is a
//! dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] - git repository fixtures at three realism levels

pub mod git;
