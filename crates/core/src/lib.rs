//! MissionHub QA Core Library
//!
//! This crate provides the core functionality for mh-qa, a command-line
//! assistant that prepares a checkout of the MissionHub mobile app and builds
//! it for the iOS simulator or the Android emulator.
//!
//! # Key Features
//!
//! - **Command Runner**: Structured program invocations with captured output
//! - **Tasks**: Ordered installation steps, each skippable by a check command
//! - **Workflow**: Branch checkout, dependency install and platform builds
//! - **Settings**: Project conventions loaded from an optional YAML file
//! - **Error Handling**: A single error type for all failure modes
//!
//! # Examples
//!
//! Running the dependency tasks:
//!
//! ```no_run
//! use mh_qa_core::config::Settings;
//! use mh_qa_core::execution::SystemCommandRunner;
//! use mh_qa_core::progress::Silent;
//! use mh_qa_core::{setup, tasks};
//!
//! let settings = Settings::default();
//! let outcomes = tasks::run_all(&setup::dependency_tasks(&settings), &SystemCommandRunner, &mut Silent)?;
//! println!("{} tasks processed", outcomes.len());
//! # Ok::<(), mh_qa_core::error::Error>(())
//! ```

pub mod api;
pub mod branches;
pub mod commands;
pub mod config;
pub mod env_file;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod progress;
pub mod setup;
pub mod simulators;
pub mod tasks;
pub mod workflow;
