//! MissionHub QA CLI Library
//!
//! Command-line front end for checking out a branch of the MissionHub app,
//! pointing it at an API environment and launching it on a simulator or
//! emulator. It also bootstraps QA machines.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing and the [`cli_args::Mode`] list
//! - [`prompt`]: Interactive menus and text input for anything not given as an argument
//! - [`dispatch`]: Runs a mode against the workflow in `mh-qa-core`
//! - [`reporter`]: Prints progress as the workflow runs
//!
//! # Examples
//!
//! ```bash
//! # Interactive mode, every question is asked
//! mh-qa
//!
//! # Nothing asked
//! mh-qa ios develop staging "iPhone X"
//!
//! # Only the branch is asked
//! mh-qa android
//!
//! # Bootstrap a new machine
//! mh-qa setup
//! ```

pub mod cli_args;
pub mod dispatch;
pub mod prompt;
pub mod reporter;
