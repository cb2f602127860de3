//! the crate noc_dse drives design space exploration of the NoC of DNN accelerators.
//! there are 4 parts in the crate:
//!
//! - explorer: builds one configuration per evaluation point and hands it to the cost engine.
//! - settings: the run settings, merged from toml files and command line overrides.
//! - dse_result: the result document written to the output folder.
//! - cmd_args: the command line.
//!
//!

pub mod cmd_args;
pub mod dse_result;
pub mod error;
pub mod explorer;
pub mod settings;

pub use dse_result::DseResult;
pub use error::DseError;
pub use explorer::{Explorer, RunOutcome};
pub use settings::Settings;
