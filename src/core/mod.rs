pub mod config;
pub mod error;
pub mod types;

pub use config::RunConfig;
pub use error::{DilemmaError, Result};
pub use types::{Behavior, Iteration, Payoff, Strategy};
