//! Build errors for the machine builder.

use crate::core::MachineError;
use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("initial state not specified. Call .initial(id) before .build()")]
    MissingInitialState,

    /// A recorded registration was rejected by the machine.
    #[error(transparent)]
    Machine(#[from] MachineError),
}
