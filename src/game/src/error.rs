use agent::strategy::SelectionError;
use common::{model::game::GraphError, utility::InputClosed};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Input(#[from] InputClosed),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

impl SessionError {
    /// The player went away (end of input); not a fault of the game itself.
    pub fn is_input_closed(&self) -> bool {
        matches!(
            self,
            SessionError::Input(_) | SessionError::Selection(SelectionError::Input(_))
        )
    }
}
