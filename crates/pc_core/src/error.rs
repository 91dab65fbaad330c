use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    AgentNotFound(u32),
    IllegalTransition { from: &'static str, to: &'static str },
    EmptyTimeline,
    InvalidParameter(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CoreError::AgentNotFound(id) => write!(f, "Agent not found: {}", id),
            CoreError::IllegalTransition { from, to } => {
                write!(f, "Illegal timeline transition: {} -> {}", from, to)
            }
            CoreError::EmptyTimeline => write!(f, "Timeline has no recorded frames"),
            CoreError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for CoreError {}

pub type Result<T> = std::result::Result<T, CoreError>;
