use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    #[error("every login field must be filled in")]
    EmptyField,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown panel `{0}`")]
pub struct UnknownPanelError(pub String);
