use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabError {
    #[error("Lab not found: {0}")]
    NotFound(String),

    #[error("Lab code already exists: {0}")]
    DuplicateCode(String),
}
