use derive_more::From;
use orion_error::{ErrorCode, StructError, UvsReason};

#[derive(Debug, Clone, PartialEq, thiserror::Error, From)]
pub enum GenReason {
    #[error("generator configuration error")]
    Config,
    #[error("reference data error")]
    Catalog,
    #[error("{0}")]
    Uvs(UvsReason),
}

impl ErrorCode for GenReason {
    fn error_code(&self) -> i32 {
        match self {
            Self::Config => 2001,
            Self::Catalog => 2002,
            Self::Uvs(u) => u.error_code(),
        }
    }
}

pub type GenError = StructError<GenReason>;
pub type GenResult<T> = Result<T, GenError>;
