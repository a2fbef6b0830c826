use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("process {0} no longer exists")]
    NoSuchProcess(u32),
    #[error("no disk mounted at {0}")]
    DiskNotFound(String),
    #[error("battery sensor error: {0}")]
    Battery(String),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
