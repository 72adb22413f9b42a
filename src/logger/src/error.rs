use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Failed to register the global logger")]
    SetLogger(#[source] log::SetLoggerError),
}
