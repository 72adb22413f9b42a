use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Failed to instantiate threadpool")]
    BuildThreadPool(#[source] rayon::ThreadPoolBuildError),

    #[error("Invalid number of threads. At least one thread is required")]
    InvalidThreads,

    #[error("Invalid chunk size. Each chunk must contain at least one hypothesis")]
    InvalidChunkSize,
}
