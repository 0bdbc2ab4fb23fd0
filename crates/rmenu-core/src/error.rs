#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to spawn candidate generator `{command}`: {source}")]
    SourceSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("candidate generator `{command}` exited with {status}")]
    SourceExit {
        command: String,
        status: std::process::ExitStatus,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
