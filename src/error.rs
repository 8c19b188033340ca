use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the windowed shell. The animation core itself cannot fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create pixel surface: {0}")]
    Surface(#[from] pixels::Error),
    #[error("failed to read font {}: {source}", .path.display())]
    FontIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a usable TrueType/OpenType font", .path.display())]
    FontParse { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
