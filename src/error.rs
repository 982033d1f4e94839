use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("cannot read directory {}", dir.display())]
    Discovery {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file name {name:?} is not valid UTF-8")]
    NonUtf8Name { name: OsString },

    #[error("cannot read source file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("source file {} is not valid UTF-8", path.display())]
    Decode { path: PathBuf },

    #[error("source file {name:?} does not follow the NN_name.md naming convention")]
    MalformedName { name: String },

    #[error("output file {} does not exist", path.display())]
    MissingOutput { path: PathBuf },

    #[error("cannot write output file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AssembleError>;
