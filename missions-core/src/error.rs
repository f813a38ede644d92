use thiserror::Error;

use crate::tar_create::WRAPPER_DIR;

/// Why an uploaded tarball failed structural validation.
///
/// Every variant renders to a complete sentence suitable for showing to the
/// user who built the archive.
#[derive(Error, Debug)]
pub enum TarCheckError {
    #[error("This does not look like a tar archive we can read: {0}")]
    Unreadable(String),

    #[error("The file \"{0}\" is at the top level of the archive; everything must live inside a directory named \"{WRAPPER_DIR}\"")]
    NotInWrapperDir(String),

    #[error("The archive's wrapper directory is named \"{0}\", but it must be named \"{WRAPPER_DIR}\"")]
    WrongWrapperDir(String),

    #[error("An unexpected entry named \"{0}\" is present in the archive")]
    UnexpectedEntry(String),

    #[error("The file \"{0}\" does not have the contents we expected")]
    WrongContents(String),

    #[error("The file \"{0}\" is missing from the archive")]
    MissingFile(String),
}
