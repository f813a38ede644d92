pub mod error;
pub mod tar_create;
pub mod tar_unpack;

pub use error::TarCheckError;
pub use tar_create::{check_tarball, WRAPPER_DIR};
pub use tar_unpack::{FILE_WE_WANT, TARBALL_NAME};
