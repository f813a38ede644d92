//! The tarball-creation mission: fixture files the user is asked to pack,
//! and the validator that checks the archive they upload.

use std::io::Read;

use flate2::read::GzDecoder;
use tar::{Archive, EntryType};

use crate::error::TarCheckError;

/// The directory every file in the uploaded archive must live under.
pub const WRAPPER_DIR: &str = "myproject-0.1";

const HELLO_C: &[u8] = b"#include <stdio.h>\n\nint main(void)\n{\n    printf(\"Hello, world!\\n\");\n    return 0;\n}\n";

const MAKEFILE: &[u8] =
    b"all: hello\n\nhello: hello.c\n\tcc -o hello hello.c\n\nclean:\n\trm -f hello\n";

/// The files the user downloads and is asked to pack, in the order we show
/// them. Lookup is a linear scan; the set is two entries.
pub const EXPECTED_FILES: &[(&str, &[u8])] = &[("hello.c", HELLO_C), ("Makefile", MAKEFILE)];

/// Names of the fixture files, for listing in the mission page.
pub fn filenames() -> Vec<String> {
    EXPECTED_FILES
        .iter()
        .map(|(name, _)| name.to_string())
        .collect()
}

/// The bytes of a fixture file, or None if the name is not one of ours.
pub fn file_bytes(name: &str) -> Option<&'static [u8]> {
    EXPECTED_FILES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, bytes)| *bytes)
}

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Validate the structure and contents of an uploaded tarball.
///
/// The archive may be gzipped or plain tar (detected from the magic bytes).
/// To pass, it must contain exactly the files in [`EXPECTED_FILES`], each
/// directly inside [`WRAPPER_DIR`] with byte-identical contents. A directory
/// entry for the wrapper dir itself is allowed; anything else fails with a
/// [`TarCheckError`] describing what was wrong.
pub fn check_tarball(data: &[u8]) -> Result<(), TarCheckError> {
    let reader: Box<dyn Read + '_> = if data.starts_with(&GZIP_MAGIC) {
        Box::new(GzDecoder::new(data))
    } else {
        Box::new(data)
    };

    let mut archive = Archive::new(reader);
    let entries = archive
        .entries()
        .map_err(|e| TarCheckError::Unreadable(e.to_string()))?;

    let mut seen = vec![false; EXPECTED_FILES.len()];

    for entry in entries {
        let mut entry = entry.map_err(|e| TarCheckError::Unreadable(e.to_string()))?;

        let entry_type = entry.header().entry_type();
        // Extended pax headers carry metadata, not user files.
        if matches!(
            entry_type,
            EntryType::XHeader | EntryType::XGlobalHeader | EntryType::GNULongName
        ) {
            continue;
        }

        let name = String::from_utf8_lossy(&entry.path_bytes())
            .trim_end_matches('/')
            .to_string();

        if entry_type == EntryType::Directory {
            if name == WRAPPER_DIR {
                continue;
            }
            return Err(TarCheckError::UnexpectedEntry(name));
        }

        if entry_type != EntryType::Regular {
            return Err(TarCheckError::UnexpectedEntry(name));
        }

        let Some((dir, filename)) = name.split_once('/') else {
            return Err(TarCheckError::NotInWrapperDir(name));
        };
        if dir != WRAPPER_DIR {
            return Err(TarCheckError::WrongWrapperDir(dir.to_string()));
        }
        if filename.contains('/') {
            return Err(TarCheckError::UnexpectedEntry(name));
        }

        let Some(index) = EXPECTED_FILES.iter().position(|(n, _)| *n == filename) else {
            return Err(TarCheckError::UnexpectedEntry(name));
        };

        let mut contents = Vec::new();
        entry
            .read_to_end(&mut contents)
            .map_err(|e| TarCheckError::Unreadable(e.to_string()))?;
        if contents != EXPECTED_FILES[index].1 {
            return Err(TarCheckError::WrongContents(filename.to_string()));
        }
        seen[index] = true;
    }

    for (index, present) in seen.iter().enumerate() {
        if !present {
            return Err(TarCheckError::MissingFile(
                EXPECTED_FILES[index].0.to_string(),
            ));
        }
    }

    Ok(())
}
