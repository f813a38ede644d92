//! The tarball-extraction mission: a reference tarball the user downloads,
//! and the one file inside it they must extract and upload back.

use std::sync::LazyLock;

use flate2::write::GzEncoder;
use flate2::Compression;
use tar::{Builder, EntryType, Header};

/// Filename the reference tarball is served under.
pub const TARBALL_NAME: &str = "ghello-0.4.tar.gz";

/// The path inside the tarball whose file the user must upload back.
pub const FILE_WE_WANT: &str = "ghello-0.4/ghello.c";

const GHELLO_C: &[u8] = b"#include <stdio.h>\n\n/* A greeting, with feeling. */\nint main(void)\n{\n    printf(\"Greetings, hello world enthusiasts!\\n\");\n    return 0;\n}\n";

const GHELLO_MAKEFILE: &[u8] =
    b"all: ghello\n\nghello: ghello.c\n\tcc -o ghello ghello.c\n\nclean:\n\trm -f ghello\n";

const GHELLO_README: &[u8] = b"ghello 0.4\n\nA tiny program that says hello with enthusiasm.\nBuild it with `make`, then run ./ghello.\n";

static TARBALL: LazyLock<Vec<u8>> = LazyLock::new(build_tarball);

/// The reference tarball, built once per process. Headers carry fixed
/// metadata so the bytes are stable across runs.
pub fn tarball_bytes() -> &'static [u8] {
    &TARBALL
}

/// The exact bytes the user must upload to complete the mission.
pub fn contents_we_want() -> &'static [u8] {
    GHELLO_C
}

fn file_header(size: u64) -> Header {
    let mut header = Header::new_gnu();
    header.set_entry_type(EntryType::Regular);
    header.set_size(size);
    header.set_mode(0o644);
    header.set_mtime(0);
    header.set_cksum();
    header
}

fn build_tarball() -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = Builder::new(encoder);

    let mut dir_header = Header::new_gnu();
    dir_header.set_entry_type(EntryType::Directory);
    dir_header.set_size(0);
    dir_header.set_mode(0o755);
    dir_header.set_mtime(0);
    dir_header.set_cksum();
    builder
        .append_data(&mut dir_header, "ghello-0.4/", std::io::empty())
        .expect("in-memory tar write cannot fail");

    let files: &[(&str, &[u8])] = &[
        (FILE_WE_WANT, GHELLO_C),
        ("ghello-0.4/Makefile", GHELLO_MAKEFILE),
        ("ghello-0.4/README", GHELLO_README),
    ];
    for (path, contents) in files {
        let mut header = file_header(contents.len() as u64);
        builder
            .append_data(&mut header, path, *contents)
            .expect("in-memory tar write cannot fail");
    }

    let encoder = builder
        .into_inner()
        .expect("in-memory tar finish cannot fail");
    encoder.finish().expect("in-memory gzip finish cannot fail")
}
