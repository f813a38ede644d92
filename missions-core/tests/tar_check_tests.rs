//! Structural validation tests for uploaded tarballs.
//!
//! Each test assembles an archive in memory with `tar::Builder` and feeds it
//! through the validator, covering one rule per test.

use flate2::write::GzEncoder;
use flate2::Compression;
use missions_core::tar_create::{check_tarball, EXPECTED_FILES, WRAPPER_DIR};
use missions_core::TarCheckError;
use tar::{Builder, EntryType, Header};

/// An entry to pack: path plus contents, or a bare directory.
enum Entry<'a> {
    File(&'a str, &'a [u8]),
    Dir(&'a str),
}

fn build_tar(entries: &[Entry]) -> Vec<u8> {
    let mut builder = Builder::new(Vec::new());
    for entry in entries {
        match entry {
            Entry::File(path, contents) => {
                let mut header = Header::new_gnu();
                header.set_entry_type(EntryType::Regular);
                header.set_size(contents.len() as u64);
                header.set_mode(0o644);
                header.set_cksum();
                builder.append_data(&mut header, *path, *contents).unwrap();
            }
            Entry::Dir(path) => {
                let mut header = Header::new_gnu();
                header.set_entry_type(EntryType::Directory);
                header.set_size(0);
                header.set_mode(0o755);
                header.set_cksum();
                builder
                    .append_data(&mut header, *path, std::io::empty())
                    .unwrap();
            }
        }
    }
    builder.into_inner().unwrap()
}

fn gzip(data: &[u8]) -> Vec<u8> {
    use std::io::Write;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// A correct submission: wrapper dir entry plus every expected file.
fn good_entries() -> Vec<Entry<'static>> {
    vec![
        Entry::Dir("myproject-0.1/"),
        Entry::File("myproject-0.1/hello.c", EXPECTED_FILES[0].1),
        Entry::File("myproject-0.1/Makefile", EXPECTED_FILES[1].1),
    ]
}

#[test]
fn accepts_a_correct_gzipped_tarball() {
    let data = gzip(&build_tar(&good_entries()));
    check_tarball(&data).unwrap();
}

#[test]
fn accepts_a_correct_plain_tarball() {
    let data = build_tar(&good_entries());
    check_tarball(&data).unwrap();
}

#[test]
fn accepts_an_archive_without_an_explicit_dir_entry() {
    let mut entries = good_entries();
    entries.remove(0);
    let data = gzip(&build_tar(&entries));
    check_tarball(&data).unwrap();
}

#[test]
fn rejects_garbage_bytes() {
    let err = check_tarball(b"this is not a tarball at all, sorry").unwrap_err();
    assert!(matches!(err, TarCheckError::Unreadable(_)));
}

#[test]
fn rejects_truncated_gzip() {
    let mut data = gzip(&build_tar(&good_entries()));
    data.truncate(data.len() / 2);
    let err = check_tarball(&data).unwrap_err();
    assert!(matches!(err, TarCheckError::Unreadable(_)));
}

#[test]
fn rejects_a_file_outside_the_wrapper_dir() {
    let mut entries = good_entries();
    entries.push(Entry::File("stray.txt", b"oops"));
    let err = check_tarball(&gzip(&build_tar(&entries))).unwrap_err();
    match err {
        TarCheckError::NotInWrapperDir(name) => assert_eq!(name, "stray.txt"),
        other => panic!("expected NotInWrapperDir, got {other:?}"),
    }
}

#[test]
fn rejects_a_misnamed_wrapper_dir() {
    let (hello, makefile) = (EXPECTED_FILES[0].1, EXPECTED_FILES[1].1);
    let entries = [
        Entry::File("myproject/hello.c", hello),
        Entry::File("myproject/Makefile", makefile),
    ];
    let err = check_tarball(&gzip(&build_tar(&entries))).unwrap_err();
    match err {
        TarCheckError::WrongWrapperDir(name) => assert_eq!(name, "myproject"),
        other => panic!("expected WrongWrapperDir, got {other:?}"),
    }
    let message = format!(
        "{}",
        TarCheckError::WrongWrapperDir("myproject".to_string())
    );
    assert!(message.contains(WRAPPER_DIR));
}

#[test]
fn rejects_an_unexpected_extra_file() {
    let mut entries = good_entries();
    entries.push(Entry::File("myproject-0.1/extra.txt", b"surprise"));
    let err = check_tarball(&gzip(&build_tar(&entries))).unwrap_err();
    match err {
        TarCheckError::UnexpectedEntry(name) => assert_eq!(name, "myproject-0.1/extra.txt"),
        other => panic!("expected UnexpectedEntry, got {other:?}"),
    }
}

#[test]
fn rejects_a_nested_subdirectory() {
    let mut entries = good_entries();
    entries.push(Entry::File("myproject-0.1/src/deep.c", b"int x;"));
    let err = check_tarball(&gzip(&build_tar(&entries))).unwrap_err();
    assert!(matches!(err, TarCheckError::UnexpectedEntry(_)));
}

#[test]
fn rejects_wrong_file_contents() {
    let entries = [
        Entry::File("myproject-0.1/hello.c", b"int main() { return 1; }\n"),
        Entry::File("myproject-0.1/Makefile", EXPECTED_FILES[1].1),
    ];
    let err = check_tarball(&gzip(&build_tar(&entries))).unwrap_err();
    match err {
        TarCheckError::WrongContents(name) => assert_eq!(name, "hello.c"),
        other => panic!("expected WrongContents, got {other:?}"),
    }
}

#[test]
fn rejects_a_missing_file() {
    let entries = [
        Entry::Dir("myproject-0.1/"),
        Entry::File("myproject-0.1/hello.c", EXPECTED_FILES[0].1),
    ];
    let err = check_tarball(&gzip(&build_tar(&entries))).unwrap_err();
    match err {
        TarCheckError::MissingFile(name) => assert_eq!(name, "Makefile"),
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn rejects_an_empty_archive() {
    let err = check_tarball(&gzip(&build_tar(&[]))).unwrap_err();
    assert!(matches!(err, TarCheckError::MissingFile(_)));
}

#[test]
fn error_messages_read_as_sentences() {
    let err = check_tarball(&gzip(&build_tar(&[Entry::File("readme.txt", b"hi")]))).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("readme.txt"));
    assert!(message.contains(WRAPPER_DIR));
}
