//! Tests for the extraction-mission reference tarball.

use std::io::Read;

use flate2::read::GzDecoder;
use missions_core::tar_unpack::{contents_we_want, tarball_bytes, FILE_WE_WANT, TARBALL_NAME};
use tar::Archive;

#[test]
fn tarball_name_matches_its_compression() {
    assert!(TARBALL_NAME.ends_with(".tar.gz"));
    assert!(tarball_bytes().starts_with(&[0x1f, 0x8b]));
}

#[test]
fn tarball_is_stable_across_calls() {
    assert_eq!(tarball_bytes(), tarball_bytes());
}

#[test]
fn tarball_contains_the_file_we_want() {
    let mut archive = Archive::new(GzDecoder::new(tarball_bytes()));
    let mut found = false;

    for entry in archive.entries().unwrap() {
        let mut entry = entry.unwrap();
        let path = entry.path().unwrap().to_string_lossy().to_string();
        if path == FILE_WE_WANT {
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents).unwrap();
            assert_eq!(contents, contents_we_want());
            found = true;
        }
    }

    assert!(found, "{FILE_WE_WANT} not present in the reference tarball");
}

#[test]
fn every_entry_lives_under_the_release_dir() {
    let mut archive = Archive::new(GzDecoder::new(tarball_bytes()));
    for entry in archive.entries().unwrap() {
        let entry = entry.unwrap();
        let path = entry.path().unwrap().to_string_lossy().to_string();
        assert!(
            path.starts_with("ghello-0.4"),
            "unexpected entry path {path}"
        );
    }
}

#[test]
fn the_wanted_file_is_nonempty_c_source() {
    let contents = contents_we_want();
    assert!(!contents.is_empty());
    assert!(std::str::from_utf8(contents).unwrap().contains("main"));
}
