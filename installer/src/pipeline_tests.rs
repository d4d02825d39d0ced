//! Unit tests for the fetch pipeline.

use super::*;
use crate::artefact::download::{DownloadError, MockArtefactDownloader};
use crate::artefact::extraction::{ExtractionError, MockArtefactExtractor};
use crate::artefact::sha256_digest::Sha256Digest;
use crate::error::InstallerError;
use crate::test_utils::zip_archive;
use rstest::rstest;

const FAKE_ARCHIVE: &[u8] = b"fake archive content";
const FAKE_EXECUTABLE: &[u8] = b"\x7fELF fake terraform";
const URL: &str = "https://mirror.example/terraform/1.4.6/terraform_1.4.6_linux_amd64.zip";

fn build_root() -> (tempfile::TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 path");
    (temp, path)
}

fn release_for(archive: &[u8]) -> ResolvedRelease {
    ResolvedRelease {
        platform: PlatformKey::new("linux", "x86_64"),
        url: URL.to_owned(),
        expected: Sha256Digest::compute(archive),
        executable_name: "terraform",
    }
}

fn downloader_returning(bytes: &'static [u8]) -> MockArtefactDownloader {
    let mut downloader = MockArtefactDownloader::new();
    downloader
        .expect_download()
        .times(1)
        .returning(move |_| Ok(bytes.to_vec()));
    downloader
}

#[test]
fn happy_path_writes_executable_into_build_dir() {
    let (_temp, root) = build_root();
    let build_dir = root.join("build").join("scripts");
    let downloader = downloader_returning(FAKE_ARCHIVE);
    let mut extractor = MockArtefactExtractor::new();
    extractor
        .expect_extract_executable()
        .withf(|url, archive| url == URL && archive == FAKE_ARCHIVE)
        .times(1)
        .returning(|_, _| Ok(FAKE_EXECUTABLE.to_vec()));

    let outcome = fetch_release_with(release_for(FAKE_ARCHIVE), &build_dir, &downloader, &extractor)
        .expect("fetch succeeds");

    assert_eq!(outcome.executable, build_dir.join("terraform"));
    assert_eq!(
        std::fs::read(&outcome.executable).expect("read back"),
        FAKE_EXECUTABLE
    );
    assert_eq!(outcome.release.url, URL);
}

#[test]
fn real_zip_extractor_unpacks_verified_archive() {
    let (_temp, root) = build_root();
    let build_dir = root.join("build");
    let archive = zip_archive(&[("terraform", FAKE_EXECUTABLE)]);
    let release = release_for(&archive);

    let mut downloader = MockArtefactDownloader::new();
    downloader
        .expect_download()
        .return_once(move |_| Ok(archive));

    let outcome = fetch_release_with(release, &build_dir, &downloader, &ZipExtractor)
        .expect("fetch succeeds");

    assert_eq!(
        std::fs::read(outcome.executable).expect("read back"),
        FAKE_EXECUTABLE
    );
}

#[test]
fn digest_mismatch_writes_nothing() {
    let (_temp, root) = build_root();
    let build_dir = root.join("build");
    let downloader = downloader_returning(b"tampered archive");
    let mut extractor = MockArtefactExtractor::new();
    extractor.expect_extract_executable().never();

    let err = fetch_release_with(release_for(FAKE_ARCHIVE), &build_dir, &downloader, &extractor)
        .expect_err("digest mismatch");

    assert!(
        matches!(err, InstallerError::IntegrityError(_)),
        "unexpected error: {err}"
    );
    assert!(!build_dir.exists(), "build dir must not be created");
}

#[rstest]
#[case::not_found(404)]
#[case::server_error(503)]
fn http_failure_aborts_before_verification(#[case] status: u16) {
    let (_temp, root) = build_root();
    let build_dir = root.join("build");
    let mut downloader = MockArtefactDownloader::new();
    downloader.expect_download().returning(move |url| {
        Err(DownloadError::HttpStatus {
            url: url.to_owned(),
            status,
        })
    });
    let mut extractor = MockArtefactExtractor::new();
    extractor.expect_extract_executable().never();

    let err = fetch_release_with(release_for(FAKE_ARCHIVE), &build_dir, &downloader, &extractor)
        .expect_err("download fails");

    assert!(
        matches!(
            err,
            InstallerError::DownloadFailed(DownloadError::HttpStatus { status: s, .. }) if s == status
        ),
        "unexpected error: {err}"
    );
    assert!(err.to_string().contains(&format!("Code: {status}")));
    assert!(!build_dir.exists());
}

#[test]
fn missing_executable_aborts_install() {
    let (_temp, root) = build_root();
    let build_dir = root.join("build");
    let downloader = downloader_returning(FAKE_ARCHIVE);
    let mut extractor = MockArtefactExtractor::new();
    extractor.expect_extract_executable().returning(|url, _| {
        Err(ExtractionError::ExecutableNotFound {
            url: url.to_owned(),
        })
    });

    let err = fetch_release_with(release_for(FAKE_ARCHIVE), &build_dir, &downloader, &extractor)
        .expect_err("no executable");

    assert!(
        matches!(err, InstallerError::ExecutableNotFound { .. }),
        "unexpected error: {err}"
    );
    assert!(!build_dir.exists());
}

#[test]
fn corrupt_archive_with_matching_digest_is_invalid_archive() {
    let (_temp, root) = build_root();
    let build_dir = root.join("build");
    let downloader = downloader_returning(b"not a zip");

    let err = fetch_release_with(release_for(b"not a zip"), &build_dir, &downloader, &ZipExtractor)
        .expect_err("corrupt archive");

    assert!(
        matches!(err, InstallerError::InvalidArchive { ref url, .. } if url == URL),
        "unexpected error: {err}"
    );
    assert!(!build_dir.exists());
}

#[test]
fn existing_build_dir_is_rejected_after_verification() {
    let (_temp, root) = build_root();
    let build_dir = root.join("build");
    std::fs::create_dir(&build_dir).expect("pre-create");
    let downloader = downloader_returning(FAKE_ARCHIVE);
    let mut extractor = MockArtefactExtractor::new();
    extractor
        .expect_extract_executable()
        .returning(|_, _| Ok(FAKE_EXECUTABLE.to_vec()));

    let err = fetch_release_with(release_for(FAKE_ARCHIVE), &build_dir, &downloader, &extractor)
        .expect_err("destination exists");

    assert!(
        matches!(err, InstallerError::DestinationExists { .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn unsupported_platform_makes_no_network_call() {
    let (_temp, root) = build_root();
    let build_dir = root.join("build");
    let platform = PlatformKey::new("plan9", "mips");
    let config = FetchConfig {
        platform: &platform,
        base_url: "https://mirror.example",
        build_dir: &build_dir,
        timeout: None,
        quiet: false,
    };
    let mut downloader = MockArtefactDownloader::new();
    downloader.expect_download().never();
    let mut extractor = MockArtefactExtractor::new();
    extractor.expect_extract_executable().never();

    let mut stderr = Vec::new();
    let err = fetch_executable_with(&config, &downloader, &extractor, &mut stderr)
        .expect_err("unsupported");

    assert!(
        matches!(err, InstallerError::UnsupportedPlatform { .. }),
        "unexpected error: {err}"
    );
    assert!(err.to_string().contains("plan9/mips"));
    assert!(stderr.is_empty());
}

#[rstest]
#[case::verbose(false, true)]
#[case::quiet(true, false)]
fn resolved_url_is_announced_unless_quiet(#[case] quiet: bool, #[case] announced: bool) {
    let (_temp, root) = build_root();
    let build_dir = root.join("build");
    let platform = PlatformKey::new("linux", "x86_64");
    let config = FetchConfig {
        platform: &platform,
        base_url: "https://mirror.example/",
        build_dir: &build_dir,
        timeout: None,
        quiet,
    };
    let mut downloader = MockArtefactDownloader::new();
    downloader
        .expect_download()
        .withf(|url| url == URL)
        .returning(|url| {
            Err(DownloadError::HttpStatus {
                url: url.to_owned(),
                status: 404,
            })
        });
    let extractor = MockArtefactExtractor::new();

    let mut stderr = Vec::new();
    let result = fetch_executable_with(&config, &downloader, &extractor, &mut stderr);

    assert!(result.is_err());
    let output = String::from_utf8(stderr).expect("UTF-8");
    assert_eq!(output.contains(URL), announced, "stderr: {output}");
}

#[test]
fn stage_names_are_lowercase() {
    let names: Vec<String> = [
        Stage::Resolved,
        Stage::Downloaded,
        Stage::Verified,
        Stage::Extracted,
        Stage::Installed,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    assert_eq!(
        names,
        ["resolved", "downloaded", "verified", "extracted", "installed"]
    );
}
