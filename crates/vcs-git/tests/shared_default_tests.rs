//! The process-wide default configuration. Kept to a single test because the
//! default can only be installed once per process.

use std::path::PathBuf;
use std::sync::Arc;

use vcs_git::{Configuration, RepositoryHandle};

#[test]
fn test_install_default_once_then_shared() {
    let custom = Configuration {
        executable_path: PathBuf::from("/opt/custom/git"),
        sign_commits: true,
        sign_commit_identity: "KEY".into(),
        ..Configuration::default()
    };
    Configuration::install_default(custom).unwrap();

    let rejected = Configuration::install_default(Configuration::default()).unwrap_err();
    assert_eq!(rejected.executable_path, PathBuf::from("git"));

    let first = RepositoryHandle::new("/tmp/a");
    let second = RepositoryHandle::new("/tmp/b");
    assert_eq!(first.config().executable_path, PathBuf::from("/opt/custom/git"));
    assert_eq!(first.config().commit_signing(), Some("KEY"));
    assert!(Arc::ptr_eq(
        &Configuration::shared_default(),
        &Configuration::shared_default()
    ));
    assert_eq!(second.path(), std::path::Path::new("/tmp/b"));
}
