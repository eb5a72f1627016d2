//! Runs the binary against a `LibraryFixture` with an isolated config dir.

use assert_cmd::Command;
use qvkit::test_utils::LibraryFixture;

/// The binary, pointed at the fixture's library.
pub fn cmd(fx: &LibraryFixture) -> Command {
    let mut cmd = bare_cmd(fx);
    cmd.arg("--library").arg(fx.root());
    cmd
}

/// The binary without `--library`.
pub fn bare_cmd(fx: &LibraryFixture) -> Command {
    let mut cmd = Command::cargo_bin("qvkit").unwrap();
    cmd.env_remove("QVKIT_LIBRARY")
        .env_remove("RUST_LOG")
        .env("QVKIT_CONFIG_DIR", fx.scratch("config"));
    cmd
}
