//! Runs the checks the CI runs: `cargo run -p ci -- [format|clippy|test|doc]`.
//! Without arguments every check runs.

use xshell::{cmd, Shell};

bitflags::bitflags! {
    /// The checks to run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Check: u32 {
        /// `cargo fmt --check`.
        const FORMAT = 0b0001;
        /// `cargo clippy` with warnings denied.
        const CLIPPY = 0b0010;
        /// The workspace tests.
        const TEST = 0b0100;
        /// The docs, with warnings denied.
        const DOC = 0b1000;
    }
}

/// Clippy lints the crate is held to on top of the manifest lints.
const CLIPPY_FLAGS: [&str; 2] = ["-Dwarnings", "-Aclippy::type_complexity"];

fn main() {
    let what_to_run = match std::env::args().nth(1).as_deref() {
        Some("format") => Check::FORMAT,
        Some("clippy") => Check::CLIPPY,
        Some("test") => Check::TEST,
        Some("doc") => Check::DOC,
        Some(other) => {
            eprintln!("Unknown check `{other}`, expected format, clippy, test or doc.");
            std::process::exit(1);
        }
        None => Check::all(),
    };

    let sh = Shell::new().expect("could not create a shell");

    if what_to_run.contains(Check::FORMAT) {
        cmd!(sh, "cargo fmt --all -- --check")
            .run()
            .expect("Please run `cargo fmt --all` to format your code.");
    }

    if what_to_run.contains(Check::CLIPPY) {
        cmd!(
            sh,
            "cargo clippy --workspace --all-targets --all-features -- {CLIPPY_FLAGS...}"
        )
        .run()
        .expect("Please fix clippy errors in output above.");
    }

    if what_to_run.contains(Check::TEST) {
        cmd!(sh, "cargo test --workspace --lib --bins --tests")
            .run()
            .expect("Please fix failing tests in output above.");
    }

    if what_to_run.contains(Check::DOC) {
        cmd!(sh, "cargo doc --workspace --all-features --no-deps --document-private-items")
            .env("RUSTDOCFLAGS", "-D warnings")
            .run()
            .expect("Please fix doc warnings in output above.");
    }
}
