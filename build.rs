//! This build script copies the `memory.x` file from the crate root into a directory where
//! the linker can always find it at build time, and records the build time as the initial
//! wall-clock reading for the watch.

use std::{env, fs::File, io::Write, path::PathBuf};

fn main() {
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    let target = env::var("TARGET").unwrap();

    // Only the board build needs a linker memory layout
    if target.starts_with("thumbv") {
        File::create(out.join("memory.x"))
            .unwrap()
            .write_all(include_bytes!("memory.x"))
            .unwrap();
        println!("cargo:rustc-link-search={}", out.display());
    }

    // Create rs file with current UTC time
    File::create(out.join("utc.rs"))
        .unwrap()
        .write_fmt(format_args!(
            "const UTC_EPOCH: i64 = {:?};",
            chrono::Utc::now().timestamp()
        ))
        .unwrap();

    // No `rerun-if-changed`: Cargo then re-runs this script whenever any file in
    // the package changes, so every firmware build gets a fresh `UTC_EPOCH`.
}
