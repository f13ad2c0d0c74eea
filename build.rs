//! Build script for the Spotify resolver CLI.
//!
//! Installs the configuration template next to the user's config file so a
//! fresh install has a ready-to-edit example at
//! `~/.config/spotify-resolver/config.example.json`.

use std::{env, fs, path::PathBuf};

/// Copies `config.example.json` into the user's config directory.
///
/// Nothing here is allowed to fail the build: a missing template, a missing
/// home directory or a read-only file system only produce cargo warnings.
/// An existing `config.json` is never touched.
fn main() {
    println!("cargo:rerun-if-changed=config.example.json");

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let template = PathBuf::from(manifest_dir).join("config.example.json");
    if !template.is_file() {
        println!(
            "cargo:warning=config.example.json not found at {}",
            template.display()
        );
        return;
    }

    let Some(mut out_dir) = dirs::home_dir() else {
        return;
    };
    out_dir.push(".config");
    out_dir.push("spotify-resolver");

    let result = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::copy(&template, out_dir.join("config.example.json")));
    if let Err(e) = result {
        println!(
            "cargo:warning=could not install config template into {}: {}",
            out_dir.display(),
            e
        );
    }
}
