// Build script: refresh `dist/` from `static/` so a plain file server can
// host the generator. The wasm bundle itself is produced by wasm-pack (see
// src/main.rs).
use std::path::Path;
use std::{env, fs, process::Command};

fn main() {
    println!("cargo:rerun-if-changed=static");

    // Only attempt the wasm-pack build when already targeting wasm32.
    let target = env::var("TARGET").unwrap_or_default();
    if target == "wasm32-unknown-unknown" {
        let status = Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web"])
            .status();

        match status {
            Ok(st) if !st.success() => println!("cargo:warning=wasm-pack build failed"),
            Err(_) => println!("cargo:warning=wasm-pack not installed – skipping"),
            _ => {}
        }
    }

    let static_dir = Path::new("static");
    if !static_dir.exists() {
        return;
    }

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        fs::remove_dir_all(out_dir).ok();
    }
    fs::create_dir_all(out_dir).ok();

    let mut options = fs_extra::dir::CopyOptions::new();
    options.content_only = true;
    if let Err(err) = fs_extra::dir::copy(static_dir, out_dir, &options) {
        println!("cargo:warning=copying static assets failed: {err}");
    }
}
