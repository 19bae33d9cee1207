use std::process::Command;

/// Embeds the short commit hash shown by `reposcope --version`.
///
/// Source tarballs have no `.git`; packagers set `REPOSCOPE_GIT_HASH` instead.
fn main() {
    let from_env = std::env::var("REPOSCOPE_GIT_HASH")
        .ok()
        .filter(|s| !s.trim().is_empty());

    let git_hash = from_env
        .or_else(|| {
            Command::new("git")
                .args(["rev-parse", "--short", "HEAD"])
                .output()
                .ok()
                .filter(|output| output.status.success())
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rerun-if-env-changed=REPOSCOPE_GIT_HASH");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
