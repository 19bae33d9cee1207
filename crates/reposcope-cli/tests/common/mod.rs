//! Shared test utilities for reposcope-cli integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;

/// Get a Command for the reposcope binary, isolated from the caller's
/// environment: no token, no colors, and a config path that does not exist
/// (so built-in defaults apply).
///
/// # Panics
///
/// Panics if the reposcope binary cannot be found.
#[allow(deprecated)]
pub fn reposcope_cmd(scratch: &Path) -> Command {
    let mut cmd = Command::cargo_bin("reposcope").expect("reposcope binary should exist");
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("REPOSCOPE_VERBOSE")
        .env_remove("REPOSCOPE_QUIET")
        .env("REPOSCOPE_CONFIG", scratch.join("missing-config.yaml"))
        .env("NO_COLOR", "1");
    cmd
}

/// Write `content` at `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write fixture file");
}

/// A small Next.js checkout with Tailwind, Docker and an npm lockfile.
pub fn create_next_app(root: &Path) {
    write_file(
        root,
        "package.json",
        r#"{
  "name": "storefront",
  "dependencies": {"next": "^14.2.3", "react": "^18.3.1", "tailwindcss": "^3.4.1"},
  "devDependencies": {"typescript": "^5.4.5", "eslint": "^8.57.0"}
}"#,
    );
    write_file(root, "package-lock.json", "{}");
    write_file(root, "tailwind.config.js", "module.exports = { content: [] }");
    write_file(root, "Dockerfile", "FROM node:20-alpine\n");
    write_file(root, "src/app/page.tsx", "export default function Page() { return null }");
    write_file(root, "node_modules/next/index.js", "module.exports = {}");
}
