use std::process::Command;

const FALLBACK_VERSION: &str = "dev";

fn main() {
    println!("cargo:rerun-if-env-changed=GIT_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    // Migrations are embedded with include_str!
    println!("cargo:rerun-if-changed=migrations");

    println!("cargo:rustc-env=GIT_VERSION={}", git_version());
}

/// Release builds pass GIT_VERSION explicitly; local builds ask git.
fn git_version() -> String {
    std::env::var("GIT_VERSION")
        .ok()
        .filter(|v| !v.is_empty() && v != FALLBACK_VERSION)
        .or_else(describe_head)
        .unwrap_or_else(|| FALLBACK_VERSION.to_string())
}

fn describe_head() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Some(version).filter(|v| !v.is_empty())
}
