use std::process::Command;

/// Build identifier reported by `GET /`.
///
/// `ORDER_SERVICE_BUILD` wins (container builds ship without `.git`),
/// then the short commit hash, then `unknown`.
fn build_id() -> String {
    if let Ok(id) = std::env::var("ORDER_SERVICE_BUILD") {
        if !id.trim().is_empty() {
            return id.trim().to_string();
        }
    }

    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    println!("cargo:rustc-env=ORDER_SERVICE_BUILD_ID={}", build_id());
    println!("cargo:rerun-if-env-changed=ORDER_SERVICE_BUILD");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
