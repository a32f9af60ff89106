use std::path::PathBuf;
use std::process::Command;

/// Embeds the short git revision as `MASKBRUSH_GIT_HASH` for `--version`.
fn main() {
    let revision = git_output(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".into());
    println!("cargo:rustc-env=MASKBRUSH_GIT_HASH={revision}");

    // Rebuild when HEAD moves; outside a checkout there is nothing to watch.
    if let Some(git_dir) = git_output(&["rev-parse", "--git-dir"]).map(PathBuf::from) {
        for name in ["HEAD", "refs", "packed-refs"] {
            let path = git_dir.join(name);
            if path.exists() {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }
    }
}

fn git_output(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
