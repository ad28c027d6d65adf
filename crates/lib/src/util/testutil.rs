//! Test utilities for automat-lib.
//!
//! Cross-platform command vectors for tests that run real processes.

fn owned(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

/// Command that runs a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> Vec<String> {
  owned(&["/bin/sh", "-c", script])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> Vec<String> {
  owned(&["cmd.exe", "/C", script])
}

/// Command that writes the value of an environment variable into `file`.
#[cfg(unix)]
pub fn write_env_to(var: &str, file: &str) -> Vec<String> {
  shell_cmd(&format!("printf '%s' \"${}\" > {}", var, file))
}

#[cfg(windows)]
pub fn write_env_to(var: &str, file: &str) -> Vec<String> {
  shell_cmd(&format!("echo %{}%> {}", var, file))
}

/// Command that creates an empty marker file in the current directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> Vec<String> {
  owned(&["/usr/bin/touch", filename])
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> Vec<String> {
  owned(&[
    "powershell.exe",
    "-NoProfile",
    "-Command",
    &format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
  ])
}

/// Command that exits with the given status.
pub fn exit_with(code: i32) -> Vec<String> {
  shell_cmd(&format!("exit {}", code))
}

/// Minimal environment that lets a shell start.
pub fn base_env() -> std::collections::BTreeMap<String, String> {
  std::env::vars().filter(|(k, _)| k == "PATH" || k == "SYSTEMROOT").collect()
}
