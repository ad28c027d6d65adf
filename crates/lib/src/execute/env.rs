//! Environment resolution for build steps.

use std::collections::BTreeMap;
use std::path::Path;

use crate::consts::BUILD_ROOT_VAR;
use crate::util::expand::expand;

/// Compute the `NAME=VALUE` environment a step runs with.
///
/// The table starts as `base_env`. Project declarations are applied in key
/// order, then step declarations, so a step may override or reference a
/// project value. References to `BUILD_ROOT` always expand to `build_root`;
/// unknown references expand to the empty string.
///
/// The result is sorted by name.
pub fn resolve_environment(
  build_root: &Path,
  base_env: &BTreeMap<String, String>,
  project_env: &BTreeMap<String, String>,
  step_env: &BTreeMap<String, String>,
) -> Vec<String> {
  let root = build_root.to_string_lossy().into_owned();
  let mut table = base_env.clone();

  for declarations in [project_env, step_env] {
    for (name, raw) in declarations {
      let value = {
        let lookup = |var: &str| {
          if var == BUILD_ROOT_VAR {
            root.clone()
          } else {
            table.get(var).cloned().unwrap_or_default()
          }
        };
        expand(raw, &lookup)
      };
      table.insert(name.clone(), value);
    }
  }

  table.into_iter().map(|(name, value)| format!("{}={}", name, value)).collect()
}
