use automat_lib::platform::paths::DataLayout;

use crate::output::print_stat;

pub fn cmd_info(layout: &DataLayout) {
  println!("automat v{}", env!("CARGO_PKG_VERSION"));
  println!();
  print_stat("Root", &layout.root().display().to_string());
  print_stat("Projects", &layout.projects_dir().display().to_string());
  print_stat("Builds", &layout.builds_dir().display().to_string());
  print_stat("Records", &layout.records_dir().display().to_string());
}
