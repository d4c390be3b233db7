use std::path::{Path, PathBuf};

/// Expand a leading `~/` in a configured store path to the user's home
/// directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn absolute_and_relative_paths_are_untouched() {
    for p in ["/var/lib/tvmaze.db", "tvmaze.db", "~user/x.db"] {
      assert_eq!(expand_tilde(Path::new(p)), PathBuf::from(p));
    }
  }

  #[test]
  fn leading_tilde_is_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/.local/share/tvmaze.db")),
      PathBuf::from(home).join(".local/share/tvmaze.db"),
    );
  }
}
