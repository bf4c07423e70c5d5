use std::process::Command;
use tracing::{debug, warn};

/// Provides the source-control commit id used as a default parameter
pub trait CommitIdSource {
  fn commit_id(&self) -> Option<String>;
}

/// Asks git for the commit currently checked out
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCommitId;

impl CommitIdSource for GitCommitId {
  fn commit_id(&self) -> Option<String> {
    let output = match Command::new("git").args(["rev-parse", "HEAD"]).output() {
      Ok(output) => output,
      Err(e) => {
        warn!("Could not run git: {e}");
        return None;
      }
    };

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      warn!("git rev-parse HEAD failed: {}", stderr.trim());
      return None;
    }

    let commit = String::from_utf8_lossy(&output.stdout).trim().to_string();
    debug!(commit = %commit, "resolved git commit");
    if commit.is_empty() {
      None
    } else {
      Some(commit)
    }
  }
}

/// A commit id known up front
#[derive(Debug, Default, Clone)]
pub struct FixedCommitId(pub Option<String>);

impl CommitIdSource for FixedCommitId {
  fn commit_id(&self) -> Option<String> {
    self.0.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_fixed_commit_id() {
    assert_eq!(FixedCommitId(Some("abc123".into())).commit_id(), Some("abc123".to_string()));
    assert_eq!(FixedCommitId(None).commit_id(), None);
  }

  #[test]
  fn test_git_commit_id_is_trimmed_when_present() {
    // Depends on the environment; only check the shape of a successful lookup.
    if let Some(commit) = GitCommitId.commit_id() {
      assert_eq!(commit, commit.trim());
      assert!(!commit.is_empty());
    }
  }
}
