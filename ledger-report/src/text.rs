use anyhow::{Context, Result};
use std::path::Path;

pub fn save_report(path: impl AsRef<Path>, text: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("saved analysis to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.txt");
        save_report(&path, "=== Steam Transaction Analysis ===\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "=== Steam Transaction Analysis ===\n"
        );
    }

    #[test]
    fn test_unwritable_path() {
        let err = save_report("/nonexistent/dir/analysis.txt", "x").unwrap_err();
        assert!(err.to_string().starts_with("writing /nonexistent/dir/analysis.txt"));
    }
}
