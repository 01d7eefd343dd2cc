use anyhow::{Context, Result, bail};
use log::{debug, info, trace};
use std::{path::Path, process::Command};

use crate::types::Package;

/// Reads the package manifest in `manifest_dir` by running
/// `swift package dump-package` and decoding its JSON output.
pub fn read_manifest(manifest_dir: &Path, swift_exec_path: &Path) -> Result<Package> {
    info!("Reading package manifest in {}", manifest_dir.display());
    debug!("Invoking {} package dump-package", swift_exec_path.display());

    let output = Command::new(swift_exec_path)
        .args(["package", "dump-package"])
        .current_dir(manifest_dir)
        .output()
        .with_context(|| format!("Failed to run {}", swift_exec_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "{} package dump-package failed ({}): {}",
            swift_exec_path.display(),
            output.status,
            stderr.trim()
        );
    }

    let stdout = String::from_utf8(output.stdout).context("Manifest dump is not valid UTF-8")?;
    if stdout.trim().is_empty() {
        bail!("{} package dump-package produced no output", swift_exec_path.display());
    }
    trace!("Manifest dump: {}", stdout);

    decode_manifest(&stdout)
}

/// Decodes the JSON produced by `swift package dump-package`.
pub fn decode_manifest(json: &str) -> Result<Package> {
    let package: Package =
        serde_json::from_str(json).context("Failed to decode package manifest")?;
    debug!("Decoded package {} with {} targets", package.name, package.targets.len());
    Ok(package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dependency, TargetKind};

    const DUMP: &str = r#"{
  "name": "Example",
  "toolsVersion": {"_version": "5.9.0"},
  "products": [],
  "targets": [
    {
      "name": "App",
      "type": "executable",
      "path": null,
      "exclude": [],
      "resources": [],
      "settings": [],
      "dependencies": [
        {"byName": ["Model", null]},
        {"product": ["ArgumentParser", "swift-argument-parser", null, null]}
      ]
    },
    {
      "name": "Model",
      "type": "regular",
      "path": "Sources/Core/Model",
      "exclude": ["Generated"],
      "dependencies": []
    },
    {
      "name": "ModelTests",
      "type": "test",
      "dependencies": [{"target": ["Model", null]}]
    }
  ]
}"#;

    #[test]
    fn test_decode_manifest() {
        let package = decode_manifest(DUMP).unwrap();
        assert_eq!(package.name, "Example");
        assert_eq!(package.targets.len(), 3);

        let app = package.target("App").unwrap();
        assert_eq!(app.kind, TargetKind::Executable);
        assert_eq!(
            app.dependencies,
            vec![Dependency::local("Model"), Dependency::local("ArgumentParser")]
        );
        assert_eq!(app.dependencies[1].package_name(), Some("swift-argument-parser"));

        let model = package.target("Model").unwrap();
        assert_eq!(model.path.as_deref(), Some("Sources/Core/Model"));
        assert_eq!(model.exclude, vec!["Generated".to_string()]);

        let tests = package.target("ModelTests").unwrap();
        assert_eq!(tests.kind, TargetKind::Test);
        assert!(tests.exclude.is_empty());
        assert!(tests.depends_on("Model"));
    }

    #[test]
    fn test_decode_manifest_malformed_dependency_fails() {
        let json = r#"{
  "name": "Broken",
  "targets": [{"name": "A", "type": "regular", "dependencies": [{"product": ["Only"]}]}]
}"#;
        assert!(decode_manifest(json).is_err());
    }

    #[test]
    fn test_decode_manifest_not_json_fails() {
        assert!(decode_manifest("error: manifest parse error").is_err());
    }

    /// Writes an executable shell script standing in for the `swift` driver.
    #[cfg(unix)]
    fn fake_swift(dir: &Path, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("swift");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_read_manifest_decodes_tool_output() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let dump_file = temp_dir.path().join("dump.json");
        std::fs::write(&dump_file, DUMP).unwrap();
        let swift = fake_swift(temp_dir.path(), &format!("cat '{}'", dump_file.display()));

        let package = read_manifest(temp_dir.path(), &swift).unwrap();
        assert_eq!(package.name, "Example");
        assert_eq!(package.targets.len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_read_manifest_tool_failure_fails() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let swift = fake_swift(temp_dir.path(), "echo 'error: no manifest' >&2\nexit 1");

        let err = read_manifest(temp_dir.path(), &swift).unwrap_err();
        assert!(err.to_string().contains("dump-package failed"));
        assert!(err.to_string().contains("error: no manifest"));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_manifest_empty_output_fails() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let swift = fake_swift(temp_dir.path(), "exit 0");

        let err = read_manifest(temp_dir.path(), &swift).unwrap_err();
        assert!(err.to_string().contains("produced no output"));
    }

    #[test]
    fn test_read_manifest_missing_tool_fails() {
        let dir = std::env::temp_dir();
        let res = read_manifest(&dir, Path::new("/nonexistent/bin/swift"));
        assert!(res.is_err());
    }
}
