use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

// Inputs that `askama` and `sqlx::migrate!` compile into the binary.
const EMBEDDED_INPUTS: &[(&str, &str)] = &[("templates", "html"), ("migrations", "sql")];

fn main() {
    for (dir, extension) in EMBEDDED_INPUTS {
        // Watching the directory itself catches newly added files.
        println!("cargo:rerun-if-changed={}", dir);
        for file in files_with_extension(Path::new(dir), extension) {
            println!("cargo:rerun-if-changed={}", file.display());
        }
    }

    // Reported by GET /health.
    let build_id = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "dev".to_string());
    println!("cargo:rustc-env=MERGINGTON_BUILD_ID={}", build_id);
}

fn files_with_extension(root: &Path, extension: &str) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };

    entries
        .flatten()
        .map(|entry| entry.path())
        .flat_map(|path| {
            if path.is_dir() {
                files_with_extension(&path, extension)
            } else if path.extension().is_some_and(|ext| ext == extension) {
                vec![path]
            } else {
                Vec::new()
            }
        })
        .collect()
}
