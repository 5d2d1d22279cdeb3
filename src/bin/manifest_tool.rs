//! Load a manifest document, check its shape and version fingerprint, and
//! print a human-readable summary. The typed-CLI equivalent of the original
//! implementation's manifest inspection tool.

use clap::Parser;
use openbc_handshake::config::ServerConfig;
use openbc_handshake::hash::verify_version_fingerprint;
use openbc_handshake::manifest::load_manifest_with_caps;

#[derive(Parser)]
#[command(name = "manifest-tool")]
#[command(about = "Inspect and validate an OpenBC handshake manifest document")]
struct Args {
    /// Path to the manifest JSON document. Defaults to the path resolved by
    /// `ServerConfig` (config file, then `$OPENBC_MANIFEST_PATH`).
    path: Option<String>,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = ServerConfig::load().unwrap_or_else(|err| {
        eprintln!("failed to load config: {err}");
        std::process::exit(1);
    });

    if let Err(err) = verify_version_fingerprint() {
        eprintln!("startup check failed: {err}");
        std::process::exit(1);
    }

    let path = args.path.unwrap_or_else(|| config.manifest_path.display().to_string());

    let text = match std::fs::read_to_string(&path) {
        Ok(t) => t,
        Err(err) => {
            eprintln!("failed to read {path}: {err}");
            std::process::exit(1);
        }
    };

    let manifest = match load_manifest_with_caps(&text, &config.capacities) {
        Ok(m) => m,
        Err(err) => {
            eprintln!("manifest invalid: {err}");
            std::process::exit(1);
        }
    };

    println!("version_hash: {:#010x}", manifest.version_hash);
    for (round, dir) in manifest.dirs.iter().enumerate() {
        println!(
            "round {round}: dir_hash={:#010x} recursive={} files={} subdirs={}",
            dir.dir_name_hash,
            dir.recursive,
            dir.files.len(),
            dir.subdirs.len()
        );
    }
    if let Some(final_dir) = manifest.final_round_dir() {
        println!(
            "round 0xFF: dir_hash={:#010x} recursive={} files={} subdirs={}",
            final_dir.dir_name_hash,
            final_dir.recursive,
            final_dir.files.len(),
            final_dir.subdirs.len()
        );
    } else {
        println!("round 0xFF: not configured");
    }

    std::process::exit(0);
}
