//! Simulate one round of the checksum handshake end-to-end: build the
//! request frame, accept a captured response frame from disk, and print the
//! validation verdict. For manual interoperability checks against traffic
//! captured from the historical server.

use clap::Parser;
use openbc_handshake::config::ServerConfig;
use openbc_handshake::manifest::load_manifest_with_caps;
use openbc_handshake::protocol::{checksum_request, checksum_request_final, evaluate_with_caps};

#[derive(Parser)]
#[command(name = "handshake-sim")]
#[command(about = "Simulate one checksum round against a manifest and a captured response")]
struct Args {
    /// Path to the manifest JSON document. Defaults to the path resolved by
    /// `ServerConfig`.
    #[arg(long)]
    manifest: Option<String>,

    /// Round index: 0, 1, 2, 3, or 255 for the final round.
    round: u16,

    /// Path to a raw captured response frame (opcode 0x21 onward).
    response: String,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = ServerConfig::load().unwrap_or_else(|err| {
        eprintln!("failed to load config: {err}");
        std::process::exit(1);
    });
    let manifest_path = args.manifest.unwrap_or_else(|| config.manifest_path.display().to_string());

    let manifest_text = std::fs::read_to_string(&manifest_path).unwrap_or_else(|err| {
        eprintln!("failed to read manifest {manifest_path}: {err}");
        std::process::exit(1);
    });
    let manifest = load_manifest_with_caps(&manifest_text, &config.capacities).unwrap_or_else(|err| {
        eprintln!("manifest invalid: {err}");
        std::process::exit(1);
    });

    let mut request_buf = [0u8; 64];
    let request_len = if args.round == 0xFF {
        checksum_request_final(&mut request_buf)
    } else {
        checksum_request(&mut request_buf, args.round as u8)
    }
    .unwrap_or_else(|err| {
        eprintln!("failed to build request: {err}");
        std::process::exit(1);
    });
    println!("request: {:02x?}", &request_buf[..request_len]);

    let expected_dir = if args.round == 0xFF {
        manifest.final_round_dir()
    } else {
        manifest.dir_for_round(args.round as u8)
    };
    let Some(expected_dir) = expected_dir else {
        eprintln!("round {} has no manifest entry", args.round);
        std::process::exit(1);
    };

    let response_bytes = std::fs::read(&args.response).unwrap_or_else(|err| {
        eprintln!("failed to read response {}: {err}", args.response);
        std::process::exit(1);
    });

    let verdict = evaluate_with_caps(&response_bytes, expected_dir, &config.capacities);
    println!("verdict: {verdict:?}");

    std::process::exit(if verdict == openbc_handshake::protocol::Verdict::Ok { 0 } else { 1 });
}
