//! Build script for parkgate-firmware
//!
//! - Copies memory.x next to the linker
//! - Rejects a gate.toml the firmware would not load

use std::env;
use std::fs;
use std::path::PathBuf;

use parkgate_core::config::{parse_config, ParseError};

const CONFIG_FILE: &str = "gate.toml";

/// Inner width of the error box
const BOX_WIDTH: usize = 68;

fn main() {
    setup_linker();
    validate_config();
}

fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("memory.x"), include_bytes!("memory.x")).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Run gate.toml through the firmware's own parser
///
/// The file must also be plain TOML so host tools read it the same way
/// (the firmware parser accepts duplicate keys, TOML does not).
fn validate_config() {
    println!("cargo:rerun-if-changed={}", CONFIG_FILE);

    let text = fs::read_to_string(CONFIG_FILE)
        .unwrap_or_else(|e| fail("cannot read gate.toml", &[e.to_string()]));

    if let Err(e) = toml::from_str::<toml::Table>(&text) {
        let lines: Vec<String> = e.to_string().lines().map(String::from).collect();
        fail("gate.toml is not valid TOML", &lines);
    }

    if let Err(e) = parse_config(&text) {
        fail("gate.toml rejected by the firmware parser", &describe(e, &text));
    }
}

fn describe(e: ParseError, text: &str) -> Vec<String> {
    let mut lines = vec![format!("{:?}", e)];
    let line = match e {
        ParseError::InvalidSection { line }
        | ParseError::UnknownKey { line }
        | ParseError::InvalidValue { line } => Some(line),
        ParseError::Config(_) => None,
    };
    if let Some(n) = line {
        if let Some(source) = text.lines().nth(n - 1) {
            lines.push(format!("line {}: {}", n, source.trim()));
        }
    }
    lines
}

fn fail(headline: &str, details: &[String]) -> ! {
    let rule = "═".repeat(BOX_WIDTH);
    let mut msg = format!("\n╔{rule}╗\n║  ERROR: {:<w$}║\n╠{rule}╣\n", headline, w = BOX_WIDTH - 9);
    for detail in details {
        msg.push_str(&format!("║  {:<w$}║\n", clip(detail), w = BOX_WIDTH - 2));
    }
    msg.push_str(&format!("╚{rule}╝\n"));
    panic!("{}", msg);
}

fn clip(line: &str) -> String {
    if line.chars().count() > BOX_WIDTH - 2 {
        let head: String = line.chars().take(BOX_WIDTH - 5).collect();
        format!("{}...", head)
    } else {
        line.to_string()
    }
}
