use std::path::PathBuf;

use super::{Command, build, lookup, parse_args, parse_code_point};
use crate::config::Config;
use crate::engine::tests::tiny_font;

#[test]
fn no_arguments_builds_with_default_config() {
    let cmd = parse_args(Vec::<String>::new()).unwrap();
    assert_eq!(cmd, Command::Build { config: None });
}

#[test]
fn build_with_config() {
    let cmd = parse_args(["build", "--config", "my.toml"]).unwrap();
    assert_eq!(
        cmd,
        Command::Build {
            config: Some(PathBuf::from("my.toml"))
        }
    );
}

#[test]
fn config_flag_without_subcommand() {
    let expected = Command::Build {
        config: Some(PathBuf::from("my.toml")),
    };
    assert_eq!(parse_args(["--config", "my.toml"]).unwrap(), expected);
    assert_eq!(parse_args(["-c", "my.toml"]).unwrap(), expected);
}

#[test]
fn config_flag_needs_a_path() {
    let err = parse_args(["build", "--config"]).unwrap_err();
    assert!(err.contains("missing config path"), "{err}");
    let err = parse_args(["-c"]).unwrap_err();
    assert!(err.contains("missing config path"), "{err}");
    let err = parse_args(["build", "-c", "a.toml", "extra"]).unwrap_err();
    assert!(err.contains("unexpected argument"), "{err}");
}

#[test]
fn flags_win_over_subcommands() {
    assert_eq!(parse_args(["dump", "x.bin", "-h"]).unwrap(), Command::Help);
    assert_eq!(parse_args(["-V"]).unwrap(), Command::Version);
    assert_eq!(parse_args(["--print-config"]).unwrap(), Command::PrintConfig);
}

#[test]
fn dump_and_lookup() {
    assert_eq!(
        parse_args(["dump", "out.bin"]).unwrap(),
        Command::Dump {
            path: PathBuf::from("out.bin")
        }
    );
    assert_eq!(
        parse_args(["lookup", "out.bin", "U+6ED5"]).unwrap(),
        Command::Lookup {
            path: PathBuf::from("out.bin"),
            code_point: 0x6ED5
        }
    );
}

#[test]
fn missing_operands_are_errors() {
    assert!(parse_args(["dump"]).is_err());
    assert!(parse_args(["lookup", "out.bin"]).is_err());
    assert!(parse_args(["build", "--bogus"]).is_err());
    assert!(parse_args(["frobnicate"]).is_err());
}

#[test]
fn code_point_forms() {
    assert_eq!(parse_code_point("A"), Ok(0x41));
    assert_eq!(parse_code_point("滕"), Ok(0x6ED5));
    assert_eq!(parse_code_point("U+0041"), Ok(0x41));
    assert_eq!(parse_code_point("0xffff"), Ok(0xFFFF));
    assert!(parse_code_point("U+10000").is_err());
    assert!(parse_code_point("😀").is_err());
    assert!(parse_code_point("AB").is_err());
    assert!(parse_code_point("").is_err());
}

#[test]
fn build_requires_a_font() {
    let err = build(&Config::default()).unwrap_err();
    assert!(err.contains("no font configured"), "{err}");
}

#[test]
fn build_then_lookup() {
    let dir = std::env::temp_dir().join(format!("fontset_cli_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let font = dir.join("tiny.ttf");
    std::fs::write(&font, tiny_font()).unwrap();

    let mut config = Config::default();
    config.font.path = Some(font);
    config.output.path = dir.join("out.bin");
    config.output.text = "ABC".to_owned();
    build(&config).unwrap();

    let data = std::fs::read(&config.output.path).unwrap();
    let found = lookup(&data, 0x41).unwrap();
    assert!(found.starts_with("U+0041 at offset 0x"), "{found}");
    assert!(found.contains("Contours: 1"));

    // 'B' maps to .notdef in the test font: present but empty.
    assert!(lookup(&data, 0x42).unwrap().contains("Contours: 0"));
    assert_eq!(lookup(&data, 0x44).unwrap(), "U+0044 not found\n");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn lookup_rejects_garbage() {
    assert!(lookup(b"not a container", 0x41).is_err());
}
