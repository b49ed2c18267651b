//! Command-line front end: argument parsing and the subcommands.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use fontset_core::{Encoder, FontSet};

use crate::config::Config;
use crate::dump;
use crate::engine::FontFile;
use crate::logging;

/// Index entries shown by `dump`.
const DUMP_ENTRIES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pack the configured text into a container.
    Build { config: Option<PathBuf> },
    /// Print a container's header, first entries, and first glyph.
    Dump { path: PathBuf },
    /// Find one character in a container and print its record.
    Lookup { path: PathBuf, code_point: u16 },
    PrintConfig,
    Version,
    Help,
}

/// Parse the arguments following the program name.
pub fn parse_args<I, S>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        return Ok(Command::Help);
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        return Ok(Command::Version);
    }
    if args.iter().any(|a| a == "--print-config") {
        return Ok(Command::PrintConfig);
    }

    let mut rest = args.iter().map(String::as_str);
    match rest.next() {
        None => Ok(Command::Build { config: None }),
        Some("build") => build_options(rest),
        Some(flag @ ("--config" | "-c")) => build_options(std::iter::once(flag).chain(rest)),
        Some("dump") => {
            let path = rest.next().ok_or("dump: missing container path")?;
            Ok(Command::Dump {
                path: PathBuf::from(path),
            })
        }
        Some("lookup") => {
            let path = rest.next().ok_or("lookup: missing container path")?;
            let ch = rest.next().ok_or("lookup: missing character")?;
            Ok(Command::Lookup {
                path: PathBuf::from(path),
                code_point: parse_code_point(ch)?,
            })
        }
        Some(other) => Err(format!("unknown command {other:?}")),
    }
}

/// Options of `build`, which is also the command when none is named.
fn build_options<'a>(mut rest: impl Iterator<Item = &'a str>) -> Result<Command, String> {
    let mut config = None;
    while let Some(arg) = rest.next() {
        match arg {
            "--config" | "-c" => {
                let path = rest
                    .next()
                    .ok_or_else(|| format!("{arg}: missing config path"))?;
                config = Some(PathBuf::from(path));
            }
            other => return Err(format!("unexpected argument {other:?}")),
        }
    }
    Ok(Command::Build { config })
}

/// Accepts a single character, `U+XXXX`, or `0xXXXX`.
pub fn parse_code_point(arg: &str) -> Result<u16, String> {
    let hex = arg
        .strip_prefix("U+")
        .or_else(|| arg.strip_prefix("u+"))
        .or_else(|| arg.strip_prefix("0x"));
    if let Some(hex) = hex {
        return u16::from_str_radix(hex, 16)
            .map_err(|_| format!("{arg:?} is not a code point in U+0000..U+FFFF"));
    }
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => u16::try_from(u32::from(c))
            .map_err(|_| format!("{arg:?} is outside the Basic Multilingual Plane")),
        _ => Err(format!("expected one character, got {arg:?}")),
    }
}

pub fn usage() -> String {
    let v = env!("CARGO_PKG_VERSION");
    format!(
        "fontset {v}\n\
         Pack vector glyph outlines into a compact binary container\n\n\
         USAGE:\n    \
         fontset [build] [--config PATH]\n    \
         fontset dump FILE\n    \
         fontset lookup FILE CHAR\n\n\
         OPTIONS:\n    \
         --config, -c PATH  Read settings from PATH instead of fontset.toml\n    \
         --print-config     Print the default configuration to stdout\n    \
         --version, -V      Print version information\n    \
         --help, -h         Print this help message\n"
    )
}

/// Run one command, printing results to stdout.
pub fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Help => print!("{}", usage()),
        Command::Version => println!("fontset {}", env!("CARGO_PKG_VERSION")),
        Command::PrintConfig => print!("{}", Config::default().to_toml()?),
        Command::Build { config } => {
            let config = Config::load_or_default(config.as_deref())?;
            init_logging(&config);
            match &config.source {
                Some(path) => log::info!("config: loaded from {}", path.display()),
                None => log::info!("config: no file found, using defaults"),
            }
            build(&config)?;
        }
        Command::Dump { path } => {
            let data = read(&path)?;
            let text = dump::describe_container(&data, DUMP_ENTRIES).map_err(|e| e.to_string())?;
            print!("{text}");
        }
        Command::Lookup { path, code_point } => {
            let data = read(&path)?;
            print!("{}", lookup(&data, code_point)?);
        }
    }
    Ok(())
}

fn init_logging(config: &Config) {
    if let Err(e) = logging::init(config.log.level_filter(), config.log.file.as_deref()) {
        eprintln!("warning: logging disabled: {e}");
    }
}

/// Build the container described by `config` and write it out in one go.
pub fn build(config: &Config) -> Result<(), String> {
    let font_path = config
        .font
        .path
        .as_deref()
        .ok_or("no font configured; set [font] path in fontset.toml")?;
    let template = config.header.to_template().map_err(|e| e.to_string())?;
    let text = config.output.resolve_text()?;

    let font = FontFile::load(font_path, config.font.face_index).map_err(|e| e.to_string())?;
    let engine = font.engine().map_err(|e| e.to_string())?;
    let encoder = Encoder::new(&engine, template).map_err(|e| e.to_string())?;

    let mut buf = Cursor::new(Vec::new());
    let summary = encoder
        .encode(&text, &mut buf)
        .map_err(|e| format!("encoding failed: {e}"))?;
    let out = &config.output.path;
    std::fs::write(out, buf.into_inner())
        .map_err(|e| format!("failed to write {}: {e}", out.display()))?;

    println!(
        "wrote {} ({} glyphs, {} missing, {} bytes)",
        out.display(),
        summary.entries,
        summary.missing.len(),
        summary.bytes
    );
    Ok(())
}

/// Describe the record for `code_point`, or say it is absent.
pub fn lookup(data: &[u8], code_point: u16) -> Result<String, String> {
    let set = FontSet::parse(data).map_err(|e| e.to_string())?;
    match set.lookup(code_point) {
        None => Ok(format!("U+{code_point:04X} not found\n")),
        Some(offset) => {
            let record = set
                .glyph(code_point)
                .transpose()
                .map_err(|e| e.to_string())?
                .unwrap_or_default();
            let mut out = format!("U+{code_point:04X} at offset 0x{offset:08X}\n");
            out.push_str(&dump::describe_glyph(code_point, &record, true));
            Ok(out)
        }
    }
}

fn read(path: &Path) -> Result<Vec<u8>, String> {
    std::fs::read(path).map_err(|e| format!("failed to read {}: {e}", path.display()))
}

#[cfg(test)]
mod tests;
