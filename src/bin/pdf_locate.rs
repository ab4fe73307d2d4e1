//! Command-line front end for outline, search and selection.
//!
//! ```text
//! pdf_locate search  <file> <query>                [--match-case] [--whole-word] [--max-hits N]
//! pdf_locate select  <file> <page> <x> <y> <w> <h>
//! pdf_locate outline <file>
//! ```
//!
//! Common flags: `--pdfium <dir>` (library directory, else
//! `PDF_LOCATE_PDFIUM_PATH`, else the system library) and `-v/--verbose`.
//! Results are printed as JSON.

use pdf_locate::api::TextLocator;
use pdf_locate::engine::pdfium::{self, PdfiumConfig};
use pdf_locate::geometry::NormalizedRect;
use pdf_locate::{LocatorConfig, SearchOptions};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

const USAGE: &str = "\
Usage:
  pdf_locate search  <file> <query> [--match-case] [--whole-word] [--max-hits N]
  pdf_locate select  <file> <page> <x> <y> <w> <h>
  pdf_locate outline <file>

Options:
  --pdfium <dir>   Directory containing the PDFium library
  -v, --verbose    Debug logging";

enum Command {
    Search { file: PathBuf, query: String },
    Select { file: PathBuf, page: i32, rect: NormalizedRect },
    Outline { file: PathBuf },
}

struct CliConfig {
    command: Command,
    search: SearchOptions,
    pdfium: PdfiumConfig,
    verbose: bool,
}

impl CliConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut search = SearchOptions::default();
        let mut pdfium = PdfiumConfig::from_env();
        let mut verbose = false;
        let mut positional = Vec::new();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--match-case" => {
                    search.match_case = true;
                },
                "--whole-word" => {
                    search.whole_word = true;
                },
                "--max-hits" => {
                    i += 1;
                    let value = args.get(i).ok_or("--max-hits needs a value")?;
                    search.max_hits = value
                        .parse()
                        .map_err(|_| format!("invalid --max-hits value: {}", value))?;
                },
                "--pdfium" => {
                    i += 1;
                    let dir = args.get(i).ok_or("--pdfium needs a directory")?;
                    pdfium = pdfium.with_library_dir(dir);
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                flag if flag.starts_with("--") => {
                    return Err(format!("unknown option: {}", flag));
                },
                value => positional.push(value.to_string()),
            }
            i += 1;
        }

        Ok(Self {
            command: parse_command(&positional)?,
            search,
            pdfium,
            verbose,
        })
    }
}

fn parse_command(positional: &[String]) -> Result<Command, String> {
    let number = |value: &String, name: &str| -> Result<f32, String> {
        value
            .parse::<f32>()
            .map_err(|_| format!("invalid {}: {}", name, value))
    };

    match positional {
        [cmd, file, query] if cmd == "search" => Ok(Command::Search {
            file: PathBuf::from(file),
            query: query.clone(),
        }),
        [cmd, file, page, x, y, w, h] if cmd == "select" => Ok(Command::Select {
            file: PathBuf::from(file),
            page: page
                .parse()
                .map_err(|_| format!("invalid page: {}", page))?,
            rect: NormalizedRect::new(number(x, "x")?, number(y, "y")?, number(w, "w")?, number(h, "h")?),
        }),
        [cmd, file] if cmd == "outline" => Ok(Command::Outline {
            file: PathBuf::from(file),
        }),
        _ => Err("missing or malformed command".to_string()),
    }
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> pdf_locate::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

fn main() {
    let config = match CliConfig::from_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        },
    };

    if config.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    let capability = pdfium::bind(&config.pdfium);
    if let Err(e) = capability.require() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let locator = TextLocator::new(&capability).with_config(LocatorConfig::new().with_search(config.search));

    let mut stdout = std::io::stdout().lock();
    let written = match &config.command {
        Command::Search { file, query } => write_json(&mut stdout, &locator.search_file(file, query)),
        Command::Select { file, page, rect } => write_json(&mut stdout, &locator.select_text_file(file, *page, rect)),
        Command::Outline { file } => write_json(&mut stdout, &locator.outline_file(file)),
    };
    if let Err(e) = written {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_search() {
        match parse_command(&args(&["search", "a.pdf", "needle"])) {
            Ok(Command::Search { file, query }) => {
                assert_eq!(file, PathBuf::from("a.pdf"));
                assert_eq!(query, "needle");
            },
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_parse_select() {
        match parse_command(&args(&["select", "a.pdf", "2", "0.1", "0.2", "0.5", "0.25"])) {
            Ok(Command::Select { page, rect, .. }) => {
                assert_eq!(page, 2);
                assert_eq!(rect, NormalizedRect::new(0.1, 0.2, 0.5, 0.25));
            },
            _ => panic!("expected select command"),
        }
    }

    #[test]
    fn test_write_json_output() {
        let mut out = Vec::new();
        write_json(&mut out, &NormalizedRect::new(0.5, 0.25, 0.0, 1.0)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(serde_json::from_str::<NormalizedRect>(&text).unwrap(), NormalizedRect::new(0.5, 0.25, 0.0, 1.0));
    }

    #[test]
    fn test_write_json_reports_io_failure() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = write_json(&mut Closed, &Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, pdf_locate::Error::Io(_)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_command(&args(&["select", "a.pdf", "two", "0", "0", "1", "1"])).is_err());
        assert!(parse_command(&args(&["select", "a.pdf", "0", "0", "0", "1"])).is_err());
        assert!(parse_command(&args(&["outline"])).is_err());
        assert!(parse_command(&[]).is_err());
    }
}
