//! CLI tool to dump fields from fixed-width data files.
//!
//! Reads a layout spec file describing the fields and a data file of
//! fixed-width lines, decodes each line, and prints `name=value` pairs.
//!
//! Layout spec format (one field per line, `#` starts a comment):
//! ```text
//! # name offset,length kind [align=left|right] [pad=X] [pattern=...]
//! last_name 1,8 text
//! salary    9,8 integer align=right pad=0
//! hired    17,10 date pattern=%d/%m/%Y
//! ```

use clap::Parser;
use fixedwidth_rs::{Alignment, FieldLayout, FormatterKind, decode_field};
use std::fs;
use std::io::{self, Write};
use std::process;

/// Decode fixed-width data lines and print their fields.
#[derive(Parser)]
#[command(name = "fw-dump")]
struct Cli {
    /// Layout spec file describing the fields
    layout: String,

    /// Input data file (fixed-width lines, or /dev/stdin)
    input: String,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<String>,
}

/// Parse one layout spec line into a field layout.
fn parse_field_spec(line: &str) -> Result<FieldLayout, String> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next().ok_or("missing field name")?;
    let position = tokens.next().ok_or("missing offset,length")?;

    let (offset_str, length_str) = position
        .split_once(',')
        .ok_or_else(|| format!("position '{position}' must be offset,length"))?;
    let offset: usize = offset_str
        .parse()
        .map_err(|_| format!("invalid offset '{offset_str}'"))?;
    let length: usize = length_str
        .parse()
        .map_err(|_| format!("invalid length '{length_str}'"))?;

    let kind_token = tokens.next().ok_or("missing field kind")?;
    let kind = match kind_token.to_ascii_lowercase().as_str() {
        "text" => FormatterKind::Text,
        "integer" => FormatterKind::Integer,
        "decimal" => FormatterKind::Decimal,
        "boolean" => FormatterKind::Boolean,
        "date" => FormatterKind::Date,
        "char" => FormatterKind::Character,
        other => return Err(format!("unknown field kind '{other}'")),
    };

    let mut layout = FieldLayout::new(name, offset, length, kind);
    for option in tokens {
        let (key, value) = option
            .split_once('=')
            .ok_or_else(|| format!("option '{option}' must be key=value"))?;
        match key {
            "align" => {
                layout = layout.align(Alignment::parse(value).map_err(|e| e.to_string())?);
            }
            "pad" => {
                let c = value
                    .chars()
                    .next()
                    .ok_or_else(|| format!("empty pad for field '{name}'"))?;
                layout = layout.pad(c);
            }
            "pattern" => {
                layout = layout.with_pattern(value);
            }
            other => return Err(format!("unknown option '{other}'")),
        }
    }
    Ok(layout)
}

/// Parse a full layout spec file.
fn parse_layout_spec(text: &str) -> Result<Vec<FieldLayout>, String> {
    let mut layouts = Vec::new();
    for (line_num, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let layout = parse_field_spec(line).map_err(|e| format!("Line {}: {}", line_num + 1, e))?;
        layouts.push(layout);
    }
    if layouts.is_empty() {
        return Err("Layout spec contains no fields".to_string());
    }
    Ok(layouts)
}

fn main() {
    let cli = Cli::parse();

    let layout_text = match fs::read_to_string(&cli.layout) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading layout file '{}': {e}", cli.layout);
            process::exit(1);
        }
    };

    let layouts = match parse_layout_spec(&layout_text) {
        Ok(layouts) => layouts,
        Err(e) => {
            eprintln!("Layout error: {e}");
            process::exit(1);
        }
    };

    let input_text = match fs::read_to_string(&cli.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading input file '{}': {e}", cli.input);
            process::exit(1);
        }
    };

    let mut output = String::new();
    for (line_num, line) in input_text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let mut pairs = Vec::with_capacity(layouts.len());
        for layout in &layouts {
            match decode_field(layout, line) {
                Ok(value) => pairs.push(format!("{}={}", layout.name, value)),
                Err(e) => {
                    eprintln!("Line {}: {e}", line_num + 1);
                    process::exit(1);
                }
            }
        }
        output.push_str(&pairs.join("  "));
        output.push('\n');
    }

    if let Some(out_path) = &cli.output {
        if let Err(e) = fs::write(out_path, &output) {
            eprintln!("Error writing output file '{out_path}': {e}");
            process::exit(1);
        }
    } else if let Err(e) = io::stdout().write_all(output.as_bytes()) {
        eprintln!("Error writing output: {e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_spec_minimal() {
        let layout = parse_field_spec("last_name 1,8 text").unwrap();
        assert_eq!(layout.name, "last_name");
        assert_eq!(layout.offset, 1);
        assert_eq!(layout.length, 8);
    }

    #[test]
    fn test_parse_field_spec_with_options() {
        let layout = parse_field_spec("salary 9,8 integer align=right pad=0").unwrap();
        assert_eq!(layout.alignment, Alignment::Right);
        assert_eq!(layout.padding, '0');
    }

    #[test]
    fn test_parse_field_spec_with_pattern() {
        let layout = parse_field_spec("hired 17,10 date pattern=%d/%m/%Y").unwrap();
        assert_eq!(layout.pattern.as_deref(), Some("%d/%m/%Y"));
    }

    #[test]
    fn test_parse_field_spec_bad_kind() {
        assert!(parse_field_spec("x 1,8 blob").is_err());
    }

    #[test]
    fn test_parse_layout_spec_skips_comments() {
        let spec = "# employee file\nlast_name 1,8 text\n\nsalary 9,8 integer align=right\n";
        let layouts = parse_layout_spec(spec).unwrap();
        assert_eq!(layouts.len(), 2);
    }

    #[test]
    fn test_parse_layout_spec_empty_fails() {
        assert!(parse_layout_spec("# nothing here\n").is_err());
    }
}
