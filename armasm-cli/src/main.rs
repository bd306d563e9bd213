//! Command-line driver for `armasm`: argument parsing, file I/O, diagnostic
//! rendering, and the process exit code. None of this lives in the library
//! crate (`SPEC_FULL.md` §A).

use std::process::ExitCode;

use anyhow::Context;
use armasm::{assemble, diagnostic::Diagnostic, object};

enum OutputFormat {
    /// `-format=t`: a hex listing, plus a dot-prefixed sidecar holding a
    /// Verilog `define` directive that names the sidecar itself (§6).
    Text,
    /// `-format=b`: a bit-exact ELF32 relocatable object (§4.6).
    Binary,
}

struct Args {
    output: String,
    format: OutputFormat,
    inputs: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

fn parse_args(raw: impl Iterator<Item = String>) -> Args {
    let mut output = String::from("a.out");
    let mut format = OutputFormat::Text;
    let mut inputs = Vec::new();
    let mut diagnostics = Vec::new();

    let mut raw = raw.peekable();
    while let Some(arg) = raw.next() {
        if arg == "-o" {
            match raw.next() {
                Some(value) => output = value,
                None => diagnostics.push(Diagnostic::error(None, None, "unrecognized option: \"-o\"")),
            }
        } else if let Some(value) = arg.strip_prefix("-o") {
            output = value.to_owned();
        } else if arg == "-format=t" {
            format = OutputFormat::Text;
        } else if arg == "-format=b" {
            format = OutputFormat::Binary;
        } else if arg.starts_with('-') {
            diagnostics.push(Diagnostic::error(None, None, format!("unrecognized option: \"{arg}\"")));
        } else {
            inputs.push(arg);
        }
    }

    Args { output, format, inputs, diagnostics }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = parse_args(std::env::args().skip(1));

    let mut diagnostics = args.diagnostics;
    let mut words = Vec::new();

    if diagnostics.is_empty() {
        let result = assemble::assemble_files(&args.inputs);
        words = result.words;
        diagnostics.extend(result.diagnostics);
    }

    if !diagnostics.is_empty() {
        println!("Assembler messages:");
        for diagnostic in &diagnostics {
            println!("{}", diagnostic.render());
        }
        return Ok(ExitCode::FAILURE);
    }

    match args.format {
        OutputFormat::Binary => {
            let elf = object::build_elf(&words);
            std::fs::write(&args.output, elf)
                .with_context(|| format!("failed to write object file {:?}", args.output))?;
        }
        OutputFormat::Text => {
            let sidecar = object::sidecar_path(&args.output);
            std::fs::write(&args.output, object::hex_listing(&words))
                .with_context(|| format!("failed to write {:?}", args.output))?;
            std::fs::write(&sidecar, object::verilog_directive(&sidecar))
                .with_context(|| format!("failed to write {sidecar:?}"))?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_attached_and_separate_output_flag() {
        let a = parse_args(["-oout.bin".to_string(), "in.s".to_string()].into_iter());
        assert_eq!(a.output, "out.bin");
        assert_eq!(a.inputs, vec!["in.s".to_string()]);

        let b = parse_args(["-o".to_string(), "out.bin".to_string(), "in.s".to_string()].into_iter());
        assert_eq!(b.output, "out.bin");
    }

    #[test]
    fn parses_format_flag() {
        let a = parse_args(["-format=b".to_string()].into_iter());
        assert!(matches!(a.format, OutputFormat::Binary));
    }

    #[test]
    fn unrecognized_flag_is_a_diagnostic() {
        let a = parse_args(["-zzz".to_string()].into_iter());
        assert_eq!(a.diagnostics.len(), 1);
    }
}
