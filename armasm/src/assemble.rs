//! Top-level driver: normalize, match, encode, and collect diagnostics for
//! one in-memory source buffer or a set of files (`SPEC_FULL.md` §4.7/§7).
//!
//! Matching continues after a diagnostic so a single pass reports every
//! problem, mirroring the reference implementation's "collect everything,
//! then decide" structure (§F).

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::{
    diagnostic::{Diagnostic, DiagnosticChannel},
    encode,
    grammar::{self, MatchError},
    normalize,
};

pub struct AssembleOutput {
    pub words: Vec<u32>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AssembleOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Assembles a single in-memory buffer with no associated file name.
pub fn assemble_str(src: &str) -> AssembleOutput {
    let mut channel = DiagnosticChannel::new();
    let mut words = Vec::new();
    assemble_buffer(None, src, &mut channel, &mut words);
    AssembleOutput { words, diagnostics: channel.into_messages() }
}

/// Assembles a set of input files, deduplicated by path (§6). A file that
/// cannot be opened short-circuits processing of every remaining file,
/// reproducing `tools/assembler.py`'s `preprocess`.
pub fn assemble_files<P: AsRef<Path>>(paths: &[P]) -> AssembleOutput {
    let mut channel = DiagnosticChannel::new();
    let mut words = Vec::new();

    let unique: BTreeSet<&Path> = paths.iter().map(AsRef::as_ref).collect();
    for path in unique {
        let file_name = path.to_string_lossy().into_owned();
        match fs::read_to_string(path) {
            Ok(src) => assemble_buffer(Some(file_name.as_str()), &src, &mut channel, &mut words),
            Err(_) => {
                channel.push(Diagnostic::error(None, None, format!("can't open {file_name}")));
                break;
            }
        }
    }

    AssembleOutput { words, diagnostics: channel.into_messages() }
}

fn assemble_buffer(file: Option<&str>, src: &str, channel: &mut DiagnosticChannel, words: &mut Vec<u32>) {
    for line in normalize::normalize(src) {
        match grammar::match_line(&line.mnemonic, &line.tail) {
            Ok(matched) => {
                if channel.has_errors() {
                    continue;
                }
                match encode::encode(&matched) {
                    Ok(encoded) => {
                        for warning in encoded.warnings {
                            channel.push(Diagnostic::error(file, Some(line.line_number), warning.0));
                        }
                        words.push(encoded.word);
                    }
                    Err(err) => {
                        channel.push(Diagnostic::error(file, Some(line.line_number), err.0));
                    }
                }
            }
            Err(MatchError::NoSuchOpcode) => {
                channel.push(Diagnostic::error(
                    file,
                    Some(line.line_number),
                    format!("no such instruction opcode: \"{}\"", line.mnemonic),
                ));
            }
            Err(MatchError::NoSuchData) => {
                channel.push(Diagnostic::error(
                    file,
                    Some(line.line_number),
                    format!("no such data for \"{}\": \"{}\"", line.mnemonic, line.tail),
                ));
            }
        }
    }
}
