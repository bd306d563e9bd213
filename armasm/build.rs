use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Generates one `#[test]` per `test/**/*.s` fixture, comparing
/// `assemble::assemble_str` against the matching `.words` sidecar (one
/// expected 32-bit hex word per line, no diagnostics expected).
fn main() {
    println!("cargo::rerun-if-changed=test/");

    let out_dir = std::env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("tests.rs");
    let mut file = BufWriter::new(File::create(dest_path).unwrap());

    for entry in glob::glob("test/**/*.s").unwrap() {
        let entry = entry.unwrap();
        let words_path = entry.with_extension("words");
        let test_name = entry.strip_prefix("test").unwrap();
        let parent = test_name.parent().unwrap();
        for folder in parent.iter() {
            writeln!(file, "mod {} {{", folder.to_string_lossy()).unwrap();
        }
        writeln!(file, "#[test]").unwrap();
        writeln!(file, "fn {}() {{", entry.file_stem().unwrap().to_string_lossy()).unwrap();
        writeln!(
            file,
            "let src = std::fs::read_to_string({entry:?}).expect(\"fixture source should be readable\");"
        )
        .unwrap();
        writeln!(
            file,
            "let expected_text = std::fs::read_to_string({words_path:?}).expect(\"fixture .words sidecar should be readable\");"
        )
        .unwrap();
        writeln!(file, "let expected: Vec<u32> = expected_text.lines().filter(|l| !l.trim().is_empty()).map(|l| u32::from_str_radix(l.trim(), 16).unwrap()).collect();").unwrap();
        writeln!(file, "let output = crate::assemble::assemble_str(&src);").unwrap();
        writeln!(
            file,
            "assert!(output.diagnostics.is_empty(), \"unexpected diagnostics: {{:?}}\", output.diagnostics.iter().map(crate::diagnostic::Diagnostic::render).collect::<Vec<_>>());"
        )
        .unwrap();
        writeln!(file, "assert_eq!(output.words, expected);").unwrap();
        writeln!(file, "}}").unwrap();
        for _ in parent.iter() {
            writeln!(file, "}}").unwrap();
        }
        writeln!(file).unwrap();
    }

    file.flush().unwrap();
}
