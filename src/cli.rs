// src/cli.rs
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use color_eyre::eyre::{bail, eyre, WrapErr};
use color_eyre::Result;
use serde_json::json;

use crate::config::aliases::AliasTable;
use crate::config::consts::STDIN_MARK;
use crate::config::options::{ExportFormat, Input, RunOptions, Variant};
use crate::csv;
use crate::extract::{self, ExtractorKind};
use crate::pairs::PairSet;
use crate::runner::{Pipeline, RunReport};

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    Help,
}

pub fn help() -> &'static str {
    include_str!("cli_help.txt")
}

/// Parse arguments (program name already stripped).
pub fn parse_args<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut opts = RunOptions::default();
    let mut args = args.into_iter().map(Into::into);

    while let Some(a) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| eyre!("Missing value for {flag}"));
        match a.as_str() {
            "--html" => {
                let v = value("--html")?;
                opts.source.html = if v == STDIN_MARK { Input::Stdin } else { Input::File(PathBuf::from(v)) };
            }
            "--previous" | "-p" => opts.source.previous = Some(PathBuf::from(value("--previous")?)),
            "--out" | "-o" => opts.export.out = Some(PathBuf::from(value("--out")?)),
            "--aliases" => opts.source.aliases = Some(PathBuf::from(value("--aliases")?)),
            "--extractor" => {
                opts.source.extractor = value("--extractor")?.parse::<ExtractorKind>().map_err(|e| eyre!(e))?;
            }
            "--format" => {
                let v = value("--format")?;
                opts.export.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => bail!("Unknown format: {other}"),
                };
            }
            "--coerce" => opts.source.variant = Variant::Coerced,
            "--include-headers" => opts.export.include_headers = true,
            "--json" => opts.export.json = true,
            "-v" | "--verbose" => opts.verbose = true,
            "-h" | "--help" => return Ok(Command::Help),
            _ => bail!("Unknown arg: {a}"),
        }
    }

    Ok(Command::Run(opts))
}

fn read_html(input: &Input) -> Result<String> {
    match input {
        Input::Stdin => {
            let mut buf = s!();
            io::stdin().read_to_string(&mut buf).wrap_err("reading HTML from stdin")?;
            Ok(buf)
        }
        Input::File(path) => fs::read_to_string(path).wrap_err_with(|| format!("reading HTML from {}", path.display())),
    }
}

fn build_pipeline(opts: &RunOptions) -> Result<Pipeline> {
    let aliases = match &opts.source.aliases {
        Some(path) => AliasTable::load(path)?,
        None => AliasTable::builtin(),
    };
    let Some(extractor) = extract::by_kind(opts.source.extractor) else {
        bail!("extractor '{}' is not compiled in (enable the `tree` feature)", opts.source.extractor);
    };
    Ok(Pipeline::new(aliases, extractor).with_variant(opts.source.variant))
}

/// One full run: read, parse, compare, persist, report.
pub fn run(opts: &RunOptions) -> Result<()> {
    let html = read_html(&opts.source.html)?;
    let stdout = io::stdout();
    execute(opts, &html, &mut stdout.lock())
}

/// Everything after reading the page; report goes to `out`.
pub fn execute<W: Write>(opts: &RunOptions, html: &str, out: &mut W) -> Result<()> {
    let pipeline = build_pipeline(opts)?;
    logd!(extractor = pipeline.extractor_name(), variant = ?pipeline.variant(), "pipeline ready");

    let previous = match &opts.source.previous {
        Some(path) => csv::load_previous_pairs(path, &opts.export.format)
            .wrap_err_with(|| format!("reading previous offers from {}", path.display()))?,
        None => PairSet::new(),
    };

    let report = pipeline.run(html, &previous)?;

    if let Some(path) = &opts.export.out {
        csv::write_offers(path, &report.rows(), &opts.export.format, opts.export.include_headers)
            .wrap_err_with(|| format!("writing offers to {}", path.display()))?;
    }

    if opts.export.json {
        serde_json::to_writer_pretty(&mut *out, &report_json(&report))?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", report.message)?;
    }
    Ok(())
}

fn report_json(report: &RunReport) -> serde_json::Value {
    let offers = match &report.coerced {
        Some(typed) => json!(typed),
        None => json!(report.offers),
    };
    json!({
        "offers": offers,
        "added": report.comparison.added(),
        "removed": report.comparison.removed(),
        "message": report.message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command> {
        parse_args(args.iter().copied())
    }

    #[test]
    fn defaults_read_stdin_without_previous() {
        let Command::Run(o) = parse(&[]).unwrap() else { panic!("expected run") };
        assert_eq!(o, RunOptions::default());
        assert_eq!(o.source.html, Input::Stdin);
    }

    #[test]
    fn full_flag_set() {
        let Command::Run(o) = parse(&[
            "--html", "page.html", "-p", "prev.tsv", "--out", "now.tsv", "--format", "TSV",
            "--extractor", "scan", "--coerce", "--include-headers", "--json", "-v",
        ])
        .unwrap() else {
            panic!("expected run")
        };
        assert_eq!(o.source.html, Input::File(PathBuf::from("page.html")));
        assert_eq!(o.source.previous, Some(PathBuf::from("prev.tsv")));
        assert_eq!(o.export.out, Some(PathBuf::from("now.tsv")));
        assert_eq!(o.export.format, ExportFormat::Tsv);
        assert_eq!(o.source.extractor, ExtractorKind::Scan);
        assert_eq!(o.source.variant, Variant::Coerced);
        assert!(o.export.include_headers && o.export.json && o.verbose);
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse(&["--json", "-h", "--bogus"]).unwrap(), Command::Help);
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(parse(&["--out"]).unwrap_err().to_string().contains("Missing value for --out"));
        assert!(parse(&["--format", "xml"]).is_err());
        assert!(parse(&["--extractor", "regex"]).is_err());
        assert!(parse(&["--nope"]).unwrap_err().to_string().contains("Unknown arg"));
    }

    #[test]
    fn execute_prints_diff_against_missing_previous() {
        let html = r#"<table>
            <tr><th>ID</th><th>Домен</th><th>Скидка</th></tr>
            <tr><td>1</td><td>a.com</td><td>5%</td></tr>
        </table>"#;
        let mut opts = RunOptions::default();
        opts.source.extractor = ExtractorKind::Scan;
        opts.source.previous = Some(PathBuf::from("does/not/exist.csv"));

        let mut out = Vec::new();
        execute(&opts, html, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Новые пары (domain + sale):\n+ a.com | 5%\n");
    }

    #[test]
    fn execute_json_carries_typed_offers() {
        let html = "<table><tr><td>Sale</td><td>Domain</td></tr><tr><td>10%</td><td>a.com</td></tr></table>";
        let mut opts = RunOptions::default();
        opts.source.extractor = ExtractorKind::Scan;
        opts.source.variant = Variant::Coerced;
        opts.export.json = true;

        let mut out = Vec::new();
        execute(&opts, html, &mut out).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["offers"][0]["sale"], 10);
        assert_eq!(v["added"][0]["sale"], "10");
        assert_eq!(v["removed"], json!([]));
    }
}
