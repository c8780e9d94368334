use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use modelref_digest::Digest;
use modelref_name::{Name, NameDefaults, Part};
use serde::Serialize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Parse(args) => cmd_parse(args, format),
        Command::Check(args) => cmd_check(args, format),
        Command::Digest(args) => cmd_digest(args, format),
        Command::Hash(args) => cmd_hash(args, format),
    }
}

#[derive(Debug, Serialize)]
struct NameReport {
    input: String,
    canonical: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    host: Option<String>,
    namespace: Option<String>,
    model: Option<String>,
    tag: Option<String>,
    digest: Option<String>,
    digest_valid: bool,
}

impl NameReport {
    fn new(input: &str, name: &Name) -> Self {
        let part = |p: &Part| p.get().map(str::to_string);
        let error = name.validate().err().map(|e| e.to_string());
        Self {
            input: input.to_string(),
            canonical: name.to_string(),
            valid: error.is_none(),
            error,
            host: part(&name.host),
            namespace: part(&name.namespace),
            model: part(&name.model),
            tag: part(&name.tag),
            digest: part(&name.digest),
            digest_valid: name.digest().is_valid(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DigestReport {
    input: String,
    canonical: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl DigestReport {
    fn new(input: &str) -> Self {
        let (digest, error) = match input.parse::<Digest>() {
            Ok(d) => (d, None),
            Err(e) => (Digest::parse(input), Some(e.to_string())),
        };
        Self {
            input: input.to_string(),
            canonical: digest.to_string(),
            valid: digest.is_valid(),
            error,
        }
    }
}

fn load_defaults(args: &DefaultsArgs) -> anyhow::Result<Name> {
    if args.no_defaults {
        return Ok(NameDefaults::none().to_name());
    }
    let defaults = match &args.defaults {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading defaults from {}", path.display()))?;
            NameDefaults::from_toml_str(&text)
                .with_context(|| format!("loading defaults from {}", path.display()))?
        }
        None => NameDefaults::default(),
    };
    Ok(defaults.to_name())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn show_part(part: &Part) -> String {
    match part {
        Part::Absent => "-".dimmed().to_string(),
        Part::Missing => "(missing)".red().to_string(),
        Part::Present(s) => s.clone(),
    }
}

fn cmd_parse(args: ParseArgs, format: OutputFormat) -> anyhow::Result<()> {
    let defaults = load_defaults(&args.defaults)?;
    let name = Name::parse_with_defaults(&args.name, &defaults);
    let report = NameReport::new(&args.name, &name);

    if format == OutputFormat::Json {
        return print_json(&report);
    }

    println!("  {:<10} {}", "host:", show_part(&name.host));
    println!("  {:<10} {}", "namespace:", show_part(&name.namespace));
    println!("  {:<10} {}", "model:", show_part(&name.model));
    println!("  {:<10} {}", "tag:", show_part(&name.tag));
    println!("  {:<10} {}", "digest:", show_part(&name.digest));
    if report.valid {
        println!("{} {}", "✓ valid".green().bold(), report.canonical.bold());
    } else {
        println!(
            "{} {}",
            "✗ invalid".red().bold(),
            report.error.as_deref().unwrap_or_default()
        );
    }
    if name.digest.is_present() {
        let state = if report.digest_valid {
            "resolvable".green()
        } else {
            "not a content digest".yellow()
        };
        println!("  digest {}: {}", name.digest().to_string().cyan(), state);
    }
    Ok(())
}

fn cmd_check(args: CheckArgs, format: OutputFormat) -> anyhow::Result<()> {
    let defaults = load_defaults(&args.defaults)?;
    let reports: Vec<NameReport> = args
        .names
        .iter()
        .map(|input| NameReport::new(input, &Name::parse_with_defaults(input, &defaults)))
        .collect();

    if format == OutputFormat::Json {
        print_json(&reports)?;
    } else {
        for r in &reports {
            if r.valid {
                println!("{} {}", "✓".green(), r.input);
            } else {
                println!(
                    "{} {}: {}",
                    "✗".red(),
                    r.input,
                    r.error.as_deref().unwrap_or_default().dimmed()
                );
            }
        }
    }

    let invalid = reports.iter().filter(|r| !r.valid).count();
    if invalid > 0 {
        anyhow::bail!("{invalid} of {} names are invalid", reports.len());
    }
    Ok(())
}

fn cmd_digest(args: DigestArgs, format: OutputFormat) -> anyhow::Result<()> {
    let report = DigestReport::new(&args.digest);
    if format == OutputFormat::Json {
        return print_json(&report);
    }
    if report.valid {
        println!("{} {}", "✓".green().bold(), report.canonical.cyan());
        Ok(())
    } else {
        anyhow::bail!(
            "invalid digest {:?}: {}",
            report.input,
            report.error.as_deref().unwrap_or("unknown")
        )
    }
}

fn hash_file(path: &Path) -> anyhow::Result<Digest> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let digest = Digest::sha256_reader(BufReader::new(file))
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(path = %path.display(), digest = %digest.short_hex(), "hashed file");
    Ok(digest)
}

fn cmd_hash(args: HashArgs, format: OutputFormat) -> anyhow::Result<()> {
    let digest = hash_file(&args.path)?;

    if format == OutputFormat::Json {
        return print_json(&DigestReport::new(&digest.to_string()));
    }
    println!("{}  {}", digest.to_string().cyan(), args.path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID_HEX: &str = "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789";

    fn defaults_args(no_defaults: bool, defaults: Option<std::path::PathBuf>) -> DefaultsArgs {
        DefaultsArgs {
            no_defaults,
            defaults,
        }
    }

    #[test]
    fn name_report_for_valid_name() {
        let name = Name::parse("llama3:8b");
        let r = NameReport::new("llama3:8b", &name);
        assert!(r.valid);
        assert!(r.error.is_none());
        assert_eq!(r.canonical, "registry.ollama.ai/library/llama3:8b");
        assert_eq!(r.model.as_deref(), Some("llama3"));
        assert!(!r.digest_valid);
    }

    #[test]
    fn name_report_for_invalid_name() {
        let name = Name::parse_no_defaults("mm:");
        let r = NameReport::new("mm:", &name);
        assert!(!r.valid);
        assert!(r.error.unwrap().contains("missing tag"));
        assert_eq!(r.tag, None);
    }

    #[test]
    fn name_report_json_shape() {
        let input = format!("mm@sha256-{VALID_HEX}");
        let r = NameReport::new(&input, &Name::parse_no_defaults(&input));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["digest_valid"], true);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn digest_report_normalizes() {
        let r = DigestReport::new(&format!("sha256:{VALID_HEX}"));
        assert!(r.valid);
        assert_eq!(r.canonical, format!("sha256-{VALID_HEX}"));

        let r = DigestReport::new("sha256-x");
        assert!(!r.valid);
        assert!(r.error.is_some());
    }

    #[test]
    fn hash_file_streams_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let data: Vec<u8> = (0..3_000_000u32).map(|i| (i % 251) as u8).collect();
        file.write_all(&data).unwrap();
        file.flush().unwrap();

        let digest = hash_file(file.path()).unwrap();
        assert_eq!(digest, Digest::sha256_of(&data));
        assert!(digest.is_valid());
    }

    #[test]
    fn hash_file_reports_missing_file() {
        let err = hash_file(Path::new("/nonexistent/model.gguf")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/model.gguf"), "{err}");
    }

    #[test]
    fn load_builtin_defaults() {
        let d = load_defaults(&defaults_args(false, None)).unwrap();
        assert_eq!(d, Name::default_name());
    }

    #[test]
    fn load_no_defaults() {
        let d = load_defaults(&defaults_args(true, None)).unwrap();
        assert_eq!(Name::parse_with_defaults("mm", &d), Name::parse_no_defaults("mm"));
    }

    #[test]
    fn load_defaults_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host = \"registry.example\"").unwrap();
        let d = load_defaults(&defaults_args(false, Some(file.path().to_path_buf()))).unwrap();
        assert_eq!(
            Name::parse_with_defaults("model", &d).to_string(),
            "registry.example/library/model:latest"
        );
    }

    #[test]
    fn load_defaults_rejects_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "namespace = \"my.org\"").unwrap();
        assert!(load_defaults(&defaults_args(false, Some(file.path().to_path_buf()))).is_err());

        let missing = std::path::PathBuf::from("/nonexistent/defaults.toml");
        assert!(load_defaults(&defaults_args(false, Some(missing))).is_err());
    }
}
