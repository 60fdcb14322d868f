use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use firefly_ingest::{ConverterKind, StatementInput};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

mod config;
mod export;
mod home;
mod logging;
mod sheet;

#[derive(Parser, Debug)]
#[command(
    name = "firefly-convert",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FIREFLY_BUILD_SHA"), ")"),
    about = "Convert bank statement exports into Firefly III import CSV"
)]
struct Cli {
    /// Config file (default: ~/.firefly-convert/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Statement export to read
    input: PathBuf,
    /// CSV file to write
    output: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Banco do Brasil LCI/LCA statement (.txt report)
    BbLc(ConvertArgs),

    /// Banco do Brasil checking account export (.csv)
    BbCp(ConvertArgs),

    /// Ourocard credit card statement (.ofx)
    OurocardOfx(ConvertArgs),

    /// Rico account statement (.xlsx)
    RicoCc(ConvertArgs),

    /// Write a default config file if none exists
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config(cli.config.as_deref())?;
    let level = if cli.verbose { "debug" } else { cfg.log.level.as_str() };
    logging::setup_logging(level);

    let (kind, args) = match cli.command {
        Command::InitConfig => {
            config::init_config(cli.config.as_deref())?;
            return Ok(());
        }
        Command::BbLc(args) => (ConverterKind::BbLc, args),
        Command::BbCp(args) => (ConverterKind::BbCp, args),
        Command::OurocardOfx(args) => (ConverterKind::OurocardOfx, args),
        Command::RicoCc(args) => (ConverterKind::RicoCc, args),
    };

    let rows = convert_file(kind, &args.input, &args.output, &cfg)?;
    println!(
        "CSV successfully generated: {} ({} rows)",
        args.output.display(),
        rows
    );

    Ok(())
}

fn read_input(kind: ConverterKind, path: &Path) -> Result<StatementInput> {
    if !path.is_file() {
        bail!("input not found: {}", path.display());
    }

    if kind.reads_sheet() {
        return Ok(StatementInput::Sheet(sheet::read_first_sheet(path)?));
    }

    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(StatementInput::Text(text))
}

fn convert_file(kind: ConverterKind, input: &Path, output: &Path, cfg: &config::Config) -> Result<usize> {
    let statement = read_input(kind, input)?;
    let table = kind
        .convert(&statement)
        .with_context(|| format!("converting {} as {}", input.display(), kind))?;

    let format = cfg.output.apply(kind.output_format())?;
    let rows = export::write_table_to_path(&table, format, output)?;

    info!(converter = %kind, input = %input.display(), output = %output.display(), rows, "converted statement");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("samples")
            .join("bb-lcilca.txt")
    }

    #[test]
    fn test_convert_sample_report() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bb-lc.csv");

        let rows = convert_file(ConverterKind::BbLc, &sample_report(), &out, &config::Config::default()).unwrap();
        assert_eq!(rows, 2);

        let csv = fs::read_to_string(&out).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "\"Data\";\"Histórico\";\"Valor Movimento\"");
        assert_eq!(lines[1], "\"07/04/2025\";\"Aplicação\";\"30000,00\"");
        assert_eq!(lines[2], "\"30/04/2025\";\"Rendimento Bruto\";\"220,59\"");
    }

    #[test]
    fn test_convert_ofx_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("card.ofx");
        let out = dir.path().join("card.csv");
        fs::write(&input, "<OFX></OFX>").unwrap();

        let rows = convert_file(ConverterKind::OurocardOfx, &input, &out, &config::Config::default()).unwrap();
        assert_eq!(rows, 0);
        assert_eq!(fs::read_to_string(&out).unwrap(), "Type;Date;Amount;Id;Memo\n");
    }

    #[test]
    fn test_missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_file(
            ConverterKind::BbCp,
            &dir.path().join("missing.csv"),
            &dir.path().join("out.csv"),
            &config::Config::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("input not found"));
    }

    #[test]
    fn test_cli_requires_both_paths() {
        assert!(Cli::try_parse_from(["firefly-convert", "bb-lc", "in.txt"]).is_err());
        let cli = Cli::try_parse_from(["firefly-convert", "bb-lc", "in.txt", "out.csv"]).unwrap();
        assert!(matches!(cli.command, Command::BbLc(_)));
    }
}
