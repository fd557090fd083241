use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tt_app::{
    AppError, AppResult, DEFAULT_PREVIEW_ROWS, InputSpec, InterpolationRequest,
    InterpolationResponse, MeshFormat, MeshRequest, PropertyRequest, Request, Resample, Response,
    StateSpec, TablePreview, TableSelection,
};
use tt_fluids::{
    CoolPropEvaluator, PropertyResult, PropertySymbol, accepted_units,
    filter_practical_coolprop_catalog, friendly_unit, from_si, parse_input, parse_symbol_list,
    split_value_and_unit,
};
use tt_tables::{InterpMethod, MeshGrid, render_ascii};

#[derive(Parser)]
#[command(name = "termotables")]
#[command(about = "Termotables - fluid properties and table interpolation", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Write the request to this YAML/JSON file instead of running it
    #[arg(long, global = true, value_name = "FILE")]
    save: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Properties from two independent state variables
    Props {
        /// Fluid name or alias (e.g. water, r134a, CO2)
        #[arg(short, long)]
        fluid: String,
        /// State variable as SYMBOL=VALUE[UNIT], e.g. T=25°C or P=101.325kPa (twice)
        #[arg(short, long = "input", num_args = 1, required = true)]
        inputs: Vec<String>,
        /// Outputs to compute, comma-separated (default T,P,D,H)
        #[arg(short, long, value_name = "SYMBOLS")]
        outputs: Option<String>,
    },
    /// Properties on the saturation line
    Sat {
        #[arg(short, long)]
        fluid: String,
        /// P or T as SYMBOL=VALUE[UNIT]
        #[arg(short, long)]
        input: String,
        /// Vapor quality, 0 = saturated liquid, 1 = saturated vapor
        #[arg(short, long)]
        quality: f64,
        #[arg(short, long, value_name = "SYMBOLS")]
        outputs: Option<String>,
    },
    /// Interpolate a CSV value column at a point
    Interp {
        #[command(flatten)]
        table: TableArgs,
        #[arg(short, long, default_value = "linear")]
        method: InterpMethod,
        /// Query point as X,Y (default: column medians)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, value_name = "X,Y")]
        at: Option<Vec<f64>>,
    },
    /// Render the pivoted value matrix of a CSV table
    Mesh {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long, value_enum, default_value_t = FormatArg::Ascii)]
        format: FormatArg,
        /// Resample onto an NXxNY lattice, e.g. 40x20
        #[arg(long, value_name = "NXxNY")]
        resample: Option<String>,
        /// Method used when resampling
        #[arg(short, long, default_value = "linear")]
        method: InterpMethod,
        /// Output file (defaults to stdout)
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,
    },
    /// Show the columns and first rows of a CSV table
    Preview {
        csv: PathBuf,
        /// Number of rows to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_PREVIEW_ROWS)]
        rows: usize,
    },
    /// Run a saved YAML/JSON request
    Run {
        request_path: PathBuf,
    },
    /// List known fluids, optionally filtered
    Fluids {
        query: Option<String>,
    },
    /// Show the property symbol guide
    Symbols,
}

#[derive(clap::Args)]
struct TableArgs {
    /// CSV file with a header row
    #[arg(long)]
    csv: PathBuf,
    /// Column used as x
    #[arg(short, long)]
    x: String,
    /// Column used as y
    #[arg(short, long)]
    y: String,
    /// Column to interpolate
    #[arg(short, long)]
    value: String,
}

impl From<TableArgs> for TableSelection {
    fn from(args: TableArgs) -> Self {
        TableSelection {
            csv: args.csv,
            x: args.x,
            y: args.y,
            value: args.value,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Ascii,
    Csv,
    Json,
}

impl From<FormatArg> for MeshFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Ascii => MeshFormat::Ascii,
            FormatArg::Csv => MeshFormat::Csv,
            FormatArg::Json => MeshFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> AppResult<()> {
    let json = cli.json;
    let mut output = None;

    let request = match cli.command {
        Commands::Props {
            fluid,
            inputs,
            outputs,
        } => {
            let [a, b] = inputs.as_slice() else {
                return Err(AppError::InvalidInput(format!(
                    "props needs exactly two --input values, got {}",
                    inputs.len()
                )));
            };
            Request::Properties(PropertyRequest {
                fluid,
                outputs: parse_outputs(outputs.as_deref())?,
                state: StateSpec::General {
                    inputs: [parse_input_arg(a)?, parse_input_arg(b)?],
                },
            })
        }
        Commands::Sat {
            fluid,
            input,
            quality,
            outputs,
        } => Request::Properties(PropertyRequest {
            fluid,
            outputs: parse_outputs(outputs.as_deref())?,
            state: StateSpec::Saturation {
                input: parse_input_arg(&input)?,
                quality,
            },
        }),
        Commands::Interp { table, method, at } => {
            let at = match at.as_deref() {
                None => None,
                Some(&[x, y]) => Some([x, y]),
                Some(other) => {
                    return Err(AppError::InvalidInput(format!(
                        "--at takes two numbers X,Y, got {}",
                        other.len()
                    )));
                }
            };
            Request::Interpolate(InterpolationRequest {
                table: table.into(),
                method,
                at,
            })
        }
        Commands::Mesh {
            table,
            format,
            resample,
            method,
            output: out,
        } => {
            output = out;
            Request::Mesh(MeshRequest {
                table: table.into(),
                format: format.into(),
                resample: resample
                    .as_deref()
                    .map(|text| parse_resample(text, method))
                    .transpose()?,
            })
        }
        Commands::Preview { csv, rows } => {
            return cmd_preview(&tt_app::preview_table(&csv, rows)?, json);
        }
        Commands::Run { request_path } => tt_app::load_request(&request_path)?,
        Commands::Fluids { query } => return cmd_fluids(query.as_deref().unwrap_or(""), json),
        Commands::Symbols => return cmd_symbols(json),
    };

    if let Some(path) = cli.save {
        tt_app::save_request(&path, &request)?;
        println!("✓ Request saved to {}", path.display());
        return Ok(());
    }

    debug!(?request, "executing request");
    let response = tt_app::execute(&CoolPropEvaluator::new(), &request)?;
    if json {
        return print_json(&response);
    }
    match response {
        Response::Properties(result) => print_properties(&result),
        Response::Interpolate(r) => print_interpolation(&r),
        Response::Mesh { format, mesh } => write_mesh(&mesh, format, output.as_deref())?,
    }
    Ok(())
}

/// `SYMBOL=VALUE[UNIT]`; a bare value uses the symbol's friendly unit.
fn parse_input_arg(text: &str) -> AppResult<InputSpec> {
    let (symbol, rest) = text.split_once('=').ok_or_else(|| {
        AppError::InvalidInput(format!("expected SYMBOL=VALUE[UNIT], got '{}'", text))
    })?;
    let symbol: PropertySymbol = symbol.parse()?;
    // Unknown units fail here, before a request can be saved.
    parse_input(symbol, rest)?;
    let (value, unit) = split_value_and_unit(rest)?;
    Ok(InputSpec::new(symbol, value, unit))
}

/// Comma-separated output symbols; absent means the default set.
fn parse_outputs(text: Option<&str>) -> AppResult<Vec<PropertySymbol>> {
    Ok(match text {
        Some(text) => parse_symbol_list(text)?,
        None => Vec::new(),
    })
}

fn parse_resample(text: &str, method: InterpMethod) -> AppResult<Resample> {
    let bad = || AppError::InvalidInput(format!("expected NXxNY (e.g. 40x20), got '{}'", text));
    let (nx, ny) = text.split_once(['x', 'X']).ok_or_else(bad)?;
    Ok(Resample {
        nx: nx.trim().parse().map_err(|_| bad())?,
        ny: ny.trim().parse().map_err(|_| bad())?,
        method,
    })
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_properties(result: &PropertyResult) {
    match result.quality() {
        Some(q) => println!("{} (saturation, Q = {})", result.fluid(), q),
        None => println!("{}", result.fluid()),
    }
    println!(
        "  {:<28} {:<6} {:>16} {:<9} {:>14}",
        "Property", "Symbol", "Value", "Unit", "Friendly"
    );
    for row in result.rows() {
        let friendly = friendly_unit(row.symbol)
            .ok()
            .filter(|unit| *unit != row.unit)
            .and_then(|unit| {
                let v = from_si(row.symbol, row.value, unit).ok()?;
                Some(format!("{:.4} {}", v, unit))
            })
            .unwrap_or_default();
        println!(
            "  {:<28} {:<6} {:>16.6} {:<9} {:>14}",
            row.property, row.symbol, row.value, row.unit, friendly
        );
    }
}

fn print_interpolation(r: &InterpolationResponse) {
    let point = if r.default_point { " (median)" } else { "" };
    println!(
        "{} at {} = {}, {} = {}{}",
        r.column, r.x_label, r.x, r.y_label, r.y, point
    );
    println!("  grid:   {:?}", r.result.shape);
    println!("  method: {}", r.result.method);
    if r.result.value.is_nan() {
        println!("  value:  NaN (outside the data domain)");
    } else {
        println!("  value:  {}", r.result.value);
        if !r.result.in_domain {
            println!("  note:   query lies outside the data domain");
        }
    }
}

fn write_mesh(mesh: &MeshGrid, format: MeshFormat, output: Option<&Path>) -> AppResult<()> {
    let text = match format {
        MeshFormat::Ascii => render_ascii(mesh),
        MeshFormat::Csv => mesh.to_csv(),
        MeshFormat::Json => format!("{}\n", serde_json::to_string_pretty(mesh)?),
    };
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            println!(
                "✓ Exported {} × {} mesh to {}",
                mesh.xs.len(),
                mesh.ys.len(),
                path.display()
            );
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn cmd_preview(preview: &TablePreview, json: bool) -> AppResult<()> {
    if json {
        return print_json(preview);
    }
    let widths: Vec<usize> = preview
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            preview
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .fold(name.chars().count(), usize::max)
        })
        .collect();
    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("  {}", line(&preview.columns));
    for row in &preview.rows {
        println!("  {}", line(row));
    }
    println!(
        "  ({} of {} rows; columns: {})",
        preview.rows.len(),
        preview.total_rows,
        preview.columns.join(", ")
    );
    Ok(())
}

#[derive(Serialize)]
struct FluidEntry {
    name: &'static str,
    display_name: &'static str,
    category: &'static str,
    aliases: &'static [&'static str],
}

fn cmd_fluids(query: &str, json: bool) -> AppResult<()> {
    let entries = filter_practical_coolprop_catalog(query);
    if json {
        let list: Vec<FluidEntry> = entries
            .iter()
            .map(|e| FluidEntry {
                name: e.coolprop_name,
                display_name: e.display_name,
                category: e.category.label(),
                aliases: e.aliases,
            })
            .collect();
        return print_json(&list);
    }
    if entries.is_empty() {
        println!("No fluids match '{}'", query);
        return Ok(());
    }
    for e in entries {
        println!(
            "  {:<14} {:<24} {:<12} {}",
            e.coolprop_name,
            e.display_name,
            e.category.label(),
            e.aliases.join(", ")
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct SymbolEntry {
    symbol: PropertySymbol,
    name: &'static str,
    description: &'static str,
    si_unit: &'static str,
    input: bool,
    units: &'static [&'static str],
}

fn cmd_symbols(json: bool) -> AppResult<()> {
    let entries: Vec<SymbolEntry> = PropertySymbol::ALL
        .iter()
        .map(|&s| SymbolEntry {
            symbol: s,
            name: s.name(),
            description: s.description(),
            si_unit: s.si_unit(),
            input: s.is_input(),
            units: accepted_units(s),
        })
        .collect();
    if json {
        return print_json(&entries);
    }
    println!("  {:<6} {:<28} {:<9} {:<6} Description", "Symbol", "Property", "SI unit", "Input");
    for e in &entries {
        println!(
            "  {:<6} {:<28} {:<9} {:<6} {}",
            e.symbol,
            e.name,
            e.si_unit,
            if e.input { "yes" } else { "" },
            e.description
        );
        if !e.units.is_empty() {
            println!("  {:<6} units: {}", "", e.units.join(", "));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_arguments() {
        let spec = parse_input_arg("T=25°C").unwrap();
        assert_eq!(spec.symbol, PropertySymbol::T);
        assert_eq!(spec.value, 25.0);
        assert_eq!(spec.unit, "°C");

        let spec = parse_input_arg("p=101.325").unwrap();
        assert_eq!(spec.symbol, PropertySymbol::P);
        assert_eq!(spec.unit, "");

        assert!(parse_input_arg("T25").is_err());
        assert!(parse_input_arg("Z=1").is_err());
        assert!(matches!(
            parse_input_arg("T=70F"),
            Err(AppError::Fluid(tt_fluids::FluidError::UnknownUnit { .. }))
        ));
        assert!(parse_input_arg("P=warm").is_err());
    }

    #[test]
    fn output_lists() {
        assert!(parse_outputs(None).unwrap().is_empty());
        assert_eq!(
            parse_outputs(Some("d, h,cp")).unwrap(),
            vec![PropertySymbol::D, PropertySymbol::H, PropertySymbol::CP]
        );
        assert!(parse_outputs(Some("D,X")).is_err());
    }

    #[test]
    fn resample_argument() {
        let r = parse_resample("40x20", InterpMethod::Cubic).unwrap();
        assert_eq!((r.nx, r.ny), (40, 20));
        assert!(parse_resample("40", InterpMethod::Linear).is_err());
    }

    #[test]
    fn cli_parses() {
        let cli = Cli::try_parse_from([
            "termotables",
            "props",
            "-f",
            "water",
            "-i",
            "T=100°C",
            "-i",
            "P=101.325kPa",
            "-o",
            "D,H",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.save.is_none());
        let Commands::Props { inputs, outputs, .. } = cli.command else {
            panic!("expected props");
        };
        assert_eq!(inputs.len(), 2);
        assert_eq!(
            parse_outputs(outputs.as_deref()).unwrap(),
            vec![PropertySymbol::D, PropertySymbol::H]
        );
    }

    fn temp_csv(name: &str, text: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tt_cli_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn preview_command() {
        let csv = temp_csv("preview.csv", "T,P,rho\n1,1,1\n1,2,2\n2,1,3\n");
        let csv = csv.display().to_string();

        let cli = Cli::try_parse_from(["termotables", "preview", "-n", "2", csv.as_str()]).unwrap();
        let Commands::Preview { rows, .. } = cli.command else {
            panic!("expected preview");
        };
        assert_eq!(rows, 2);

        let cli = Cli::try_parse_from(["termotables", "preview", csv.as_str()]).unwrap();
        assert!(run(cli).is_ok());
        let cli = Cli::try_parse_from(["termotables", "preview", "no_such_table.csv"]).unwrap();
        assert!(run(cli).is_err());
    }

    #[test]
    fn oversized_resample_fails_cleanly() {
        let csv = temp_csv("mesh.csv", "x,y,v\n0,0,0\n0,1,1\n1,0,1\n1,1,2\n");
        let csv = csv.display().to_string();
        let args = [
            "termotables", "mesh", "--csv", csv.as_str(), "-x", "x", "-y", "y", "-v", "v",
            "--resample", "100000x100000",
        ];
        let err = run(Cli::try_parse_from(args).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            AppError::Table(tt_tables::TableError::InterpolationFailed { .. })
        ));

        let args = [
            "termotables", "mesh", "--csv", csv.as_str(), "-x", "x", "-y", "y", "-v", "v",
            "--resample", "99999999999999999999x2",
        ];
        assert!(run(Cli::try_parse_from(args).unwrap()).is_err());
    }

    #[test]
    fn interp_point_and_method() {
        let cli = Cli::try_parse_from([
            "termotables",
            "interp",
            "--csv",
            "t.csv",
            "-x",
            "T",
            "-y",
            "P",
            "-v",
            "rho",
            "-m",
            "cubic",
            "--at",
            "-10.5,200",
        ])
        .unwrap();
        let Commands::Interp { method, at, .. } = cli.command else {
            panic!("expected interp");
        };
        assert_eq!(method, InterpMethod::Cubic);
        assert_eq!(at, Some(vec![-10.5, 200.0]));

        assert!(
            Cli::try_parse_from([
                "termotables", "interp", "--csv", "t.csv", "-x", "T", "-y", "P", "-v", "rho",
                "-m", "quintic",
            ])
            .is_err()
        );
    }
}
