use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use smoothspline::{
    report::{file_suffix, SmoothingTable},
    transforms::normal_samples,
};

const USAGE: &str = "Usage: spline_report [n=1731] [mean=0.94] [stddev=4.95] [seed=<u64>] \
[weights=1,0.5] [smooth=0,0.1,0.5,0.7,0.99] [input=<path.csv|path.json>] [out=<dir>] [rows=10]";

struct Options {
    n: usize,
    mean: f64,
    stddev: f64,
    seed: Option<u64>,
    weights: Vec<f64>,
    smooth: Vec<f64>,
    input: Option<PathBuf>,
    out: PathBuf,
    rows: usize,
}
impl Default for Options {
    fn default() -> Self {
        Self {
            n: 1731,
            mean: 0.94,
            stddev: 4.95,
            seed: None,
            weights: vec![1.0, 0.5],
            smooth: vec![0.0, 0.1, 0.5, 0.7, 0.99],
            input: None,
            out: PathBuf::from("."),
            rows: 10,
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    eprintln!("{USAGE}");
    std::process::exit(1);
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> T {
    value
        .parse()
        .unwrap_or_else(|_| fail(&format!("Invalid {key} value: {value}")))
}

fn parse_list(key: &str, value: &str) -> Vec<f64> {
    value.split(',').map(|v| parse(key, v.trim())).collect()
}

fn parse_args() -> Options {
    let mut options = Options::default();
    for arg in std::env::args().skip(1) {
        if arg == "help" || arg == "--help" || arg == "-h" {
            eprintln!("{USAGE}");
            std::process::exit(0);
        }

        let Some((key, value)) = arg.split_once('=') else {
            fail(&format!("Unrecognized argument: {arg}"));
        };

        match key {
            "n" => options.n = parse(key, value),
            "mean" => options.mean = parse(key, value),
            "stddev" => options.stddev = parse(key, value),
            "seed" => options.seed = Some(parse(key, value)),
            "weights" => options.weights = parse_list(key, value),
            "smooth" => options.smooth = parse_list(key, value),
            "input" => options.input = Some(PathBuf::from(value)),
            "out" => options.out = PathBuf::from(value),
            "rows" => options.rows = parse(key, value),
            _ => fail(&format!("Unrecognized option: {key}")),
        }
    }

    options
}

/// Observations from a CSV (one value per line, or `index,value`) or a JSON array of numbers
fn load_observations(path: &Path) -> Vec<f64> {
    let Ok(contents) = std::fs::read_to_string(path) else {
        fail(&format!("Failed to read file: {}", path.display()));
    };

    match path.extension().and_then(|s| s.to_str()) {
        Some("csv") => {
            fn parse_line(line: &str) -> Option<f64> {
                line.split(',').map(str::trim).last()?.parse().ok()
            }

            let mut lines = contents.lines().filter(|l| !l.trim().is_empty());
            let mut data = Vec::new();

            //
            // First line, if we get a parsing error, we assume it's a header and skip it.
            if let Some(value) = lines.next().and_then(parse_line) {
                data.push(value);
            }

            //
            // The rest we are strict.
            for (i, line) in lines.enumerate() {
                match parse_line(line) {
                    Some(value) => data.push(value),
                    None => fail(&format!("Failed to parse line {}: {line}", i + 2)),
                }
            }

            data
        }
        Some("json") => serde_json::from_str(&contents)
            .unwrap_or_else(|err| fail(&format!("Failed to parse JSON: {err}"))),

        _ => fail(&format!("Unsupported file format: {}", path.display())),
    }
}

fn write_reports(
    options: &Options,
    observations: &[f64],
    weight: f64,
) -> smoothspline::error::Result<()> {
    log::info!("Fitting {} splines for W = {weight}", options.smooth.len());
    let mut table = SmoothingTable::fit_all(observations.to_vec(), weight, &options.smooth)?;
    if options.input.is_none() {
        table = table.with_parameters(options.mean, options.stddev);
    }

    let suffix = file_suffix(weight);
    let csv_path = options.out.join(format!("spline_results{suffix}.csv"));
    let md_path = options.out.join(format!("spline_table{suffix}.md"));

    table.to_csv(BufWriter::new(File::create(&csv_path)?))?;
    table.to_markdown(BufWriter::new(File::create(&md_path)?), options.rows)?;

    log::info!("Wrote {} and {}", csv_path.display(), md_path.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let options = parse_args();

    let observations = match &options.input {
        Some(path) => load_observations(path),
        None => {
            log::info!(
                "Generating {} observations from N({}, {}²)",
                options.n,
                options.mean,
                options.stddev
            );
            normal_samples(options.n, options.mean, options.stddev, options.seed)
                .unwrap_or_else(|err| fail(&err.to_string()))
        }
    };

    if let Err(err) = std::fs::create_dir_all(&options.out) {
        fail(&format!("Failed to create {}: {err}", options.out.display()));
    }

    for &weight in &options.weights {
        if let Err(err) = write_reports(&options, &observations, weight) {
            log::error!("W = {weight}: {err}");
            std::process::exit(1);
        }
    }

    log::info!(
        "Processed {} observations with λ in {:?}",
        observations.len(),
        options.smooth
    );
}
