use std::env;
use std::process::ExitCode;

use sigma_cyclic::config::{MonomialStrategy, SearchConfigBuilder, DEFAULT_FIELD_ORDERS};
use sigma_cyclic::utils::set_parallelism;
use sigma_cyclic::{search_field, SearchError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

struct Options {
    field_orders: Vec<u32>,
    strategy: MonomialStrategy,
    budget: Option<u64>,
    sequential: bool,
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let options = match parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("sigma-search: {message}");
            eprintln!(
                "usage: sigma-search [Q ...] [--strategy auto|normalize|brute-force] \
                 [--budget N] [--sequential] [--json]"
            );
            return ExitCode::from(2);
        }
    };

    let _guard = options.sequential.then(|| set_parallelism(false));
    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sigma-search: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<(), SearchError> {
    // Validate every field before searching any of them.
    let configs = options
        .field_orders
        .iter()
        .map(|order| {
            let mut builder = SearchConfigBuilder::new(*order).strategy(options.strategy);
            if let Some(budget) = options.budget {
                builder = builder.brute_force_budget(budget);
            }
            builder.build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut reports = Vec::with_capacity(configs.len());
    for config in &configs {
        let report = search_field(config)?;
        if !options.json {
            println!("{report}");
        }
        reports.push(report);
    }
    if options.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("sigma-search: cannot encode reports: {err}"),
        }
    }
    Ok(())
}

fn parse_args<I>(mut args: I) -> Result<Options, String>
where
    I: Iterator<Item = String>,
{
    let mut options = Options {
        field_orders: Vec::new(),
        strategy: MonomialStrategy::Auto,
        budget: None,
        sequential: false,
        json: false,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--strategy" => {
                let value = args.next().ok_or("--strategy needs a value")?;
                options.strategy = value.parse().map_err(|err| format!("{err}"))?;
            }
            "--budget" => {
                let value = args.next().ok_or("--budget needs a value")?;
                let budget = value
                    .parse()
                    .map_err(|_| format!("invalid budget `{value}`"))?;
                options.budget = Some(budget);
            }
            "--sequential" => options.sequential = true,
            "--json" => options.json = true,
            other => {
                let order = other
                    .parse()
                    .map_err(|_| format!("unexpected argument `{other}`"))?;
                options.field_orders.push(order);
            }
        }
    }
    if options.field_orders.is_empty() {
        options.field_orders = DEFAULT_FIELD_ORDERS.to_vec();
    }
    Ok(options)
}
