use chrono::Local;
use clap::{Command, CommandFactory, Parser};
use clap_complete::{generate, Generator};
use log::info;
use simple_logger::SimpleLogger;
use noc_dse::{
    cmd_args::Args,
    dse_result::DseStatistics,
    explorer::{
        warn_discarded, CommandEngine, CostEngine, Discard, DryRunEngine, ResultPolicy,
        ResultSink, RunLog, SweepRecord,
    },
    DseError, DseResult, Explorer, RunOutcome, Settings,
};
use std::io;
fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start_time = std::time::Instant::now();

    let mut config_names = vec![String::from("configs/default.toml")];
    let args = Args::parse();
    if let Some(generator) = args.generator {
        let mut cmd = Args::command();
        eprintln!("Generating completion file for {:?}...", generator);
        print_completions(generator, &mut cmd);
        return Ok(());
    }

    // config_names append args
    config_names.append(&mut args.config_files()?);

    let settings = Settings::new(config_names, args.overrides())?;
    SimpleLogger::new()
        .with_level(settings.log_level()?)
        .init()?;
    info!("{}", serde_json::to_string_pretty(&settings)?);
    warn_discarded(&settings);

    // nothing is analyzed when the run log cannot be opened
    let mut run_log = RunLog::open(&settings.run_log_path)?;

    let mut results = DseResult::new();
    let outcome = match &settings.engine.command {
        Some(command) => {
            let engine = CommandEngine::new(command, settings.engine.args.clone());
            run(&settings, &engine, &mut run_log, &mut results.sweep_records)?
        }
        None => run(&settings, &DryRunEngine, &mut run_log, &mut results.sweep_records)?,
    };
    run_log.close()?;

    let evaluated_points = match &outcome {
        RunOutcome::Fixed(_) => 1,
        RunOutcome::Sweep(points) => *points,
    };
    results.stats = Some(DseStatistics::new(
        evaluated_points,
        start_time.elapsed().as_secs(),
    ));
    results.mode = Some(settings.mode());
    results.outcome = Some(outcome);
    results.settings = Some(settings.clone());

    // create the folder for output
    std::fs::create_dir_all(&settings.output_dir)?;
    let current_time: String = Local::now().format("%Y-%m-%d-%H-%M-%S%.6f").to_string();
    let output_path = format!("{}/{}.json", settings.output_dir, current_time);

    println!("{}", serde_json::to_string_pretty(&results)?);
    // write json of results to output_path
    std::fs::write(output_path, serde_json::to_string_pretty(&results)?)?;
    Ok(())
}

fn run<E: CostEngine>(
    settings: &Settings,
    engine: &E,
    run_log: &mut RunLog,
    records: &mut Vec<SweepRecord>,
) -> Result<RunOutcome, DseError> {
    let mut discard = Discard;
    let sink: &mut dyn ResultSink = match settings.sweep.results {
        ResultPolicy::Collect => records,
        ResultPolicy::Discard => &mut discard,
    };
    Explorer::new(settings, engine).run(run_log, sink)
}
