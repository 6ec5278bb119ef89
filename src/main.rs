use anyhow::{Context, Result, bail};
use rr_model::{
    Metrics, Process, Sim, SimulationResult, analyze,
    config::RunConfig,
    metrics::{Comparison, SweepRow, compare, default_sweep_range, sweep},
    workload::RandomWorkload,
};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: rr_model [CONFIG.toml] [options]

  -q, --quantum N         time quantum (default 2)
  -p, --proc ID:AT:BT     add a process; repeatable, overrides the config's
      --random N          random workload of N processes
      --seed S            seed for --random (default 0)
      --sweep             sweep the quantum over 1..max(burst)+3
      --compare Q1 Q2     run two quanta side by side
      --trace             print every scheduling event
      --json              emit the report as JSON
  -h, --help";

#[derive(Debug, Default)]
struct Args {
    config: Option<String>,
    quantum: Option<i64>,
    procs: Vec<String>,
    random: Option<usize>,
    seed: Option<u64>,
    sweep: bool,
    compare: Option<[i64; 2]>,
    trace: bool,
    json: bool,
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Option<Args>> {
    fn value<T: std::str::FromStr>(flag: &str, raw: Option<String>) -> Result<T>
    where
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let raw = raw.with_context(|| format!("{flag} needs a value"))?;
        raw.parse()
            .with_context(|| format!("{flag}: invalid value {raw:?}"))
    }

    let mut args = Args::default();
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-q" | "--quantum" => args.quantum = Some(value(&arg, argv.next())?),
            "-p" | "--proc" => args
                .procs
                .push(argv.next().with_context(|| format!("{arg} needs a value"))?),
            "--random" => args.random = Some(value(&arg, argv.next())?),
            "--seed" => args.seed = Some(value(&arg, argv.next())?),
            "--sweep" => args.sweep = true,
            "--compare" => {
                let q1 = value(&arg, argv.next())?;
                let q2 = value(&arg, argv.next())?;
                args.compare = Some([q1, q2]);
            }
            "--trace" => args.trace = true,
            "--json" => args.json = true,
            other if other.starts_with('-') => bail!("unknown option {other}\n\n{USAGE}"),
            path => {
                if args.config.replace(path.to_owned()).is_some() {
                    bail!("only one config file may be given");
                }
            }
        }
    }
    Ok(Some(args))
}

// ID:ARRIVAL:BURST
fn parse_proc(spec: &str) -> Result<Process> {
    let mut parts = spec.splitn(3, ':');
    let id = parts.next().unwrap_or_default();
    let arrival = parts.next().unwrap_or_default();
    let burst = parts.next().unwrap_or_default();
    if id.is_empty() {
        bail!("process {spec:?} has no id; expected ID:ARRIVAL:BURST");
    }
    Ok(Process::parse(id, arrival, burst)?)
}

#[derive(Serialize)]
struct Report {
    result: SimulationResult,
    metrics: Metrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    sweep: Option<Vec<SweepRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<Comparison>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = parse_args(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(quantum) = args.quantum {
        config.quantum = quantum;
    }
    if args.random.is_some() || args.seed.is_some() {
        let mut random = config.random.take().unwrap_or_default();
        random.count = args.random.unwrap_or(random.count);
        random.seed = args.seed.unwrap_or(random.seed);
        config.random = Some(random);
    }
    config.sweep |= args.sweep;
    if args.compare.is_some() {
        config.compare = args.compare;
    }

    let processes = if args.procs.is_empty() {
        let mut processes = config.workload()?;
        if processes.is_empty() && args.config.is_none() {
            processes = RandomWorkload::default().generate();
        }
        processes
    } else {
        args.procs
            .iter()
            .map(|spec| parse_proc(spec))
            .collect::<Result<Vec<_>>>()?
    };
    let quantum = config.quantum()?;

    let mut sim = Sim::new(&processes, quantum).inspect_err(|err| {
        if let Some(id) = err.process_id() {
            warn!(process = id, "workload rejected");
        }
    })?;
    if args.trace {
        while !sim.all_jobs_completed() {
            let now = sim.core.now();
            for event in sim.step() {
                eprintln!("t={now} {event:?}");
            }
        }
    }
    let result = sim.run();
    let metrics = analyze(&result);

    let sweep_rows = if config.sweep {
        Some(sweep(&processes, default_sweep_range(&processes))?)
    } else {
        None
    };
    let comparison = match config.compare_quanta()? {
        Some((q1, q2)) => Some(compare(&processes, q1, q2)?),
        None => None,
    };

    let report = Report {
        result,
        metrics,
        sweep: sweep_rows,
        comparison,
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &Report) {
    print_run(&report.result, &report.metrics);

    if let Some(rows) = &report.sweep {
        println!("\nQuantum sweep:");
        println!("{:>8} {:>10} {:>10} {:>4}", "quantum", "AWT", "ATAT", "CS");
        for row in rows {
            println!(
                "{:>8} {:>10.2} {:>10.2} {:>4}",
                row.quantum, row.avg_waiting, row.avg_turnaround, row.context_switches
            );
        }
    }

    if let Some(cmp) = &report.comparison {
        println!();
        for run in [&cmp.left, &cmp.right] {
            println!(
                "Quantum {} -> ATAT: {:.2}, AWT: {:.2}, CS: {}, CPU Util: {:.2}%",
                run.quantum,
                run.metrics.avg_turnaround,
                run.metrics.avg_waiting,
                run.metrics.context_switches,
                run.metrics.cpu_utilization
            );
        }
    }
}

fn print_run(result: &SimulationResult, metrics: &Metrics) {
    println!("Round Robin, quantum = {}", result.quantum);
    println!(
        "{:<10} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}",
        "Process", "AT", "BT", "CT", "TAT", "WT", "RT"
    );
    for row in &result.processes {
        println!(
            "{:<10} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}",
            row.process.id,
            row.process.arrival,
            row.process.burst,
            row.completion,
            row.turnaround,
            row.waiting,
            row.response
        );
    }

    println!(
        "\nATAT: {:.2}   |   AWT: {:.2}   |   CS: {}",
        metrics.avg_turnaround, metrics.avg_waiting, metrics.context_switches
    );
    println!(
        "Total Time: {}   CPU Util: {:.2}%   Throughput: {:.3}/unit   Avg RespRatio: {:.2}",
        metrics.total_time, metrics.cpu_utilization, metrics.throughput, metrics.avg_response_ratio
    );
    let ratios: Vec<String> = result
        .processes
        .iter()
        .zip(&metrics.response_ratios)
        .map(|(row, ratio)| format!("{}: {ratio:.2}", row.process.id))
        .collect();
    println!("Response Ratios (per proc): {}", ratios.join("   |   "));

    let gantt: Vec<String> = result
        .gantt
        .iter()
        .map(|e| format!("{}:{}-{}", e.process_id, e.start, e.end))
        .collect();
    println!("Gantt: {}", gantt.join(", "));
}
