use pf_gen::args::ConfigArgs;
use pf_gen::run::execute;
use pf_gen::tracing_init::init_tracing;

pub(crate) fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let config = args.resolve()?;
    let _guard = init_tracing(&config.logging, &config.output.directory)?;

    let generated_at = chrono::Local::now().naive_local();
    let report = execute(&config, generated_at)?;

    println!("Generated {} records (seed {})", report.summary.total_records, report.seed);
    println!();
    println!("{}", report.summary);
    println!();
    for path in &report.files.datasets {
        println!("  dataset:  {}", path.display());
    }
    for path in &report.files.snapshots {
        println!("  snapshot: {}", path.display());
    }
    println!("  metadata: {}", report.files.metadata.display());

    Ok(())
}
