use std::path::Path;

use clap::Args;
use snooze_core::{load_schedule, runner};

#[derive(Args)]
pub struct PlanArgs {
    /// Print the create requests as JSON instead of progress lines
    #[arg(long)]
    json: bool,
}

pub fn run(config: &Path, args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let schedule = load_schedule(config)?;

    if args.json {
        let summary = runner::plan(&schedule, &mut std::io::sink())?;
        println!("{}", serde_json::to_string_pretty(&summary.requests)?);
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    let summary = runner::plan(&schedule, &mut stdout)?;
    tracing::info!(
        planned = summary.requests.len(),
        skipped = summary.skipped,
        "plan complete"
    );
    Ok(())
}
