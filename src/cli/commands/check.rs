use anyhow::Result;
use log::info;

use super::{CheckSummary, CommandResult, CommandSummary};
use crate::{
    cli::args::CheckArgs,
    core::{CheckContext, ConsistencyEngine},
};

pub fn check(args: CheckArgs) -> Result<CommandResult> {
    let ctx = CheckContext::new(&args)?;
    let engine = ConsistencyEngine::new(&ctx, &args.only);

    let diagnostics = engine.run();
    let run = engine.summary();
    info!(
        "Checked {} locales ({} files) against '{}'",
        run.locale_count, run.locale_files_checked, run.baseline
    );

    Ok(CommandResult::new(
        CommandSummary::Check(CheckSummary {
            run,
            format: args.output_format(),
            quiet: args.quiet,
        }),
        diagnostics,
    ))
}
