use std::io::{self, Write};

use tracing::info;

use crate::context::AppContext;
use crate::domain::report::RunResult;
use crate::error::AppResult;
use crate::output::{to_json, write_markdown};
use crate::workflow::draft::draft_experience;

/// Prints the JSON result, then writes the optional markdown draft.
pub async fn run(ctx: &AppContext) -> AppResult<RunResult> {
    let result = draft_experience(ctx).await?;

    let json = to_json(&result)?;
    {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{json}")?;
        stdout.flush()?;
    }

    if let Some(path) = &ctx.config.out {
        write_markdown(path, &result)?;
        info!(path = %path.display(), "markdown draft written");
    }

    Ok(result)
}
