use anyhow::Result;
use std::process::ExitCode;

mod app;
mod logging;

fn main() -> Result<ExitCode> {
    let args = file_dispatch::cli::parse();
    app::run(args)
}
