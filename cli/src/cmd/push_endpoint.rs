use anyhow::Context as _;
use logindetail_store::Deployment;

use super::{GlobalArgs, SubcmdResult};
use crate::config::GlobalConfig;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Deployment name, e.g. "production" (defaults to the configured one)
    #[arg()] // positional argument
    pub deployment: Option<String>,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let deployment: Deployment = match &args.deployment {
        Some(name) => name
            .parse()
            .with_context(|| format!("Unknown deployment '{}'", name))?,
        None => {
            GlobalConfig::from_file_and_args(global_args)
                .await?
                .core
                .push
                .deployment
        }
    };
    println!("{}", deployment.endpoint().url);
    Ok(())
}
