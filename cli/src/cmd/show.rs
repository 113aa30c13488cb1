use logindetail_core::action;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub id: String,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let detail = super::open_detail(&args.id, global_args).await?;
    action::show(&detail);
    Ok(())
}
