use logindetail_core::action;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let mut detail = super::open_detail(&args.id, global_args).await?;
    if !action::delete(&mut detail, args.yes).await? {
        println!("Cancelled");
    }
    Ok(())
}
