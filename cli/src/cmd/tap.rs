use logindetail_core::action;

use super::{ArgRow, GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub id: String,

    #[arg(value_enum)]
    pub row: ArgRow,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let mut detail = super::open_detail(&args.id, global_args).await?;
    action::tap(&mut detail, args.row.into()).await
}
