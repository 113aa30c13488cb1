use logindetail_core::{action, detail::EditOutcome};

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub id: String,

    /// New username (prompted when omitted)
    #[arg(short, long)]
    pub username: Option<String>,

    /// New password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let mut detail = super::open_detail(&args.id, global_args).await?;
    let outcome =
        action::edit(&mut detail, args.username.clone(), args.password.clone()).await?;
    if outcome == EditOutcome::Saved {
        action::show(&detail);
    }
    Ok(())
}
