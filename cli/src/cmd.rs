pub mod add;
pub mod delete;
pub mod edit;
pub mod open;
pub mod push_endpoint;
pub mod show;
pub mod tap;

use std::path::PathBuf;

use logindetail_core::{action, detail::RowTag, storage::JsonFileStore, LoginDetail};
use logindetail_store::LoginId;

use crate::config::GlobalConfig;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// JSON file holding the logins
    #[arg(long)]
    pub store: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    Add(add::Args),
    Delete(delete::Args),
    Edit(edit::Args),
    Open(open::Args),
    PushEndpoint(push_endpoint::Args),

    #[command(alias("s"))]
    Show(show::Args),

    Tap(tap::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Add(args) => add::exec(args, self).await,
            Delete(args) => delete::exec(args, self).await,
            Edit(args) => edit::exec(args, self).await,
            Open(args) => open::exec(args, self).await,
            PushEndpoint(args) => push_endpoint::exec(args, self).await,
            Show(args) => show::exec(args, self).await,
            Tap(args) => tap::exec(args, self).await,
        }
    }
}

/// Loads config and opens the detail presenter for `id`.
pub(crate) async fn open_detail(id: &str, global_args: &GlobalArgs) -> anyhow::Result<LoginDetail> {
    let cfg = GlobalConfig::from_file_and_args(global_args).await?;
    let store = JsonFileStore::new(&cfg.store_path);
    action::open_detail(
        Box::new(store),
        &LoginId::new(id),
        cfg.core.display.options(),
    )
    .await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[clap(rename_all = "lower")]
pub enum ArgRow {
    Website,
    Username,
    Password,
    Summary,
    Delete,
}

impl From<ArgRow> for RowTag {
    fn from(value: ArgRow) -> Self {
        use ArgRow::*;
        match value {
            Website => RowTag::Website,
            Username => RowTag::Username,
            Password => RowTag::Password,
            Summary => RowTag::Summary,
            Delete => RowTag::Delete,
        }
    }
}
