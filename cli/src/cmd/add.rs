use logindetail_core::{action, print_done, storage::JsonFileStore};
use logindetail_store::LoginRecord;

use super::{GlobalArgs, SubcmdResult};
use crate::config::GlobalConfig;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(long)]
    pub hostname: String,

    #[arg(short, long)]
    pub username: String,

    #[arg(short, long)]
    pub password: String,

    #[arg(long)]
    pub form_url: Option<String>,

    #[arg(long, conflicts_with = "form_url")]
    pub realm: Option<String>,

    /// Record the login as already synced to other devices
    #[arg(long)]
    pub synced: bool,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::from_file_and_args(global_args).await?;
    let store = JsonFileStore::new(&cfg.store_path);

    let mut login = LoginRecord::new(&args.hostname, &args.username, &args.password);
    login.form_submit_url = args.form_url.clone();
    login.http_realm = args.realm.clone();

    let id = action::add_login(&store, login).await?;
    if args.synced {
        store.set_synced(&id, true).await?;
    }
    print_done!("Added login {}", id);
    Ok(())
}
