pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use error::*;
use logindetail_store::{LoginId, LoginRecord, LoginStore, Url};

use crate::detail::{
    Clipboard, DisplayOptions, EditOutcome, Lifecycle, LoginDetail, MenuAction, Navigator,
    RowTag, TapOutcome,
};
use crate::{interactive, print_done, style};

/// [`Navigator`] for a one-shot terminal session.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    pub opened: Option<Url>,
    pub dismissed: bool,
    pub went_back: bool,
}

impl Navigator for TerminalNavigator {
    fn open_in_new_surface(&mut self, url: &Url) {
        println!("{}", url);
        self.opened = Some(url.clone());
    }

    fn dismiss(&mut self) {
        log::debug!("Detail screen dismissed");
        self.dismissed = true;
    }

    fn go_back(&mut self) {
        log::debug!("Back to previous screen");
        self.went_back = true;
    }
}

/// Terminal stand-in for the system clipboard: prints what would be copied.
#[derive(Debug, Default)]
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn copy(&mut self, text: &str) {
        println!("{}", text);
    }
}

pub async fn add_login(store: &dyn LoginStore, login: LoginRecord) -> Result<LoginId> {
    let hostname = login.hostname.clone();
    store
        .add(login)
        .await
        .with_context(|| format!("Failed to add login for '{}'", hostname))
}

pub async fn open_detail(
    store: Box<dyn LoginStore>,
    id: &LoginId,
    options: DisplayOptions,
) -> Result<LoginDetail> {
    LoginDetail::load(store, id, options)
        .await
        .with_context(|| format!("Cannot open login '{}'", id))
}

pub fn show(detail: &LoginDetail) {
    style::print_rows(&detail.rows());
}

/// Edits the login, prompting for whichever of `username`/`password` is `None`.
pub async fn edit(
    detail: &mut LoginDetail,
    username: Option<String>,
    password: Option<String>,
) -> Result<EditOutcome> {
    let current = detail.begin_editing();
    style::print_rows(&detail.rows());

    let buffer = match interactive::ask_edit(current, username, password) {
        Ok(buffer) => buffer,
        Err(e) => {
            detail.cancel_editing();
            return Err(e).context("Failed to read new credentials");
        }
    };

    let outcome = detail.finish_editing(buffer).await;
    match &outcome {
        EditOutcome::Saved => print_done!("Saved login {}", detail.login().id),
        EditOutcome::Unchanged => println!("Nothing changed"),
        EditOutcome::Rejected(why) => log::warn!("Edit discarded: {}", why),
        EditOutcome::StoreFailed => log::warn!("Edit discarded: storage refused the update"),
    }
    Ok(outcome)
}

/// Taps `row` and follows up on whatever the tap presents.
pub async fn tap(detail: &mut LoginDetail, row: RowTag) -> Result<()> {
    let mut lifecycle = Lifecycle::new();
    let mut navigator = TerminalNavigator::default();
    let mut clipboard = StdoutClipboard;

    match detail.tap_row(row, &mut lifecycle).await {
        TapOutcome::Ignored => println!("Nothing to do on the {} row", row),
        TapOutcome::Menu(menu) => {
            let action = interactive::ask_menu_action(&menu).context("Failed to read choice")?;
            if let Some(action) = action {
                detail.perform_menu_action(row, action, &mut clipboard, &mut navigator);
                if matches!(action, MenuAction::Reveal | MenuAction::Hide) {
                    style::print_rows(&detail.rows());
                }
            }
        }
        TapOutcome::ConfirmDelete(prompt) => {
            let yes = interactive::ask_delete_confirmation(&prompt)
                .context("Failed to read confirmation")?;
            self::finish_delete(detail, yes, &mut navigator).await?;
        }
    }
    lifecycle.enter_background();
    Ok(())
}

/// Runs the delete flow. Returns whether the login was deleted.
pub async fn delete(detail: &mut LoginDetail, assume_yes: bool) -> Result<bool> {
    let mut lifecycle = Lifecycle::new();
    let mut navigator = TerminalNavigator::default();

    let prompt = detail.request_delete(&mut lifecycle).await;
    let yes = assume_yes
        || interactive::ask_delete_confirmation(&prompt).context("Failed to read confirmation")?;
    let deleted = self::finish_delete(detail, yes, &mut navigator).await?;

    lifecycle.enter_background();
    Ok(deleted)
}

async fn finish_delete(
    detail: &mut LoginDetail,
    confirmed: bool,
    navigator: &mut TerminalNavigator,
) -> Result<bool> {
    if !confirmed {
        detail.cancel_delete();
        return Ok(false);
    }
    let id = detail.login().id.clone();
    ensure!(
        detail.confirm_delete(navigator).await,
        "Failed to delete login '{}'",
        id
    );
    print_done!("Deleted login {}", id);
    Ok(true)
}

pub fn open_and_fill(detail: &LoginDetail) -> Result<Url> {
    let mut navigator = TerminalNavigator::default();
    ensure!(
        detail.open_and_fill(&mut navigator),
        "No openable URL for login '{}' (hostname '{}')",
        detail.login().id,
        detail.login().hostname
    );
    navigator
        .opened
        .ok_or_else(|| anyhow!("Navigator did not receive a URL"))
}
