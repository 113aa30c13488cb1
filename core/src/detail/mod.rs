//! Presenter for the single-login detail screen.
//!
//! The presenter owns the login snapshot and the editing state. Storage calls
//! are awaited inline, so the presenter never races itself; any storage
//! failure degrades to "nothing changed".

pub mod collab;
pub mod rows;

use ::lazy_regex::{lazy_regex, Lazy, Regex};
use logindetail_store::{InvalidLogin, LoginId, LoginRecord, LoginStore, Url};

pub use collab::*;
pub use rows::*;

static RE_HAS_SCHEME: Lazy<Regex> = lazy_regex!(r"^[A-Za-z][A-Za-z0-9+.-]*://");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Editing,
}

/// Transient values of the username/password inputs while editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Nothing to persist (or not editing at all).
    Unchanged,
    Saved,
    /// The candidate failed validation; previous values are kept.
    Rejected(InvalidLogin),
    /// The store refused the update; previous values are kept.
    StoreFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum MenuAction {
    Copy,
    Reveal,
    Hide,
    #[strum(serialize = "Open & Fill")]
    OpenAndFill,
}

/// Selection affordance anchored to a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionMenu {
    pub row: RowTag,
    pub actions: Vec<MenuAction>,
}

#[derive(Debug, Clone)]
pub enum TapOutcome {
    Ignored,
    Menu(SelectionMenu),
    ConfirmDelete(DeletePrompt),
}

pub struct LoginDetail {
    store: Box<dyn LoginStore>,
    login: LoginRecord,
    mode: Mode,
    options: DisplayOptions,
    password_revealed: bool,
    focus: Option<RowTag>,
    pending_delete: Option<DeletePrompt>,
    render_count: u64,
}

impl std::fmt::Debug for LoginDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("LoginDetail")
            .field("login", &self.login.id)
            .field("mode", &self.mode)
            .field("focus", &self.focus)
            .field("render_count", &self.render_count)
            .finish_non_exhaustive()
    }
}

impl LoginDetail {
    pub fn new(store: Box<dyn LoginStore>, login: LoginRecord) -> Self {
        Self::with_options(store, login, DisplayOptions::default())
    }

    pub fn with_options(
        store: Box<dyn LoginStore>,
        login: LoginRecord,
        options: DisplayOptions,
    ) -> Self {
        let mut x = Self {
            store,
            login,
            mode: Mode::Viewing,
            password_revealed: options.reveal_password,
            options,
            focus: None,
            pending_delete: None,
            render_count: 0,
        };
        x.render();
        x
    }

    /// Fetches the login by id and builds a presenter for it.
    pub async fn load(
        store: Box<dyn LoginStore>,
        id: &LoginId,
        options: DisplayOptions,
    ) -> logindetail_store::Result<Self> {
        let Some(login) = store.get(id).await? else {
            return Err(logindetail_store::Error::NotFound(id.clone()));
        };
        Ok(Self::with_options(store, login, options))
    }

    pub fn login(&self) -> &LoginRecord {
        &self.login
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    pub fn focus(&self) -> Option<RowTag> {
        self.focus
    }

    pub fn is_password_revealed(&self) -> bool {
        self.password_revealed
    }

    /// Number of renders so far. Bumped after every state change that affects rows.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Currently shown delete confirmation, if it has not been dismissed.
    pub fn pending_delete(&self) -> Option<&DeletePrompt> {
        self.pending_delete.as_ref().filter(|p| !p.is_dismissed())
    }

    fn render(&mut self) {
        self.render_count += 1;
        log::debug!(
            "Render #{} of login {} ({:?})",
            self.render_count,
            self.login.id,
            self.mode
        );
    }

    pub fn rows(&self) -> Vec<Row> {
        LAYOUT.iter().map(|&tag| self.row(tag)).collect()
    }

    pub fn row(&self, tag: RowTag) -> Row {
        use RowTag::*;
        let editing = self.is_editing();
        let value = match tag {
            Website => self.login.hostname.clone(),
            Username => self.login.username.clone(),
            Password if editing || self.password_revealed => self.login.password.clone(),
            Password => DisplayOptions::mask(&self.login.password),
            Summary => self.options.summary(&self.login),
            Delete => String::new(),
        };
        Row {
            tag,
            title: tag.title(),
            value,
            editable: editing && matches!(tag, Username | Password),
            focused: self.focus == Some(tag),
        }
    }

    /// Enters editing mode and hands out the initial input values.
    pub fn begin_editing(&mut self) -> EditBuffer {
        if !self.is_editing() {
            self.mode = Mode::Editing;
            self.focus = Some(RowTag::Username);
            self.cancel_delete();
            self.render();
        }
        EditBuffer {
            username: self.login.username.clone(),
            password: self.login.password.clone(),
        }
    }

    pub fn cancel_editing(&mut self) {
        if self.is_editing() {
            self.leave_editing();
        }
    }

    fn leave_editing(&mut self) {
        self.mode = Mode::Viewing;
        self.focus = None;
        self.render();
    }

    /// Leaves editing mode, persisting `buffer` when it differs from the snapshot and is valid.
    pub async fn finish_editing(&mut self, buffer: EditBuffer) -> EditOutcome {
        if !self.is_editing() {
            return EditOutcome::Unchanged;
        }
        let outcome = self.save(buffer).await;
        self.leave_editing();
        outcome
    }

    async fn save(&mut self, buffer: EditBuffer) -> EditOutcome {
        let EditBuffer { username, password } = buffer;
        if !self.login.credentials_differ(&username, &password) {
            return EditOutcome::Unchanged;
        }

        let candidate = self.login.with_credentials(&username, &password);
        if let Err(invalid) = candidate.validate() {
            log::warn!("Discarding edit of login {}: {}", self.login.id, invalid);
            return EditOutcome::Rejected(invalid);
        }

        match self.store.update(&candidate).await {
            Ok(()) => {
                log::info!("Saved login {}", candidate.id);
                self.login = candidate;
                EditOutcome::Saved
            }
            Err(e) => {
                log::warn!("Failed to save login {}: {}", candidate.id, e);
                EditOutcome::StoreFailed
            }
        }
    }

    /// Handles a tap on `tag`. Ignored while editing.
    pub async fn tap_row(&mut self, tag: RowTag, lifecycle: &mut Lifecycle) -> TapOutcome {
        if self.is_editing() {
            return TapOutcome::Ignored;
        }
        match tag {
            RowTag::Delete => TapOutcome::ConfirmDelete(self.request_delete(lifecycle).await),
            tag if tag.has_menu() => TapOutcome::Menu(self.menu_for(tag)),
            _ => TapOutcome::Ignored,
        }
    }

    pub fn menu_for(&self, tag: RowTag) -> SelectionMenu {
        use MenuAction::*;
        let actions = match tag {
            RowTag::Website => vec![Copy, OpenAndFill],
            RowTag::Username => vec![Copy],
            RowTag::Password if self.password_revealed => vec![Hide, Copy],
            RowTag::Password => vec![Reveal, Copy],
            RowTag::Summary | RowTag::Delete => vec![],
        };
        SelectionMenu { row: tag, actions }
    }

    /// Runs a menu action chosen on `row`. Returns whether it did anything.
    pub fn perform_menu_action(
        &mut self,
        row: RowTag,
        action: MenuAction,
        clipboard: &mut dyn Clipboard,
        navigator: &mut dyn Navigator,
    ) -> bool {
        if self.is_editing() || !self.menu_for(row).actions.contains(&action) {
            return false;
        }
        match action {
            MenuAction::Copy => {
                let text = match row {
                    RowTag::Website => &self.login.hostname,
                    RowTag::Username => &self.login.username,
                    _ => &self.login.password,
                };
                clipboard.copy(text);
                true
            }
            MenuAction::Reveal | MenuAction::Hide => {
                self.password_revealed = action == MenuAction::Reveal;
                self.render();
                true
            }
            MenuAction::OpenAndFill => self.open_and_fill(navigator),
        }
    }

    /// Asks the store about sync state and shows the matching delete confirmation.
    pub async fn request_delete(&mut self, lifecycle: &mut Lifecycle) -> DeletePrompt {
        let synced = match self.store.has_synced_logins(&self.login.id).await {
            Ok(synced) => synced,
            Err(e) => {
                log::warn!("Cannot query sync state of {}: {}", self.login.id, e);
                true
            }
        };
        self.cancel_delete();
        let mut prompt = DeletePrompt::new(self.login.id.clone(), synced);
        prompt.bind(lifecycle);
        self.pending_delete = Some(prompt.clone());
        prompt
    }

    pub fn cancel_delete(&mut self) {
        if let Some(prompt) = self.pending_delete.take() {
            prompt.dismiss();
        }
    }

    /// Deletes the login behind the pending prompt and navigates back.
    /// Returns `false` if there was no live prompt or the store refused.
    pub async fn confirm_delete(&mut self, navigator: &mut dyn Navigator) -> bool {
        let Some(prompt) = self.pending_delete.take() else {
            return false;
        };
        if prompt.is_dismissed() || prompt.login_id() != &self.login.id {
            log::debug!("Ignoring confirmation of a dismissed prompt");
            return false;
        }
        prompt.dismiss();

        match self.store.delete(prompt.login_id()).await {
            Ok(()) => {
                log::info!("Deleted login {}", prompt.login_id());
                navigator.go_back();
                true
            }
            Err(e) => {
                log::warn!("Failed to delete login {}: {}", prompt.login_id(), e);
                false
            }
        }
    }

    /// URL to open for this login: the form URL if it parses, else the hostname.
    pub fn open_and_fill_url(&self) -> Option<Url> {
        self.login
            .form_submit_url
            .as_deref()
            .and_then(parse_openable)
            .or_else(|| parse_openable(&self.login.hostname))
    }

    pub fn open_and_fill(&self, navigator: &mut dyn Navigator) -> bool {
        let Some(url) = self.open_and_fill_url() else {
            log::debug!("No URL to open for login {}", self.login.id);
            return false;
        };
        navigator.dismiss();
        navigator.open_in_new_surface(&url);
        true
    }

    /// Reloads the snapshot after an external sync. Unsaved edits are dropped.
    pub async fn on_sync_finished(&mut self) {
        let id = self.login.id.clone();
        match self.store.get(&id).await {
            Ok(Some(login)) if login.id == self.login.id => {
                self.login = login;
                self.mode = Mode::Viewing;
                self.focus = None;
                self.render();
            }
            Ok(Some(login)) => {
                log::warn!("Store returned login {} for {}", login.id, id);
            }
            Ok(None) => log::debug!("Login {} vanished after sync", id),
            Err(e) => log::warn!("Cannot reload login {}: {}", id, e),
        }
    }
}

/// Parses `raw` as a URL with a host, assuming `https` when no scheme is given.
fn parse_openable(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let url = if RE_HAS_SCHEME.is_match(raw) {
        Url::parse(raw)
    } else {
        Url::parse(&format!("https://{}", raw))
    };
    url.ok().filter(|u| u.has_host())
}
