use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use chrono::{Local, TimeZone as _};
use logindetail_core::detail::*;
use logindetail_store::*;

/// Wraps a [`MemoryStore`], counting updates and optionally failing calls.
#[derive(Clone, Default)]
struct ProbeStore {
    inner: MemoryStore,
    updates: Arc<AtomicUsize>,
    fail_updates: bool,
    fail_deletes: bool,
    fail_sync_query: bool,
}

impl ProbeStore {
    fn with(login: LoginRecord) -> Self {
        Self {
            inner: MemoryStore::with_logins([login]),
            ..Default::default()
        }
    }

    fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LoginStore for ProbeStore {
    async fn has_synced_logins(&self, id: &LoginId) -> Result<bool> {
        if self.fail_sync_query {
            return Err(Error::Backend("sync service down".into()));
        }
        self.inner.has_synced_logins(id).await
    }

    async fn get(&self, id: &LoginId) -> Result<Option<LoginRecord>> {
        self.inner.get(id).await
    }

    async fn update(&self, login: &LoginRecord) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates {
            return Err(Error::Backend("disk full".into()));
        }
        self.inner.update(login).await
    }

    async fn delete(&self, id: &LoginId) -> Result<()> {
        if self.fail_deletes {
            return Err(Error::Backend("locked".into()));
        }
        self.inner.delete(id).await
    }

    async fn add(&self, login: LoginRecord) -> Result<LoginId> {
        self.inner.add(login).await
    }
}

#[derive(Debug, Default)]
struct RecordingNavigator {
    events: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn open_in_new_surface(&mut self, url: &Url) {
        self.events.push(format!("open {}", url));
    }

    fn dismiss(&mut self) {
        self.events.push("dismiss".to_owned());
    }

    fn go_back(&mut self) {
        self.events.push("back".to_owned());
    }
}

#[derive(Debug, Default)]
struct RecordingClipboard {
    copied: Vec<String>,
}

impl Clipboard for RecordingClipboard {
    fn copy(&mut self, text: &str) {
        self.copied.push(text.to_owned());
    }
}

fn alice() -> LoginRecord {
    let mut login = LoginRecord::new("https://example.com", "alice", "hunter2").with_id("alice01");
    login.created_at = Local.with_ymd_and_hms(2020, 1, 1, 9, 0, 0).unwrap();
    login.modified_at = login.created_at;
    login
}

fn presenter(store: &ProbeStore) -> LoginDetail {
    LoginDetail::new(Box::new(store.clone()), alice())
}

#[tokio::test]
async fn begin_editing_focuses_username() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);

    let buffer = detail.begin_editing();
    assert_eq!(detail.mode(), Mode::Editing);
    assert_eq!(detail.focus(), Some(RowTag::Username));
    assert_eq!(buffer.username, "alice");
    assert_eq!(buffer.password, "hunter2");
    assert_eq!(detail.render_count(), 2);

    // Entering twice is harmless
    detail.begin_editing();
    assert_eq!(detail.render_count(), 2);
}

#[tokio::test]
async fn unchanged_edit_issues_no_update() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);

    let mut buffer = detail.begin_editing();
    buffer.username.push_str("-tmp");
    buffer.username = "alice".to_owned();

    let renders = detail.render_count();
    let outcome = detail.finish_editing(buffer).await;

    assert_eq!(outcome, EditOutcome::Unchanged);
    assert_eq!(store.update_calls(), 0);
    assert_eq!(detail.mode(), Mode::Viewing);
    assert_eq!(detail.focus(), None);
    assert_eq!(detail.render_count(), renders + 1);
}

#[tokio::test]
async fn changed_edit_is_saved() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);

    let mut buffer = detail.begin_editing();
    buffer.password = "correct horse".to_owned();
    let outcome = detail.finish_editing(buffer).await;

    assert_eq!(outcome, EditOutcome::Saved);
    assert_eq!(store.update_calls(), 1);
    assert_eq!(detail.login().password, "correct horse");
    assert_eq!(detail.login().created_at, alice().created_at);

    let stored = store.get(&alice().id).await.unwrap().unwrap();
    assert_eq!(&stored, detail.login());
}

#[tokio::test]
async fn invalid_edit_keeps_snapshot() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);
    let before = detail.login().clone();

    let mut buffer = detail.begin_editing();
    buffer.username = "mallory".to_owned();
    buffer.password = String::new();
    let renders = detail.render_count();
    let outcome = detail.finish_editing(buffer).await;

    assert_eq!(outcome, EditOutcome::Rejected(InvalidLogin::EmptyPassword));
    assert_eq!(detail.login(), &before);
    assert_eq!(store.update_calls(), 0);
    assert_eq!(detail.mode(), Mode::Viewing);
    assert_eq!(detail.render_count(), renders + 1);
}

#[tokio::test]
async fn store_failure_keeps_snapshot() {
    let store = ProbeStore {
        fail_updates: true,
        ..ProbeStore::with(alice())
    };
    let mut detail = presenter(&store);
    let before = detail.login().clone();

    let mut buffer = detail.begin_editing();
    buffer.username = "alice.smith".to_owned();
    let outcome = detail.finish_editing(buffer).await;

    assert_eq!(outcome, EditOutcome::StoreFailed);
    assert_eq!(store.update_calls(), 1);
    assert_eq!(detail.login(), &before);
    assert_eq!(detail.mode(), Mode::Viewing);
}

#[tokio::test]
async fn finish_without_begin_is_noop() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);

    let outcome = detail
        .finish_editing(EditBuffer {
            username: "x".into(),
            password: "y".into(),
        })
        .await;
    assert_eq!(outcome, EditOutcome::Unchanged);
    assert_eq!(store.update_calls(), 0);
    assert_eq!(detail.render_count(), 1);
}

#[tokio::test]
async fn cancel_editing_discards_buffer() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);

    let mut buffer = detail.begin_editing();
    buffer.username = "bob".to_owned();
    detail.cancel_editing();

    assert_eq!(detail.mode(), Mode::Viewing);
    assert_eq!(detail.login().username, "alice");

    // The stale buffer can no longer be saved
    assert_eq!(detail.finish_editing(buffer).await, EditOutcome::Unchanged);
    assert_eq!(store.update_calls(), 0);
}

#[tokio::test]
async fn taps_while_editing_are_ignored() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);
    let mut lifecycle = Lifecycle::new();

    detail.begin_editing();
    for tag in LAYOUT {
        assert!(matches!(
            detail.tap_row(tag, &mut lifecycle).await,
            TapOutcome::Ignored
        ));
    }
    assert!(detail.pending_delete().is_none());
}

#[tokio::test]
async fn taps_show_row_menus() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);
    let mut lifecycle = Lifecycle::new();

    let TapOutcome::Menu(menu) = detail.tap_row(RowTag::Website, &mut lifecycle).await else {
        panic!("website row should show a menu");
    };
    assert_eq!(menu.row, RowTag::Website);
    assert_eq!(menu.actions, vec![MenuAction::Copy, MenuAction::OpenAndFill]);

    let TapOutcome::Menu(menu) = detail.tap_row(RowTag::Password, &mut lifecycle).await else {
        panic!("password row should show a menu");
    };
    assert_eq!(menu.actions, vec![MenuAction::Reveal, MenuAction::Copy]);

    assert!(matches!(
        detail.tap_row(RowTag::Summary, &mut lifecycle).await,
        TapOutcome::Ignored
    ));
    assert_eq!(lifecycle.pending_teardowns(), 0);
}

#[tokio::test]
async fn menu_actions_copy_and_reveal() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);
    let mut clipboard = RecordingClipboard::default();
    let mut nav = RecordingNavigator::default();

    assert!(detail.perform_menu_action(
        RowTag::Password,
        MenuAction::Copy,
        &mut clipboard,
        &mut nav
    ));
    assert_eq!(clipboard.copied, vec!["hunter2"]);
    assert!(!detail.is_password_revealed());

    assert!(detail.perform_menu_action(
        RowTag::Password,
        MenuAction::Reveal,
        &mut clipboard,
        &mut nav
    ));
    assert!(detail.is_password_revealed());
    assert_eq!(detail.row(RowTag::Password).value, "hunter2");
    assert_eq!(
        detail.menu_for(RowTag::Password).actions,
        vec![MenuAction::Hide, MenuAction::Copy]
    );

    // Reveal is not offered on the username row
    assert!(!detail.perform_menu_action(
        RowTag::Username,
        MenuAction::Reveal,
        &mut clipboard,
        &mut nav
    ));

    assert!(detail.perform_menu_action(
        RowTag::Website,
        MenuAction::OpenAndFill,
        &mut clipboard,
        &mut nav
    ));
    assert_eq!(nav.events, vec!["dismiss", "open https://example.com/"]);
}

#[tokio::test]
async fn delete_prompt_wording_follows_sync_answer() {
    // synced
    let store = ProbeStore::with(alice());
    store.inner.mark_synced(&alice().id).await;
    let mut detail = presenter(&store);
    let prompt = detail.request_delete(&mut Lifecycle::new()).await;
    assert!(prompt.is_synced());
    assert_eq!(prompt.message(), DeletePrompt::SYNCED_MESSAGE);

    // not synced
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);
    let prompt = detail.request_delete(&mut Lifecycle::new()).await;
    assert!(!prompt.is_synced());
    assert_eq!(prompt.message(), DeletePrompt::LOCAL_MESSAGE);

    // query failed
    let store = ProbeStore {
        fail_sync_query: true,
        ..ProbeStore::with(alice())
    };
    let mut detail = presenter(&store);
    let prompt = detail.request_delete(&mut Lifecycle::new()).await;
    assert!(prompt.is_synced());
    assert_eq!(prompt.message(), DeletePrompt::SYNCED_MESSAGE);
}

#[tokio::test]
async fn confirmed_delete_removes_and_goes_back() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);
    let mut lifecycle = Lifecycle::new();
    let mut nav = RecordingNavigator::default();

    let TapOutcome::ConfirmDelete(prompt) = detail.tap_row(RowTag::Delete, &mut lifecycle).await
    else {
        panic!("delete row should ask for confirmation");
    };
    assert_eq!(prompt.login_id(), &alice().id);
    assert!(detail.pending_delete().is_some());

    assert!(detail.confirm_delete(&mut nav).await);
    assert_eq!(nav.events, vec!["back"]);
    assert_eq!(store.get(&alice().id).await.unwrap(), None);
    assert!(detail.pending_delete().is_none());

    // A second confirm has no prompt to act on
    assert!(!detail.confirm_delete(&mut nav).await);
    assert_eq!(nav.events.len(), 1);
}

#[tokio::test]
async fn cancelled_delete_keeps_login() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);
    let mut nav = RecordingNavigator::default();

    let prompt = detail.request_delete(&mut Lifecycle::new()).await;
    detail.cancel_delete();

    assert!(prompt.is_dismissed());
    assert!(!detail.confirm_delete(&mut nav).await);
    assert!(nav.events.is_empty());
    assert!(store.get(&alice().id).await.unwrap().is_some());
}

#[tokio::test]
async fn background_transition_dismisses_delete_prompt() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);
    let mut lifecycle = Lifecycle::new();
    let mut nav = RecordingNavigator::default();

    let prompt = detail.request_delete(&mut lifecycle).await;
    lifecycle.enter_background();

    assert!(prompt.is_dismissed());
    assert!(detail.pending_delete().is_none());
    assert!(!detail.confirm_delete(&mut nav).await);
    assert!(nav.events.is_empty());
    assert!(store.get(&alice().id).await.unwrap().is_some());
}

#[tokio::test]
async fn settled_delete_prompts_release_lifecycle() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);
    let mut lifecycle = Lifecycle::new();
    let mut nav = RecordingNavigator::default();

    for _ in 0..100 {
        detail.request_delete(&mut lifecycle).await;
        detail.cancel_delete();
    }
    assert_eq!(lifecycle.pending_teardowns(), 0);

    // A replaced prompt is dismissed and only the newest stays registered
    let first = detail.request_delete(&mut lifecycle).await;
    let second = detail.request_delete(&mut lifecycle).await;
    assert!(first.is_dismissed());
    assert!(!second.is_dismissed());
    assert_eq!(lifecycle.pending_teardowns(), 1);

    assert!(detail.confirm_delete(&mut nav).await);
    assert_eq!(lifecycle.pending_teardowns(), 0);
}

#[tokio::test]
async fn begin_editing_dismisses_delete_prompt() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);
    let mut lifecycle = Lifecycle::new();

    let prompt = detail.request_delete(&mut lifecycle).await;
    detail.begin_editing();

    assert!(prompt.is_dismissed());
    assert!(detail.pending_delete().is_none());
    assert_eq!(lifecycle.pending_teardowns(), 0);
}

#[tokio::test]
async fn failed_delete_stays_on_screen() {
    let store = ProbeStore {
        fail_deletes: true,
        ..ProbeStore::with(alice())
    };
    let mut detail = presenter(&store);
    let mut nav = RecordingNavigator::default();

    detail.request_delete(&mut Lifecycle::new()).await;
    assert!(!detail.confirm_delete(&mut nav).await);
    assert!(nav.events.is_empty());
    assert!(store.get(&alice().id).await.unwrap().is_some());
}

#[tokio::test]
async fn open_and_fill_falls_back_to_hostname() {
    let login = LoginRecord::new("example.com", "alice", "hunter2").with_id("bare");
    let store = ProbeStore::with(login.clone());
    let detail = LoginDetail::new(Box::new(store), login);
    let mut nav = RecordingNavigator::default();

    assert_eq!(
        detail.open_and_fill_url().map(|u| u.to_string()),
        Some("https://example.com/".to_owned())
    );
    assert!(detail.open_and_fill(&mut nav));
    assert_eq!(nav.events, vec!["dismiss", "open https://example.com/"]);
}

#[tokio::test]
async fn open_and_fill_ignores_unparsable_url() {
    let login = LoginRecord::new("not a host", "alice", "hunter2")
        .with_id("junk")
        .with_form_submit_url("::::");
    let store = ProbeStore::with(login.clone());
    let detail = LoginDetail::new(Box::new(store), login);
    let mut nav = RecordingNavigator::default();

    assert_eq!(detail.open_and_fill_url(), None);
    assert!(!detail.open_and_fill(&mut nav));
    assert!(nav.events.is_empty());
}

#[tokio::test]
async fn open_and_fill_skips_unparsable_form_url() {
    let login = LoginRecord::new("example.com", "alice", "hunter2")
        .with_id("broken-form")
        .with_form_submit_url("::::");
    let store = ProbeStore::with(login.clone());
    let detail = LoginDetail::new(Box::new(store), login);
    let mut nav = RecordingNavigator::default();

    assert_eq!(
        detail.open_and_fill_url().map(|u| u.to_string()),
        Some("https://example.com/".to_owned())
    );
    assert!(detail.open_and_fill(&mut nav));
    assert_eq!(nav.events, vec!["dismiss", "open https://example.com/"]);
}

#[tokio::test]
async fn sync_replaces_snapshot_while_viewing() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);

    let newer = alice().with_credentials("alice@example.com", "from-another-device");
    store.inner.update(&newer).await.unwrap();

    let renders = detail.render_count();
    detail.on_sync_finished().await;

    assert_eq!(detail.login(), &newer);
    assert_eq!(detail.render_count(), renders + 1);
}

#[tokio::test]
async fn sync_discards_unsaved_edits() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);

    let mut buffer = detail.begin_editing();
    buffer.username = "local-edit".to_owned();

    let newer = alice().with_credentials("alice", "rotated");
    store.inner.update(&newer).await.unwrap();
    detail.on_sync_finished().await;

    assert_eq!(detail.mode(), Mode::Viewing);
    assert_eq!(detail.focus(), None);
    assert_eq!(detail.login(), &newer);

    assert_eq!(detail.finish_editing(buffer).await, EditOutcome::Unchanged);
    assert_eq!(store.update_calls(), 0);
    assert_eq!(detail.login().username, "alice");
}

#[tokio::test]
async fn sync_keeps_snapshot_when_login_vanished() {
    let store = ProbeStore::with(alice());
    let mut detail = presenter(&store);
    store.inner.delete(&alice().id).await.unwrap();

    let renders = detail.render_count();
    detail.on_sync_finished().await;

    assert_eq!(detail.login().username, "alice");
    assert_eq!(detail.render_count(), renders);
}

#[tokio::test]
async fn load_reports_missing_login() {
    let store = ProbeStore::with(alice());

    let detail = LoginDetail::load(Box::new(store.clone()), &alice().id, DisplayOptions::default())
        .await
        .unwrap();
    assert_eq!(detail.login(), &alice());

    let err = LoginDetail::load(Box::new(store), &"ghost".into(), DisplayOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
