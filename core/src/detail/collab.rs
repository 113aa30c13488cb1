use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use logindetail_store::{LoginId, Url};

/// Screen navigation driven by the detail presenter.
pub trait Navigator {
    /// Opens `url` somewhere outside the detail screen (e.g. a new tab).
    fn open_in_new_surface(&mut self, url: &Url);

    /// Closes the whole detail flow.
    fn dismiss(&mut self);

    /// Returns to the previous screen.
    fn go_back(&mut self);
}

pub trait Clipboard {
    fn copy(&mut self, text: &str);
}

type Teardown = Box<dyn FnOnce() + Send>;

/// Handle to a teardown registered on a [`Lifecycle`].
#[derive(Debug, Clone, Default)]
pub struct Registration(Arc<AtomicBool>);

impl Registration {
    /// Unregisters the teardown. It will not run.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Owner of UI lifecycle transitions.
///
/// Teardowns run once, on the next background transition, unless cancelled first.
#[derive(Default)]
pub struct Lifecycle {
    teardowns: Vec<(Registration, Teardown)>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter_background(
        &mut self,
        teardown: impl FnOnce() + Send + 'static,
    ) -> Registration {
        self.teardowns.retain(|(reg, _)| !reg.is_cancelled());
        let reg = Registration::default();
        self.teardowns.push((reg.clone(), Box::new(teardown)));
        reg
    }

    pub fn enter_background(&mut self) {
        log::debug!("Entering background ({} teardowns)", self.pending_teardowns());
        for (reg, teardown) in self.teardowns.drain(..) {
            if !reg.is_cancelled() {
                teardown();
            }
        }
    }

    /// Number of registered teardowns that have not been cancelled.
    pub fn pending_teardowns(&self) -> usize {
        self.teardowns
            .iter()
            .filter(|(reg, _)| !reg.is_cancelled())
            .count()
    }
}

impl std::fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Lifecycle")
            .field("teardowns", &self.teardowns.len())
            .finish()
    }
}

/// Delete confirmation shown for a single login.
#[derive(Debug, Clone)]
pub struct DeletePrompt {
    login_id: LoginId,
    synced: bool,
    dismissed: Arc<AtomicBool>,
    registration: Option<Registration>,
}

impl DeletePrompt {
    pub const TITLE: &str = "Are you sure?";
    pub const SYNCED_MESSAGE: &str = "Logins will be removed from all connected devices.";
    pub const LOCAL_MESSAGE: &str = "Logins will be permanently removed.";
    pub const CANCEL_LABEL: &str = "Cancel";
    pub const DELETE_LABEL: &str = "Delete";

    pub(super) fn new(login_id: LoginId, synced: bool) -> Self {
        Self {
            login_id,
            synced,
            dismissed: Arc::new(AtomicBool::new(false)),
            registration: None,
        }
    }

    pub fn login_id(&self) -> &LoginId {
        &self.login_id
    }

    pub fn is_synced(&self) -> bool {
        self.synced
    }

    pub fn title(&self) -> &'static str {
        Self::TITLE
    }

    pub fn message(&self) -> &'static str {
        if self.synced {
            Self::SYNCED_MESSAGE
        } else {
            Self::LOCAL_MESSAGE
        }
    }

    /// Dismisses the prompt and drops its lifecycle teardown.
    pub fn dismiss(&self) {
        self.dismissed.store(true, Ordering::SeqCst);
        if let Some(reg) = &self.registration {
            reg.cancel();
        }
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed.load(Ordering::SeqCst)
    }

    /// Arranges for this prompt to be dismissed on the next background transition.
    pub(super) fn bind(&mut self, lifecycle: &mut Lifecycle) {
        let dismissed = self.dismissed.clone();
        let reg = lifecycle.on_enter_background(move || {
            dismissed.store(true, Ordering::SeqCst);
        });
        self.registration = Some(reg);
    }
}
