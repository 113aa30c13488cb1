use std::io;

use crate::detail::{DeletePrompt, EditBuffer, MenuAction, SelectionMenu};

pub mod util {
    use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};
    use std::io;

    fn theme() -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn ask_text(prompt: &str, initial: &str) -> io::Result<String> {
        Input::with_theme(&theme())
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
    }

    pub fn ask_password(prompt: &str) -> io::Result<String> {
        Password::with_theme(&theme())
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
    }

    pub fn ask_yes_no(prompt: &str) -> io::Result<bool> {
        Confirm::with_theme(&theme())
            .with_prompt(prompt)
            .default(false)
            .interact()
    }

    pub fn choose(prompt: &str, items: &[String]) -> io::Result<Option<usize>> {
        Select::with_theme(&theme())
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
    }
}

/// Asks for new credentials. Fields passed as `Some` are taken as-is.
/// An empty password answer keeps the current password.
pub fn ask_edit(
    current: EditBuffer,
    username: Option<String>,
    password: Option<String>,
) -> io::Result<EditBuffer> {
    let username = match username {
        Some(u) => u,
        None => util::ask_text("Username", &current.username)?,
    };
    let password = match password {
        Some(p) => p,
        None => {
            let p = util::ask_password("Password (empty to keep)")?;
            if p.is_empty() {
                current.password
            } else {
                p
            }
        }
    };
    Ok(EditBuffer { username, password })
}

pub fn ask_delete_confirmation(prompt: &DeletePrompt) -> io::Result<bool> {
    let question = format!(
        "{} {} [{} / {}]",
        prompt.title(),
        prompt.message(),
        DeletePrompt::CANCEL_LABEL,
        DeletePrompt::DELETE_LABEL,
    );
    util::ask_yes_no(&question)
}

/// Returns `None` when the menu was closed without a choice.
pub fn ask_menu_action(menu: &SelectionMenu) -> io::Result<Option<MenuAction>> {
    let items: Vec<String> = menu.actions.iter().map(ToString::to_string).collect();
    let prompt = format!("{} actions", menu.row.title());
    let chosen = util::choose(&prompt, &items)?;
    Ok(chosen.and_then(|i| menu.actions.get(i).copied()))
}
