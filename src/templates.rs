// Pages carry `<!--NAME-->` markers for a fixed set of slots.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::account::Account;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Register,
    Landing,
    AccountList,
}

impl Page {
    pub fn file_name(self) -> &'static str {
        match self {
            Page::Login => "login.html",
            Page::Register => "register.html",
            Page::Landing => "index.html",
            Page::AccountList => "user_history.html",
        }
    }

    pub fn slots(self) -> &'static [Slot] {
        match self {
            Page::Login => &[Slot::LoginError],
            Page::Register => &[Slot::RegisterError],
            Page::Landing => &[Slot::Username],
            Page::AccountList => &[Slot::AccountTable],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    LoginError,
    RegisterError,
    Username,
    AccountTable,
}

impl Slot {
    fn marker(self) -> &'static str {
        match self {
            Slot::LoginError => "<!--ERROR-LOGIN-->",
            Slot::RegisterError => "<!--ERROR-REGISTER-->",
            Slot::Username => "<!--USERNAME-->",
            Slot::AccountTable => "<!--USER-TABLE-->",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum SlotValue<'a> {
    Text(&'a str),
    Accounts(&'a [Account]),
}

impl SlotValue<'_> {
    fn to_html(self) -> String {
        match self {
            SlotValue::Text(text) => escape_html(text),
            SlotValue::Accounts(accounts) => account_table(accounts),
        }
    }
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read template {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Slot {slot:?} is not defined for page {page:?}")]
    UnknownSlot { page: Page, slot: Slot },
}

#[derive(Debug, Clone)]
pub struct Renderer {
    dir: PathBuf,
}

impl Renderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn render(&self, page: Page, values: &[(Slot, SlotValue<'_>)]) -> Result<String, TemplateError> {
        if let Some(&(slot, _)) = values.iter().find(|(slot, _)| !page.slots().contains(slot)) {
            return Err(TemplateError::UnknownSlot { page, slot });
        }

        let path = self.dir.join(page.file_name());
        let template = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| TemplateError::Read { path, source })?;

        Ok(fill(template, page, values))
    }
}

fn fill(template: String, page: Page, values: &[(Slot, SlotValue<'_>)]) -> String {
    let mut html = template;
    for &slot in page.slots() {
        let replacement = values
            .iter()
            .find(|(candidate, _)| *candidate == slot)
            .map(|&(_, value)| value.to_html())
            .unwrap_or_default();
        html = html.replace(slot.marker(), &replacement);
    }
    html
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn account_table(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return r#"<div class="alert alert-warning">No users found.</div>"#.to_string();
    }

    accounts
        .iter()
        .enumerate()
        .map(|(index, account)| {
            format!(
                r#"
          <div class="border border-success rounded mb-3 p-3">
            <p class="text-secondary mb-1">
              <small>[{number}] Registered User</small>
            </p>
            <div class="row">
              <div class="col-sm-8">
                <p class="text-success mb-1">Username</p>
                <p class="lead">{username}</p>
              </div>
              <div class="col-sm-4">
                <p class="text-success mb-1">Registration Date</p>
                <p class="text-light"><small>{created_at}</small></p>
              </div>
            </div>
          </div>"#,
                number = index + 1,
                username = escape_html(&account.username),
                created_at = account.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            )
        })
        .collect()
}
