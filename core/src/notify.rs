// core/src/notify.rs

//! User-facing notices (toasts, prompts). The UI implements [`Notifier`];
//! the stores only say what happened.

use tracing::{event, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
  Success,
  Info,
  Warning,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub level: NoticeLevel,
  pub title: String,
}

impl Notice {
  pub fn success(title: impl Into<String>) -> Self {
    Self { level: NoticeLevel::Success, title: title.into() }
  }

  pub fn info(title: impl Into<String>) -> Self {
    Self { level: NoticeLevel::Info, title: title.into() }
  }

  pub fn warning(title: impl Into<String>) -> Self {
    Self { level: NoticeLevel::Warning, title: title.into() }
  }

  pub fn error(title: impl Into<String>) -> Self {
    Self { level: NoticeLevel::Error, title: title.into() }
  }
}

pub trait Notifier: Send + Sync {
  fn notify(&self, notice: Notice);
}

/// Logs notices instead of showing them. Used by the CLI and as a default.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
  fn notify(&self, notice: Notice) {
    match notice.level {
      NoticeLevel::Success | NoticeLevel::Info => event!(Level::INFO, title = %notice.title, "notice"),
      NoticeLevel::Warning => event!(Level::WARN, title = %notice.title, "notice"),
      NoticeLevel::Error => event!(Level::ERROR, title = %notice.title, "notice"),
    }
  }
}
