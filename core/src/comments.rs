// core/src/comments.rs

//! Comments and ratings of one product, with a cache of author names.

use futures_util::future::join_all;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::error::{StorefrontError, StorefrontResult};
use crate::model::{Comment, UserInfo};
use crate::notify::{Notice, Notifier};
use crate::remote::{CommentService, NewComment};
use crate::session::SessionHandle;
use crate::state::SharedState;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadState {
  pub comments: Vec<Comment>,
  /// Text being typed, cleared once a comment is saved.
  pub draft: Option<String>,
  pub users: HashMap<u64, UserInfo>,
}

pub struct CommentThread {
  product_id: u64,
  state: SharedState<ThreadState>,
  service: Arc<dyn CommentService>,
  session: SessionHandle,
  notifier: Arc<dyn Notifier>,
}

impl CommentThread {
  pub fn new(
    product_id: u64,
    service: Arc<dyn CommentService>,
    session: SessionHandle,
    notifier: Arc<dyn Notifier>,
  ) -> Self {
    Self {
      product_id,
      state: SharedState::default(),
      service,
      session,
      notifier,
    }
  }

  pub fn product_id(&self) -> u64 {
    self.product_id
  }

  pub fn snapshot(&self) -> ThreadState {
    self.state.snapshot()
  }

  pub fn set_draft(&self, draft: Option<String>) {
    self.state.update(|state| state.draft = draft);
  }

  pub fn set_comments(&self, comments: Vec<Comment>) {
    self.state.update(|state| state.comments = comments);
  }

  pub fn username_of(&self, user_id: u64) -> Option<String> {
    self.state.read().users.get(&user_id).map(|info| info.username.clone())
  }

  /// Loads the comments and the author of each of them.
  #[instrument(name = "CommentThread::load", skip(self), fields(product_id = self.product_id), err(Display))]
  pub async fn load(&self) -> StorefrontResult<()> {
    let comments = self.service.comments_for(self.product_id).await?;
    let authors: BTreeSet<u64> = comments.iter().map(|c| c.user).collect();
    self.set_comments(comments);
    join_all(authors.into_iter().map(|user_id| self.user_info(user_id))).await;
    Ok(())
  }

  /// Cached author lookup. A failed lookup is logged and yields `None`.
  pub async fn user_info(&self, user_id: u64) -> Option<UserInfo> {
    let cached = self.state.read().users.get(&user_id).cloned();
    if cached.is_some() {
      return cached;
    }
    match self.service.user_info(user_id).await {
      Ok(info) => {
        self.state.update(|state| state.users.insert(user_id, info.clone()));
        Some(info)
      }
      Err(err) => {
        event!(Level::WARN, user_id, error = %err, "Could not resolve comment author.");
        None
      }
    }
  }

  /// Posts a comment and appends the saved version.
  #[instrument(name = "CommentThread::add_comment", skip(self, text), fields(product_id = self.product_id), err(Display))]
  pub async fn add_comment(&self, text: &str, stars: u8) -> StorefrontResult<Comment> {
    let session = self.session.require("comments.add").map_err(|err| {
      self.notifier.notify(Notice::warning("Please login"));
      err
    })?;
    if text.trim().is_empty() {
      self.notifier.notify(Notice::warning("Please write a comment"));
      return Err(StorefrontError::ValidationSkip {
        operation: "comments.add",
        reason: "comment text is empty".to_string(),
      });
    }

    let request = NewComment {
      comment: text.to_string(),
      user: session.user_id,
      stars,
      product: self.product_id,
    };
    let saved = self.service.save_comment(&request).await.map_err(|err| {
      event!(Level::ERROR, error = %err, "Saving comment failed.");
      err
    })?;

    self.state.update(|state| state.comments.push(saved.clone()));
    self.user_info(saved.user).await;
    self.set_draft(None);
    self.notifier.notify(Notice::success("Comment added"));
    Ok(saved)
  }
}
