use serde::Serialize;

use crate::models::{Post, User};
use crate::precondition::{ensure_signed_in, PreconditionError};
use crate::store::{Endpoints, Resource, ResourceStore, StoreError};
use crate::validation::{PostDraft, PostPatch};

pub struct Posts;

impl Resource for Posts {
    type Entity = Post;
    type Draft = PostDraft;
    type Patch = PostPatch;

    const NAME: &'static str = "posts";
    const ENVELOPE: &'static str = "post";
    const ENDPOINTS: Endpoints = Endpoints {
        list: "/showPosts",
        show: None,
        create: Some("/savePost"),
        update: "/updatePost",
        delete: "/delPost",
    };
}

pub type PostStore = ResourceStore<Posts>;

const BY_DEVICE_PATH: &str = "/showPostsByDevice";
const LIKE_PATH: &str = "/likePost";
const DISLIKE_PATH: &str = "/dislikePost";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReactionBody<'a> {
    user_id: &'a str,
}

/// Why a reaction was not recorded.
#[derive(Debug, thiserror::Error)]
pub enum ReactionError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReactionError {
    pub fn user_message(&self) -> String {
        match self {
            ReactionError::Precondition(e) => e.to_string(),
            ReactionError::Store(e) => e.user_message(),
        }
    }
}

impl ResourceStore<Posts> {
    /// Loads the reviews of one device into `scoped`.
    pub async fn fetch_for_device(&self, device_id: &str) -> Result<Vec<Post>, StoreError> {
        let api = self.api();
        self.load_scoped("fetch_for_device", api.get(BY_DEVICE_PATH, Some(device_id)))
            .await
    }

    pub async fn like(
        &self,
        post_id: &str,
        user: Option<&User>,
    ) -> Result<Option<Post>, ReactionError> {
        self.react("like", LIKE_PATH, post_id, user).await
    }

    pub async fn dislike(
        &self,
        post_id: &str,
        user: Option<&User>,
    ) -> Result<Option<Post>, ReactionError> {
        self.react("dislike", DISLIKE_PATH, post_id, user).await
    }

    /// The server toggles the reaction; its copy of the post is applied as is.
    async fn react(
        &self,
        operation: &'static str,
        path: &'static str,
        post_id: &str,
        user: Option<&User>,
    ) -> Result<Option<Post>, ReactionError> {
        let user = ensure_signed_in(user, "react to reviews")?;
        let body = ReactionBody { user_id: &user.id };
        let api = self.api();
        let post = self
            .apply_returned(operation, path, api.post(path, Some(post_id), &body))
            .await?;
        Ok(post)
    }
}
