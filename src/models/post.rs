use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::link::{merge_links, Linked};
use super::{DeviceSummary, Entity, Identified, UserSummary};

/// A review left against a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PostWire")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub device_id: String,
    pub user_id: String,
    #[serde(rename = "user")]
    pub author: Option<UserSummary>,
    pub text: String,
    pub rating: u8,
    pub image: Option<String>,
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// One user's reaction to a post.
///
/// Both flags can be set at once: the server decides exclusivity and the
/// client mirrors whatever it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reaction {
    pub liked: bool,
    pub disliked: bool,
}

impl Identified for Post {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Post {}

impl Post {
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(UserSummary::display_name)
            .unwrap_or("Anonymous")
    }

    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    pub fn reaction_of(&self, user_id: &str) -> Reaction {
        Reaction {
            liked: self.likes.iter().any(|id| id == user_id),
            disliked: self.dislikes.iter().any(|id| id == user_id),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostWire {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    device_id: Option<Linked<DeviceSummary>>,
    #[serde(default)]
    user_id: Option<Linked<UserSummary>>,
    #[serde(default)]
    user: Option<Linked<UserSummary>>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    rating: u8,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    likes: Vec<String>,
    #[serde(default)]
    dislikes: Vec<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<PostWire> for Post {
    fn from(wire: PostWire) -> Self {
        let (device_id, _) = merge_links(wire.device_id, None);
        let (user_id, author) = merge_links(wire.user_id, wire.user);
        Self {
            id: wire.id,
            device_id,
            user_id,
            author,
            text: wire.text,
            rating: wire.rating,
            image: wire.image,
            likes: wire.likes,
            dislikes: wire.dislikes,
            created_at: wire.created_at,
        }
    }
}
