use serde::{Serialize, Serializer};

use crate::models::User;
use crate::store::{Endpoints, Resource, ResourceStore};
use crate::validation::{FieldErrors, Schema, UserUpdate};

/// Accounts are created through registration, never through this store.
#[derive(Debug)]
pub enum NoDraft {}

impl Schema for NoDraft {
    fn check(&self) -> Result<(), FieldErrors> {
        match *self {}
    }
}

impl Serialize for NoDraft {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        match *self {}
    }
}

pub struct Users;

impl Resource for Users {
    type Entity = User;
    type Draft = NoDraft;
    type Patch = UserUpdate;

    const NAME: &'static str = "users";
    const ENVELOPE: &'static str = "user";
    const ENDPOINTS: Endpoints = Endpoints {
        list: "/showUsers",
        show: None,
        create: None,
        update: "/updateUser",
        delete: "/deleteUser",
    };
}

pub type UserStore = ResourceStore<Users>;
