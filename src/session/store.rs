use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tokio::sync::watch;

use crate::api::{ApiClient, ApiError, Envelope};
use crate::models::{User, UserPatch};
use crate::mvi::Reducer;
use crate::store::StoreError;
use crate::validation::{Credentials, Registration, Validated};

use super::intent::SessionIntent;
use super::reducer::SessionReducer;
use super::state::SessionState;
use super::storage::{SessionStorage, StorageError};

/// Storage key holding the signed-in identity.
pub const SESSION_KEY: &str = "user";

const LOGIN_PATH: &str = "/login";
const REGISTER_PATH: &str = "/register";

/// The server's user object exactly as returned by `/login`.
type UserRecord = Map<String, Value>;

/// The authenticated identity, mirrored to durable storage.
///
/// Storage holds the server's own user object, including fields the typed
/// [`User`] does not model; the typed view in state is derived from it.
#[derive(Clone)]
pub struct SessionStore {
    api: ApiClient,
    storage: Arc<dyn SessionStorage>,
    state: Arc<watch::Sender<SessionState>>,
    record: Arc<Mutex<Option<UserRecord>>>,
}

fn user_from(record: &UserRecord) -> Result<User, serde_json::Error> {
    serde_json::from_value(Value::Object(record.clone()))
}

fn read_saved(storage: &dyn SessionStorage) -> Option<(UserRecord, User)> {
    let raw = match storage.load(SESSION_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read saved session");
            return None;
        }
    };
    let parsed = serde_json::from_str::<UserRecord>(&raw)
        .and_then(|record| user_from(&record).map(|user| (record, user)));
    match parsed {
        Ok(saved) => Some(saved),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable saved session");
            None
        }
    }
}

impl SessionStore {
    /// Builds the store, rehydrating any identity saved by a previous run.
    ///
    /// A missing or unreadable record starts signed out.
    pub fn restore(api: ApiClient, storage: Arc<dyn SessionStorage>) -> Self {
        let (record, user) = read_saved(storage.as_ref()).unzip();
        if let Some(user) = &user {
            tracing::debug!(user_id = %user.id, "Session restored");
        }

        let (state, _) = watch::channel(SessionState {
            user,
            ..SessionState::default()
        });
        Self {
            api,
            storage,
            state: Arc::new(state),
            record: Arc::new(Mutex::new(record)),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    fn dispatch(&self, intent: SessionIntent) {
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = SessionReducer::reduce(current, intent);
        });
    }

    fn fail(&self, operation: &'static str, error: StoreError) -> StoreError {
        tracing::warn!(operation, error = %error, "Session operation failed");
        self.dispatch(SessionIntent::Failed {
            message: error.user_message(),
        });
        error
    }

    fn persist(&self, record: &UserRecord) -> Result<(), StoreError> {
        let raw = serde_json::to_string(record).map_err(StorageError::from)?;
        self.storage.save(SESSION_KEY, &raw)?;
        Ok(())
    }

    /// Signs in and persists the returned identity.
    ///
    /// On failure the previous identity, if any, is kept.
    pub async fn login(&self, credentials: Validated<Credentials>) -> Result<User, StoreError> {
        self.dispatch(SessionIntent::Started);
        let result = async {
            let mut envelope: Envelope = self.api.post(LOGIN_PATH, None, &credentials).await?;
            let decode = |source| ApiError::Decode {
                path: LOGIN_PATH.to_string(),
                source,
            };
            let record: UserRecord = envelope
                .take(SESSION_KEY)
                .map_err(decode)?
                .ok_or(StoreError::MissingEntity {
                    resource: "session",
                    operation: "login",
                    key: SESSION_KEY,
                })?;
            let user = user_from(&record).map_err(decode)?;
            self.persist(&record)?;
            *self.record.lock() = Some(record);
            Ok::<_, StoreError>((user, envelope.message))
        }
        .await;

        match result {
            Ok((user, message)) => {
                tracing::info!(user_id = %user.id, role = %user.role, "Signed in");
                self.dispatch(SessionIntent::SignedIn {
                    user: user.clone(),
                    message,
                });
                Ok(user)
            }
            Err(e) => Err(self.fail("login", e)),
        }
    }

    /// Creates an account. The caller signs in separately.
    pub async fn register(
        &self,
        registration: Validated<Registration>,
    ) -> Result<Option<String>, StoreError> {
        self.dispatch(SessionIntent::Started);
        let result: Result<Envelope, _> = self.api.post(REGISTER_PATH, None, &registration).await;
        match result {
            Ok(envelope) => {
                tracing::info!(username = %registration.username, "Registered");
                self.dispatch(SessionIntent::Registered {
                    message: envelope.message.clone(),
                });
                Ok(envelope.message)
            }
            Err(e) => Err(self.fail("register", e.into())),
        }
    }

    /// Forgets the identity in memory and on disk. Safe to call twice.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.dispatch(SessionIntent::SignedOut);
        *self.record.lock() = None;
        self.storage.remove(SESSION_KEY)?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Merges `patch` into the signed-in identity and re-persists it.
    ///
    /// Does nothing when signed out.
    pub fn update_local_identity(&self, patch: &UserPatch) -> Result<(), StoreError> {
        let fields = match serde_json::to_value(patch).map_err(StorageError::from)? {
            Value::Object(fields) => fields,
            _ => UserRecord::new(),
        };
        self.update_local_record(fields)
    }

    /// Merges arbitrary top-level fields into the saved user object.
    ///
    /// Fields the typed identity knows about are reflected in state; the
    /// rest are only kept in storage. Does nothing when signed out.
    pub fn update_local_record(&self, fields: UserRecord) -> Result<(), StoreError> {
        let merged = {
            let mut record = self.record.lock();
            let Some(record) = record.as_mut() else {
                return Ok(());
            };
            record.extend(fields);
            record.clone()
        };
        let user = user_from(&merged).map_err(StorageError::from)?;
        self.persist(&merged)?;
        self.dispatch(SessionIntent::IdentityPatched {
            patch: UserPatch {
                username: Some(user.username),
                email: Some(user.email),
                role: Some(user.role),
                status: Some(user.status),
            },
        });
        Ok(())
    }
}
