use crate::models::Borrowing;
use crate::precondition::ensure_payable;
use crate::store::{Endpoints, Resource, ResourceStore, StoreError};
use crate::validation::{BorrowingDraft, BorrowingPatch, FinePayment, Validated};

pub struct Borrowings;

impl Resource for Borrowings {
    type Entity = Borrowing;
    type Draft = BorrowingDraft;
    type Patch = BorrowingPatch;

    const NAME: &'static str = "borrowings";
    const ENVELOPE: &'static str = "borrowing";
    const ENDPOINTS: Endpoints = Endpoints {
        list: "/showBorrowings",
        show: None,
        create: Some("/saveBorrowing"),
        update: "/updateBorrowing",
        delete: "/deleteBorrowing",
    };
}

pub type BorrowingStore = ResourceStore<Borrowings>;

const BY_USER_PATH: &str = "/showBorrowingsByUser";
const PAY_FINE_PATH: &str = "/payFine";

impl ResourceStore<Borrowings> {
    /// Loads one user's borrowings into `scoped`.
    pub async fn fetch_for_user(&self, user_id: &str) -> Result<Vec<Borrowing>, StoreError> {
        let api = self.api();
        self.load_scoped("fetch_for_user", api.get(BY_USER_PATH, Some(user_id)))
            .await
    }

    /// Pays the fine on `borrowing_id`.
    ///
    /// The borrowing must be among the cached ones with an open fine; a
    /// borrowing returned by the server replaces the cached copy.
    pub async fn pay_fine(
        &self,
        borrowing_id: &str,
        payment: Validated<FinePayment>,
    ) -> Result<Option<Borrowing>, PayFineError> {
        let state = self.state();
        let cached: Vec<Borrowing> = state
            .scoped
            .iter()
            .chain(state.items.iter())
            .cloned()
            .collect();
        let borrowing = ensure_payable(&cached, borrowing_id)?;
        tracing::info!(
            borrowing_id,
            fine = %borrowing.fine,
            method = ?payment.method(),
            "Paying fine"
        );

        let api = self.api();
        let paid = self
            .apply_returned(
                "pay_fine",
                PAY_FINE_PATH,
                api.post(PAY_FINE_PATH, Some(borrowing_id), &payment),
            )
            .await?;
        Ok(paid)
    }
}

/// Why a fine payment did not go through.
#[derive(Debug, thiserror::Error)]
pub enum PayFineError {
    #[error(transparent)]
    Precondition(#[from] crate::precondition::PreconditionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PayFineError {
    pub fn user_message(&self) -> String {
        match self {
            PayFineError::Precondition(e) => e.to_string(),
            PayFineError::Store(e) => e.user_message(),
        }
    }
}
