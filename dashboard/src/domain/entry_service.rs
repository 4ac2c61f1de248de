//! Manual entry service.
//!
//! Validates a form draft, attributes it to the tenant owner and performs a
//! single insert. Nothing is retried.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{EntryCommand, TransactionRepository, TransactionRepositoryError};
use crate::domain::{
    Access, Amount, Error, NewTransaction, Transaction, TransactionDraft, UserProfile,
};

/// Entry service implementing the [`EntryCommand`] driving port.
#[derive(Clone)]
pub struct EntryService<R> {
    repository: Arc<R>,
}

impl<R> EntryService<R> {
    /// Create a service writing through `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(error: TransactionRepositoryError) -> Error {
    match error {
        TransactionRepositoryError::Transport { message }
        | TransactionRepositoryError::Rejected { message } => Error::external_service(message),
        TransactionRepositoryError::Decode { message } => {
            Error::internal(format!("stored transaction could not be read: {message}"))
        }
    }
}

/// Build the attributed insert payload for `draft`.
///
/// The entry belongs to the tenant owner whoever types it; the submitting
/// principal is kept in `created_by`.
pub fn attribute(profile: &UserProfile, draft: &TransactionDraft) -> Result<NewTransaction, Error> {
    let amount = Amount::parse(&draft.amount).map_err(|err| Error::validation(err.to_string()))?;
    Ok(NewTransaction {
        occurred_at: draft.occurred_at,
        kind: draft.kind,
        amount,
        category_id: draft.category_id,
        description: draft.trimmed_description(),
        payment_method: draft.payment_method,
        source: draft.source.clone(),
        source_ref: draft.source_ref.clone(),
        organization_id: profile.organization_id,
        user_id: profile.owner_id,
        created_by: profile.user_id,
    })
}

#[async_trait]
impl<R> EntryCommand for EntryService<R>
where
    R: TransactionRepository,
{
    async fn submit(
        &self,
        access: &Access,
        draft: &TransactionDraft,
    ) -> Result<Transaction, Error> {
        let Some(profile) = access.profile() else {
            return Err(Error::authentication_state(
                "session present but profile missing",
            ));
        };
        let entry = attribute(profile, draft)?;
        debug!(
            organization_id = %entry.organization_id,
            kind = %entry.kind,
            "inserting transaction"
        );
        self.repository.insert(&entry).await.map_err(|err| {
            warn!(error = %err, "transaction insert failed");
            map_repository_error(err)
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockTransactionRepository;
    use crate::domain::{
        CategoryId, ErrorCode, OrganizationId, PaymentMethod, Principal, Role, TransactionId,
        TransactionKind, UserId,
    };
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    #[fixture]
    fn employee() -> UserProfile {
        UserProfile {
            user_id: UserId::random(),
            organization_id: OrganizationId::random(),
            role: Role::Employee,
            owner_id: UserId::random(),
        }
    }

    fn draft(amount: &str) -> TransactionDraft {
        let day = NaiveDate::from_ymd_opt(2025, 5, 2).expect("valid date");
        let mut draft = TransactionDraft::new(day, TransactionKind::Expense);
        draft.amount = amount.to_owned();
        draft
    }

    fn stored(entry: &NewTransaction) -> Transaction {
        Transaction {
            id: TransactionId::new("42"),
            occurred_at: entry.occurred_at,
            kind: entry.kind,
            amount: entry.amount.value(),
            category_id: entry.category_id,
            description: entry.description.clone(),
            payment_method: entry.payment_method.map(|method| method.label().to_owned()),
            organization_id: entry.organization_id,
            user_id: entry.user_id,
            created_by: Some(entry.created_by),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn entries_are_attributed_to_the_owner(employee: UserProfile) {
        let expected_owner = employee.owner_id;
        let expected_creator = employee.user_id;
        let expected_org = employee.organization_id;
        let mut repository = MockTransactionRepository::new();
        repository
            .expect_insert()
            .withf(move |entry| {
                entry.user_id == expected_owner
                    && entry.created_by == expected_creator
                    && entry.organization_id == expected_org
                    && entry.amount.value() == Decimal::new(1_050, 2)
                    && entry.description.is_none()
            })
            .times(1)
            .returning(|entry| Ok(stored(entry)));

        let mut form = draft("10,50");
        form.description = "   ".to_owned();
        form.payment_method = Some(PaymentMethod::Pix);
        form.category_id = Some(CategoryId(7));

        let saved = EntryService::new(Arc::new(repository))
            .submit(&Access::Employee(employee), &form)
            .await
            .expect("insert succeeds");
        assert_eq!(saved.user_id, expected_owner);
        assert_eq!(saved.payment_method.as_deref(), Some("Pix"));
    }

    #[rstest]
    #[case("0")]
    #[case("abc")]
    #[case("")]
    #[tokio::test]
    async fn invalid_amounts_never_reach_the_store(#[case] amount: &str, employee: UserProfile) {
        let mut repository = MockTransactionRepository::new();
        repository.expect_insert().never();

        let err = EntryService::new(Arc::new(repository))
            .submit(&Access::Employee(employee), &draft(amount))
            .await
            .expect_err("validation fails");
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[rstest]
    #[case::anonymous(Access::Anonymous)]
    #[case::unprovisioned(Access::Unprovisioned {
        principal: Principal::new(UserId::random(), None),
    })]
    #[tokio::test]
    async fn unresolved_sessions_cannot_submit(#[case] access: Access) {
        let mut repository = MockTransactionRepository::new();
        repository.expect_insert().never();

        let err = EntryService::new(Arc::new(repository))
            .submit(&access, &draft("5"))
            .await
            .expect_err("no profile");
        assert_eq!(err.code(), ErrorCode::AuthenticationState);
        assert_eq!(err.message(), "session present but profile missing");
    }

    #[rstest]
    #[tokio::test]
    async fn insert_failures_keep_the_platform_message(employee: UserProfile) {
        let mut repository = MockTransactionRepository::new();
        repository.expect_insert().times(1).return_once(|_| {
            Err(TransactionRepositoryError::rejected(
                "new row violates row-level security policy",
            ))
        });

        let err = EntryService::new(Arc::new(repository))
            .submit(&Access::Employee(employee), &draft("1"))
            .await
            .expect_err("insert fails");
        assert_eq!(err.code(), ErrorCode::ExternalService);
        assert_eq!(err.message(), "new row violates row-level security policy");
    }
}
