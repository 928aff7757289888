//! Business ownership enforcement.

use uuid::Uuid;

use bizhub_core::error::AppError;
use bizhub_core::result::AppResult;
use bizhub_entity::business::model::Business;

/// Enforces that a caller owns the business they are acting on.
///
/// A missing business is reported the same way as someone else's
/// business, so callers cannot probe which IDs exist.
#[derive(Debug, Clone, Default)]
pub struct OwnershipGate;

impl OwnershipGate {
    pub fn new() -> Self {
        Self
    }

    /// Require that `user_id` owns the given business.
    pub fn require_owner(&self, business: Option<&Business>, user_id: Uuid) -> AppResult<()> {
        match business {
            Some(b) if b.owner_id == user_id => Ok(()),
            _ => Err(AppError::forbidden(
                "You do not have access to this business",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn business(owner_id: Uuid) -> Business {
        Business {
            id: Uuid::new_v4(),
            owner_id,
            name: "Acme Bakery".into(),
            industry: "food".into(),
            phone_number: "+15550000000".into(),
            email: None,
            address: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_passes() {
        let owner = Uuid::new_v4();
        let gate = OwnershipGate::new();
        assert!(gate.require_owner(Some(&business(owner)), owner).is_ok());
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        let gate = OwnershipGate::new();
        let err = gate
            .require_owner(Some(&business(Uuid::new_v4())), Uuid::new_v4())
            .unwrap_err();
        assert_eq!(err.kind, bizhub_core::error::ErrorKind::Authorization);
    }

    #[test]
    fn test_missing_business_is_indistinguishable_from_foreign() {
        let gate = OwnershipGate::new();
        let missing = gate.require_owner(None, Uuid::new_v4()).unwrap_err();
        let foreign = gate
            .require_owner(Some(&business(Uuid::new_v4())), Uuid::new_v4())
            .unwrap_err();
        assert_eq!(missing.kind, foreign.kind);
        assert_eq!(missing.message, foreign.message);
    }
}
