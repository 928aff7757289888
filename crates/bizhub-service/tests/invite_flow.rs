//! Invite lifecycle through the service layer against a live schema.

use std::sync::Arc;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use bizhub_core::error::ErrorKind;
use bizhub_database::repositories::business::BusinessRepository;
use bizhub_database::repositories::invite::InviteRepository;
use bizhub_database::repositories::job::JobRepository;
use bizhub_database::repositories::staff::StaffRepository;
use bizhub_database::repositories::user::UserRepository;
use bizhub_entity::business::model::CreateBusiness;
use bizhub_entity::invite::model::CreateInvite;
use bizhub_entity::invite::status::InviteStatus;
use bizhub_entity::staff::BusinessRole;
use bizhub_entity::staff::model::CreateStaffMembership;
use bizhub_entity::user::model::CreateUser;
use bizhub_service::context::RequestContext;
use bizhub_service::invite::service::{CreateInviteRequest, InviteService, ValidatedInvite};

fn invite_service(pool: &PgPool) -> InviteService {
    InviteService::new(
        Arc::new(InviteRepository::new(pool.clone())),
        Arc::new(StaffRepository::new(pool.clone())),
        Arc::new(BusinessRepository::new(pool.clone())),
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(JobRepository::new(pool.clone())),
        "http://localhost:3000".into(),
        3,
    )
}

async fn seed_user(pool: &PgPool, email: &str) -> Uuid {
    UserRepository::new(pool.clone())
        .create(&CreateUser {
            first_name: "Test".into(),
            last_name: "User".into(),
            email: email.into(),
            password_hash: "$argon2id$test".into(),
            phone: None,
        })
        .await
        .unwrap()
        .id
}

/// Seed an owner, their business, and the owner membership; return the
/// owner's context and the business id.
async fn seed_owned_business(pool: &PgPool) -> (RequestContext, Uuid) {
    let owner = seed_user(pool, "owner@example.com").await;
    let business = BusinessRepository::new(pool.clone())
        .create(&CreateBusiness {
            owner_id: owner,
            name: "Acme Bakery".into(),
            industry: "food".into(),
            phone_number: "+15550000000".into(),
            email: None,
            address: None,
        })
        .await
        .unwrap()
        .id;
    StaffRepository::new(pool.clone())
        .create(&CreateStaffMembership::with_default_permissions(
            business,
            owner,
            BusinessRole::Owner,
        ))
        .await
        .unwrap();

    (RequestContext::new(owner, "owner@example.com".into()), business)
}

#[sqlx::test(migrations = "../../migrations")]
async fn any_authenticated_token_holder_can_redeem(pool: PgPool) {
    let (owner_ctx, business) = seed_owned_business(&pool).await;
    let service = invite_service(&pool);

    let invite = service
        .create_invite(
            &owner_ctx,
            business,
            CreateInviteRequest {
                email: "friend@example.com".into(),
                role: BusinessRole::Staff,
            },
        )
        .await
        .unwrap();

    // The recipient registered under a different address than the one
    // the invite was sent to.
    let other = seed_user(&pool, "other@example.com").await;
    let other_ctx = RequestContext::new(other, "other@example.com".into());

    let membership = service.accept_invite(&other_ctx, &invite.token).await.unwrap();
    assert_eq!(membership.user_id, other);
    assert_eq!(membership.business_id, business);
    assert_eq!(membership.role, BusinessRole::Staff);
}

#[sqlx::test(migrations = "../../migrations")]
async fn resending_a_cancelled_invite_conflicts(pool: PgPool) {
    let (owner_ctx, business) = seed_owned_business(&pool).await;
    let service = invite_service(&pool);

    let invite = service
        .create_invite(
            &owner_ctx,
            business,
            CreateInviteRequest {
                email: "friend@example.com".into(),
                role: BusinessRole::Staff,
            },
        )
        .await
        .unwrap();

    service
        .cancel_invite(&owner_ctx, business, invite.id)
        .await
        .unwrap();

    let err = service
        .resend_invite(&owner_ctx, business, invite.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[sqlx::test(migrations = "../../migrations")]
async fn cancelled_invite_token_is_unusable(pool: PgPool) {
    let (owner_ctx, business) = seed_owned_business(&pool).await;
    let service = invite_service(&pool);

    let invite = service
        .create_invite(
            &owner_ctx,
            business,
            CreateInviteRequest {
                email: "friend@example.com".into(),
                role: BusinessRole::Staff,
            },
        )
        .await
        .unwrap();
    service
        .cancel_invite(&owner_ctx, business, invite.id)
        .await
        .unwrap();

    let joiner = seed_user(&pool, "friend@example.com").await;
    let joiner_ctx = RequestContext::new(joiner, "friend@example.com".into());

    let err = service
        .accept_invite(&joiner_ctx, &invite.token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[sqlx::test(migrations = "../../migrations")]
async fn validate_reports_lapsed_invites_without_writing(pool: PgPool) {
    let (owner_ctx, business) = seed_owned_business(&pool).await;
    let service = invite_service(&pool);

    // A pending invite whose deadline already passed.
    let repo = InviteRepository::new(pool.clone());
    let invite = repo
        .create(&CreateInvite {
            business_id: business,
            invited_by: owner_ctx.user_id,
            email: "friend@example.com".into(),
            role: BusinessRole::Staff,
            permissions: BusinessRole::Staff.default_permissions(),
            token: "ab".repeat(32),
            expires_at: Utc::now() - Duration::seconds(1),
        })
        .await
        .unwrap();

    let outcome = service.validate_invite(&invite.token).await.unwrap();
    assert!(matches!(outcome, ValidatedInvite::Expired));

    // The probe is read-only: the stored status is untouched.
    let stored = repo.find_by_id(invite.id).await.unwrap().unwrap();
    assert_eq!(stored.status, InviteStatus::Pending);
}

#[sqlx::test(migrations = "../../migrations")]
async fn removed_member_can_rejoin_through_an_invite(pool: PgPool) {
    let (owner_ctx, business) = seed_owned_business(&pool).await;
    let service = invite_service(&pool);

    let rejoiner = seed_user(&pool, "rejoiner@example.com").await;
    let staff_repo = StaffRepository::new(pool.clone());
    let old = staff_repo
        .create(&CreateStaffMembership::with_default_permissions(
            business,
            rejoiner,
            BusinessRole::Staff,
        ))
        .await
        .unwrap();
    staff_repo.deactivate(old.id).await.unwrap();

    let invite = service
        .create_invite(
            &owner_ctx,
            business,
            CreateInviteRequest {
                email: "rejoiner@example.com".into(),
                role: BusinessRole::Manager,
            },
        )
        .await
        .unwrap();

    let rejoiner_ctx = RequestContext::new(rejoiner, "rejoiner@example.com".into());
    let membership = service
        .accept_invite(&rejoiner_ctx, &invite.token)
        .await
        .unwrap();

    assert!(membership.is_active);
    assert_eq!(membership.role, BusinessRole::Manager);
}
