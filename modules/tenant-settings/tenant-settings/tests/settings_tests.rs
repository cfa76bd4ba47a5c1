#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for storing and resolving tenant settings

mod common;

use common::create_client;
use tenant_settings::{
    Branding, ContactInfo, EmailTemplate, EmailTemplates, Preferences, SettingsCategory,
    SettingsPayload, SettingsRecord, SettingsSource, TenantSettingsError,
};
use uuid::Uuid;

fn branding(name: &str) -> SettingsPayload {
    SettingsPayload::Branding(Branding {
        company_name: Some(name.to_owned()),
        ..Branding::default()
    })
}

// =============================================================================
// Resolution
// =============================================================================

#[tokio::test]
async fn test_resolve_without_record_returns_default() {
    let client = create_client();
    let tenant_id = Uuid::new_v4();

    for category in SettingsCategory::ALL {
        let effective = client.resolve(tenant_id, category).await.unwrap();
        assert_eq!(effective.tenant_id, tenant_id);
        assert_eq!(effective.category, category);
        assert!(effective.is_default());
        assert_eq!(effective.payload, client.default_for(category));
    }
}

#[tokio::test]
async fn test_resolve_returns_stored_payload_without_merge() {
    let client = create_client();
    let tenant_id = Uuid::new_v4();

    let sparse = SettingsPayload::ContactInfo(ContactInfo {
        email: Some("sam@example.com".to_owned()),
        ..ContactInfo::default()
    });
    let record = client
        .put_settings(tenant_id, SettingsCategory::ContactInfo, sparse.clone())
        .await
        .unwrap();

    let effective = client
        .resolve(tenant_id, SettingsCategory::ContactInfo)
        .await
        .unwrap();
    assert_eq!(effective.payload, sparse);
    assert_eq!(
        effective.source,
        SettingsSource::Tenant {
            updated_at: record.updated_at
        }
    );
    // The default's contact name is not merged in.
    assert_eq!(
        effective.payload.as_contact_info().unwrap().name,
        None::<String>
    );
}

#[tokio::test]
async fn test_tenants_do_not_see_each_other() {
    let client = create_client();
    let (acme, globex) = (Uuid::new_v4(), Uuid::new_v4());

    client
        .put_settings(acme, SettingsCategory::Branding, branding("Acme"))
        .await
        .unwrap();

    let other = client
        .resolve(globex, SettingsCategory::Branding)
        .await
        .unwrap();
    assert!(other.is_default());
}

// =============================================================================
// Store operations
// =============================================================================

#[tokio::test]
async fn test_put_then_get_returns_written_payload() {
    let client = create_client();
    let tenant_id = Uuid::new_v4();

    let first = client
        .put_settings(tenant_id, SettingsCategory::Branding, branding("Acme"))
        .await
        .unwrap();
    let second = client
        .put_settings(tenant_id, SettingsCategory::Branding, branding("Acme Ltd"))
        .await
        .unwrap();
    assert!(second.updated_at >= first.updated_at);

    let stored = client
        .get_settings(tenant_id, SettingsCategory::Branding)
        .await
        .unwrap()
        .expect("record should exist");
    assert_eq!(stored.payload, branding("Acme Ltd"));
    assert_eq!(stored.updated_at, second.updated_at);
}

#[tokio::test]
async fn test_list_returns_customized_categories() {
    let client = create_client();
    let tenant_id = Uuid::new_v4();

    assert!(client.list_settings(tenant_id).await.unwrap().is_empty());

    client
        .put_settings(tenant_id, SettingsCategory::Branding, branding("Acme"))
        .await
        .unwrap();
    client
        .put_settings(
            tenant_id,
            SettingsCategory::Preferences,
            SettingsPayload::Preferences(Preferences {
                escalation_threshold: Some(4),
                ..Preferences::default()
            }),
        )
        .await
        .unwrap();

    let categories: Vec<_> = client
        .list_settings(tenant_id)
        .await
        .unwrap()
        .iter()
        .map(SettingsRecord::category)
        .collect();
    assert_eq!(
        categories,
        vec![SettingsCategory::Preferences, SettingsCategory::Branding]
    );
}

#[tokio::test]
async fn test_delete_restores_default_and_is_idempotent() {
    let client = create_client();
    let tenant_id = Uuid::new_v4();

    client
        .put_settings(tenant_id, SettingsCategory::Branding, branding("Acme"))
        .await
        .unwrap();
    client
        .delete_settings(tenant_id, SettingsCategory::Branding)
        .await
        .unwrap();

    assert!(
        client
            .get_settings(tenant_id, SettingsCategory::Branding)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        client
            .resolve(tenant_id, SettingsCategory::Branding)
            .await
            .unwrap()
            .is_default()
    );

    client
        .delete_settings(tenant_id, SettingsCategory::Branding)
        .await
        .unwrap();
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_rejected_write_keeps_prior_record() {
    let client = create_client();
    let tenant_id = Uuid::new_v4();

    let valid = SettingsPayload::Preferences(Preferences {
        followup_schedule: Some(vec![2, 5]),
        ..Preferences::default()
    });
    client
        .put_settings(tenant_id, SettingsCategory::Preferences, valid.clone())
        .await
        .unwrap();

    let invalid = SettingsPayload::Preferences(Preferences {
        followup_schedule: Some(vec![2, 0]),
        ..Preferences::default()
    });
    let err = client
        .put_settings(tenant_id, SettingsCategory::Preferences, invalid)
        .await
        .unwrap_err();
    assert!(matches!(err, TenantSettingsError::Validation { .. }));

    let stored = client
        .get_settings(tenant_id, SettingsCategory::Preferences)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.payload, valid);
}

#[tokio::test]
async fn test_payload_for_other_category_is_rejected() {
    let client = create_client();
    let tenant_id = Uuid::new_v4();

    let err = client
        .put_settings(tenant_id, SettingsCategory::ContactInfo, branding("Acme"))
        .await
        .unwrap_err();
    assert!(matches!(err, TenantSettingsError::Validation { .. }));
    assert!(client.list_settings(tenant_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_category_name_is_rejected() {
    let service = common::create_service();
    let tenant_id = Uuid::new_v4();

    let err = service
        .put_settings_json(tenant_id, "signatures", serde_json::json!({}))
        .await
        .unwrap_err();
    assert!(matches!(
        TenantSettingsError::from(err),
        TenantSettingsError::UnknownCategory { category } if category == "signatures"
    ));
}

#[tokio::test]
async fn test_customized_templates_replace_default_set() {
    let client = create_client();
    let tenant_id = Uuid::new_v4();

    let templates = EmailTemplates::default().with(
        "welcome",
        EmailTemplate::new("Welcome {name}", "Hello {name}"),
    );
    client
        .put_settings(
            tenant_id,
            SettingsCategory::EmailTemplates,
            SettingsPayload::EmailTemplates(templates),
        )
        .await
        .unwrap();

    let err = client
        .render_template(tenant_id, "reminder_1", &common::vars(&[]))
        .await
        .unwrap_err();
    assert_eq!(err, TenantSettingsError::template_not_found("reminder_1"));
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_puts_leave_one_complete_write() {
    let client = create_client();
    let tenant_id = Uuid::new_v4();

    let a = SettingsPayload::Branding(Branding {
        company_name: Some("Acme".to_owned()),
        primary_color: Some("#AA0000".to_owned()),
        ..Branding::default()
    });
    let b = SettingsPayload::Branding(Branding {
        company_name: Some("Globex".to_owned()),
        logo_url: Some("https://globex.example/logo.png".to_owned()),
        ..Branding::default()
    });

    for _ in 0..50 {
        let (ca, cb) = (client.clone(), client.clone());
        let (pa, pb) = (a.clone(), b.clone());
        let ta = tokio::spawn(async move {
            ca.put_settings(tenant_id, SettingsCategory::Branding, pa)
                .await
        });
        let tb = tokio::spawn(async move {
            cb.put_settings(tenant_id, SettingsCategory::Branding, pb)
                .await
        });
        ta.await.unwrap().unwrap();
        tb.await.unwrap().unwrap();

        let stored = client
            .get_settings(tenant_id, SettingsCategory::Branding)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.payload == a || stored.payload == b);
    }
}
