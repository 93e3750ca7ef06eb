use hearth_store_memory::MemoryStore;
use hearth_storage::{
    AddMembershipParams, CreateGroupParams, FaceBinding, FaceId, GroupId, Integration,
    IntegrationId, Store, StoreError, UserId,
};
use uuid::Uuid;

fn group_params(name: &str) -> CreateGroupParams {
    CreateGroupParams {
        id: GroupId(Uuid::now_v7()),
        name: name.to_string(),
    }
}

#[tokio::test]
async fn group_lifecycle() {
    let store = MemoryStore::new();

    let params = group_params("kitchen");
    let group = store.create_group(&params).await.unwrap();
    assert_eq!(group.name, "kitchen");
    assert_eq!(group.created_at, group.updated_at);

    // Same id again is a conditional-write failure.
    assert!(matches!(
        store.create_group(&params).await,
        Err(StoreError::AlreadyExists)
    ));

    let fetched = store.get_group(&group.id).await.unwrap();
    assert_eq!(fetched, group);

    let mut renamed = group.clone();
    renamed.name = "den".to_string();
    let updated = store.update_group(&renamed).await.unwrap();
    assert_eq!(updated.name, "den");
    assert!(updated.updated_at >= updated.created_at);
    let fetched = store.get_group(&group.id).await.unwrap();
    assert_eq!(fetched, updated);

    store.delete_group(&group.id).await.unwrap();
    assert!(matches!(
        store.get_group(&group.id).await,
        Err(StoreError::NotFound)
    ));
    // Second delete observes the row gone, and so does a late update.
    assert!(matches!(
        store.delete_group(&group.id).await,
        Err(StoreError::NotFound)
    ));
    assert!(matches!(
        store.update_group(&renamed).await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
async fn membership_conditions() {
    let store = MemoryStore::new();
    let group = store.create_group(&group_params("kitchen")).await.unwrap();
    let alice = UserId::new("eu-west-1:alice");

    // Group must exist first.
    assert!(matches!(
        store
            .add_membership(&AddMembershipParams {
                group_id: GroupId(Uuid::now_v7()),
                user_id: alice.clone(),
                is_owner: true,
            })
            .await,
        Err(StoreError::NotFound)
    ));

    let membership = store
        .add_membership(&AddMembershipParams {
            group_id: group.id.clone(),
            user_id: alice.clone(),
            is_owner: true,
        })
        .await
        .unwrap();
    assert!(membership.is_owner);

    // Duplicate pair rejected.
    assert!(matches!(
        store
            .add_membership(&AddMembershipParams {
                group_id: group.id.clone(),
                user_id: alice.clone(),
                is_owner: false,
            })
            .await,
        Err(StoreError::AlreadyExists)
    ));

    let fetched = store.get_membership(&group.id, &alice).await.unwrap();
    assert!(fetched.is_owner);

    store.delete_membership(&group.id, &alice).await.unwrap();
    assert!(matches!(
        store.delete_membership(&group.id, &alice).await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
async fn user_group_listing_respects_owner_flag() {
    let store = MemoryStore::new();
    let alice = UserId::new("eu-west-1:alice");

    let owned = store.create_group(&group_params("kitchen")).await.unwrap();
    let joined = store.create_group(&group_params("garage")).await.unwrap();
    for (group_id, is_owner) in [(owned.id.clone(), true), (joined.id.clone(), false)] {
        store
            .add_membership(&AddMembershipParams {
                group_id,
                user_id: alice.clone(),
                is_owner,
            })
            .await
            .unwrap();
    }

    let all = store.list_groups_for_user(&alice, false).await.unwrap();
    assert_eq!(all.len(), 2);

    let owned_only = store.list_groups_for_user(&alice, true).await.unwrap();
    assert_eq!(owned_only.len(), 1);
    assert_eq!(owned_only[0].id, owned.id);

    let stranger = UserId::new("eu-west-1:mallory");
    assert!(store
        .list_groups_for_user(&stranger, false)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn delete_group_cascades_rows() {
    let store = MemoryStore::new();
    let group = store.create_group(&group_params("kitchen")).await.unwrap();
    let alice = UserId::new("eu-west-1:alice");
    store
        .add_membership(&AddMembershipParams {
            group_id: group.id.clone(),
            user_id: alice.clone(),
            is_owner: true,
        })
        .await
        .unwrap();
    let face = FaceId("f-1".to_string());
    store
        .put_face_bindings(&[FaceBinding {
            group_id: group.id.clone(),
            face_id: face.clone(),
            user_id: alice.clone(),
        }])
        .await
        .unwrap();

    store.delete_group(&group.id).await.unwrap();

    assert!(matches!(
        store.get_membership(&group.id, &alice).await,
        Err(StoreError::NotFound)
    ));
    assert!(matches!(
        store.get_face_binding(&group.id, &face).await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
async fn face_binding_batch_and_pair_index() {
    let store = MemoryStore::new();
    let group = store.create_group(&group_params("kitchen")).await.unwrap();
    let alice = UserId::new("eu-west-1:alice");
    let bob = UserId::new("eu-west-1:bob");

    let rows: Vec<FaceBinding> = (0..3)
        .map(|i| FaceBinding {
            group_id: group.id.clone(),
            face_id: FaceId(format!("alice-{i}")),
            user_id: alice.clone(),
        })
        .chain(std::iter::once(FaceBinding {
            group_id: group.id.clone(),
            face_id: FaceId("bob-0".to_string()),
            user_id: bob.clone(),
        }))
        .collect();
    store.put_face_bindings(&rows).await.unwrap();

    let alices = store.list_face_bindings(&group.id, &alice).await.unwrap();
    assert_eq!(alices.len(), 3);
    assert!(alices.iter().all(|b| b.user_id == alice));

    let binding = store
        .get_face_binding(&group.id, &FaceId("bob-0".to_string()))
        .await
        .unwrap();
    assert_eq!(binding.user_id, bob);

    store
        .delete_face_binding(&group.id, &FaceId("bob-0".to_string()))
        .await
        .unwrap();
    assert!(matches!(
        store
            .delete_face_binding(&group.id, &FaceId("bob-0".to_string()))
            .await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
async fn integration_registry_reads() {
    let store = MemoryStore::new();
    assert!(store.list_integrations().await.unwrap().is_empty());

    store
        .seed_integration(Integration {
            id: IntegrationId("doorbell".to_string()),
            name: "Doorbell".to_string(),
            function_name: "handle-doorbell".to_string(),
        })
        .await;
    store
        .seed_integration(Integration {
            id: IntegrationId("camera".to_string()),
            name: "Camera".to_string(),
            function_name: "handle-camera".to_string(),
        })
        .await;

    let all = store.list_integrations().await.unwrap();
    assert_eq!(all.len(), 2);
    // Sorted by id for stable listing.
    assert_eq!(all[0].id.0, "camera");

    let one = store
        .get_integration(&IntegrationId("doorbell".to_string()))
        .await
        .unwrap();
    assert_eq!(one.function_name, "handle-doorbell");
    assert!(matches!(
        store
            .get_integration(&IntegrationId("missing".to_string()))
            .await,
        Err(StoreError::NotFound)
    ));
}
