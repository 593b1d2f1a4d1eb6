//! QA tests for saving and loading the garden.
//!
//! Run with: `cargo test -p garden-core --test qa_persistence`

use garden_core::persist::{decode, encode, STORAGE_FILE};
use garden_core::testing::{seeded_rng, TestHarness};
use garden_core::{Category, Garden, GardenStore};
use tempfile::TempDir;

fn sample_garden(seed: u64, plants: usize) -> Garden {
    let mut rng = seeded_rng(seed);
    let mut garden = Garden::new();
    for (n, category) in Category::ALL.into_iter().cycle().take(plants).enumerate() {
        let id = garden
            .plant(category, &format!("answer {n}"), &mut rng, n as i64)
            .map(|p| p.id.clone())
            .expect("non-blank answers plant");
        for r in 0..(n % 6) {
            garden.append_reflection(&id, &format!("question {r}"), "reflection", 100 + r as i64);
        }
    }
    garden
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = GardenStore::in_dir(temp_dir.path());

    for plants in [0, 1, 5, 17] {
        let garden = sample_garden(plants as u64, plants);
        store.save(&garden).await.expect("Save should succeed");

        let loaded = store.load().await;
        assert_eq!(loaded.garden, garden, "garden with {plants} plants should round-trip");
        assert!(!loaded.first_run);
    }
}

#[tokio::test]
async fn test_missing_storage_is_first_run() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let loaded = GardenStore::in_dir(temp_dir.path()).load().await;

    assert!(loaded.garden.is_empty());
    assert!(loaded.first_run);
}

#[tokio::test]
async fn test_malformed_storage_loads_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = GardenStore::in_dir(temp_dir.path());

    let broken = [
        "{not json",
        "null",
        r#"{"plants": []}"#,
        r#"[{"id": "a"}]"#,
        r#"[{"id":"a","category":"Hope","stage":0,"x":1,"y":40,"reflections":[],"lastWatered":0}]"#,
        r#"[{"id":"","category":"Hope","stage":0,"x":1,"y":40,"reflections":[{"question":"q","answer":"a","timestamp":0}],"lastWatered":0}]"#,
    ];

    for content in broken {
        tokio::fs::write(store.path(), content)
            .await
            .expect("Write should succeed");
        let loaded = store.load().await;
        assert!(loaded.garden.is_empty(), "{content:?} should load as empty");
        assert!(!loaded.first_run, "{content:?} is not a first run");
    }
}

#[tokio::test]
async fn test_session_writes_through_every_mutation() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut harness = TestHarness::new(temp_dir.path()).await;
    assert!(harness.session.is_first_run());

    let id = harness
        .plant(Category::Interpersonal, "my brother")
        .await
        .unwrap()
        .unwrap()
        .id;
    let stored = GardenStore::in_dir(temp_dir.path()).read().await.unwrap().unwrap();
    assert_eq!(&stored, harness.session.garden());

    harness.session.reflect(&id, "How?", "he calls").await.unwrap();
    let stored = GardenStore::in_dir(temp_dir.path()).read().await.unwrap().unwrap();
    assert_eq!(stored.get(&id).unwrap().reflections.len(), 2);

    // A fresh session sees the same garden and is no longer a first run.
    let reopened = TestHarness::new(temp_dir.path()).await;
    assert!(!reopened.session.is_first_run());
    assert_eq!(reopened.session.garden(), harness.session.garden());
}

#[tokio::test]
async fn test_original_wire_format_loads() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let content = r#"[
        {
            "id": "6f1c1d8e-0c55-4b53-9b0e-0d6bb1e2c0a1",
            "category": "Altruism",
            "stage": 2,
            "x": 41.5,
            "y": 52.25,
            "reflections": [
                {"question": "Who relies on you?", "answer": "my cat", "timestamp": 1717000000000},
                {"question": "How?", "answer": "breakfast", "timestamp": 1717000001000},
                {"question": "And?", "answer": "naps", "timestamp": 1717000002000}
            ],
            "lastWatered": 1717000002000
        }
    ]"#;
    tokio::fs::write(temp_dir.path().join(STORAGE_FILE), content)
        .await
        .unwrap();

    let loaded = GardenStore::in_dir(temp_dir.path()).load().await;
    let plant = &loaded.garden.plants()[0];
    assert_eq!(plant.category, Category::Altruism);
    assert_eq!(plant.reflections.len(), 3);
    assert_eq!(plant.last_modified, 1_717_000_002_000);

    // Re-encoding keeps it loadable and identical.
    assert_eq!(decode(&encode(&loaded.garden).unwrap()).unwrap(), loaded.garden);
}
