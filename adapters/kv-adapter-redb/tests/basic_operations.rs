//! Basic KV adapter operation tests

use dialset::error::Error;
use dialset::kv_adapter::KvAdapter;
use dialset_kv_adapter_redb::KvAdapterRedb;
use serde_json::json;
use tempfile::TempDir;

async fn create_test_adapter() -> (KvAdapterRedb, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = KvAdapterRedb::new(temp_dir.path()).await.expect("Failed to create adapter");
	(adapter, temp_dir)
}

#[tokio::test]
async fn test_load_missing_key() {
	let (adapter, _temp) = create_test_adapter().await;

	let result = adapter.load("settings").await;
	assert!(matches!(result, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_store_and_load() {
	let (adapter, _temp) = create_test_adapter().await;
	let value = json!({ "maximum_chat_retention_days": 30, "gpu_enabled": true });

	adapter.store("settings", &value).await.expect("Failed to store");
	let loaded = adapter.load("settings").await.expect("Failed to load");

	assert_eq!(loaded, value);
}

#[tokio::test]
async fn test_overwrite() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.store("settings", &json!({ "a": 1 })).await.expect("Failed to store");
	adapter.store("settings", &json!({ "a": 2 })).await.expect("Failed to store");

	assert_eq!(adapter.load("settings").await.expect("Failed to load"), json!({ "a": 2 }));
}

#[tokio::test]
async fn test_null_is_distinct_from_missing() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.store("settings", &serde_json::Value::Null).await.expect("Failed to store");
	let loaded = adapter.load("settings").await.expect("Failed to load");

	assert!(loaded.is_null());
}

#[tokio::test]
async fn test_keys_are_isolated() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.store("acme:settings", &json!({ "tenant": "acme" })).await.expect("Failed to store");

	assert!(matches!(adapter.load("settings").await, Err(Error::NotFound)));
	assert!(matches!(adapter.load("other:settings").await, Err(Error::NotFound)));
	assert_eq!(
		adapter.load("acme:settings").await.expect("Failed to load"),
		json!({ "tenant": "acme" })
	);
}

#[tokio::test]
async fn test_delete() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.store("settings", &json!({})).await.expect("Failed to store");
	adapter.delete("settings").await.expect("Failed to delete");
	assert!(matches!(adapter.load("settings").await, Err(Error::NotFound)));

	// Deleting again is a no-op
	adapter.delete("settings").await.expect("Failed to delete missing key");
}

#[tokio::test]
async fn test_persists_across_reopen() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	{
		let adapter = KvAdapterRedb::new(temp_dir.path()).await.expect("Failed to create adapter");
		adapter.store("settings", &json!({ "kept": true })).await.expect("Failed to store");
	}

	let adapter = KvAdapterRedb::new(temp_dir.path()).await.expect("Failed to reopen adapter");
	assert_eq!(adapter.load("settings").await.expect("Failed to load"), json!({ "kept": true }));
	assert!(adapter.path().ends_with("kv.db"));
}

#[tokio::test]
async fn test_storage_path_is_a_file() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let blocker = temp_dir.path().join("kv");
	std::fs::write(&blocker, b"not a directory").expect("Failed to write file");

	let result = KvAdapterRedb::new(&blocker).await;
	assert!(matches!(result, Err(Error::Io(_))));
}

#[tokio::test]
async fn test_stored_text_not_json_is_parse_error() {
	const TABLE_KV: redb::TableDefinition<&str, &str> = redb::TableDefinition::new("kv");

	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	drop(KvAdapterRedb::new(temp_dir.path()).await.expect("Failed to create adapter"));
	{
		let db = redb::Database::create(temp_dir.path().join("kv.db")).expect("Failed to open db");
		let tx = db.begin_write().expect("Failed to begin write");
		{
			let mut table = tx.open_table(TABLE_KV).expect("Failed to open table");
			table.insert("settings", "{broken").expect("Failed to insert");
		}
		tx.commit().expect("Failed to commit");
	}

	let adapter = KvAdapterRedb::new(temp_dir.path()).await.expect("Failed to reopen adapter");
	assert!(matches!(adapter.load("settings").await, Err(Error::Parse)));
}

// vim: ts=4
