mod common;

use buddy::error::{AssistantError, StorageError};
use buddy::kernel::input::{ScriptedLines, USER_PROMPT};
use buddy::memory::identity::{
    IdentityStore, UserIdentity, ASSISTANT_PROMPT, FALLBACK_ASSISTANT_NAME, NAME_PROMPT,
};
use buddy::{run_session, AssistantConfig};
use common::{console, SharedBuffer, Stubs};
use tempfile::TempDir;

fn store(dir: &TempDir) -> IdentityStore {
    IdentityStore::new(dir.path().join(".Assistant-cli").join("user.json"))
}

#[test]
fn test_assistant_name_falls_back_before_any_record() {
    let dir = TempDir::new().unwrap();
    assert_eq!(store(&dir).assistant_name(), FALLBACK_ASSISTANT_NAME);
    assert_eq!(FALLBACK_ASSISTANT_NAME, "Buddy");
}

#[test]
fn test_assistant_name_reads_persisted_record() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store.save(&UserIdentity::new("Ada", "Pip")).unwrap();

    assert_eq!(store.assistant_name(), "Pip");
}

#[test]
fn test_record_layout_on_disk() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store.save(&UserIdentity::new("Ada", "Pip")).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["name"], "Ada");
    assert_eq!(json["assistant"], "Pip");
}

#[test]
fn test_missing_assistant_field_defaults() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), r#"{"name": "Ada"}"#).unwrap();

    let identity = store.load().unwrap().unwrap();
    assert_eq!(identity, UserIdentity::new("Ada", "Buddy"));
}

#[tokio::test]
async fn test_resolve_prompts_once_and_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);
    let out = SharedBuffer::default();
    let mut console = console(&out);
    let mut input = ScriptedLines::new(["  Ada ", "Pip", "never read"]);

    let first = store.resolve(&mut input, &mut console).await.unwrap();
    let second = store.resolve(&mut input, &mut console).await.unwrap();

    assert_eq!(first, UserIdentity::new("Ada", "Pip"));
    assert_eq!(first, second);
    assert_eq!(input.prompts(), &[NAME_PROMPT.to_string(), ASSISTANT_PROMPT.to_string()]);
    assert_eq!(input.remaining(), 1);
    assert_eq!(out.count("It's nice to meet you"), 1);
    assert!(out.contents().contains("🤖 Pip: Hello Ada!"));
    assert!(store.path().exists());
}

#[tokio::test]
async fn test_resolve_uses_existing_record_without_prompting() {
    let dir = TempDir::new().unwrap();
    store(&dir).save(&UserIdentity::new("Grace", "Bolt")).unwrap();

    let mut store = store(&dir);
    let out = SharedBuffer::default();
    let mut input = ScriptedLines::new(Vec::<String>::new());

    let identity = store.resolve(&mut input, &mut console(&out)).await.unwrap();

    assert_eq!(identity, UserIdentity::new("Grace", "Bolt"));
    assert!(input.prompts().is_empty());
    assert!(out.contents().is_empty());
}

#[tokio::test]
async fn test_blank_answers_get_fallback_names() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);
    let out = SharedBuffer::default();
    let mut input = ScriptedLines::new(["", "   "]);

    let identity = store.resolve(&mut input, &mut console(&out)).await.unwrap();

    assert_eq!(identity, UserIdentity::new("friend", "Buddy"));
}

#[tokio::test]
async fn test_corrupt_record_is_an_error_not_a_new_prompt() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "not json").unwrap();
    let out = SharedBuffer::default();
    let mut input = ScriptedLines::new(["Ada", "Pip"]);

    let result = store.resolve(&mut input, &mut console(&out)).await;

    assert!(matches!(
        result,
        Err(AssistantError::Storage(StorageError::Corrupt { .. }))
    ));
    assert!(input.prompts().is_empty());
    // The accessor still never fails.
    assert_eq!(store.assistant_name(), "Buddy");
}

#[tokio::test]
async fn test_failed_identity_write_is_an_error_without_welcome() {
    let dir = TempDir::new().unwrap();
    // A regular file where the config directory belongs blocks the save.
    std::fs::write(dir.path().join(".Assistant-cli"), "").unwrap();
    let mut store = store(&dir);
    let out = SharedBuffer::default();
    let mut input = ScriptedLines::new(["Ada", "Pip"]);

    let result = store.resolve(&mut input, &mut console(&out)).await;

    assert!(
        matches!(result, Err(AssistantError::Storage(StorageError::Io { .. }))),
        "{:?}",
        result
    );
    assert!(!out.contents().contains("nice to meet you"), "{}", out.contents());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_input_closed_during_setup() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);
    let out = SharedBuffer::default();
    let mut input = ScriptedLines::new(["Ada"]);

    let result = store.resolve(&mut input, &mut console(&out)).await;

    assert!(matches!(result, Err(AssistantError::InputClosed)));
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_session_creates_identity_on_first_run_only() {
    let dir = TempDir::new().unwrap();
    let config = AssistantConfig::with_storage_root(dir.path());

    let out = SharedBuffer::default();
    let mut input = ScriptedLines::new(["Ada", "Pip", "whoami", "exit"]);
    run_session(&config, Stubs::default().providers(), console(&out), &mut input)
        .await
        .unwrap();

    let text = out.contents();
    assert!(text.contains("Hello Ada! It's nice to meet you. I'm Pip"));
    assert!(text.contains("Hey Ada, great to see you again!"));
    assert!(text.contains("🤖 Pip: You’re my buddy, Ada 💖"));
    assert!(config.identity_path().exists());

    let out = SharedBuffer::default();
    let mut input = ScriptedLines::new(["bye"]);
    run_session(&config, Stubs::default().providers(), console(&out), &mut input)
        .await
        .unwrap();

    assert_eq!(input.prompts(), &[USER_PROMPT.to_string()]);
    assert!(!out.contents().contains("nice to meet you"));
    assert!(out.contents().contains("Hey Ada"));
}
