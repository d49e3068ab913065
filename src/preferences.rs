//! 端末ごとに保存する表示設定。
//! 保存先はグローバルに参照せず、`PreferenceStore` として呼び出し側から注入する。
use std::collections::HashMap;

use log::warn;

/// 文字列のキーと値を保存する設定ストア。
pub trait PreferenceStore {
    // --- Required methods ---
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);

    /// `"true"` が保存されている場合のみ true。
    fn get_flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v == "true")
    }
    fn set_flag(&mut self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }
}

/// プロセス内だけで保持する設定ストア。テストやストレージが使えない環境向け。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }
    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// ブラウザの localStorage を使う設定ストア。
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    /// localStorage が利用できない場合 (プライベートモード、SSR など) は None。
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }
    fn set(&mut self, key: &str, value: &str) {
        if let Err(err) = self.storage.set_item(key, value) {
            warn!("Failed to write preference {}: {:?}", key, err);
        }
    }
    fn remove(&mut self, key: &str) {
        if let Err(err) = self.storage.remove_item(key) {
            warn!("Failed to remove preference {}: {:?}", key, err);
        }
    }
}

pub const ONBOARDING_KEY: &str = "onboarding_completed";

/// 初回チュートリアルの完了フラグ。起動時に一度読み、完了時に一度だけ書き込む。
pub struct Onboarding<S: PreferenceStore> {
    store: S,
}

impl<S: PreferenceStore> Onboarding<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn is_completed(&self) -> bool {
        self.store.get_flag(ONBOARDING_KEY)
    }

    pub fn complete(&mut self) {
        self.store.set_flag(ONBOARDING_KEY, true);
    }

    pub fn reset(&mut self) {
        self.store.remove(ONBOARDING_KEY);
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn onboarding_flag_lifecycle() {
        let mut onboarding = Onboarding::new(MemoryStore::default());
        assert!(!onboarding.is_completed());

        onboarding.complete();
        assert!(onboarding.is_completed());

        onboarding.reset();
        assert!(!onboarding.is_completed());
    }

    #[test]
    fn flag_survives_in_the_injected_store() {
        let mut onboarding = Onboarding::new(MemoryStore::default());
        onboarding.complete();
        let store = onboarding.into_store();
        assert_eq!(store.get(ONBOARDING_KEY).as_deref(), Some("true"));
        assert!(Onboarding::new(store).is_completed());
    }

    #[test]
    fn unexpected_values_read_as_false() {
        let mut store = MemoryStore::default();
        store.set(ONBOARDING_KEY, "yes");
        assert!(!Onboarding::new(store).is_completed());
    }
}
