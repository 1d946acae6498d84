//! Integration tests for PIN gating through the vault engine.

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use sec::crypto::{Argon2Params, KeyManager};
use sec::errors::{Result, SecError};
use sec::pin::{PinGuard, PinSource};
use sec::vault::{VaultEngine, VaultStore};
use tempfile::TempDir;
use zeroize::Zeroizing;

/// Answers PIN prompts from a fixed script.
#[derive(Default)]
struct Script {
    pins: VecDeque<&'static str>,
    new_pins: VecDeque<&'static str>,
    prompts: u32,
}

impl Script {
    fn pins(pins: &[&'static str]) -> Self {
        Self {
            pins: pins.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn new_pin(pin: &'static str) -> Self {
        Self {
            new_pins: VecDeque::from([pin]),
            ..Self::default()
        }
    }
}

impl PinSource for Script {
    fn read_pin(&mut self, _attempt: u32, _max: u32) -> Result<Zeroizing<String>> {
        self.prompts += 1;
        self.pins
            .pop_front()
            .map(|p| Zeroizing::new(p.to_string()))
            .ok_or_else(|| SecError::CommandFailed("no PIN scripted".into()))
    }

    fn read_new_pin(&mut self) -> Result<Zeroizing<String>> {
        self.new_pins
            .pop_front()
            .map(|p| Zeroizing::new(p.to_string()))
            .ok_or_else(|| SecError::CommandFailed("no new PIN scripted".into()))
    }
}

struct Fixture {
    _dir: TempDir,
    key: PathBuf,
    vault: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        Self {
            key: dir.path().join("sec.key"),
            vault: dir.path().join("sec.enc"),
            _dir: dir,
        }
    }

    fn engine(&self) -> VaultEngine {
        let params = Argon2Params {
            memory_kib: 8_192,
            iterations: 1,
            parallelism: 1,
        };
        VaultEngine::new(
            KeyManager::new(&self.key),
            VaultStore::new(&self.vault),
            PinGuard::new(params, 3),
        )
    }

    /// A vault holding one secret, locked with PIN "1234".
    fn with_pin() -> Self {
        let fx = Self::new();
        let mut vault = fx.engine().unlock_and_load(&mut Script::default()).unwrap();
        vault.set("db", "s3cr3t").unwrap();
        vault.set_pin(&mut Script::new_pin("1234")).unwrap();
        fx
    }
}

#[test]
fn pin_is_required_after_set_pin() {
    let fx = Fixture::with_pin();

    let mut script = Script::pins(&["1234"]);
    let vault = fx.engine().unlock_and_load(&mut script).unwrap();
    assert!(vault.is_pin_set());
    assert_eq!(vault.get("db"), Some("s3cr3t"));
    assert_eq!(script.prompts, 1);
}

#[test]
fn pin_is_not_listed_as_a_secret() {
    let fx = Fixture::with_pin();

    let vault = fx
        .engine()
        .unlock_and_load(&mut Script::pins(&["1234"]))
        .unwrap();
    assert_eq!(vault.list(), vec!["db"]);
    assert_eq!(vault.secret_count(), 1);
}

#[test]
fn three_wrong_pins_lock_out() {
    let fx = Fixture::with_pin();

    let mut script = Script::pins(&["0000", "1111", "2222", "1234"]);
    let result = fx.engine().unlock_and_load(&mut script);
    assert!(matches!(result, Err(SecError::TooManyAttempts)));
    // The fourth (correct) answer is never asked for.
    assert_eq!(script.prompts, 3);
}

#[test]
fn correct_pin_on_a_later_attempt_unlocks() {
    for script in [&["0000", "1234"][..], &["0000", "1111", "1234"][..]] {
        let fx = Fixture::with_pin();
        let mut source = Script::pins(script);
        let vault = fx.engine().unlock_and_load(&mut source).unwrap();
        assert_eq!(vault.get("db"), Some("s3cr3t"));
        assert_eq!(source.prompts as usize, script.len());
    }
}

#[test]
fn set_pin_twice_is_rejected_without_prompting() {
    let fx = Fixture::with_pin();

    let mut vault = fx
        .engine()
        .unlock_and_load(&mut Script::pins(&["1234"]))
        .unwrap();
    let mut empty = Script::default();
    let result = vault.set_pin(&mut empty);
    assert!(matches!(result, Err(SecError::PinAlreadySet)));
}

#[test]
fn change_pin_replaces_the_old_one() {
    let fx = Fixture::with_pin();

    let mut vault = fx
        .engine()
        .unlock_and_load(&mut Script::pins(&["1234"]))
        .unwrap();
    vault.change_pin(&mut Script::new_pin("9876")).unwrap();
    drop(vault);

    let old = fx.engine().unlock_and_load(&mut Script::pins(&["1234", "1234", "1234"]));
    assert!(matches!(old, Err(SecError::TooManyAttempts)));

    let vault = fx
        .engine()
        .unlock_and_load(&mut Script::pins(&["9876"]))
        .unwrap();
    assert_eq!(vault.get("db"), Some("s3cr3t"));
}

#[test]
fn remove_pin_turns_gating_off() {
    let fx = Fixture::with_pin();

    let mut vault = fx
        .engine()
        .unlock_and_load(&mut Script::pins(&["1234"]))
        .unwrap();
    vault.remove_pin().unwrap();
    drop(vault);

    let mut script = Script::default();
    let vault = fx.engine().unlock_and_load(&mut script).unwrap();
    assert!(!vault.is_pin_set());
    assert_eq!(script.prompts, 0);
}

#[test]
fn change_or_remove_without_a_pin_fails() {
    let fx = Fixture::new();

    let mut vault = fx.engine().unlock_and_load(&mut Script::default()).unwrap();
    assert!(matches!(
        vault.change_pin(&mut Script::new_pin("1")),
        Err(SecError::PinNotSet)
    ));
    assert!(matches!(vault.remove_pin(), Err(SecError::PinNotSet)));
}

#[test]
fn pin_survives_secret_mutations() {
    let fx = Fixture::with_pin();

    let mut vault = fx
        .engine()
        .unlock_and_load(&mut Script::pins(&["1234"]))
        .unwrap();
    vault.set("other", "x").unwrap();
    vault.delete("db").unwrap();
    drop(vault);

    let result = fx.engine().unlock_and_load(&mut Script::default());
    assert!(matches!(result, Err(SecError::CommandFailed(_))));

    let vault = fx
        .engine()
        .unlock_and_load(&mut Script::pins(&["1234"]))
        .unwrap();
    assert_eq!(vault.list(), vec!["other"]);
}

#[test]
fn lockout_leaves_the_vault_file_unchanged() {
    let fx = Fixture::with_pin();
    let before = fs::read(&fx.vault).unwrap();

    let result = fx
        .engine()
        .unlock_and_load(&mut Script::pins(&["0000", "1111", "2222"]));
    assert!(matches!(result, Err(SecError::TooManyAttempts)));
    assert_eq!(fs::read(&fx.vault).unwrap(), before);
}

#[test]
fn pin_can_be_changed_in_the_session_that_set_it() {
    let fx = Fixture::new();

    let mut vault = fx.engine().unlock_and_load(&mut Script::default()).unwrap();
    vault.set_pin(&mut Script::new_pin("1234")).unwrap();
    vault.change_pin(&mut Script::new_pin("5678")).unwrap();
    drop(vault);

    let vault = fx
        .engine()
        .unlock_and_load(&mut Script::pins(&["5678"]))
        .unwrap();
    assert!(vault.is_pin_set());
}

#[test]
fn empty_new_pin_is_rejected() {
    let fx = Fixture::new();

    let mut vault = fx.engine().unlock_and_load(&mut Script::default()).unwrap();
    let result = vault.set_pin(&mut Script::new_pin(""));
    assert!(matches!(result, Err(SecError::InvalidPin(_))));
    assert!(!vault.is_pin_set());
    assert!(!fx.vault.exists());
}
