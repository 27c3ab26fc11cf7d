use crate::errors::KvError;
use crate::services::check;
use crate::state::command::{Command, Method};
use crate::state::kv::KvStore;
use crate::state::reply::Reply;

/// Route a parsed command to the matching operation.
pub fn dispatch(store: &KvStore, command: Command) -> Reply {
    let Command { method, key, value } = command;

    let reply = match method {
        Method::Get => get(store, key),
        Method::Set => set(store, key, value),
        Method::Delete => delete(store, key),
        Method::Exists => exists(store, key),
        Method::Unknown => method_not_allowed(),
    };

    tracing::debug!(
        method = %method,
        failed = reply.is_error(),
        entries = store.len(),
        "command dispatched"
    );

    reply
}

/// Look up a key.
pub fn get(store: &KvStore, key: String) -> Reply {
    let found = store.read().get(&key).cloned();

    let reply = Reply::for_method(Method::Get).key(key);
    match found {
        Some(value) => reply.value(value),
        None => reply.error(KvError::NotFound),
    }
}

/// Insert or overwrite a key.
///
/// Checks run in a fixed order: value length, key shape, then capacity.
/// Capacity is checked under the same write lock that performs the insert.
pub fn set(store: &KvStore, key: String, value: String) -> Reply {
    let reply = Reply::for_method(Method::Set);

    if !check::valid_value(&value) {
        return reply.value(value).error(KvError::ValueTooLong);
    }

    if !check::valid_key(&key) {
        return reply.key(key).value(value).error(KvError::InvalidKey);
    }

    let mut map = store.write();
    if !check::can_admit(&key, &map) {
        drop(map);
        tracing::warn!(key = %key, "store full, rejecting new key");
        return reply.key(key).error(KvError::StorageFull);
    }

    map.insert(key.clone(), value.clone());
    debug_assert!(check::within_capacity(&map));
    drop(map);

    reply.key(key).value(value)
}

/// Report whether a key is present.
pub fn exists(store: &KvStore, key: String) -> Reply {
    let present = check::key_exists(&key, &store.read());

    Reply::for_method(Method::Exists)
        .key(key)
        .result(if present { "exists" } else { "not exists" })
}

/// Remove a key.
pub fn delete(store: &KvStore, key: String) -> Reply {
    let removed = store.write().remove(&key).is_some();

    let reply = Reply::for_method(Method::Delete).key(key);
    if removed {
        reply.result("success")
    } else {
        reply.error(KvError::NotFound)
    }
}

pub fn method_not_allowed() -> Reply {
    Reply::from(KvError::MethodNotAllowed)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::services::check::{MAX_KEYS, MAX_VALUE_LEN};

    fn run(store: &KvStore, method: Method, key: &str, value: &str) -> Reply {
        dispatch(store, Command::new(method, key, value))
    }

    fn fill(store: &KvStore, n: usize) {
        for i in 0..n {
            let reply = run(store, Method::Set, &format!("key{i}"), "v");
            assert!(!reply.is_error(), "fill failed at {i}: {reply:?}");
        }
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = KvStore::new();

        let reply = run(&store, Method::Set, "test_key", "test_val");
        assert_eq!(reply, Reply::for_method(Method::Set).key("test_key").value("test_val"));

        let reply = run(&store, Method::Get, "test_key", "");
        assert_eq!(reply, Reply::for_method(Method::Get).key("test_key").value("test_val"));
    }

    #[test]
    fn set_overwrites() {
        let store = KvStore::new();
        run(&store, Method::Set, "k", "one");
        run(&store, Method::Set, "k", "two");

        assert_eq!(store.len(), 1);
        assert_eq!(run(&store, Method::Get, "k", "").value.as_deref(), Some("two"));
    }

    #[test]
    fn get_missing() {
        let store = KvStore::new();
        let reply = run(&store, Method::Get, "no_key", "");
        assert_eq!(reply.error.as_deref(), Some("not found"));
        assert_eq!(reply.key.as_deref(), Some("no_key"));
        assert_eq!(reply.value, None);
    }

    #[test]
    fn delete_then_lookups_miss() {
        let store = KvStore::new();
        run(&store, Method::Set, "test_key", "test_val");

        let reply = run(&store, Method::Delete, "test_key", "");
        assert_eq!(reply, Reply::for_method(Method::Delete).key("test_key").result("success"));

        assert_eq!(run(&store, Method::Get, "test_key", "").error.as_deref(), Some("not found"));
        assert_eq!(run(&store, Method::Exists, "test_key", "").result.as_deref(), Some("not exists"));

        let reply = run(&store, Method::Delete, "test_key", "");
        assert_eq!(reply.error.as_deref(), Some("not found"));
        assert_eq!(reply.result, None);
    }

    #[test]
    fn exists_reports_presence() {
        let store = KvStore::new();
        run(&store, Method::Set, "test_key", "v");

        assert_eq!(run(&store, Method::Exists, "test_key", "").result.as_deref(), Some("exists"));
        assert_eq!(run(&store, Method::Exists, "tmp_key", "").result.as_deref(), Some("not exists"));
        assert!(!run(&store, Method::Exists, "tmp_key", "").is_error());
    }

    #[test]
    fn long_value_wins_over_bad_key() {
        let store = KvStore::new();
        let long = "x".repeat(MAX_VALUE_LEN + 1);

        for key in ["good", "", "   ", "test_key_aaaaaaaaaaaaaaaaaaa"] {
            let reply = run(&store, Method::Set, key, &long);
            assert_eq!(reply.error.as_deref(), Some("value too long"));
            assert_eq!(reply.key, None);
            assert_eq!(reply.value.as_deref(), Some(long.as_str()));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn bad_keys_rejected() {
        let store = KvStore::new();

        for key in ["", "   ", "test_key_aaaaaaaaaaaaaaaaaaa"] {
            let reply = run(&store, Method::Set, key, "test_val");
            assert_eq!(reply.error.as_deref(), Some("key too long or empty"));
            assert_eq!(reply.value.as_deref(), Some("test_val"));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn rejects_key_past_capacity() {
        let store = KvStore::new();
        fill(&store, MAX_KEYS);

        let reply = run(&store, Method::Set, "one_more", "v");
        assert_eq!(
            reply,
            Reply::for_method(Method::Set).key("one_more").error(KvError::StorageFull)
        );
        assert_eq!(store.len(), MAX_KEYS);
    }

    #[test]
    fn overwrite_allowed_at_capacity() {
        let store = KvStore::new();
        fill(&store, MAX_KEYS);

        let reply = run(&store, Method::Set, "key0", "fresh");
        assert!(!reply.is_error());
        assert_eq!(run(&store, Method::Get, "key0", "").value.as_deref(), Some("fresh"));
        assert_eq!(store.len(), MAX_KEYS);
    }

    #[test]
    fn delete_frees_capacity() {
        let store = KvStore::new();
        fill(&store, MAX_KEYS);
        run(&store, Method::Delete, "key0", "");

        assert!(!run(&store, Method::Set, "newcomer", "v").is_error());
        assert!(run(&store, Method::Set, "latecomer", "v").is_error());
    }

    #[test]
    fn unknown_method() {
        let store = KvStore::new();
        let reply = run(&store, Method::Unknown, "test_key", "v");
        assert_eq!(reply.method, None);
        assert_eq!(reply.key, None);
        assert_eq!(
            reply.error.as_deref(),
            Some("method not allowed. allowed methods is: GET,SET,DELETE,EXISTS")
        );
    }

    #[test]
    fn concurrent_sets_never_exceed_capacity() {
        let store = Arc::new(KvStore::new());
        fill(&store, MAX_KEYS - 10);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..20)
                        .filter(|i| {
                            !run(&store, Method::Set, &format!("t{t}-{i}"), "v").is_error()
                        })
                        .count()
                })
            })
            .collect();

        let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(accepted, 10);
        assert_eq!(store.len(), MAX_KEYS);
    }
}
