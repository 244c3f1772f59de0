//! Integration tests for the engine surface: views, limits, rebuilds and
//! snapshot isolation.

use std::sync::Arc;
use std::thread;

use presage::index::{PrefixSearch, TriePrefixIndex};

fn wine_index() -> TriePrefixIndex<String> {
    let index = TriePrefixIndex::new(|s: &String| Some(s.clone()));
    index.create_index(
        ["red wine", "white wine", "rose wine", "water", "rum"]
            .iter()
            .map(|s| s.to_string()),
    );
    index
}

#[test]
fn filtered_views_narrow_results() {
    let index = wine_index();
    assert_eq!(index.search("wi"), ["red wine", "white wine", "rose wine"]);

    let no_red = (&index).filter(|v: &String| !v.starts_with("red"));
    assert_eq!(no_red.search("wi"), ["white wine", "rose wine"]);
    assert_eq!(no_red.search("r w"), ["rose wine"]);

    let short = (&index).filter(|v: &String| v.len() <= 5);
    assert_eq!(short.search("r"), ["rum"]);
}

#[test]
fn filters_compose() {
    let index = wine_index();
    let view = (&index)
        .filter(|v: &String| v.contains("wine"))
        .filter(|v: &String| v.starts_with('r'));
    assert_eq!(view.get_all(), ["red wine", "rose wine"]);
}

#[test]
fn mapped_views_project_results() {
    let index = wine_index();
    assert_eq!(index.search("r"), ["red wine", "rose wine", "rum"]);

    let lengths = (&index).map(|v: String| v.len());
    assert_eq!(lengths.search("r"), [8, 9, 3]);

    let filtered_lengths = (&index)
        .filter(|v: &String| !v.contains("rose"))
        .map(|v: String| v.len());
    assert_eq!(filtered_lengths.search("r"), [8, 3]);
}

#[test]
fn search_limited_truncates() {
    let index = wine_index();
    assert_eq!(index.search_limited("wi", 2), ["red wine", "white wine"]);
    assert_eq!(index.search_limited("wi", 99).len(), 3);
    assert!(index.search_limited("wi", 0).is_empty());
}

#[test]
fn views_do_not_mutate_the_engine() {
    let index = wine_index();
    {
        let view = (&index).filter(|_: &String| false);
        assert!(view.get_all().is_empty());
    }
    assert_eq!(index.get_all().len(), 5);
}

#[test]
fn readers_keep_their_snapshot_during_a_rebuild() {
    let index: Arc<TriePrefixIndex<String>> =
        Arc::new(TriePrefixIndex::new(|s: &String| Some(s.clone())));

    let first: Vec<String> = (0..500).map(|i| format!("alpha {i}")).collect();
    index.create_index(first.clone());

    // Start consuming a stream, then rebuild from another thread.
    let mut stream = index.search_stream("alpha");
    let mut collected = Vec::new();
    for _ in 0..100 {
        collected.push(stream.next().expect("first snapshot has 500 hits"));
    }

    let writer = {
        let index = Arc::clone(&index);
        thread::spawn(move || {
            let second: Vec<String> = (0..500).map(|i| format!("beta {i}")).collect();
            index.create_index(second);
        })
    };
    writer.join().expect("rebuild thread");

    // The old stream finishes on the old snapshot, unaffected.
    collected.extend(stream);
    assert_eq!(collected, first);

    // New queries observe the new snapshot.
    assert!(index.search("alpha").is_empty());
    assert_eq!(index.search("beta").len(), 500);
}

#[test]
fn concurrent_readers_see_one_generation_each() {
    let index: Arc<TriePrefixIndex<String>> =
        Arc::new(TriePrefixIndex::new(|s: &String| Some(s.clone())));
    index.create_index(vec!["gen0 payload".to_string()]);

    let mut handles = Vec::new();
    for generation in 1..=4u32 {
        let index = Arc::clone(&index);
        handles.push(thread::spawn(move || {
            index.create_index(vec![format!("gen{generation} payload")]);
        }));
    }
    for _ in 0..8 {
        let index = Arc::clone(&index);
        handles.push(thread::spawn(move || {
            // Every observation is a complete generation, never a mix.
            let all = index.search("payload");
            assert_eq!(all.len(), 1);
            assert!(all[0].starts_with("gen"));
        }));
    }
    for handle in handles {
        handle.join().expect("thread");
    }
}

#[test]
fn model_ids_restart_on_rebuild() {
    let index = wine_index();
    index.create_index(vec!["only entry".to_string()]);
    assert_eq!(index.get_all(), ["only entry"]);
    assert_eq!(index.search("only"), ["only entry"]);
    assert!(index.search("wine").is_empty());
}

#[test]
fn struct_models_with_optional_projection() {
    #[derive(Clone, Debug, PartialEq)]
    struct Person {
        name: Option<String>,
        age: u32,
    }

    let index = TriePrefixIndex::new(|p: &Person| p.name.clone());
    index.create_index(vec![
        Person {
            name: Some("Ada Lovelace".to_string()),
            age: 36,
        },
        Person {
            name: None,
            age: 99,
        },
    ]);

    assert_eq!(index.get_all().len(), 2);
    let hits = index.search("love");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].age, 36);

    let ages = (&index).map(|p: Person| p.age);
    assert_eq!(ages.get_all(), [36, 99]);
}
