//! Property-based tests for the playback store
//!
//! Uses proptest to verify navigation and notification invariants across
//! many random playlists and operation sequences.

use podcastr_core::Episode;
use podcastr_playback::{PlaybackConfig, PlaybackStore};
use proptest::prelude::*;
use url::Url;

// ===== Helpers =====

fn arbitrary_episode() -> impl Strategy<Value = Episode> {
    (
        "[A-Za-z ]{1,30}", // title
        "[A-Za-z ,]{1,30}", // members
        "[a-z0-9]{1,10}",  // slug
        0u64..7200,        // duration (0-2 hours)
    )
        .prop_map(|(title, members, slug, duration)| {
            Episode::new(
                title,
                members,
                Url::parse(&format!("https://cdn.example.com/{}.jpg", slug)).unwrap(),
                duration,
                Url::parse(&format!("https://cdn.example.com/{}.m4a", slug)).unwrap(),
            )
        })
}

fn arbitrary_playlist_with_index() -> impl Strategy<Value = (Vec<Episode>, usize)> {
    prop::collection::vec(arbitrary_episode(), 1..30).prop_flat_map(|episodes| {
        let len = episodes.len();
        (Just(episodes), 0..len)
    })
}

fn store(shuffling: bool, seed: u64) -> PlaybackStore {
    PlaybackStore::with_seed(
        PlaybackConfig {
            looping: false,
            shuffling,
        },
        seed,
    )
}

// ===== Property Tests =====

proptest! {
    /// Property: Derived navigation flags follow the loaded index
    #[test]
    fn flags_follow_loaded_index(
        (episodes, index) in arbitrary_playlist_with_index(),
        shuffling in any::<bool>()
    ) {
        let len = episodes.len();
        let mut store = store(shuffling, 0);
        store.play_list(episodes, index);

        prop_assert_eq!(store.has_prev(), index > 0);
        prop_assert_eq!(store.has_next(), shuffling || index + 1 < len);
        prop_assert!(store.state().is_playing());
    }

    /// Property: next then prev from an interior index returns to it
    #[test]
    fn next_then_prev_round_trips(
        (episodes, index) in arbitrary_playlist_with_index()
    ) {
        prop_assume!(index + 1 < episodes.len());

        let mut store = store(false, 0);
        store.play_list(episodes, index);
        store.play_next();
        store.play_prev();

        prop_assert_eq!(store.state().current_index(), index);
    }

    /// Property: Without shuffle, next at the last index changes nothing
    #[test]
    fn next_at_end_without_shuffle_is_noop(
        episodes in prop::collection::vec(arbitrary_episode(), 1..30)
    ) {
        let last = episodes.len() - 1;
        let mut store = store(false, 0);
        store.play_list(episodes, last);
        let revision = store.revision();

        prop_assert!(!store.has_next());
        store.play_next();

        prop_assert_eq!(store.state().current_index(), last);
        prop_assert_eq!(store.revision(), revision);
    }

    /// Property: Shuffle never produces an out-of-range index
    #[test]
    fn shuffle_next_stays_in_range(
        (episodes, index) in arbitrary_playlist_with_index(),
        seed in any::<u64>(),
        steps in 1usize..100
    ) {
        let len = episodes.len();
        let mut store = store(true, seed);
        store.play_list(episodes, index);

        for _ in 0..steps {
            prop_assert!(store.has_next());
            store.play_next();
            prop_assert!(store.state().current_index() < len);
        }
    }

    /// Property: Clear always empties the playlist and resets the index
    #[test]
    fn clear_always_empties(
        (episodes, index) in arbitrary_playlist_with_index(),
        operations in prop::collection::vec(0u8..6, 0..20)
    ) {
        let mut store = store(false, 0);
        store.play_list(episodes, index);

        for op in operations {
            match op {
                0 => store.play_next(),
                1 => store.play_prev(),
                2 => store.toggle_play(),
                3 => store.toggle_shuffling(),
                4 => store.toggle_looping(),
                _ => store.set_playing_state(false),
            }
        }

        store.clear_player_state();

        prop_assert!(store.state().playlist().is_empty());
        prop_assert_eq!(store.state().current_index(), 0);
        prop_assert!(!store.state().is_playing());
    }

    /// Property: Index stays valid and playing implies a playlist, after any operations
    #[test]
    fn invariants_hold_after_any_operations(
        (episodes, index) in arbitrary_playlist_with_index(),
        seed in any::<u64>(),
        operations in prop::collection::vec(0u8..9, 0..50)
    ) {
        let mut store = store(false, seed);
        store.play_list(episodes.clone(), index);

        for op in operations {
            match op {
                0 => store.play_next(),
                1 => store.play_prev(),
                2 => store.toggle_play(),
                3 => store.toggle_shuffling(),
                4 => store.toggle_looping(),
                5 => store.set_playing_state(true),
                6 => store.clear_player_state(),
                7 => store.play(episodes[0].clone()),
                _ => store.play_list(episodes.clone(), index),
            }

            let state = store.state();
            if state.playlist().is_empty() {
                prop_assert_eq!(state.current_index(), 0);
                prop_assert!(!state.is_playing());
            } else {
                prop_assert!(state.current_index() < state.playlist().len());
            }
        }
    }

    /// Property: Every revision reaches every subscriber exactly once, in order
    #[test]
    fn subscribers_see_each_revision_once(
        (episodes, index) in arbitrary_playlist_with_index(),
        operations in prop::collection::vec(0u8..5, 0..30)
    ) {
        let mut store = store(true, 3);
        let first = store.subscribe();
        let second = store.subscribe();

        store.play_list(episodes, index);
        for op in operations {
            match op {
                0 => store.play_next(),
                1 => store.play_prev(),
                2 => store.toggle_play(),
                3 => store.toggle_looping(),
                _ => store.clear_player_state(),
            }
        }

        let expected: Vec<u64> = (1..=store.revision()).collect();
        for subscription in [&first, &second] {
            let seen: Vec<u64> = subscription.drain().iter().map(|c| c.revision).collect();
            prop_assert_eq!(&seen, &expected);
        }
    }
}
