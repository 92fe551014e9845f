//! Social Graph Property Tests
//!
//! Random graphs of friendships, subscriptions and blocks are built through
//! the public API, then common-friend and recipient invariants are checked.

use fm_01_social_graph::{
    FriendshipApi, GraphError, InMemoryGraphStore, RecipientApi, SocialGraphService,
    SubscriptionApi,
};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

const POPULATION: usize = 8;

fn email(i: usize) -> String {
    format!("user{}@example.com", i)
}

#[derive(Debug, Clone)]
struct Graph {
    friendships: Vec<(usize, usize)>,
    subscriptions: Vec<(usize, usize)>,
    blocks: Vec<(usize, usize)>,
}

fn arb_pairs() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..POPULATION, 0..POPULATION), 0..20)
}

fn arb_graph() -> impl Strategy<Value = Graph> {
    (arb_pairs(), arb_pairs(), arb_pairs()).prop_map(|(friendships, subscriptions, blocks)| Graph {
        friendships,
        subscriptions,
        blocks,
    })
}

impl Graph {
    fn friends_of(&self, user: usize) -> BTreeSet<usize> {
        let mut friends = BTreeSet::new();
        for &(a, b) in &self.friendships {
            if a != b && a == user {
                friends.insert(b);
            } else if a != b && b == user {
                friends.insert(a);
            }
        }
        friends
    }

    /// Friends, surviving subscribers and mentions, minus users blocking `sender`.
    fn expected_recipients(&self, sender: usize, mentioned: &[usize]) -> BTreeSet<String> {
        let mut subscriptions: BTreeSet<(usize, usize)> =
            self.subscriptions.iter().copied().collect();
        let mut blocks = BTreeSet::new();
        for &(a, b) in &self.blocks {
            if blocks.insert((a, b)) && self.friends_of(a).contains(&b) {
                subscriptions.remove(&(a, b));
            }
        }

        let subscribers = subscriptions
            .iter()
            .filter(|&&(_, target)| target == sender)
            .map(|&(requestor, _)| requestor);

        self.friends_of(sender)
            .into_iter()
            .chain(subscribers)
            .chain(mentioned.iter().copied())
            .filter(|candidate| !blocks.contains(&(*candidate, sender)))
            .map(email)
            .collect()
    }
}

/// Apply every relation, ignoring duplicates and self-friendships.
async fn build(graph: &Graph) -> SocialGraphService {
    let store = Arc::new(InMemoryGraphStore::with_users((0..POPULATION).map(email)));
    let service = SocialGraphService::new(store);

    for &(a, b) in &graph.friendships {
        match service.create_friendship(&email(a), &email(b)).await {
            Ok(()) | Err(GraphError::AlreadyFriends) | Err(GraphError::InvalidRequest(_)) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    for &(a, b) in &graph.subscriptions {
        match service.subscribe(&email(a), &email(b)).await {
            Ok(()) | Err(GraphError::AlreadySubscribed) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    for &(a, b) in &graph.blocks {
        match service.block(&email(a), &email(b)).await {
            Ok(()) | Err(GraphError::AlreadyBlocked) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    service
}

fn run<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(fut)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Common friends are the same regardless of argument order
    #[test]
    fn common_friends_symmetric(graph in arb_graph(), a in 0..POPULATION, b in 0..POPULATION) {
        run(async {
            let service = build(&graph).await;
            let ab = service.list_common_friends(&email(a), &email(b)).await.unwrap();
            let ba = service.list_common_friends(&email(b), &email(a)).await.unwrap();
            assert_eq!(ab, ba);

            let unique: BTreeSet<_> = ab.iter().collect();
            assert_eq!(unique.len(), ab.len());
        });
    }

    /// Recipients equal a straightforward set model of the same graph
    #[test]
    fn recipients_match_model(
        graph in arb_graph(),
        sender in 0..POPULATION,
        mentioned in prop::collection::vec(0..POPULATION, 0..4),
    ) {
        run(async {
            let service = build(&graph).await;
            let text = mentioned.iter().map(|&i| email(i)).collect::<Vec<_>>().join(" hey ");

            let recipients = service.resolve_recipients(&email(sender), &text).await.unwrap();
            assert_eq!(recipients, graph.expected_recipients(sender, &mentioned));

            for recipient in &recipients {
                assert!(!service.is_blocked(recipient, &email(sender)).await.unwrap());
            }
        });
    }

    /// Text with no `@` contributes no mentions
    #[test]
    fn text_without_at_adds_nothing(graph in arb_graph(), sender in 0..POPULATION, text in "[a-z ,.]{0,40}") {
        run(async {
            let service = build(&graph).await;
            let sender_email = email(sender);
            let with_text = service.resolve_recipients(&sender_email, &text).await.unwrap();
            let empty = service.resolve_recipients(&sender_email, "").await.unwrap();
            assert_eq!(with_text, empty);
        });
    }
}

#[test]
fn known_example_resolves_friend_and_mention() {
    run(async {
        let store = Arc::new(InMemoryGraphStore::with_users([
            "john@example.com",
            "jane@example.com",
            "bob@example.com",
        ]));
        let service = SocialGraphService::new(store);
        service
            .create_friendship("john@example.com", "jane@example.com")
            .await
            .unwrap();

        let recipients = service
            .resolve_recipients("john@example.com", "hi there bob@example.com")
            .await
            .unwrap();
        let expected: BTreeSet<String> = ["jane@example.com", "bob@example.com"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(recipients, expected);
    });
}
