//! Property tests for the path navigator over randomly generated graphs.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use lifepath_core::navigator::gate;
use lifepath_core::{ChoiceView, PathNavigator, TagLedger};
use lifepath_rules::{ChoiceGraph, NodeId, NodeRecord, Tag};

const TAGS: [&str; 4] = ["noble", "alien", "guild", "clergy"];

#[derive(Debug, Clone)]
struct NodeSpec {
    successors: Vec<usize>,
    required: Vec<usize>,
    forbidden: Vec<usize>,
    granted: Vec<usize>,
}

#[derive(Debug, Clone)]
enum Op {
    /// Pick the n-th offered choice (modulo the offer size).
    ChooseOffered(usize),
    /// Pick any node by index, offered or not.
    ChooseAny(usize),
    Rollback,
}

fn node_name(index: usize) -> String {
    if index == 0 {
        NodeId::START.to_string()
    } else {
        format!("n{index}")
    }
}

fn node_spec(n: usize) -> impl Strategy<Value = NodeSpec> {
    (
        prop::collection::vec(0..n, 0..4),
        prop::collection::vec(0..TAGS.len(), 0..2),
        prop::collection::vec(0..TAGS.len(), 0..2),
        prop::collection::vec(0..TAGS.len(), 0..3),
    )
        .prop_map(|(successors, required, forbidden, granted)| NodeSpec {
            successors,
            required,
            forbidden,
            granted,
        })
}

fn graph_strategy() -> impl Strategy<Value = Vec<NodeSpec>> {
    (2_usize..8).prop_flat_map(|n| prop::collection::vec(node_spec(n), n))
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0_usize..8).prop_map(Op::ChooseOffered),
        1 => (0_usize..8).prop_map(Op::ChooseAny),
        2 => Just(Op::Rollback),
    ]
}

fn build_graph(specs: &[NodeSpec]) -> Arc<ChoiceGraph> {
    let records = specs.iter().enumerate().map(|(i, spec)| {
        let mut record = NodeRecord::new(
            node_name(i),
            format!("Node {i}"),
            format!("Description of node {i}"),
        );
        for &s in &spec.successors {
            record = record.with_successor(node_name(s));
        }
        for &t in &spec.required {
            record = record.with_required(TAGS[t]);
        }
        for &t in &spec.forbidden {
            record = record.with_forbidden(TAGS[t]);
        }
        for &t in &spec.granted {
            record = record.with_grant(TAGS[t]);
        }
        record
    });
    Arc::new(ChoiceGraph::from_records(records).unwrap())
}

fn union_of_grants(graph: &ChoiceGraph, history: &[NodeId]) -> HashSet<Tag> {
    history
        .iter()
        .flat_map(|id| graph.node(id).unwrap().granted_tags.iter().cloned())
        .collect()
}

/// Offer computed from scratch with plain set operations.
fn expected_offer(graph: &ChoiceGraph, nav: &PathNavigator) -> Vec<NodeId> {
    let established = union_of_grants(graph, nav.history());
    let current = graph.node(nav.current_id()).unwrap();

    let mut offer: Vec<NodeId> = Vec::new();
    for id in &current.successors {
        if offer.contains(id) {
            continue;
        }
        let node = graph.node(id).unwrap();
        if node.forbidden_tags.is_disjoint(&established)
            && node.required_tags.is_subset(&established)
        {
            offer.push(id.clone());
        }
    }
    offer
}

fn snapshot(nav: &PathNavigator) -> (Vec<NodeId>, HashSet<Tag>, ChoiceView) {
    (
        nav.history().to_vec(),
        nav.ledger().to_set(),
        nav.current_choice(),
    )
}

fn check_consistent(graph: &ChoiceGraph, nav: &PathNavigator) -> Result<(), TestCaseError> {
    let history = nav.history();
    prop_assert!(!history.is_empty());
    prop_assert_eq!(&history[0], &NodeId::start());
    prop_assert_eq!(nav.current_id(), &history[history.len() - 1]);
    prop_assert_eq!(nav.can_rollback(), history.len() > 1);

    prop_assert_eq!(nav.ledger().to_set(), union_of_grants(graph, history));

    let view = nav.current_choice();
    prop_assert_eq!(&view, &nav.current_choice());
    let offered: Vec<NodeId> = view.ids().cloned().collect();
    prop_assert_eq!(offered, expected_offer(graph, nav));
    prop_assert_eq!(
        view.description(),
        graph.node(nav.current_id()).unwrap().description.as_str()
    );
    Ok(())
}

proptest! {
    #[test]
    fn random_walk_keeps_state_consistent(
        specs in graph_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let graph = build_graph(&specs);
        let mut nav = PathNavigator::new(Arc::clone(&graph)).unwrap();
        check_consistent(&graph, &nav)?;

        for op in ops {
            let returned = match op {
                Op::ChooseOffered(n) => {
                    let view = nav.current_choice();
                    match view.choices().get(n % view.len().max(1)) {
                        Some(choice) => nav.choose(&choice.id).unwrap(),
                        None => nav.current_choice(),
                    }
                }
                Op::ChooseAny(n) => {
                    let target = NodeId::from(node_name(n % specs.len()));
                    let offered = nav.current_choice().contains(&target);
                    let before = snapshot(&nav);
                    let view = nav.choose(&target).unwrap();
                    if !offered {
                        prop_assert_eq!(snapshot(&nav), before);
                    }
                    view
                }
                Op::Rollback => {
                    let before = snapshot(&nav);
                    let view = nav.rollback().unwrap();
                    if before.0.len() == 1 {
                        prop_assert_eq!(snapshot(&nav), before);
                    }
                    view
                }
            };

            prop_assert_eq!(returned, nav.current_choice());
            check_consistent(&graph, &nav)?;
        }
    }

    #[test]
    fn choose_then_rollback_round_trips(
        specs in graph_strategy(),
        walk in prop::collection::vec(0_usize..8, 0..10),
    ) {
        let graph = build_graph(&specs);
        let mut nav = PathNavigator::new(Arc::clone(&graph)).unwrap();

        for n in walk {
            let view = nav.current_choice();
            if view.is_terminal() {
                break;
            }
            let target = view.choices()[n % view.len()].id.clone();
            nav.choose(&target).unwrap();
        }

        for choice in nav.current_choice().choices().to_vec() {
            let before = snapshot(&nav);
            nav.choose(&choice.id).unwrap();
            prop_assert_eq!(nav.current_id(), &choice.id);
            nav.rollback().unwrap();
            prop_assert_eq!(snapshot(&nav), before);
        }
    }

    #[test]
    fn required_only_gates_are_monotonic(
        required in prop::collection::vec(0..TAGS.len(), 0..3),
        base in prop::collection::vec(0..TAGS.len(), 0..4),
        extra in 0..TAGS.len(),
    ) {
        let mut record = NodeRecord::new("gated", "Gated", "Gated");
        for t in required {
            record = record.with_required(TAGS[t]);
        }
        let node = record.into_node(0).unwrap();

        let base_tags: Vec<Tag> = base.iter().map(|&t| Tag::from(TAGS[t])).collect();
        let mut ledger = TagLedger::new();
        ledger.grant(&base_tags);
        let before = gate::is_reachable(&node, &ledger);

        let extra_tag = Tag::from(TAGS[extra]);
        ledger.grant([&extra_tag]);

        if before {
            prop_assert!(gate::is_reachable(&node, &ledger));
        }
    }
}

#[test]
fn test_scenario_noble_heir() {
    let records = vec![
        NodeRecord::new("init", "Start", "Choose your birth.").with_successor("A"),
        NodeRecord::new("A", "Noble", "Born noble.")
            .with_grant("noble")
            .with_successor("B"),
        NodeRecord::new("B", "Heir", "The heir.").with_required("noble"),
    ];
    let graph = Arc::new(ChoiceGraph::from_records(records).unwrap());
    let mut nav = PathNavigator::new(graph).unwrap();

    let ids = |view: &ChoiceView| view.ids().map(|id| id.to_string()).collect::<Vec<_>>();

    assert_eq!(ids(&nav.current_choice()), vec!["A"]);
    assert_eq!(ids(&nav.choose(&NodeId::from("A")).unwrap()), vec!["B"]);
    assert_eq!(ids(&nav.rollback().unwrap()), vec!["A"]);
    assert!(!nav.is_established(&Tag::from("noble")));
}
