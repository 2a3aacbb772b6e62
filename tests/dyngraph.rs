use vargraph::{
    dyngraph::DynGraph,
    error::GraphError,
    handle::{Direction, Edge, Handle, NodeId},
    handlegraph::{always, HandleGraph},
    mutablehandlegraph::{
        AdditiveHandleGraph, MutableHandles, SubtractiveHandleGraph,
    },
    pathhandlegraph::{PathHandleGraph, PathStep},
    util::dna,
};

use bstr::{BString, B};

fn hnd(x: u64) -> Handle {
    Handle::pack(NodeId::from(x), false)
}

fn seq_of(graph: &DynGraph, h: Handle) -> BString {
    graph.sequence(h).into()
}

/// GAT -> TAC -> A with a "ref" path over all three
fn gattaca_graph() -> DynGraph {
    let mut graph = DynGraph::new();
    graph.append_handle(b"GAT").unwrap();
    graph.append_handle(b"TAC").unwrap();
    graph.append_handle(b"A").unwrap();
    graph.create_edge(Edge(hnd(1), hnd(2))).unwrap();
    graph.create_edge(Edge(hnd(2), hnd(3))).unwrap();
    graph
}

#[test]
fn can_create_handles() {
    let mut graph = DynGraph::new();
    let h1 = graph.append_handle(b"CAAATAAG").unwrap();
    let h2 = graph.append_handle(b"A").unwrap();
    let h3 = graph.append_handle(b"G").unwrap();

    assert_eq!(h1, hnd(1));
    assert_eq!(h2, hnd(2));
    assert_eq!(h3, hnd(3));

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.min_node_id(), NodeId::from(1));
    assert_eq!(graph.max_node_id(), NodeId::from(3));
    assert_eq!(graph.total_length(), 10);

    assert_eq!(seq_of(&graph, h1), B("CAAATAAG"));
    assert_eq!(seq_of(&graph, h2), B("A"));
    assert_eq!(seq_of(&graph, h3), B("G"));
    assert_eq!(graph.node_len(h1), 8);
}

#[test]
fn explicit_ids() {
    let mut graph = DynGraph::new();
    graph.create_handle(b"AC", NodeId::from(10)).unwrap();

    // an id below the current minimum extends the range
    graph.create_handle(b"GT", NodeId::from(2)).unwrap();
    assert_eq!(graph.min_node_id(), NodeId::from(2));
    assert_eq!(graph.max_node_id(), NodeId::from(10));

    // a taken id is refused
    assert_eq!(
        graph.create_handle(b"TTT", NodeId::from(10)),
        Err(GraphError::DuplicateId(NodeId::from(10)))
    );

    // implicit ids continue above the maximum
    let h = graph.append_handle(b"C").unwrap();
    assert_eq!(h.id(), NodeId::from(11));

    assert!(graph.get_handle(NodeId::from(2), false).is_ok());
    assert_eq!(
        graph.get_handle(NodeId::from(4), false),
        Err(GraphError::NoSuchNode(NodeId::from(4)))
    );
}

#[test]
fn sequences_respect_orientation() {
    let mut graph = DynGraph::new();
    let h = graph.append_handle(b"GATTACA").unwrap();

    assert_eq!(seq_of(&graph, h.flip()), B("TGTAATC"));
    assert_eq!(
        graph.sequence(h.flip()),
        dna::rev_comp(&graph.sequence(h))
    );
    assert_eq!(graph.node_len(h.flip()), 7);

    let mixed = graph.append_handle(b"acgTN").unwrap();
    assert_eq!(seq_of(&graph, mixed.flip()), B("NAcgt"));
}

#[test]
fn can_create_edges() {
    let mut graph = DynGraph::new();
    let h1 = graph.append_handle(b"CAAATAAG").unwrap();
    let h2 = graph.append_handle(b"A").unwrap();
    let h3 = graph.append_handle(b"G").unwrap();
    let h4 = graph.append_handle(b"TTG").unwrap();

    graph.create_edge(Edge(h1, h2)).unwrap();
    graph.create_edge(Edge(h1, h3)).unwrap();
    graph.create_edge(Edge(h2, h4)).unwrap();
    graph.create_edge(Edge(h3, h4)).unwrap();

    assert_eq!(graph.edge_count(), 4);

    fn rights(graph: &DynGraph, h: Handle) -> Vec<Handle> {
        graph.handle_edges_iter(h, Direction::Right).collect()
    }
    fn lefts(graph: &DynGraph, h: Handle) -> Vec<Handle> {
        graph.handle_edges_iter(h, Direction::Left).collect()
    }

    assert!(rights(&graph, h1).contains(&h2));
    assert!(rights(&graph, h1).contains(&h3));
    assert!(lefts(&graph, h2).contains(&h1));
    assert!(lefts(&graph, h4).contains(&h2));
    assert!(lefts(&graph, h4).contains(&h3));

    assert!(graph.has_edge(h1, h2));
    // the same edge, seen from the other strand
    assert!(graph.has_edge(h2.flip(), h1.flip()));
    assert!(!graph.has_edge(h2, h3));

    assert_eq!(graph.degree(h1, Direction::Right), 2);
    assert_eq!(graph.degree(h4, Direction::Left), 2);
    assert_eq!(graph.degree(h1, Direction::Left), 0);

    // creating an edge twice changes nothing
    graph.create_edge(Edge(h1, h2)).unwrap();
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(rights(&graph, h1).len(), 2);

    // destroying an absent edge is a no-op
    graph.destroy_edge(Edge(h2, h3)).unwrap();
    assert_eq!(graph.edge_count(), 4);

    graph.destroy_edge(Edge(h1, h3)).unwrap();
    assert_eq!(graph.edge_count(), 3);
    assert!(!graph.has_edge(h1, h3));
}

#[test]
fn edge_endpoints_must_exist() {
    let mut graph = DynGraph::new();
    let h1 = graph.append_handle(b"A").unwrap();
    assert_eq!(
        graph.create_edge(Edge(h1, hnd(9))),
        Err(GraphError::NoSuchNode(NodeId::from(9)))
    );
}

// S2: an edge entering its target on the reverse strand
#[test]
fn reversing_edge_traversal() {
    let mut graph = DynGraph::new();
    let h1 = graph.append_handle(b"AC").unwrap();
    let h2 = graph.append_handle(b"GT").unwrap();

    // right side of 1 to right side of 2
    graph.create_edge(Edge(h1, h2.flip())).unwrap();

    let nexts: Vec<Handle> =
        graph.handle_edges_iter(h1, Direction::Right).collect();
    assert_eq!(nexts, vec![h2.flip()]);

    let mut walked = graph.sequence(h1);
    walked.extend(graph.sequence(nexts[0]));
    assert_eq!(BString::from(walked), B("ACAC"));

    // the edge is symmetric: right side of 2 reaches right side of 1
    let from_two: Vec<Handle> =
        graph.handle_edges_iter(h2, Direction::Right).collect();
    assert_eq!(from_two, vec![h1.flip()]);
}

#[test]
fn follow_edges_callback_contract() {
    let graph = gattaca_graph();

    let mut seen = Vec::new();
    let finished = graph.follow_edges(hnd(1), false, |h| {
        seen.push(h);
        true
    });
    assert!(finished);
    assert_eq!(seen, vec![hnd(2)]);

    // early stop propagates a false return
    let mut count = 0;
    let finished = graph.for_each_handle(|_| {
        count += 1;
        false
    });
    assert!(!finished);
    assert_eq!(count, 1);

    // unit callbacks wrap into the boolean shape
    let mut total = 0;
    assert!(graph.for_each_handle(always(|_| total += 1)));
    assert_eq!(total, 3);
}

// S5: canonical enumeration yields each edge exactly once
#[test]
fn canonical_edge_enumeration() {
    let mut graph = DynGraph::new();
    let h1 = graph.append_handle(b"ACGT").unwrap();
    let h2 = graph.append_handle(b"T").unwrap();

    // reversing self-loop on node 1, plus an ordinary edge
    graph.create_edge(Edge(h1, h1.flip())).unwrap();
    graph.create_edge(Edge(h1, h2)).unwrap();

    let edges: Vec<Edge> = graph.edges_iter().collect();
    assert_eq!(edges.len(), 2);
    assert!(edges.contains(&Edge::edge_handle(h1, h1.flip())));
    assert!(edges.contains(&Edge::edge_handle(h1, h2)));

    // a second pass yields the identical sequence
    let again: Vec<Edge> = graph.edges_iter().collect();
    assert_eq!(edges, again);
}

#[test]
fn edge_enumeration_follow_property() {
    let mut graph = DynGraph::new();
    let h1 = graph.append_handle(b"A").unwrap();
    let h2 = graph.append_handle(b"C").unwrap();
    let h3 = graph.append_handle(b"G").unwrap();

    graph.create_edge(Edge(h1, h2)).unwrap();
    graph.create_edge(Edge(h2, h3)).unwrap();
    graph.create_edge(Edge(h3, h1.flip())).unwrap();
    graph.create_edge(Edge(h2, h2)).unwrap();
    graph.create_edge(Edge(h1, h1.flip())).unwrap();

    let mut seen = std::collections::HashSet::new();
    for Edge(l, r) in graph.edges_iter() {
        // no edge appears twice
        assert!(seen.insert(Edge(l, r)));

        let rights: Vec<Handle> =
            graph.handle_edges_iter(l, Direction::Right).collect();
        assert!(rights.contains(&r));

        let mirrored: Vec<Handle> =
            graph.handle_edges_iter(r.flip(), Direction::Right).collect();
        assert!(mirrored.contains(&l.flip()));

        // an edge pair can be traversed from either inward end
        let edge = Edge(l, r);
        assert_eq!(graph.traverse_edge_handle(&edge, l).unwrap(), r);
        assert_eq!(
            graph.traverse_edge_handle(&edge, r.flip()).unwrap(),
            l.flip()
        );
    }
    assert_eq!(seen.len(), 5);
    assert_eq!(graph.edge_count(), 5);
}

// S1: a linear reference path
#[test]
fn linear_path() {
    let mut graph = gattaca_graph();

    let p = graph.create_path_handle(b"ref").unwrap();
    graph.append_step(p, hnd(1)).unwrap();
    graph.append_step(p, hnd(2)).unwrap();
    graph.append_step(p, hnd(3)).unwrap();

    assert_eq!(graph.path_count(), 1);
    assert_eq!(graph.path_len(p).unwrap(), 3);
    assert_eq!(graph.step_count_on_handle(hnd(2)), 1);
    assert_eq!(graph.path_sequence(p).unwrap(), b"GATTACA");

    assert!(graph.has_path(b"ref"));
    assert_eq!(graph.name_to_path_handle(b"ref"), Some(p));
    assert_eq!(graph.path_name(p).unwrap(), b"ref");
    assert!(!graph.path_is_empty(p).unwrap());

    let steps: Vec<PathStep> = graph.steps_iter(p).collect();
    assert_eq!(
        steps,
        vec![
            PathStep::Step(p, 0),
            PathStep::Step(p, 1),
            PathStep::Step(p, 2)
        ]
    );
    assert_eq!(graph.handle_of_step(&steps[1]), Some(hnd(2)));
    assert_eq!(graph.path_handle_of_step(&steps[1]), p);
}

#[test]
fn path_names_are_validated() {
    let mut graph = DynGraph::new();
    graph.append_handle(b"A").unwrap();

    assert!(matches!(
        graph.create_path_handle(b""),
        Err(GraphError::InvalidName(_))
    ));
    assert!(matches!(
        graph.create_path_handle(b"a$b"),
        Err(GraphError::InvalidName(_))
    ));

    graph.create_path_handle(b"ref").unwrap();
    assert!(matches!(
        graph.create_path_handle(b"ref"),
        Err(GraphError::DuplicatePath(_))
    ));
}

#[test]
fn step_navigation() {
    let mut graph = gattaca_graph();
    graph.append_handle(b"C").unwrap();
    graph.create_edge(Edge(hnd(3), hnd(4))).unwrap();

    let p = graph.create_path_handle(b"walk").unwrap();
    for id in 1..=4u64 {
        graph.append_step(p, hnd(id)).unwrap();
    }

    let begin = graph.path_begin(p).unwrap();
    let back = graph.path_back(p).unwrap();
    let end = graph.path_end(p).unwrap();
    let front = graph.path_front_end(p).unwrap();

    assert_eq!(begin, PathStep::Step(p, 0));
    assert_eq!(back, PathStep::Step(p, 3));
    assert!(end.is_end());
    assert!(front.is_front());

    assert_eq!(graph.first_step(p).unwrap(), begin);
    assert_eq!(graph.last_step(p).unwrap(), back);

    // from rank k, len - k - 1 nexts land on the back step, one more
    // on the end sentinel
    let k = 1;
    let mut step = PathStep::Step(p, k);
    for _ in 0..(4 - k - 1) {
        step = graph.next_step(&step);
    }
    assert_eq!(step, back);
    assert_eq!(graph.next_step(&step), end);
    assert_eq!(graph.next_step(&end), end);

    // walking off the front saturates too
    assert_eq!(graph.previous_step(&begin), front);
    assert_eq!(graph.previous_step(&front), front);
    assert_eq!(graph.next_step(&front), begin);
    assert_eq!(graph.previous_step(&end), back);

    assert!(graph.has_next_step(&begin));
    assert!(!graph.has_next_step(&back));
    assert!(graph.has_next_step(&front));
    assert!(graph.has_previous_step(&back));
    assert!(!graph.has_previous_step(&begin));
    assert!(graph.has_previous_step(&end));

    // neighbor peeking without materializing the step
    assert_eq!(graph.next_step_id(&begin), Some(NodeId::from(2)));
    assert_eq!(graph.next_step_rank(&begin), Some(1));
    assert_eq!(graph.prev_step_id(&back), Some(NodeId::from(3)));
    assert_eq!(graph.prev_step_rank(&back), Some(2));
    assert_eq!(graph.next_step_id(&back), None);
}

#[test]
fn empty_path_sentinels() {
    let mut graph = DynGraph::new();
    graph.append_handle(b"A").unwrap();
    let p = graph.create_path_handle(b"empty").unwrap();

    assert!(graph.path_is_empty(p).unwrap());
    assert_eq!(graph.path_len(p).unwrap(), 0);

    // begin collapses onto the end sentinel
    assert!(graph.path_begin(p).unwrap().is_end());
    assert!(graph.path_back(p).unwrap().is_front());
    assert_eq!(graph.first_step(p), Err(GraphError::EmptyPath(p)));
    assert_eq!(graph.last_step(p), Err(GraphError::EmptyPath(p)));

    let front = graph.path_front_end(p).unwrap();
    assert!(!graph.has_next_step(&front));
}

#[test]
fn steps_on_handle_across_paths() {
    let mut graph = gattaca_graph();

    let p1 = graph.create_path_handle(b"one").unwrap();
    let p2 = graph.create_path_handle(b"two").unwrap();
    graph.append_step(p1, hnd(1)).unwrap();
    graph.append_step(p1, hnd(2)).unwrap();
    graph.append_step(p2, hnd(2)).unwrap();
    graph.append_step(p2, hnd(2).flip()).unwrap();

    assert_eq!(graph.step_count_on_handle(hnd(2)), 3);
    assert_eq!(graph.step_count_on_handle(hnd(3)), 0);

    let mut on_two: Vec<PathStep> = graph.occurrences_iter(hnd(2)).collect();
    on_two.sort();
    assert_eq!(
        on_two,
        vec![
            PathStep::Step(p1, 1),
            PathStep::Step(p2, 0),
            PathStep::Step(p2, 1)
        ]
    );

    assert_eq!(graph.step_is_reverse(&PathStep::Step(p2, 1)), Some(true));

    let paths: Vec<_> = graph.paths_iter().collect();
    assert_eq!(paths, vec![p1, p2]);
}

#[test]
fn prepend_shifts_ranks() {
    let mut graph = gattaca_graph();
    let p = graph.create_path_handle(b"p").unwrap();
    graph.append_step(p, hnd(2)).unwrap();
    graph.append_step(p, hnd(3)).unwrap();

    let first = graph.prepend_step(p, hnd(1)).unwrap();
    assert_eq!(first, PathStep::Step(p, 0));
    assert_eq!(graph.path_len(p).unwrap(), 3);
    assert_eq!(graph.path_sequence(p).unwrap(), b"GATTACA");

    // the cross-index follows the shift
    let on_two: Vec<PathStep> = graph.occurrences_iter(hnd(2)).collect();
    assert_eq!(on_two, vec![PathStep::Step(p, 1)]);
}

#[test]
fn destroy_path() {
    let mut graph = gattaca_graph();
    let p1 = graph.create_path_handle(b"keep").unwrap();
    let p2 = graph.create_path_handle(b"drop").unwrap();
    graph.append_step(p1, hnd(2)).unwrap();
    graph.append_step(p2, hnd(2)).unwrap();
    graph.append_step(p2, hnd(3)).unwrap();

    graph.destroy_path(p2).unwrap();

    assert_eq!(graph.path_count(), 1);
    assert!(!graph.has_path(b"drop"));
    assert_eq!(graph.path_len(p2), Err(GraphError::NoSuchPath(p2)));
    assert_eq!(graph.step_count_on_handle(hnd(2)), 1);
    assert_eq!(graph.step_count_on_handle(hnd(3)), 0);

    // the name is free for a new path, under a fresh id
    let p3 = graph.create_path_handle(b"drop").unwrap();
    assert_ne!(p3, p2);
}

// S3: node division
#[test]
fn divide_handle_splits_sequence_and_paths() {
    let mut graph = DynGraph::new();
    let h1 = graph.append_handle(b"GATTACA").unwrap();
    let p = graph.create_path_handle(b"p").unwrap();
    graph.append_step(p, h1).unwrap();

    let pieces = graph.divide_handle(h1, &[3, 5]).unwrap();
    assert_eq!(pieces.len(), 3);

    let seqs: Vec<BString> =
        pieces.iter().map(|&h| seq_of(&graph, h)).collect();
    assert_eq!(seqs, vec![B("GAT"), B("TA"), B("CA")]);

    // piece sequences concatenate back to the original
    let total: usize = pieces.iter().map(|&h| graph.node_len(h)).sum();
    assert_eq!(total, 7);
    assert_eq!(graph.node_count(), 3);

    // the pieces are chained left to right
    assert!(graph.has_edge(pieces[0], pieces[1]));
    assert!(graph.has_edge(pieces[1], pieces[2]));

    // the path now walks the pieces with contiguous ranks
    assert_eq!(graph.path_len(p).unwrap(), 3);
    assert_eq!(graph.path_sequence(p).unwrap(), b"GATTACA");
    for (rank, &piece) in pieces.iter().enumerate() {
        let step = PathStep::Step(p, rank);
        assert_eq!(graph.handle_of_step(&step), Some(piece));
        assert_eq!(graph.step_count_on_handle(piece), 1);
    }
}

#[test]
fn divide_handle_moves_right_edges() {
    let mut graph = gattaca_graph();

    let pieces = graph.divide_handle(hnd(2), &[1]).unwrap();
    assert_eq!(pieces.len(), 2);
    let tail = pieces[1];

    assert_eq!(seq_of(&graph, pieces[0]), B("T"));
    assert_eq!(seq_of(&graph, tail), B("AC"));

    // left edges stay with the first piece, right edges move to the
    // last, and the chain edge joins them
    assert!(graph.has_edge(hnd(1), pieces[0]));
    assert!(graph.has_edge(pieces[0], tail));
    assert!(graph.has_edge(tail, hnd(3)));
    assert!(!graph.has_edge(pieces[0], hnd(3)));
}

#[test]
fn divide_handle_reversed() {
    let mut graph = DynGraph::new();
    let h1 = graph.append_handle(b"GATTACA").unwrap();
    let p = graph.create_path_handle(b"rev").unwrap();
    graph.append_step(p, h1.flip()).unwrap();

    // offsets are in the handle's orientation
    let pieces = graph.divide_handle(h1.flip(), &[3, 5]).unwrap();
    assert_eq!(pieces.len(), 3);

    // returned handles spell the reversed sequence in order
    let walked: Vec<u8> = pieces
        .iter()
        .flat_map(|&h| graph.sequence(h))
        .collect();
    assert_eq!(BString::from(walked), B("TGTAATC"));
    assert!(pieces.iter().all(|h| h.is_reverse()));

    // in forward orientation the pieces still concatenate to the
    // original
    let mut fwd: Vec<Handle> = pieces.iter().map(|h| h.forward()).collect();
    fwd.reverse();
    let forward: Vec<u8> =
        fwd.iter().flat_map(|&h| graph.sequence(h)).collect();
    assert_eq!(BString::from(forward), B("GATTACA"));

    // the reversed path visits the pieces in returned order
    assert_eq!(graph.path_len(p).unwrap(), 3);
    assert_eq!(graph.path_sequence(p).unwrap(), b"TGTAATC");
    for (rank, &piece) in pieces.iter().enumerate() {
        assert_eq!(
            graph.handle_of_step(&PathStep::Step(p, rank)),
            Some(piece)
        );
    }
}

#[test]
fn divide_invalidates_nothing_it_should_not() {
    let mut graph = gattaca_graph();
    let p = graph.create_path_handle(b"p").unwrap();
    graph.append_step(p, hnd(1)).unwrap();
    graph.append_step(p, hnd(2)).unwrap();
    graph.append_step(p, hnd(3)).unwrap();

    graph.divide_handle(hnd(2), &[1, 2]).unwrap();

    // ranks after the divided node shifted by two
    assert_eq!(graph.path_len(p).unwrap(), 5);
    assert_eq!(graph.handle_of_step(&PathStep::Step(p, 0)), Some(hnd(1)));
    assert_eq!(graph.handle_of_step(&PathStep::Step(p, 4)), Some(hnd(3)));
    assert_eq!(graph.path_sequence(p).unwrap(), b"GATTACA");
}

#[test]
fn apply_orientation_roundtrip() {
    let mut graph = DynGraph::new();
    let h1 = graph.append_handle(b"AC").unwrap();
    let h2 = graph.append_handle(b"GT").unwrap();
    graph.create_edge(Edge(h1, h2)).unwrap();
    let p = graph.create_path_handle(b"p").unwrap();
    graph.append_step(p, h1).unwrap();
    graph.append_step(p, h2).unwrap();

    // a forward handle is a no-op
    assert_eq!(graph.apply_orientation(h1).unwrap(), h1);

    let h2_new = graph.apply_orientation(h2.flip()).unwrap();
    assert!(!h2_new.is_reverse());

    // the stored sequence now reads the old reverse strand
    assert_eq!(seq_of(&graph, h2_new), B("AC"));
    // the edge still attaches to the same node end
    assert!(graph.has_edge(h1, h2_new.flip()));
    assert!(!graph.has_edge(h1, h2_new));
    // the path step flipped with the node, so the walk is unchanged
    assert_eq!(
        graph.step_is_reverse(&PathStep::Step(p, 1)),
        Some(true)
    );
    assert_eq!(graph.path_sequence(p).unwrap(), b"ACGT");

    // applying the flip of the returned handle restores everything
    let h2_back = graph.apply_orientation(h2_new.flip()).unwrap();
    assert_eq!(seq_of(&graph, h2_back), B("GT"));
    assert!(graph.has_edge(h1, h2_back));
    assert_eq!(
        graph.step_is_reverse(&PathStep::Step(p, 1)),
        Some(false)
    );
    assert_eq!(graph.path_sequence(p).unwrap(), b"ACGT");
}

// S4: destruction, tombstones, compaction
#[test]
fn destroy_handle_and_compact() {
    let mut graph = gattaca_graph();
    let p = graph.create_path_handle(b"ref").unwrap();
    graph.append_step(p, hnd(1)).unwrap();
    graph.append_step(p, hnd(2)).unwrap();
    graph.append_step(p, hnd(3)).unwrap();

    graph.destroy_handle(hnd(2)).unwrap();

    assert!(!graph.has_node(NodeId::from(2)));
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph
        .handle_edges_iter(hnd(1), Direction::Right)
        .next()
        .is_none());

    // the path still exists; the dead node's step no longer resolves
    assert_eq!(graph.path_len(p).unwrap(), 3);
    assert_eq!(graph.handle_of_step(&PathStep::Step(p, 1)), None);
    assert_eq!(graph.path_sequence(p).unwrap(), b"GATA");

    // compaction must not disturb the survivors
    graph.compact();
    assert!(graph.has_node(NodeId::from(1)));
    assert!(graph.has_node(NodeId::from(3)));
    assert_eq!(seq_of(&graph, hnd(1)), B("GAT"));
    assert_eq!(seq_of(&graph, hnd(3)), B("A"));

    // dropping the last referencing path releases the dead bases
    graph.destroy_path(p).unwrap();
    graph.compact();
    assert!(graph.has_node(NodeId::from(1)));
    assert!(graph.has_node(NodeId::from(3)));
    assert_eq!(seq_of(&graph, hnd(1)), B("GAT"));
    assert_eq!(seq_of(&graph, hnd(3)), B("A"));
    assert_eq!(graph.node_count(), 2);
}

#[test]
fn node_count_matches_iteration() {
    let mut graph = gattaca_graph();
    graph.destroy_handle(hnd(2)).unwrap();

    assert_eq!(graph.node_count(), graph.handles_iter().count());

    let mut visited = 0;
    graph.for_each_handle(always(|_| visited += 1));
    assert_eq!(visited, graph.node_count());
}

#[test]
fn swap_handles_changes_iteration_order() {
    let mut graph = gattaca_graph();

    let before: Vec<NodeId> = graph.handles_iter().map(|h| h.id()).collect();
    assert_eq!(before, vec![1.into(), 2.into(), 3.into()]);

    graph.swap_handles(hnd(1), hnd(3)).unwrap();

    let after: Vec<NodeId> = graph.handles_iter().map(|h| h.id()).collect();
    assert_eq!(after, vec![3.into(), 2.into(), 1.into()]);

    // only the order changed; the handles still resolve by id
    assert_eq!(seq_of(&graph, hnd(1)), B("GAT"));
    assert_eq!(seq_of(&graph, hnd(3)), B("A"));
    assert!(graph.has_edge(hnd(1), hnd(2)));
    assert!(graph.has_edge(hnd(2), hnd(3)));
}

// S6: parallel iteration
#[test]
fn parallel_handle_iteration() {
    use std::collections::HashSet;
    use std::sync::Mutex;

    let mut graph = DynGraph::new();
    for _ in 0..32 {
        graph.append_handle(b"ACGT").unwrap();
    }
    graph.destroy_handle(hnd(5)).unwrap();
    graph.destroy_handle(hnd(20)).unwrap();

    let seen: Mutex<HashSet<u64>> = Mutex::new(HashSet::new());
    let finished = graph.for_each_handle_par(|h| {
        seen.lock().unwrap().insert(h.id().into());
        true
    });
    assert!(finished);

    let expected: HashSet<u64> =
        (1..=32).filter(|&x| x != 5 && x != 20).collect();
    assert_eq!(*seen.lock().unwrap(), expected);
}

#[test]
fn randomized_divide_preserves_sequences() {
    use rand::{Rng, SeedableRng};

    let mut rng = rand::rngs::StdRng::seed_from_u64(0xDA7A);
    const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

    for round in 0..20 {
        let mut graph = DynGraph::new();
        let len = rng.gen_range(2..30usize);
        let seq: Vec<u8> =
            (0..len).map(|_| BASES[rng.gen_range(0..4)]).collect();

        let h = graph.append_handle(&seq).unwrap();
        let p = graph.create_path_handle(b"walk").unwrap();
        let reverse = round % 2 == 1;
        let input = if reverse { h.flip() } else { h };
        graph.append_step(p, input).unwrap();

        let cuts: Vec<usize> =
            (0..rng.gen_range(0..4usize)).map(|_| rng.gen_range(0..=len)).collect();

        let pieces = graph.divide_handle(input, &cuts).unwrap();

        // pieces spell the input handle's sequence in order
        let walked: Vec<u8> =
            pieces.iter().flat_map(|&h| graph.sequence(h)).collect();
        let expected = if reverse { dna::rev_comp(&seq) } else { seq.clone() };
        assert_eq!(walked, expected);

        // the visit expanded into contiguous ranks over the pieces
        assert_eq!(graph.path_len(p).unwrap(), pieces.len());
        assert_eq!(graph.path_sequence(p).unwrap(), expected);
        let total: usize = pieces.iter().map(|&h| graph.node_len(h)).sum();
        assert_eq!(total, len);
    }
}

#[test]
fn clear_resets_everything() {
    let mut graph = gattaca_graph();
    let p = graph.create_path_handle(b"ref").unwrap();
    graph.append_step(p, hnd(1)).unwrap();

    graph.clear();

    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.path_count(), 0);
    assert!(!graph.has_node(NodeId::from(1)));
    assert!(!graph.has_path(b"ref"));
    assert_eq!(graph.handles_iter().count(), 0);

    // the graph is usable again
    let h = graph.append_handle(b"AC").unwrap();
    assert_eq!(h.id(), NodeId::from(1));
}
