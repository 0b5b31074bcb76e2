use name_network::color::luminosity;
use name_network::{
    BigramIndex, BipartiteGraph, ColorAssigner, GraphPruner, NameRow, PruneThresholds, bigrams,
    project,
};
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z]{0,9}").unwrap()
}

fn rows() -> impl Strategy<Value = Vec<NameRow>> {
    proptest::collection::vec(
        (name(), 1u64..500, 1u32..300).prop_map(|(n, f, r)| NameRow::new(n, f, r)),
        0..25,
    )
}

fn unicode_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-zÀ-ÖØ-öø-ÿİẞ]{0,9}").unwrap()
}

proptest! {
    #[test]
    fn bigram_count_matches_name_length(name in unicode_name()) {
        prop_assert_eq!(bigrams(&name).count(), name.chars().count());
    }

    #[test]
    fn ranks_are_a_bijection(names in proptest::collection::vec(name(), 0..30)) {
        let index = BigramIndex::from_names(&names);
        prop_assert!(index.check_ranks().is_ok());

        let mut ranks: Vec<usize> = index.iter().map(|(_, stat)| stat.rank).collect();
        ranks.sort_unstable();
        prop_assert_eq!(ranks, (1..=index.len()).collect::<Vec<_>>());

        let again = BigramIndex::from_names(&names);
        for (bigram, stat) in index.iter() {
            prop_assert_eq!(again.rank(bigram), Some(stat.rank));
        }
    }

    #[test]
    fn similarity_is_symmetric_and_bounded(rows in rows()) {
        let network = project(&BipartiteGraph::from_rows(&rows, 0));
        let inner = network.inner();
        for edge in inner.edge_indices() {
            let (a, b) = inner.edge_endpoints(edge).unwrap();
            prop_assert_ne!(a, b);
            let w = inner[edge];
            prop_assert!((0.0..=1.0).contains(&w));
            prop_assert!(w > 0.0);
            prop_assert_eq!(
                network.weight(&inner[a].label, &inner[b].label),
                network.weight(&inner[b].label, &inner[a].label)
            );
        }
    }

    #[test]
    fn raising_sim_threshold_never_keeps_more_edges(
        rows in rows(),
        low in 0.0f64..1.0,
        delta in 0.0f64..0.5,
    ) {
        let network = project(&BipartiteGraph::from_rows(&rows, 0));
        let thresholds = |sim_threshold| PruneThresholds {
            sim_threshold,
            degree_threshold: 1.0,
            rank_threshold: 100,
            bonus_multiplier: 1.2,
        };

        let mut loose = network.clone();
        GraphPruner::prune_edges(&mut loose, &thresholds(low));
        let mut strict = network;
        GraphPruner::prune_edges(&mut strict, &thresholds(low + delta));

        prop_assert!(strict.edge_count() <= loose.edge_count());
    }

    #[test]
    fn node_pruning_spares_important_names(rows in rows(), sim in 0.0f64..1.0) {
        let mut network = project(&BipartiteGraph::from_rows(&rows, 0));
        let thresholds = PruneThresholds {
            sim_threshold: sim,
            degree_threshold: 2.0,
            rank_threshold: 100,
            bonus_multiplier: 1.2,
        };
        let important: Vec<String> = network
            .inner()
            .node_indices()
            .map(|idx| &network.inner()[idx])
            .filter(|node| node.rank.trunc() <= 100.0)
            .map(|node| node.label.clone())
            .collect();

        GraphPruner::prune(&mut network, &thresholds, None);

        for label in important {
            prop_assert!(network.contains(&label));
        }
        for idx in network.inner().node_indices() {
            let node = &network.inner()[idx];
            prop_assert!(network.degree(idx) >= 2 || node.rank.trunc() <= 100.0);
        }
    }

    #[test]
    fn colors_stay_in_range(rows in rows()) {
        let bipartite = BipartiteGraph::from_rows(&rows, 0);
        let index = BigramIndex::from_names(bipartite.name_labels());
        let assigner = ColorAssigner::new(&index).unwrap();

        for label in bipartite.name_labels() {
            let node = bipartite.name(label).unwrap();
            let community_total = node.frequency * 3;
            let hsl = assigner.assign(label, node.frequency, community_total).unwrap();
            prop_assert!((0.0..360.0).contains(&hsl.hue));
            prop_assert!((0.8..=1.0).contains(&hsl.luminosity));
        }
    }

    #[test]
    fn luminosity_is_bounded(freq in 0u64..1000, extra in 0u64..1000) {
        let l = luminosity(freq, freq + extra);
        prop_assert!((0.8..=1.0).contains(&l));
    }
}
