//! End-to-end checks of generators and searches through the public API

use mazegraph::grid::analysis::{has_cycle, is_connected, is_spanning_tree};
use mazegraph::search::BreadthFirstSearch;
use mazegraph::{
    AlgorithmError, GeneratorKind, GraphSearch, GridError, GridGraph, Heuristic, Interrupt, Label, MazeConfig,
    ObservableGridGraph, RunOptions, SearchKind, Session, Topology, generators::prepare_grid,
};
use proptest::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn heuristic_for(topology: Topology) -> Heuristic {
    match topology {
        Topology::FourNeighbors => Heuristic::Manhattan,
        Topology::EightNeighbors => Heuristic::Euclidean,
    }
}

fn maze(kind: GeneratorKind, cols: usize, rows: usize, topology: Topology, seed: u64) -> ObservableGridGraph {
    let grid = GridGraph::empty(cols, rows, topology, Label::Unvisited).unwrap();
    let mut grid = ObservableGridGraph::new(grid);
    prepare_grid(&mut grid, kind.info().requirement);
    kind.create(&RunOptions::seeded(seed)).create_maze(&mut grid, 0, 0).unwrap();
    grid
}

#[test]
fn test_iterative_dfs_ten_by_ten() {
    init_logger();
    let grid = maze(GeneratorKind::IterativeDfs, 10, 10, Topology::FourNeighbors, 2024);

    assert_eq!(grid.num_edges(), 99);
    assert!(is_connected(&grid));
    assert!(!has_cycle(&grid));

    let target = grid.cell(9, 9);
    let path = BreadthFirstSearch::new(Interrupt::new())
        .find_path(&grid, grid.cell(0, 0), target)
        .unwrap();
    assert!(!path.is_empty());
    assert!(path.is_valid_in(&grid));
}

#[test]
fn test_edge_between_distant_cells_fails() {
    let mut grid = GridGraph::empty(10, 10, Topology::FourNeighbors, Label::Unvisited).unwrap();
    let (u, v) = (grid.cell(0, 0), grid.cell(5, 5));
    assert_eq!(grid.add_edge(u, v), Err(GridError::NotAdjacent(u, v)));
    assert!(grid.is_empty());
}

#[test]
fn test_coordinates_round_trip() {
    for topology in [Topology::FourNeighbors, Topology::EightNeighbors] {
        for (cols, rows) in [(1, 1), (1, 9), (7, 1), (13, 4)] {
            let grid = GridGraph::empty(cols, rows, topology, Label::Unvisited).unwrap();
            for id in 0..grid.num_vertices() {
                assert_eq!(grid.cell(grid.col(id), grid.row(id)), id);
            }
            for row in 0..rows {
                for col in 0..cols {
                    let id = grid.cell(col, row);
                    assert_eq!((grid.col(id), grid.row(id)), (col, row));
                }
            }
        }
    }
}

#[test]
fn test_optimal_searches_beat_bfs_on_open_grid() {
    init_logger();
    let grid = GridGraph::full(9, 7, Topology::EightNeighbors, Label::Unvisited).unwrap();
    let options = RunOptions::default();
    let (source, target) = (grid.cell(0, 6), grid.cell(8, 1));

    let bfs = SearchKind::Bfs.create(&options, Heuristic::Euclidean).find_path(&grid, source, target).unwrap();
    for kind in [SearchKind::Dijkstra, SearchKind::AStar, SearchKind::BidiDijkstra] {
        let path = kind.create(&options, Heuristic::Euclidean).find_path(&grid, source, target).unwrap();
        assert!(path.cost(&grid).value() <= bfs.cost(&grid).value() + 1e-9, "{kind}");
        assert!(path.is_valid_in(&grid), "{kind}");
    }
}

#[test]
fn test_session_from_toml() {
    init_logger();
    let config = MazeConfig::from_toml_str(
        r#"
        cols = 15
        rows = 9
        generator = "wilson-spiral"
        search = "bidi-bfs"
        seed = 3
        "#,
    )
    .unwrap();

    let mut session = Session::new(config).unwrap();
    session.generate().unwrap();
    assert!(is_spanning_tree(session.grid()));

    let path = session.solve_corners().unwrap();
    assert_eq!(path.source(), Some(0));
    assert_eq!(path.target(), Some(15 * 9 - 1));
    assert!(path.is_valid_in(session.grid()));
}

#[test]
fn test_interrupted_search_is_not_a_failure() {
    let grid = maze(GeneratorKind::Kruskal, 20, 20, Topology::FourNeighbors, 1);
    let options = RunOptions::default();
    options.interrupt.interrupt();

    for kind in SearchKind::ALL {
        let result = kind.create(&options, Heuristic::Manhattan).find_path(&grid, 0, 399);
        let error = result.unwrap_err();
        assert!(error.is_interrupted(), "{kind}");
        assert_eq!(error, AlgorithmError::Interrupted);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_searches_on_generated_mazes(
        generator in 0..GeneratorKind::ALL.len(),
        search in 0..SearchKind::ALL.len(),
        cols in 1usize..10,
        rows in 1usize..10,
        seed in any::<u64>(),
        endpoints in any::<(usize, usize)>(),
        diagonal in any::<bool>(),
    ) {
        let generator = GeneratorKind::ALL[generator];
        let search = SearchKind::ALL[search];
        let topology = if diagonal && generator.supports(Topology::EightNeighbors) {
            Topology::EightNeighbors
        } else {
            Topology::FourNeighbors
        };
        let grid = maze(generator, cols, rows, topology, seed);
        prop_assert!(is_spanning_tree(&grid));

        let n = grid.num_vertices();
        let (source, target) = (endpoints.0 % n, endpoints.1 % n);
        let options = RunOptions::default();
        let heuristic = heuristic_for(topology);

        let path = search.create(&options, heuristic).find_path(&grid, source, target).unwrap();
        prop_assert!(path.is_valid_in(&grid));
        prop_assert_eq!(path.source(), Some(source));
        prop_assert_eq!(path.target(), Some(target));

        let again = search.create(&options, heuristic).find_path(&grid, source, target).unwrap();
        prop_assert_eq!(again.len(), path.len());

        let bfs = SearchKind::Bfs.create(&options, heuristic).find_path(&grid, source, target).unwrap();
        if search.info().optimal {
            prop_assert!(path.cost(&grid).value() <= bfs.cost(&grid).value() + 1e-9);
        }
    }

    #[test]
    fn prop_bidi_bfs_matches_bfs(
        cols in 1usize..12,
        rows in 1usize..12,
        walls in proptest::collection::vec(any::<usize>(), 0..40),
        endpoints in any::<(usize, usize)>(),
        diagonal in any::<bool>(),
    ) {
        let topology = if diagonal { Topology::EightNeighbors } else { Topology::FourNeighbors };
        let mut grid = GridGraph::full(cols, rows, topology, Label::Unvisited).unwrap();
        let edges: Vec<(usize, usize)> = grid.edges().collect();
        if !edges.is_empty() {
            for wall in walls {
                let (u, v) = edges[wall % edges.len()];
                grid.remove_edge(u, v).unwrap();
            }
        }

        let n = grid.num_vertices();
        let (source, target) = (endpoints.0 % n, endpoints.1 % n);
        let options = RunOptions::default();

        let bfs = SearchKind::Bfs.create(&options, Heuristic::Euclidean).find_path(&grid, source, target).unwrap();
        let bidi = SearchKind::BidiBfs.create(&options, Heuristic::Euclidean).find_path(&grid, source, target).unwrap();
        prop_assert_eq!(bidi.len(), bfs.len());
        prop_assert_eq!(bidi.is_empty(), bfs.is_empty());
        if !bidi.is_empty() {
            prop_assert!(bidi.is_valid_in(&grid));
        }
    }
}
