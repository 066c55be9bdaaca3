use hyperpack_core::entities::{Container, Item};
use hyperpack_core::io::{ExtContainer, ExtItem};
use hyperpack_core::problem::{Mode, Settings, SortKey};
use hyperpack_core::search::HypersearchOptions;
use hyperpack_core::{Orientation, Problem};
use test_case::test_case;

fn settings(workers_num: usize) -> Settings {
    Settings {
        max_time_in_seconds: 5,
        workers_num,
        rotation: true,
    }
}

#[test]
fn scenario_trivial_fit_one_container() {
    let containers = vec![Container::new("cont", 10, 10).unwrap()];
    let items = vec![Item::new("a", 5, 5).unwrap()];
    let mut problem = Problem::new_bin_packing(containers, items, settings(1)).unwrap();
    problem.solve(None).unwrap();

    let placement = &problem.solution().container("cont").unwrap()["a"];
    assert_eq!(placement.as_tuple(), [0, 0, 5, 5]);
    assert!((problem.obj_val_per_container()["cont"] - 0.25).abs() < 1e-9);
}

#[test]
fn scenario_rotation_required() {
    let containers = vec![Container::new("cont", 2, 3).unwrap()];
    let items = vec![Item::new("a", 3, 2).unwrap()];
    let mut problem = Problem::new_bin_packing(containers, items, settings(1)).unwrap();
    problem.solve(None).unwrap();

    let placement = &problem.solution().container("cont").unwrap()["a"];
    assert!(placement.rotated);
    assert_eq!(placement.as_tuple(), [0, 0, 2, 3]);
}

#[test]
fn scenario_second_item_lands_on_b_point_projection() {
    use hyperpack_core::geometry::PointCategory;
    use hyperpack_core::Strategy;

    let containers = vec![Container::new("cont", 5, 5).unwrap()];
    let items = vec![Item::new("a", 1, 2).unwrap(), Item::new("b", 1, 3).unwrap()];
    let mut problem = Problem::new_bin_packing(containers, items, settings(1)).unwrap();
    problem
        .set_potential_points_strategy(Strategy::new(vec![PointCategory::B]).unwrap())
        .unwrap();
    problem.solve(None).unwrap();

    let placements = problem.solution().container("cont").unwrap();
    assert_eq!(placements["a"].as_tuple(), [0, 0, 1, 2]);
    assert_eq!(placements["b"].as_tuple(), [1, 0, 1, 3]);
}

#[test]
fn scenario_two_container_overflow_aggregate_objective() {
    let containers = vec![
        Container::new("c1", 2, 3).unwrap(),
        Container::new("c2", 2, 2).unwrap(),
    ];
    let items = vec![Item::new("big", 2, 3).unwrap(), Item::new("small", 1, 1).unwrap()];
    let mut problem = Problem::new_bin_packing(containers, items, settings(1)).unwrap();
    problem.solve(None).unwrap();

    assert_eq!(
        problem.solution().container("c1").unwrap()["big"].as_tuple(),
        [0, 0, 2, 3]
    );
    assert_eq!(
        problem.solution().container("c2").unwrap()["small"].as_tuple(),
        [0, 0, 1, 1]
    );
    let aggregate = problem.calculate_obj_value();
    assert!((aggregate - 1.175).abs() < 1e-9);
}

#[test]
fn scenario_throttle_caps_local_search_on_unplaceable_items() {
    let containers = vec![Container::new("cont", 1, 1).unwrap()];
    let items: Vec<Item> = (0..73)
        .map(|i| Item::new(format!("item-{i}"), 2, 2).unwrap())
        .collect();
    let mut problem = Problem::new_bin_packing(containers, items, settings(1)).unwrap();
    problem.local_search(true).unwrap();
    assert_eq!(problem.solution().total_placed(), 0);
}

#[test]
fn scenario_strip_pack_hypersearch_places_all_items() {
    let items = vec![
        Item::new("a", 2, 3).unwrap(),
        Item::new("b", 2, 3).unwrap(),
        Item::new("c", 4, 3).unwrap(),
    ];
    let mut problem = Problem::new_strip_packing(items, 4, settings(1)).unwrap();
    problem
        .hypersearch(HypersearchOptions {
            orientation: Orientation::None,
            sorting_by: None,
            throttle: true,
            exhaustive: false,
        })
        .unwrap();

    assert_eq!(problem.mode(), Mode::StripPacking);
    assert_eq!(problem.solution().total_placed(), 3);
}

#[test]
fn multi_worker_hypersearch_does_not_worsen_objective_vs_single_worker() {
    let containers = vec![Container::new("cont", 6, 6).unwrap()];
    let items = vec![
        Item::new("a", 3, 2).unwrap(),
        Item::new("b", 2, 3).unwrap(),
        Item::new("c", 4, 4).unwrap(),
        Item::new("d", 1, 1).unwrap(),
    ];

    let mut single = Problem::new_bin_packing(containers.clone(), items.clone(), settings(1)).unwrap();
    single
        .hypersearch(HypersearchOptions {
            orientation: Orientation::None,
            sorting_by: None,
            throttle: true,
            exhaustive: false,
        })
        .unwrap();

    let mut multi = Problem::new_bin_packing(containers, items, settings(2)).unwrap();
    multi
        .hypersearch(HypersearchOptions {
            orientation: Orientation::None,
            sorting_by: None,
            throttle: true,
            exhaustive: false,
        })
        .unwrap();

    assert!(multi.calculate_obj_value() >= single.calculate_obj_value() - 1e-9);
}

#[test]
fn external_representation_round_trips_through_import() {
    use std::collections::BTreeMap;

    let mut containers = BTreeMap::new();
    containers.insert(
        "cont".to_string(),
        ExtContainer {
            width: 4,
            length: 4,
        },
    );
    let mut items = BTreeMap::new();
    items.insert("a".to_string(), ExtItem { width: 2, length: 2 });

    let instance = hyperpack_core::io::ExtBinPackingInstance {
        containers,
        items,
        settings: None,
    };
    let problem = hyperpack_core::io::import_bin_packing(instance).unwrap();
    assert_eq!(problem.containers().len(), 1);
    assert_eq!(problem.items().len(), 1);
    assert_eq!(problem.settings().max_time_in_seconds, 60);
}

#[test_case(SortKey::Area, false, vec!["small", "mid", "big"]; "area ascending")]
#[test_case(SortKey::Area, true, vec!["big", "mid", "small"]; "area descending")]
#[test_case(SortKey::Perimeter, false, vec!["small", "mid", "big"]; "perimeter ascending")]
fn sort_items_orders_sequence_by_key(by: SortKey, reverse: bool, expected: Vec<&str>) {
    let containers = vec![Container::new("cont", 20, 20).unwrap()];
    let items = vec![
        Item::new("mid", 3, 3).unwrap(),
        Item::new("big", 5, 5).unwrap(),
        Item::new("small", 1, 1).unwrap(),
    ];
    let mut problem = Problem::new_bin_packing(containers, items, settings(1)).unwrap();
    problem.sort_items(by, reverse);

    let ordered: Vec<&str> = problem
        .sequence()
        .iter()
        .map(|&idx| problem.items()[idx].id.as_str())
        .collect();
    assert_eq!(ordered, expected);
}
