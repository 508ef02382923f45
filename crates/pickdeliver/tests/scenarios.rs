mod setup;

use pickdeliver::{
    problem::{node::NodeType, time_window::TimeWindow},
    solver::{pick_deliver::PickDeliver, solver_params::SolverParams},
};

#[test]
fn test_capacity_conflict_on_single_vehicle() {
    setup::init_tracing();

    // Any single route carrying both orders either holds 12 units at once or
    // misses a window, so one of them has to stay out
    let orders = vec![
        setup::windowed_order_row(
            1,
            6.0,
            ([1.0, 0.0], TimeWindow::new(0.0, 10.0)),
            ([2.0, 0.0], TimeWindow::new(100.0, 110.0)),
        ),
        setup::windowed_order_row(
            2,
            6.0,
            ([1.0, 1.0], TimeWindow::new(20.0, 30.0)),
            ([2.0, 1.0], TimeWindow::new(50.0, 60.0)),
        ),
    ];

    let result = PickDeliver::new(
        &orders,
        &[setup::vehicle_row(1, 1, 10.0)],
        SolverParams::default(),
    )
    .unwrap()
    .solve();

    let cost = result.solution.cost();
    assert!(cost.is_feasible());
    assert_eq!(cost.vehicles_used, 1);
    assert_eq!(result.unassigned_orders, vec![2]);
    assert!(
        result
            .diagnostics
            .error_text()
            .contains("Order 2 could not be inserted")
    );

    let served = result
        .rows
        .iter()
        .filter_map(|row| row.order_id)
        .collect::<Vec<_>>();
    assert_eq!(served, vec![1, 1]);
}

#[test]
fn test_consolidation_onto_one_vehicle() {
    setup::init_tracing();

    let orders = vec![
        setup::order_row(1, 2.0, [1.0, 0.0], [2.0, 0.0]),
        setup::order_row(2, 2.0, [2.0, 1.0], [3.0, 1.0]),
        setup::order_row(3, 2.0, [3.0, 2.0], [4.0, 2.0]),
    ];

    let result = PickDeliver::new(
        &orders,
        &[setup::vehicle_row(1, 3, 10.0)],
        SolverParams::default(),
    )
    .unwrap()
    .solve();

    let cost = result.solution.cost();
    assert!(cost.is_feasible());
    assert_eq!(cost.vehicles_used, 1);
    assert!(result.unassigned_orders.is_empty());
    assert!(result.rows.iter().all(|row| row.vehicle_seq == 1));
    assert_eq!(result.rows.first().map(|row| row.node_type), Some(NodeType::Start));
    assert_eq!(result.rows.last().map(|row| row.node_type), Some(NodeType::End));
}

#[test]
fn test_consolidation_across_vehicle_types() {
    setup::init_tracing();

    let orders = vec![
        setup::order_row(1, 4.0, [1.0, 0.0], [2.0, 0.0]),
        setup::order_row(2, 4.0, [3.0, 0.0], [4.0, 0.0]),
    ];

    let result = PickDeliver::new(
        &orders,
        &[setup::vehicle_row(1, 1, 10.0), setup::vehicle_row(2, 1, 10.0)],
        SolverParams::default(),
    )
    .unwrap()
    .solve();

    assert_eq!(result.solution.fleet().len(), 2);
    assert!(result.unassigned_orders.is_empty());

    let cost = result.solution.cost();
    assert!(cost.is_feasible());
    assert_eq!(cost.vehicles_used, 1);
    assert_eq!(result.statistics.final_cost().vehicles_used, 1);
    assert!(result.rows.iter().all(|row| row.vehicle_seq == 1));
}

#[test]
fn test_demand_exceeding_every_capacity() {
    setup::init_tracing();

    let orders = vec![
        setup::order_row(1, 3.0, [1.0, 0.0], [2.0, 0.0]),
        setup::order_row(2, 20.0, [1.0, 1.0], [2.0, 1.0]),
        setup::order_row(3, 3.0, [2.0, 2.0], [3.0, 3.0]),
    ];

    let result = PickDeliver::new(
        &orders,
        &[setup::vehicle_row(1, 2, 10.0), setup::vehicle_row(2, 1, 15.0)],
        SolverParams::default(),
    )
    .unwrap()
    .solve();

    assert_eq!(result.unassigned_orders, vec![2]);
    assert!(
        result
            .diagnostics
            .error_text()
            .contains("Order 2 can not be served by any vehicle")
    );

    let cost = result.solution.cost();
    assert!(cost.is_feasible());
    assert_eq!(cost.vehicles_used, 1);
    assert!(result.rows.iter().all(|row| row.order_id != Some(2)));
}

#[test]
fn test_order_goes_to_the_only_type_that_can_serve_it() {
    setup::init_tracing();

    // Only the second type reaches the delivery in time
    let orders = vec![setup::windowed_order_row(
        1,
        1.0,
        ([5.0, 0.0], TimeWindow::default()),
        ([10.0, 0.0], TimeWindow::new(0.0, 6.0)),
    )];

    let mut fast = setup::vehicle_row(2, 1, 10.0);
    fast.speed = 2.0;

    let result = PickDeliver::new(
        &orders,
        &[setup::vehicle_row(1, 1, 10.0), fast],
        SolverParams::default(),
    )
    .unwrap()
    .solve();

    assert!(result.unassigned_orders.is_empty());
    assert!(result.rows.iter().all(|row| row.vehicle_id == 2));
    assert_eq!(result.rows[2].arrival_time, 5.0);
}
