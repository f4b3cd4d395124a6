use depot_core::{
    CellCoord, Charge, Command, CostProfile, Direction, Event, Mass, RouteError, RoverId,
};
use depot_system_routing::Router;
use depot_world::{self as world, query, World};

#[test]
fn routes_around_stored_pallets() {
    let (mut world, mut events) = floor(7, 5);
    let rover = spawn_rover(
        &mut world,
        &mut events,
        CellCoord::new(0, 0),
        Direction::South,
        100_000,
    );
    // A wall of pallets across column three with a single gap on the
    // bottom row.
    for row in 0..4 {
        place_pallet(&mut world, &mut events, CellCoord::new(3, row));
    }

    let router = Router::default();
    let snapshot = query::rover_snapshot(&world, rover).expect("snapshot");
    let legal = query::legality_for(&world, rover);

    let route = router
        .route(&snapshot, CellCoord::new(6, 0), &legal)
        .expect("gap exists");

    // Four steps down, six across, four back up, turning twice.
    assert_eq!(route.cost(), Charge::new(7_200));
    assert_eq!(route.step_count(), 14);
    assert!(route.cells().contains(&CellCoord::new(3, 4)));
    assert!(route.cells().iter().all(|&cell| legal(cell)));
}

#[test]
fn pallet_on_the_target_is_an_invalid_target() {
    let (mut world, mut events) = floor(10, 10);
    let rover = spawn_rover(
        &mut world,
        &mut events,
        CellCoord::new(0, 0),
        Direction::East,
        100_000,
    );
    let target = CellCoord::new(4, 4);
    place_pallet(&mut world, &mut events, target);

    let router = Router::default();
    let snapshot = query::rover_snapshot(&world, rover).expect("snapshot");

    assert_eq!(
        router.minimal_cost(&snapshot, target, query::legality_for(&world, rover)),
        Err(RouteError::InvalidTarget)
    );
}

#[test]
fn another_rover_blocks_a_narrow_lane() {
    let (mut world, mut events) = floor(5, 1);
    let rover = spawn_rover(
        &mut world,
        &mut events,
        CellCoord::new(0, 0),
        Direction::East,
        100_000,
    );
    let _parked = spawn_rover(
        &mut world,
        &mut events,
        CellCoord::new(2, 0),
        Direction::North,
        0,
    );

    let router = Router::default();
    let snapshot = query::rover_snapshot(&world, rover).expect("snapshot");

    assert_eq!(
        router.route(&snapshot, CellCoord::new(4, 0), query::legality_for(&world, rover)),
        Err(RouteError::Unreachable)
    );
}

#[test]
fn beacons_never_block_a_route() {
    let (mut world, mut events) = floor(5, 1);
    let rover = spawn_rover(
        &mut world,
        &mut events,
        CellCoord::new(0, 0),
        Direction::East,
        100_000,
    );
    world::apply(
        &mut world,
        Command::DropBeacon {
            cell: CellCoord::new(2, 0),
        },
        &mut events,
    );

    let router = Router::default();
    let snapshot = query::rover_snapshot(&world, rover).expect("snapshot");

    let route = router
        .route(&snapshot, CellCoord::new(4, 0), query::legality_for(&world, rover))
        .expect("beacons are not solid");
    assert_eq!(route.cost(), Charge::new(2_000));
}

#[test]
fn a_sealed_chamber_reports_unreachable() {
    let (mut world, mut events) = floor(5, 5);
    let rover = spawn_rover(
        &mut world,
        &mut events,
        CellCoord::new(0, 0),
        Direction::East,
        100_000,
    );
    place_pallet(&mut world, &mut events, CellCoord::new(1, 0));
    place_pallet(&mut world, &mut events, CellCoord::new(0, 1));
    place_pallet(&mut world, &mut events, CellCoord::new(1, 1));

    let router = Router::default();
    let snapshot = query::rover_snapshot(&world, rover).expect("snapshot");

    assert_eq!(
        router.minimal_cost(&snapshot, CellCoord::new(4, 4), query::legality_for(&world, rover)),
        Err(RouteError::Unreachable)
    );
}

#[test]
fn executing_a_route_debits_exactly_the_planned_cost() {
    let (mut world, mut events) = floor(10, 10);
    let rover = spawn_rover(
        &mut world,
        &mut events,
        CellCoord::new(1, 1),
        Direction::North,
        10_000,
    );

    let route = {
        let snapshot = query::rover_snapshot(&world, rover).expect("snapshot");
        Router::default()
            .route(&snapshot, CellCoord::new(4, 5), query::legality_for(&world, rover))
            .expect("clear board")
    };
    assert_eq!(route.cost(), Charge::new(3_700));

    for pair in route.cells().windows(2) {
        let direction = Direction::between(pair[0], pair[1]).expect("adjacent cells");
        world::apply(
            &mut world,
            Command::StepRover { rover, direction },
            &mut events,
        );
        match events.last() {
            Some(Event::RoverStepped { .. }) => {}
            other => panic!("step was rejected mid-route: {other:?}"),
        }
    }

    let snapshot = query::rover_snapshot(&world, rover).expect("snapshot");
    assert_eq!(snapshot.cell, CellCoord::new(4, 5));
    assert_eq!(snapshot.charge, Charge::new(6_300));
}

fn floor(columns: u32, rows: u32) -> (World, Vec<Event>) {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureGrid { columns, rows },
        &mut events,
    );
    (world, events)
}

fn spawn_rover(
    world: &mut World,
    events: &mut Vec<Event>,
    cell: CellCoord,
    facing: Direction,
    charge: u64,
) -> RoverId {
    world::apply(
        world,
        Command::SpawnRover {
            cell,
            facing,
            capacity: Charge::new(1_000_000),
            charge: Charge::new(charge),
            costs: CostProfile::new(
                Charge::new(100),
                Charge::new(500),
                Charge::new(50),
                Mass::new(10),
            ),
        },
        events,
    );
    match events.last() {
        Some(Event::RoverSpawned { rover, .. }) => *rover,
        other => panic!("expected spawn event, got {other:?}"),
    }
}

fn place_pallet(world: &mut World, events: &mut Vec<Event>, cell: CellCoord) {
    world::apply(world, Command::PlacePallet { cell }, events);
    assert_eq!(events.last(), Some(&Event::PalletPlaced { cell }));
}
