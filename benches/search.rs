use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;
use tickpath::{
    Cell, DirectSteeringAgent, GameTimer, GridPassability, GridPather, GridSearch, NoopObserver,
    QuickEntity, TargetPolicy,
};

fn open_grid_search(c: &mut Criterion) {
    let grid = GridPassability::new(40, 40, 32);
    let entity = QuickEntity::new(Cell::new(0, 0).centre(32), 100.0);
    let policy = TargetPolicy::new(Cell::new(39, 39).centre(32));
    let search = GridSearch::new(32);

    c.bench_function("open grid 40x40 corner to corner", |b| {
        b.iter(|| {
            search
                .find_path(black_box(&entity), &policy, &grid, &mut NoopObserver)
                .map(|outcome| outcome.nodes.len())
        })
    });
}

fn walled_grid_search(c: &mut Criterion) {
    let mut grid = GridPassability::new(40, 40, 32);
    for y in 0..39 {
        grid.block(Cell::new(20, y));
    }
    let entity = QuickEntity::new(Cell::new(0, 0).centre(32), 100.0);
    let policy = TargetPolicy::new(Cell::new(39, 0).centre(32));
    let search = GridSearch::new(32);

    c.bench_function("wall with a single gap", |b| {
        b.iter(|| {
            search
                .find_path(black_box(&entity), &policy, &grid, &mut NoopObserver)
                .map(|outcome| outcome.nodes.len())
        })
    });
}

fn cached_requests_and_ticks(c: &mut Criterion) {
    c.bench_function("cached request plus full walk", |b| {
        let mut pather = GridPather::new();
        pather
            .set_timer(Some(GameTimer::new()))
            .expect("timer should bind to an idle pather");
        pather
            .set_passability_agent(Some(Box::new(GridPassability::new(20, 20, 32))))
            .expect("passability agent should bind to an idle pather");
        pather
            .set_steering_agent(Some(Box::new(DirectSteeringAgent)))
            .expect("steering agent should bind to an idle pather");

        b.iter(|| {
            let entity = QuickEntity::new(Cell::new(0, 0).centre(32), 6400.0);
            let id = entity.id;
            pather
                .try_move_entity_to(&entity, Cell::new(19, 19).centre(32))
                .expect("the open grid should have a path");
            let mut entities = HashMap::from([(id, entity)]);
            while pather.is_tracking(id) {
                pather.timer_updated(&mut entities, 0.01);
            }
        })
    });
}

criterion_group!(
    benches,
    open_grid_search,
    walled_grid_search,
    cached_requests_and_ticks
);
criterion_main!(benches);
