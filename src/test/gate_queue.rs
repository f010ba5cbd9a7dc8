use rand::SeedableRng;
use rand_pcg::Pcg64;

use super::calendar_2025;
use crate::draw::Draws;
use crate::gate::{GateQueue, GateState, HourlyRollup, QueueTick, Truck};
use crate::sim::SimTime;

fn mins(m: u64) -> SimTime {
    SimTime::from_mins(m)
}

#[test]
fn truck_spanning_two_ticks_leaves_on_the_second() {
    let mut gate = GateQueue::new(SimTime::from_hours_f64(0.25));
    assert_eq!(gate.state(), GateState::Idle);

    let t1 = gate.step([Truck::new(0, SimTime::ZERO, SimTime::from_hours_f64(0.5))]);
    assert_eq!(
        t1,
        QueueTick {
            time: mins(15),
            arrivals: 1,
            departures: 0,
            queue_length: 1
        }
    );
    assert_eq!(gate.state(), GateState::Draining);
    assert_eq!(gate.head_remaining(), Some(mins(15)));

    let t2 = gate.step([]);
    assert_eq!((t2.departures, t2.queue_length), (1, 0));
    assert_eq!(gate.state(), GateState::Idle);

    let done = gate.take_completed();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].completion, Some(mins(30)));
    assert!(gate.take_completed().is_empty());
}

#[test]
fn trucks_complete_in_arrival_order_within_and_across_ticks() {
    let mut gate = GateQueue::new(mins(15));
    let tick = gate.step([
        Truck::new(1, SimTime::ZERO, mins(10)),
        Truck::new(2, SimTime::ZERO, mins(10)),
    ]);
    assert_eq!((tick.departures, tick.queue_length), (1, 1));
    assert_eq!(gate.head_remaining(), Some(mins(5)));

    // late arrival does not touch the carried-over head
    let tick = gate.step([Truck::new(3, mins(15), mins(20))]);
    assert_eq!((tick.arrivals, tick.departures, tick.queue_length), (1, 1, 1));
    assert_eq!(gate.head_remaining(), Some(mins(10)));

    let done = gate.take_completed();
    let order: Vec<_> = done.iter().map(|t| (t.id, t.completion)).collect();
    assert_eq!(order, vec![(1, Some(mins(10))), (2, Some(mins(20)))]);
}

#[test]
fn several_short_trucks_can_clear_in_one_tick() {
    let mut gate = GateQueue::new(mins(15));
    let batch = (0..3).map(|i| Truck::new(i, SimTime::ZERO, mins(5)));
    let tick = gate.step(batch);
    assert_eq!((tick.departures, tick.queue_length), (3, 0));
    let completions: Vec<_> = gate
        .take_completed()
        .into_iter()
        .map(|t| t.completion)
        .collect();
    assert_eq!(completions, vec![Some(mins(5)), Some(mins(10)), Some(mins(15))]);
}

#[test]
fn queue_length_follows_the_balance_equation() {
    let mut d = Draws::new(Pcg64::seed_from_u64(21));
    let mut gate = GateQueue::new(mins(15));
    let mut prev = 0u64;
    let mut next_id = 0;
    for _ in 0..2_000 {
        let n = d.poisson(2.0).expect("poisson");
        let batch: Vec<_> = (0..n)
            .map(|_| {
                next_id += 1;
                let service = d.normal_clamped(11.0, 2.5, 6.0).expect("service");
                Truck::new(next_id, gate.now(), SimTime::from_mins_f64(service))
            })
            .collect();
        let tick = gate.step(batch);
        assert_eq!(tick.queue_length + tick.departures, prev + tick.arrivals);
        prev = tick.queue_length;
    }
}

#[test]
fn hourly_rollup_sums_ticks_and_reports_queue_at_the_hour() {
    let mut rollup = HourlyRollup::new(calendar_2025());
    let ticks = [(15, 2, 1, 1), (30, 1, 0, 2), (45, 0, 1, 1), (60, 3, 2, 2), (75, 1, 1, 2)];
    let mut closed = Vec::new();
    for (m, a, dep, q) in ticks {
        let tick = QueueTick {
            time: mins(m),
            arrivals: a,
            departures: dep,
            queue_length: q,
        };
        if let Some(row) = rollup.push(&tick) {
            closed.push(row);
        }
    }
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].time, mins(60));
    assert_eq!((closed[0].arrivals, closed[0].num_processed), (6, 4));
    assert_eq!(closed[0].queue_length, 2);
    assert_eq!(rollup.rows(), closed.as_slice());
}
