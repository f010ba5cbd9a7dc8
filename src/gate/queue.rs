use std::collections::VecDeque;

use tracing::trace;

use crate::sim::SimTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truck {
    pub id: u64,
    pub arrival: SimTime,
    pub service: SimTime,
    /// 闸口处理完该卡车后设置
    pub completion: Option<SimTime>,
}

impl Truck {
    pub fn new(id: u64, arrival: SimTime, service: SimTime) -> Self {
        Self {
            id,
            arrival,
            service,
            completion: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Draining,
}

/// 一个 tick 结束时的闸口状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueTick {
    pub time: SimTime,
    pub arrivals: u64,
    pub departures: u64,
    pub queue_length: u64,
}

#[derive(Debug)]
struct Waiting {
    truck: Truck,
    remaining: SimTime,
}

/// 单服务台 FIFO 队列，按固定长度的 tick 推进
#[derive(Debug)]
pub struct GateQueue {
    tick: SimTime,
    now: SimTime,
    q: VecDeque<Waiting>,
    done: Vec<Truck>,
}

impl GateQueue {
    pub fn new(tick: SimTime) -> Self {
        Self {
            tick,
            now: SimTime::ZERO,
            q: VecDeque::new(),
            done: Vec::new(),
        }
    }

    pub fn tick(&self) -> SimTime {
        self.tick
    }

    /// 下一个 tick 的起点
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    pub fn state(&self) -> GateState {
        if self.q.is_empty() {
            GateState::Idle
        } else {
            GateState::Draining
        }
    }

    /// 队首卡车剩余的服务时间
    pub fn head_remaining(&self) -> Option<SimTime> {
        self.q.front().map(|w| w.remaining)
    }

    /// 先把本 tick 的到达追加到队尾，再用一个 tick 的服务预算处理队首，
    /// 能完成几辆就完成几辆。
    pub fn step<I>(&mut self, arrivals: I) -> QueueTick
    where
        I: IntoIterator<Item = Truck>,
    {
        let tick_start = self.now;
        let mut arrived = 0u64;
        for truck in arrivals {
            let remaining = truck.service;
            self.q.push_back(Waiting { truck, remaining });
            arrived += 1;
        }

        let mut budget = self.tick;
        let mut departed = 0u64;
        while budget > SimTime::ZERO {
            let Some(head) = self.q.front_mut() else {
                break;
            };
            if head.remaining <= budget {
                let elapsed = self.tick - budget;
                budget = budget - head.remaining;
                let completion = tick_start + elapsed + head.remaining;
                if let Some(mut w) = self.q.pop_front() {
                    w.truck.completion = Some(completion);
                    trace!(truck = w.truck.id, completion = ?completion, "🚚 卡车通过闸口");
                    self.done.push(w.truck);
                }
                departed += 1;
            } else {
                head.remaining = head.remaining - budget;
                budget = SimTime::ZERO;
            }
        }

        self.now = tick_start + self.tick;
        QueueTick {
            time: self.now,
            arrivals: arrived,
            departures: departed,
            queue_length: self.q.len() as u64,
        }
    }

    /// 自上次调用以来完成的卡车，按完成顺序
    pub fn take_completed(&mut self) -> Vec<Truck> {
        std::mem::take(&mut self.done)
    }
}
