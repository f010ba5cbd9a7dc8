use crate::sim::SimTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServerId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerKind {
    Berth,
    QuayCrane,
    YardCrane,
}

/// 服务台记录。`next_idle` 是其最早可开始新作业的时间，等于最后一个作业的结束时间。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub id: ServerId,
    pub name: String,
    pub kind: ServerKind,
    pub next_idle: SimTime,
}

impl Server {
    pub fn new(id: ServerId, name: impl Into<String>, kind: ServerKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            next_idle: SimTime::ZERO,
        }
    }

    /// 在 `arrival` 到达的作业的时段：服务台空闲则到达即开始，否则在其空闲时开始。
    pub fn slot(&self, arrival: SimTime, service: SimTime) -> Assignment {
        let start = arrival.max(self.next_idle);
        Assignment {
            server: self.id,
            arrival,
            start,
            end: start + service,
        }
    }
}

/// 等待服务的作业
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    pub arrival: SimTime,
    pub service: SimTime,
}

impl Job {
    pub fn new(arrival: SimTime, service: SimTime) -> Self {
        Self { arrival, service }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub server: ServerId,
    pub arrival: SimTime,
    pub start: SimTime,
    pub end: SimTime,
}

impl Assignment {
    /// 开始服务前的排队时间
    pub fn wait(&self) -> SimTime {
        self.start - self.arrival
    }

    pub fn service(&self) -> SimTime {
        self.end - self.start
    }

    pub fn is_queued(&self) -> bool {
        self.start > self.arrival
    }
}
