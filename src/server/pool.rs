use tracing::trace;

use super::job::{Assignment, Job, Server, ServerId, ServerKind};
use crate::sim::SimTime;

/// 按下标存储的服务台；`ServerId(i)` 总是下标 `i` 处的服务台
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerPool {
    servers: Vec<Server>,
}

impl ServerPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_kind<I, S>(kind: ServerKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pool = Self::new();
        for name in names {
            pool.add(name, kind);
        }
        pool
    }

    pub fn add(&mut self, name: impl Into<String>, kind: ServerKind) -> ServerId {
        let id = ServerId(self.servers.len());
        self.servers.push(Server::new(id, name, kind));
        id
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn get(&self, id: ServerId) -> Option<&Server> {
        self.servers.get(id.0)
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// `next_idle` 最小的服务台；并列时取池中靠前者
    pub fn earliest_idle(&self) -> Option<ServerId> {
        earliest(&self.servers).map(|s| s.id)
    }

    /// 把 `job` 分配给最早空闲的服务台并占用它
    pub fn assign(&mut self, job: &Job) -> Option<Assignment> {
        let id = self.earliest_idle()?;
        let slot = self.servers[id.0].slot(job.arrival, job.service);
        Some(self.book(slot))
    }

    /// 与 [`ServerPool::assign`] 相同，但服务时间在选定服务台之后产生，
    /// 因此可以取决于服务台类型。
    pub fn assign_with<F, E>(&mut self, arrival: SimTime, service: F) -> Result<Option<Assignment>, E>
    where
        F: FnOnce(&Server) -> Result<SimTime, E>,
    {
        let Some(id) = self.earliest_idle() else {
            return Ok(None);
        };
        let server = &self.servers[id.0];
        let slot = server.slot(arrival, service(server)?);
        Ok(Some(self.book(slot)))
    }

    fn book(&mut self, slot: Assignment) -> Assignment {
        let server = &mut self.servers[slot.server.0];
        server.next_idle = slot.end;
        trace!(
            server = %server.name,
            arrival = ?slot.arrival,
            start = ?slot.start,
            end = ?slot.end,
            "作业已分配"
        );
        slot
    }
}

/// 不修改输入的分配：返回选中服务台更新后的副本和时段，`servers` 保持不变。
pub fn assign_pure(servers: &[Server], job: &Job) -> Option<(Server, Assignment)> {
    let chosen = earliest(servers)?;
    let slot = chosen.slot(job.arrival, job.service);
    let updated = Server {
        next_idle: slot.end,
        ..chosen.clone()
    };
    Some((updated, slot))
}

fn earliest(servers: &[Server]) -> Option<&Server> {
    // min_by_key 在多个最小值中取第一个
    servers.iter().min_by_key(|s| s.next_idle)
}
