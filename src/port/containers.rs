//! 集装箱作业：每次靠港产生 Poisson 个作业，船舶离泊后逐个交给最空闲的起重机。

use rand::Rng;
use tracing::info;

use super::vessels::VesselCall;
use crate::draw::Draws;
use crate::error::{DrawError, PortSimError};
use crate::server::{ServerKind, ServerPool};
use crate::sim::{ContainerConfig, FleetConfig, PortConfig, SimTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerMove {
    pub call_id: u64,
    /// 船舶离泊时间
    pub container_arrival: SimTime,
    pub teu_handled: u64,
    pub resource: String,
    pub kind: ServerKind,
    pub move_start: SimTime,
    pub move_end: SimTime,
}

/// 先岸桥后场桥，按名单顺序
pub fn crane_pool(fleet: &FleetConfig) -> ServerPool {
    let mut pool = ServerPool::new();
    for name in fleet.quay_names() {
        pool.add(name, ServerKind::QuayCrane);
    }
    for name in fleet.yard_names() {
        pool.add(name, ServerKind::YardCrane);
    }
    pool
}

pub fn move_duration<R: Rng>(
    cfg: &ContainerConfig,
    draws: &mut Draws<R>,
    kind: ServerKind,
) -> Result<SimTime, DrawError> {
    let params = match kind {
        ServerKind::YardCrane => &cfg.yard_move_secs,
        ServerKind::QuayCrane | ServerKind::Berth => &cfg.quay_move_secs,
    };
    Ok(SimTime::from_secs_f64(draws.clamped(params)?))
}

/// 单次靠港的 TEU 量：至少 1，至多单船容量
pub fn call_teu<R: Rng>(cfg: &ContainerConfig, draws: &mut Draws<R>) -> Result<u64, DrawError> {
    let teu = draws.clamped(&cfg.teu_per_call)?.round().max(1.0) as u64;
    Ok(teu.min(cfg.call_capacity_teu))
}

#[tracing::instrument(skip_all, fields(calls = calls.len(), moves_per_call = cfg.containers.moves_per_call))]
pub fn simulate_container_moves<R: Rng>(
    cfg: &PortConfig,
    draws: &mut Draws<R>,
    calls: &[VesselCall],
) -> Result<Vec<ContainerMove>, PortSimError> {
    // 作业须按到达顺序进入服务池
    let mut order: Vec<&VesselCall> = calls.iter().collect();
    order.sort_by_key(|c| (c.end, c.call_id));

    let mut pool = crane_pool(&cfg.fleet);
    let mut moves = Vec::new();
    for call in order {
        let count = draws.poisson(cfg.containers.moves_per_call)?;
        let teu_handled = call_teu(&cfg.containers, draws)?;
        for _ in 0..count {
            let slot = pool
                .assign_with(call.end, |crane| move_duration(&cfg.containers, draws, crane.kind))?
                .ok_or_else(|| PortSimError::InvalidConfig("no cranes configured".to_string()))?;
            let (resource, kind) = pool
                .get(slot.server)
                .map(|s| (s.name.clone(), s.kind))
                .unwrap_or((String::new(), ServerKind::QuayCrane));
            moves.push(ContainerMove {
                call_id: call.call_id,
                container_arrival: call.end,
                teu_handled,
                resource,
                kind,
                move_start: slot.start,
                move_end: slot.end,
            });
        }
    }

    info!(moves = moves.len(), cranes = pool.len(), "📦 集装箱作业仿真完成");
    Ok(moves)
}
