use async_trait::async_trait;
use sysinfo::{CpuExt, DiskExt, System, SystemExt};
use tracing::warn;

use super::types::HostSnapshot;

/// Source of the post-run host resource snapshot.
#[async_trait]
pub trait HostProbe: Send + Sync {
    async fn snapshot(&self) -> HostSnapshot;
}

/// Samples CPU, memory and disk usage of the local machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoProbe;

#[async_trait]
impl HostProbe for SysinfoProbe {
    async fn snapshot(&self) -> HostSnapshot {
        match tokio::task::spawn_blocking(sample_host).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("Host snapshot failed: {}", err);
                HostSnapshot::default()
            }
        }
    }
}

/// Always reports the same snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticHostProbe(pub HostSnapshot);

#[async_trait]
impl HostProbe for StaticHostProbe {
    async fn snapshot(&self) -> HostSnapshot {
        self.0
    }
}

fn sample_host() -> HostSnapshot {
    let mut system = System::new();
    system.refresh_cpu();
    std::thread::sleep(System::MINIMUM_CPU_UPDATE_INTERVAL);
    system.refresh_cpu();
    system.refresh_memory();
    system.refresh_disks_list();

    let cpu_percent = f64::from(system.global_cpu_info().cpu_usage());
    let memory_percent = percent(system.used_memory(), system.total_memory());
    let root = system
        .disks()
        .iter()
        .find(|disk| disk.mount_point() == std::path::Path::new("/"))
        .or_else(|| system.disks().first());
    let disk_percent = root.map_or(0.0, |disk| {
        let used = disk.total_space().saturating_sub(disk.available_space());
        percent(used, disk.total_space())
    });

    HostSnapshot {
        cpu_percent,
        memory_percent,
        disk_percent,
    }
}

fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    }
}
