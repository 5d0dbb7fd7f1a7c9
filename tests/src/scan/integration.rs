#![cfg(test)]
use knockr_common::config::Config;
use knockr_common::error::ScanError;
use knockr_common::network::ports::PortSet;
use knockr_common::network::target::TargetAddr;
use knockr_common::services::OpenPort;
use knockr_core::scanner::{self, ScanReport};
use tokio::net::TcpListener;

fn localhost() -> TargetAddr {
    "127.0.0.1".parse().unwrap()
}

/// Binds and releases a listener, leaving a port nothing is listening on.
async fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

/// Resolving a spec and scanning it finds exactly the ports being listened on.
#[tokio::test]
async fn scan_finds_listening_ports() -> anyhow::Result<()> {
    let open_a = TcpListener::bind("127.0.0.1:0").await?;
    let open_b = TcpListener::bind("127.0.0.1:0").await?;
    let port_a = open_a.local_addr()?.port();
    let port_b = open_b.local_addr()?.port();
    let closed = free_port().await;

    let spec = format!("{port_b},{closed},{port_a}");
    let ports = PortSet::resolve(&spec)?;

    let report: ScanReport = scanner::perform_scan(localhost(), ports, &Config::default(), None).await?;

    let mut expected = vec![port_a, port_b];
    expected.sort_unstable();
    assert_eq!(report.open, expected);
    assert_eq!(report.probed, 3);
    assert_eq!(report.closed + report.errored, 1);

    let records: Vec<OpenPort> = report.open.iter().copied().map(OpenPort::from).collect();
    assert_eq!(records.len(), 2);
    assert!(records.windows(2).all(|w| w[0].port < w[1].port));
    Ok(())
}

/// Nothing listening means an empty result, not an error.
#[tokio::test]
async fn scan_without_listeners_reports_nothing_open() -> anyhow::Result<()> {
    let first = free_port().await;
    let second = free_port().await;
    let ports = PortSet::resolve(&format!("{first},{second}"))?;

    let report = scanner::perform_scan(localhost(), ports, &Config::default(), None).await?;

    assert!(report.open.is_empty());
    assert_eq!(report.probed, 2);
    Ok(())
}

/// A single port goes through the same coordinator and comes back open.
#[tokio::test]
async fn single_port_scan_reports_listener_open() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    let ports = PortSet::resolve(&port.to_string())?;
    assert_eq!(ports.single(), Some(port));

    let report = scanner::perform_scan(localhost(), ports, &Config::default(), None).await?;
    assert_eq!(report.open, vec![port]);
    Ok(())
}

/// Same as above on the conventional alternate HTTP port, when it is free.
#[tokio::test]
async fn single_port_scan_on_8080() -> anyhow::Result<()> {
    let Ok(listener) = TcpListener::bind("127.0.0.1:8080").await else {
        eprintln!("Skipping: port 8080 is already in use.");
        return Ok(());
    };

    let ports = PortSet::resolve("8080")?;
    let report = scanner::perform_scan(localhost(), ports, &Config::default(), None).await?;

    assert_eq!(report.open, vec![8080]);
    drop(listener);
    Ok(())
}

/// A wide range with a small worker pool still probes every port once.
#[tokio::test]
async fn range_scan_with_small_pool_covers_every_port() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let start = port.saturating_sub(25).max(1);
    let end = port.saturating_add(25);

    let ports = PortSet::resolve(&format!("{start}-{end}"))?;
    let total = ports.len();
    let cfg = Config {
        concurrency: 8,
        ..Config::default()
    };

    let report = scanner::perform_scan(localhost(), ports, &cfg, None).await?;

    assert_eq!(report.probed, total);
    assert!(report.open.contains(&port));
    assert!(report.open.windows(2).all(|w| w[0] < w[1]));
    Ok(())
}

#[tokio::test]
async fn scan_over_ipv6_loopback() -> anyhow::Result<()> {
    let Ok(listener) = TcpListener::bind("[::1]:0").await else {
        eprintln!("Skipping: IPv6 loopback is unavailable.");
        return Ok(());
    };
    let port = listener.local_addr()?.port();

    let target: TargetAddr = "::1".parse()?;
    let ports = PortSet::resolve(&port.to_string())?;
    let report = scanner::perform_scan(target, ports, &Config::default(), None).await?;

    assert_eq!(report.open, vec![port]);
    Ok(())
}

#[test]
fn invalid_inputs_fail_before_scanning() {
    assert!(matches!(
        PortSet::resolve("99999"),
        Err(ScanError::InvalidPortSpec { .. })
    ));
    assert!(matches!(
        "300.1.1.1".parse::<TargetAddr>(),
        Err(ScanError::InvalidAddress { .. })
    ));
}
