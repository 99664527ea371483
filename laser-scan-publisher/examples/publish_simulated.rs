use clap::Parser;
use crossbeam_channel::bounded;
use laser_scan_data::{DeviceConfiguration, RawScan, Timestamp};
use laser_scan_publisher::{run_adapter, AdapterConfig, LaserScanError, LocalClock, SystemClock};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Publishes wall-clock corrected scans of a simulated laser scanner.")]
struct Args {
    #[arg(long, default_value = "laser")]
    laser_topic: String,
    #[arg(long, default_value = "laser")]
    laser_frame: String,
    #[arg(long, default_value = "/wall_clock")]
    wall_clock_topic: String,
    /// Pretend the wall clock runs this many milliseconds ahead of ours.
    #[arg(long, default_value_t = 250)]
    wall_clock_lead_ms: i64,
    #[arg(long, default_value_t = 20)]
    n_scans: u64,
}

fn simulated_configuration() -> DeviceConfiguration {
    DeviceConfiguration {
        model: "URG-04LX".to_string(),
        min_range_mm: 20,
        max_range_mm: 4000,
        total_steps: 769,
        first_step: 44,
        last_step: 725,
        front_step: 384,
        standard_motor_speed: 600,
        angle_increment: 0.006135923,
        min_angle: -2.0862138,
        max_angle: 2.0923497,
        time_increment: 9.765625e-5,
        scan_time: 0.1,
    }
}

// Distance to a circular wall 2 m away, with a ripple so scans differ.
fn simulated_scan(n_steps: usize, sweep: u64) -> RawScan {
    let ranges = (0..n_steps)
        .map(|step| 2000 + ((step as u64 + sweep * 7) % 50) as u32)
        .collect();
    RawScan {
        timestamp_ms: SystemClock.now().as_millis() as u64,
        ranges,
    }
}

fn main() -> Result<(), LaserScanError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = AdapterConfig::default()
        .with_laser_topic(args.laser_topic)
        .with_laser_frame(args.laser_frame)
        .with_wall_clock_topic(args.wall_clock_topic);
    let configuration = simulated_configuration();
    let n_steps = configuration.total_steps;
    let scan_period = Duration::from_secs_f32(configuration.scan_time);

    let (scan_tx, scan_rx) = bounded::<RawScan>(10);
    let (adapter, record_rx, wall_clock_tx) = run_adapter(scan_rx, configuration, config, 10)?;

    let n_scans = args.n_scans;
    let lead_ms = args.wall_clock_lead_ms;
    let producer = std::thread::spawn(move || {
        for sweep in 0..n_scans {
            if sweep % 5 == 0 {
                let wall =
                    Timestamp::from_nanos(SystemClock.now().as_nanos() + lead_ms * 1_000_000);
                if wall_clock_tx.send(wall).is_err() {
                    break;
                }
            }
            if scan_tx.send(simulated_scan(n_steps, sweep)).is_err() {
                break;
            }
            std::thread::sleep(scan_period);
        }
    });

    for _ in 0..n_scans {
        match record_rx.recv_timeout(scan_period * 10) {
            Ok(record) => println!(
                "{} {}.{:09} {} ranges, first {:.3} m",
                record.frame_id,
                record.timestamp.secs(),
                record.timestamp.subsec_nanos(),
                record.ranges.len(),
                record.ranges.first().copied().unwrap_or(f32::NAN),
            ),
            Err(_) => break,
        }
    }

    if producer.join().is_err() {
        eprintln!("Scan producer panicked");
    }
    println!(
        "Published {} records, {} failed",
        adapter.published_count(),
        adapter.failed_publish_count()
    );
    drop(adapter);
    Ok(())
}
