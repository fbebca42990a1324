use clap::{Parser, Subcommand};
use rssi_lib::{RssiDevice, RssiScanner, ScanConfig};
use std::error::Error;
use std::time::Duration;

/// Command-line scanner for the nRF52 RSSI survey dongle
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List candidate serial ports
    Ports,
    /// Stream RSSI telemetry and print a per-channel summary
    Scan {
        /// Serial port path, e.g. /dev/ttyACM0
        #[arg(short, long)]
        port: String,

        /// Inter-scan delay in milliseconds
        #[arg(long, default_value = "10")]
        delay: u16,

        /// Samples per channel per scan pass
        #[arg(long, default_value = "1")]
        repeat: u16,

        /// Lowest channel to scan
        #[arg(long, default_value = "0")]
        min: u16,

        /// Highest channel to scan
        #[arg(long, default_value = "167")]
        max: u16,

        /// Per-channel history bound
        #[arg(long, default_value = "30")]
        max_scans: usize,

        /// Duration in seconds
        #[arg(short, long, default_value = "10")]
        duration: u64,
    },
    /// Send a raw diagnostic command to the dongle
    Write {
        /// Serial port path, e.g. /dev/ttyACM0
        #[arg(short, long)]
        port: String,

        /// Command text, sent as "<text>\r"
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    match args.command {
        Cmd::Ports => list_ports(),
        Cmd::Scan {
            port,
            delay,
            repeat,
            min,
            max,
            max_scans,
            duration,
        } => {
            let config = ScanConfig {
                delay_ms: delay,
                scan_repeat: repeat,
                channel_min: min,
                channel_max: max,
            }
            .clamped();
            scan(&port, &config, max_scans, duration).await
        }
        Cmd::Write { port, text } => {
            let mut device = RssiDevice::open(&port).await?;
            device.write_raw(&text).await?;
            device.close().await;
            Ok(())
        }
    }
}

fn list_ports() -> Result<(), Box<dyn Error>> {
    let ports = tokio_serial::available_ports()?;
    if ports.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }
    for port in ports {
        println!("{}", port.port_name);
    }
    Ok(())
}

async fn scan(
    path: &str,
    config: &ScanConfig,
    max_scans: usize,
    duration: u64,
) -> Result<(), Box<dyn Error>> {
    println!("Connecting to RSSI dongle on {path}...");
    let (mut scanner, no_data) = RssiScanner::connect(path, config).await?;
    scanner.set_max_scans(max_scans);

    tokio::spawn(async move {
        if no_data.await.is_ok() {
            eprintln!("No data received. The dongle is connected but not sending;");
            eprintln!("it may need its scanner firmware reprogrammed.");
        }
    });

    let deadline = tokio::time::Instant::now() + Duration::from_secs(duration);
    let mut total_records = 0usize;
    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => break,
            result = scanner.poll() => {
                total_records += result?;
            }
        }
    }

    println!("{:>7} {:>9} {:>9}", "Channel", "Current", "Best");
    println!("{}", "=".repeat(27));
    for channel in 0..=u8::MAX {
        let (Some(current), Some(best)) = (
            scanner.store().current_value(channel),
            scanner.store().best_value(channel),
        ) else {
            continue;
        };
        println!(
            "{channel:>7} {:>9} {:>9}",
            format!("-{current} dBm"),
            format!("-{best} dBm")
        );
    }
    println!("{}", "=".repeat(27));
    println!("{total_records} records in {duration}s");

    scanner.disconnect().await;
    Ok(())
}
