//! kafka-fetch CLI
//!
//! Fetches one batch of messages from a broker and prints them.

use clap::Parser;
use kafka_fetch::protocol::DEFAULT_MAX_SIZE;
use kafka_fetch::{Config, Consumer};
use tracing_subscriber::{fmt, EnvFilter};

/// kafka-fetch CLI
#[derive(Parser, Debug)]
#[command(name = "kafka-fetch")]
#[command(about = "Fetch messages from a topic partition")]
#[command(version)]
struct Args {
    /// Broker address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:9092")]
    server: String,

    /// Topic to fetch from
    #[arg(short, long)]
    topic: String,

    /// Partition within the topic
    #[arg(short, long, default_value = "0")]
    partition: i32,

    /// Byte offset into the partition log
    #[arg(short, long, default_value = "0")]
    offset: i64,

    /// Upper bound on response payload bytes
    #[arg(short, long, default_value_t = DEFAULT_MAX_SIZE)]
    max_size: i32,

    /// Read/write timeout in milliseconds (0 disables)
    #[arg(long, default_value = "5000")]
    timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kafka_fetch=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("kafka-fetch v{}", kafka_fetch::VERSION);
    tracing::info!(
        "Fetching {}:{} at offset {} from {}",
        args.topic,
        args.partition,
        args.offset,
        args.server
    );

    let config = Config::builder()
        .server_addr(&args.server)
        .max_size(args.max_size)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build();

    let consumer = Consumer::new(config);
    let response = match consumer.consume(&args.topic, args.partition, args.offset) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Fetch failed: {}", e);
            std::process::exit(1);
        }
    };

    let mut offset = args.offset;
    for message in response.iter() {
        let magic = message
            .header()
            .map(|h| h.magic.to_string())
            .unwrap_or_else(|| "?".to_string());
        let payload = message.payload().unwrap_or_else(|| message.body.clone());

        println!(
            "offset={} size={} magic={} valid={} {}",
            offset,
            message.length,
            magic,
            message.is_valid(),
            String::from_utf8_lossy(&payload)
        );
        offset += message.wire_len() as i64;
    }

    println!(
        "{} message(s), next offset {}",
        response.len(),
        response.next_offset(args.offset)
    );
}
