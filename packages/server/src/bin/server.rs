//! Shared slideshow server.
//!
//! Scans a picture directory and serves synchronized slideshow rooms over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin utsushie-server -- --pictures ./photos
//! cargo run --bin utsushie-server -- --pictures ./photos --host 0.0.0.0 --port 3000
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use utsushie_server::{
    config::{
        DEFAULT_COUNTDOWN_DURATION, DEFAULT_IDLE_EXPIRY_THRESHOLD, DEFAULT_MEMORY_SIZE,
        SlideshowConfig,
    },
    domain::LaunchId,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryPictureStore, InMemoryRoomRepository, scan_pictures},
    },
    ui::Server,
    usecase::{
        GetRoomsUseCase, GotoImageUseCase, JoinSlideshowUseCase, Navigator, PageFetcher,
        StepImageUseCase, TickRoomsUseCase,
    },
};
use utsushie_shared::{logger::setup_logger, random::ThreadRandom, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "utsushie-server")]
#[command(about = "Shared slideshow server with synchronized picture rooms", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Directory scanned for pictures
    #[arg(long, default_value = ".")]
    pictures: PathBuf,

    /// Pictures kept in memory per room (also the page size)
    #[arg(long, default_value_t = DEFAULT_MEMORY_SIZE)]
    memory_size: usize,

    /// Seconds between two automatic advances
    #[arg(long, default_value_t = DEFAULT_COUNTDOWN_DURATION)]
    countdown: i64,

    /// Evict a room once its countdown falls below this value
    #[arg(long, default_value_t = DEFAULT_IDLE_EXPIRY_THRESHOLD, allow_negative_numbers = true)]
    idle_expiry: i64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let config = match (SlideshowConfig {
        memory_size: args.memory_size,
        countdown_duration: args.countdown,
        idle_expiry_threshold: args.idle_expiry,
    })
    .validate()
    {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Scan the picture directory and create the repositories
    let root = args.pictures.clone();
    let pictures = match tokio::task::spawn_blocking(move || scan_pictures(&root)).await {
        Ok(pictures) => pictures,
        Err(e) => {
            tracing::error!("Failed to scan '{}': {}", args.pictures.display(), e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Found {} pictures under '{}'",
        pictures.len(),
        args.pictures.display()
    );
    let picture_store = Arc::new(InMemoryPictureStore::with_pictures(pictures));
    let room_repository = Arc::new(InMemoryRoomRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let fetcher = PageFetcher::new(
        picture_store.clone(),
        Arc::new(ThreadRandom),
        config.memory_size,
    );
    let navigator = Arc::new(Navigator::new(
        room_repository.clone(),
        fetcher,
        Arc::new(SystemClock),
        config.countdown_duration,
    ));
    let join_slideshow_usecase = Arc::new(JoinSlideshowUseCase::new(
        navigator.clone(),
        message_pusher.clone(),
    ));
    let step_image_usecase = Arc::new(StepImageUseCase::new(
        navigator.clone(),
        message_pusher.clone(),
    ));
    let goto_image_usecase = Arc::new(GotoImageUseCase::new(navigator.clone(), picture_store));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(
        room_repository.clone(),
        message_pusher.clone(),
    ));
    let tick_rooms_usecase = Arc::new(TickRoomsUseCase::new(
        room_repository,
        navigator,
        message_pusher.clone(),
        config.idle_expiry_threshold,
    ));

    // 4. Create and run the server
    let server = Server::new(
        LaunchId::generate(),
        message_pusher,
        join_slideshow_usecase,
        step_image_usecase,
        goto_image_usecase,
        get_rooms_usecase,
        tick_rooms_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
