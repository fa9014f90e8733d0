//! A [`Link`] backed by an OS serial port, via `tokio_serial`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gkc_errors::LinkError;
use parking_lot::Mutex as SyncMutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio_serial::{SerialPortBuilderExt, SerialStream};

use crate::config::SessionConfig;
use crate::link::{CommIo, Link, ReceiveHandler};

const READ_SCRATCH_LEN: usize = 2048;
const IDLE_SLEEP: Duration = Duration::from_millis(5);

#[derive(Debug, Clone)]
struct SerialSettings {
    port: String,
    baud_rate: u32,
}

/// A [`Link`] implementation backed by a hardware or virtual serial port.
pub struct SerialLink {
    settings: AsyncMutex<Option<SerialSettings>>,
    write_half: AsyncMutex<Option<WriteHalf<SerialStream>>>,
    reader_task: SyncMutex<Option<JoinHandle<()>>>,
    open: Arc<AtomicBool>,
}

impl SerialLink {
    /// Builds an unconfigured, unopened serial link.
    pub fn new() -> Self {
        Self {
            settings: AsyncMutex::new(None),
            write_half: AsyncMutex::new(None),
            reader_task: SyncMutex::new(None),
            open: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Default for SerialLink {
    fn default() -> Self {
        Self::new()
    }
}

async fn reader_loop(
    mut read_half: ReadHalf<SerialStream>,
    on_receive: ReceiveHandler,
    open: Arc<AtomicBool>,
) {
    let mut scratch = vec![0u8; READ_SCRATCH_LEN];
    while open.load(Ordering::Acquire) {
        match read_half.read(&mut scratch).await {
            Ok(0) => break,
            Ok(n) => on_receive(&scratch[..n]),
            Err(err) => {
                tracing::warn!(error = %err, "serial read failed, closing receiver loop");
                break;
            }
        }
        tokio::time::sleep(IDLE_SLEEP).await;
    }
    open.store(false, Ordering::Release);
}

#[async_trait]
impl Link for SerialLink {
    async fn configure(&self, config: &SessionConfig) -> Result<(), LinkError> {
        let port = config
            .get_string("serial_port")
            .map_err(|e| LinkError::DeviceUnavailable(e.to_string()))?
            .to_string();
        let baud_rate = config
            .get_int_or("baud_rate", 115_200)
            .map_err(|e| LinkError::DeviceUnavailable(e.to_string()))?;
        *self.settings.lock().await = Some(SerialSettings { port, baud_rate: baud_rate as u32 });
        Ok(())
    }

    async fn open(&self, on_receive: ReceiveHandler) -> Result<(), LinkError> {
        let settings = self
            .settings
            .lock()
            .await
            .clone()
            .ok_or_else(|| LinkError::DeviceUnavailable("link not configured".to_string()))?;

        // Hardware flow control, no parity, one stop bit.
        let builder = tokio_serial::new(&settings.port, settings.baud_rate)
            .flow_control(tokio_serial::FlowControl::Hardware)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One);

        let stream: SerialStream =
            builder.open_native_async().map_err(|e| LinkError::DeviceUnavailable(e.to_string()))?;
        let (read_half, write_half) = tokio::io::split(stream);

        *self.write_half.lock().await = Some(write_half);
        self.open.store(true, Ordering::Release);

        let open = Arc::clone(&self.open);
        let handle = tokio::spawn(reader_loop(read_half, on_receive, open));
        *self.reader_task.lock() = Some(handle);

        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    async fn close(&self) {
        self.open.store(false, Ordering::Release);
        if let Some(handle) = self.reader_task.lock().take() {
            handle.abort();
        }
        *self.write_half.lock().await = None;
    }

    async fn send(&self, bytes: &[u8]) -> usize {
        if !self.is_open() {
            return 0;
        }
        let mut guard = self.write_half.lock().await;
        match guard.as_mut() {
            Some(write_half) => match write_half.write_all(bytes).await {
                Ok(()) => bytes.len(),
                Err(err) => {
                    tracing::warn!(error = %err, "serial write failed");
                    0
                }
            },
            None => 0,
        }
    }

    fn get_io_type(&self) -> CommIo {
        CommIo::Serial
    }
}
