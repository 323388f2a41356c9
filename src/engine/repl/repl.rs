use std::io::BufRead;
use std::sync::mpsc;

/// Line-driven REPL input.
///
/// A background thread blocks on the reader (stdin by default) and forwards each line to the
/// main thread over a channel. The main thread drains it between frames.
pub struct Repl {
    rx: mpsc::Receiver<String>,
    _thread: std::thread::JoinHandle<()>,
}

impl Repl {
    pub fn new() -> Self {
        Self::from_reader(std::io::BufReader::new(std::io::stdin()))
    }

    pub fn from_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel::<String>();

        let handle = std::thread::spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(cmd) => {
                        if tx.send(cmd).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        log::warn!("REPL input closed: {}", e);
                        break;
                    }
                }
            }
        });

        Self {
            rx,
            _thread: handle,
        }
    }

    /// Drain all currently queued lines without blocking.
    pub fn try_recv_all(&self) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(cmd) = self.rx.try_recv() {
            out.push(cmd);
        }
        out
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}
