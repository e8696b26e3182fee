use crate::events::AppEvent;
use crate::sys::socket_path;
use async_channel::Sender;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Open,
    Close,
    Toggle,
    Value,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            "toggle" => Ok(Self::Toggle),
            "value" => Ok(Self::Value),
            other => Err(format!("unknown command '{}'", other)),
        }
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    let path = socket_path();
    // Cleanup old socket if it exists
    if fs_err::metadata(&path).is_ok() {
        let _ = fs_err::remove_file(&path);
    }

    let listener = match UnixListener::bind(&path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", path.display(), e);
            return;
        }
    };
    log::info!("Listening on {}", path.display());

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(handle_client(stream, tx.clone()));
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

async fn handle_client(stream: UnixStream, tx: Sender<AppEvent>) {
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let command = match line.parse::<Command>() {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{}", e);
                continue;
            }
        };

        let event = match command {
            Command::Open => AppEvent::Open,
            Command::Close => AppEvent::Close,
            Command::Toggle => AppEvent::Toggle,
            Command::Value => {
                let (reply_tx, reply_rx) = async_channel::bounded(1);
                if tx.send(AppEvent::Query(reply_tx)).await.is_err() {
                    return;
                }
                if let Ok(value) = reply_rx.recv().await {
                    let reply = format!("{}\n", value);
                    if let Err(e) = write.write_all(reply.as_bytes()).await {
                        log::warn!("Failed to reply to client: {}", e);
                        return;
                    }
                }
                continue;
            }
        };

        if tx.send(event).await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!("open".parse(), Ok(Command::Open));
        assert_eq!(" close \n".parse(), Ok(Command::Close));
        assert_eq!("toggle".parse(), Ok(Command::Toggle));
        assert_eq!("value".parse(), Ok(Command::Value));
        assert!("spin".parse::<Command>().is_err());
    }

    #[tokio::test]
    async fn value_round_trips_through_the_app() {
        let (tx, rx) = async_channel::bounded(4);
        let (client, server) = UnixStream::pair().unwrap();
        tokio::spawn(handle_client(server, tx));

        let app = tokio::spawn(async move {
            let mut seen = Vec::new();
            while let Ok(event) = rx.recv().await {
                match event {
                    AppEvent::Query(reply) => {
                        reply.send("Faro".to_string()).await.unwrap();
                        seen.push("value");
                    }
                    AppEvent::Open => seen.push("open"),
                    other => panic!("unexpected {other:?}"),
                }
            }
            seen
        });

        let (read, mut write) = client.into_split();
        write.write_all(b"open\nbogus\nvalue\n").await.unwrap();
        let mut replies = BufReader::new(read).lines();
        assert_eq!(replies.next_line().await.unwrap().as_deref(), Some("Faro"));
        drop(write);
        drop(replies);

        assert_eq!(app.await.unwrap(), vec!["open", "value"]);
    }
}
