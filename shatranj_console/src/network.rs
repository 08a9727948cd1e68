// Improvement potential: Reconnect with backoff when the socket drops. Currently the client
//   reports the disconnect and stays idle.

use std::fmt;
use std::io;
use std::net::TcpStream;
use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};
use serde::{Serialize, de};
use shatranj_client::wire;
use tungstenite::client::IntoClientRequest;
use tungstenite::http::HeaderValue;
use tungstenite::protocol::Role;
use tungstenite::{Message, WebSocket};
use url::Url;

use crate::event_loop::IncomingEvent;


#[derive(Debug)]
pub enum CommunicationError {
    Socket(tungstenite::Error),
    Serde(serde_json::Error),
    Protocol(String),
}

impl fmt::Display for CommunicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunicationError::Socket(err) => write!(f, "socket error: {}", err),
            CommunicationError::Serde(err) => write!(f, "malformed message: {}", err),
            CommunicationError::Protocol(msg) => write!(f, "protocol error: {}", msg),
        }
    }
}

impl std::error::Error for CommunicationError {}

pub fn write_obj<T, S>(socket: &mut WebSocket<S>, obj: &T) -> Result<(), CommunicationError>
where
    T: Serialize,
    S: io::Read + io::Write,
{
    let serialized = wire::encode_obj(obj).map_err(CommunicationError::Serde)?;
    debug!("Sending {}", serialized);
    socket.send(Message::text(serialized)).map_err(CommunicationError::Socket)
}

// Blocks until the next text frame. Control frames are handled by `tungstenite` and skipped.
pub fn read_obj<T, S>(socket: &mut WebSocket<S>) -> Result<T, CommunicationError>
where
    T: de::DeserializeOwned,
    S: io::Read + io::Write,
{
    loop {
        match socket.read().map_err(CommunicationError::Socket)? {
            Message::Text(text) => {
                debug!("Received {}", text.as_str());
                return wire::parse_obj(text.as_str()).map_err(CommunicationError::Serde);
            }
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            Message::Close(frame) => {
                return Err(CommunicationError::Protocol(format!("Connection closed: {:?}", frame)));
            }
            msg @ Message::Binary(_) => {
                return Err(CommunicationError::Protocol(format!("Expected text, got {:?}", msg)));
            }
        }
    }
}

// TODO: Instead of cloning the socket, consider calling TcpStream.set_nonblocking on the
//   underlying stream and doing read/writes in the same thread.
pub fn clone_websocket(
    socket: &WebSocket<TcpStream>, role: Role,
) -> io::Result<WebSocket<TcpStream>> {
    let stream = socket.get_ref().try_clone()?;
    let config = *socket.get_config();
    Ok(WebSocket::from_raw_socket(stream, role, Some(config)))
}

// Opens `ws://<server_address><path>`. The cookie header, if any, is what the server uses to
// identify the player.
pub fn connect(
    server_address: &str, path: &str, cookie: Option<&str>,
) -> anyhow::Result<(WebSocket<TcpStream>, WebSocket<TcpStream>)> {
    let url = Url::parse(&format!("ws://{}{}", server_address, path))?;
    info!("Connecting to {}...", url);
    let mut request = url.as_str().into_client_request()?;
    if let Some(cookie) = cookie {
        request.headers_mut().insert("Cookie", HeaderValue::from_str(cookie)?);
    }
    let stream = TcpStream::connect(server_address)?;
    let (socket_in, _) = tungstenite::client(request, stream)
        .map_err(|err| anyhow::anyhow!("WebSocket handshake with {} failed: {}", url, err))?;
    let socket_out = clone_websocket(&socket_in, Role::Client)?;
    Ok((socket_in, socket_out))
}

// Forwards every decoded message to the event loop until the socket fails. The failure is
// reported once as `Disconnected`.
pub fn spawn_reader<T>(mut socket: WebSocket<TcpStream>, tx: mpsc::Sender<IncomingEvent<T>>)
where
    T: de::DeserializeOwned + Send + 'static,
{
    thread::spawn(move || {
        loop {
            match read_obj(&mut socket) {
                Ok(ev) => {
                    if tx.send(IncomingEvent::Network(ev)).is_err() {
                        return;
                    }
                }
                Err(CommunicationError::Serde(err)) => {
                    warn!("Dropping malformed message: {}", err);
                }
                Err(err) => {
                    let _ = tx.send(IncomingEvent::Disconnected(err.to_string()));
                    return;
                }
            }
        }
    });
}

// The thread finishes once every sender is dropped and the queue is flushed.
pub fn spawn_writer<T>(
    mut socket: WebSocket<TcpStream>, rx: mpsc::Receiver<T>,
) -> thread::JoinHandle<()>
where
    T: Serialize + Send + 'static,
{
    thread::spawn(move || {
        for ev in rx {
            if let Err(err) = write_obj(&mut socket, &ev) {
                warn!("Cannot send message: {}", err);
                return;
            }
        }
    })
}
